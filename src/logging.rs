//! Tracing setup for the table prompt.
//!
//! The prompt owns the terminal while it runs (raw mode, in-place redraws),
//! so logs never go to the console. They are written to a daily rolling
//! file instead.
//!
//! Configure verbosity via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - every key transition
//! - `RUST_LOG=table_input::cli::protocol=debug` - submit/cancel decisions only

use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File name prefix used by the rolling appender.
pub const LOG_FILE_NAME: &str = "table-input.log";

/// Initialize the global subscriber, writing to `log_dir/table-input.log.<date>`.
///
/// Calling this twice is harmless; the second registration is ignored.
pub fn init(log_dir: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    let _ = tracing_subscriber::registry().with(file_layer).try_init();
}
