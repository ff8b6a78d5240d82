//! table-input - Main Entry Point
//!
//! Runs the table prompt against the terminal. With a path argument the
//! table is loaded from a JSON configuration file; without one a small
//! pricing table is edited. The answer is printed as JSON.

use std::env;
use std::path::PathBuf;
use std::process;

use serde_json::json;
use table_input::cli::{prompt, Column, EditKind, TableConfig};
use table_input::{logging, Result};

#[tokio::main]
async fn main() {
    let log_dir = env::var_os("TABLE_INPUT_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(env::temp_dir);
    logging::init(&log_dir);

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            eprintln!("\nUsage: table-input [config.json]");
            process::exit(1);
        }
    };

    match run(config).await {
        Ok(answer) => println!("{}", answer),
        Err(e) => {
            eprintln!("ERROR: table-input encountered an error: {}", e);
            eprintln!("Please check your terminal compatibility and try again.");
            process::exit(1);
        }
    }
}

/// Config from the first argument, or the built-in pricing demo
fn load_config() -> Result<TableConfig> {
    match env::args_os().nth(1) {
        Some(path) => TableConfig::from_file(&PathBuf::from(path)),
        None => Ok(demo_config()),
    }
}

fn demo_config() -> TableConfig {
    let mut config = TableConfig::new(
        vec![
            Column::new("NF Number", "nf", EditKind::None),
            Column::new("Customer", "customer", EditKind::None),
            Column::new("Quantity", "quantity", EditKind::Integer),
            Column::new("Pricing", "pricing", EditKind::Decimal),
        ],
        vec![
            vec![json!("8288"), json!("Shinji Masumoto"), json!(1), json!(68.03)],
            vec![json!("8289"), json!("João da Silva"), json!(4), json!(125.85)],
        ],
    );
    config.message = "Edit the pricing".to_string();
    config.info_keys =
        "(<Up and Down> to move rows, <Left and Right> to move columns, type to edit)".to_string();
    config.hide_info_keys_when_key_pressed = true;
    config.freeze_columns = 2;
    config
}

async fn run(config: TableConfig) -> Result<String> {
    let outcome = prompt(config, None).await?;
    let answer = serde_json::to_string_pretty(&outcome.to_answer())?;
    Ok(answer)
}
