//! table-input - interactive table editing prompt for the terminal
//!
//! A caller supplies column definitions (read-only or editable as text,
//! integer, or decimal) and row data. The operator moves around the grid
//! with the arrow keys, edits cells in place, and finally submits or
//! cancels the whole table.
//!
//! # Features
//!
//! - **Navigation**: row cursor clamps at the ends, column cursor wraps
//!   around the unfrozen columns
//! - **Typed editing**: keystrokes are filtered per column kind, and cells
//!   are coerced to canonical integers or fixed-point decimals on commit
//! - **Paging**: only a window of rows around the cursor is drawn
//! - **Two-step confirmation**: Escape twice to cancel, Enter twice to
//!   force a submission the validator rejected
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use table_input::cli::{prompt, Column, EditKind, TableConfig};
//!
//! # async fn demo() -> table_input::Result<()> {
//! let config = TableConfig::new(
//!     vec![
//!         Column::new("Item", "item", EditKind::None),
//!         Column::new("Quantity", "quantity", EditKind::Integer),
//!     ],
//!     vec![vec![json!("Widget"), json!(3)]],
//! );
//!
//! let outcome = prompt(config, None).await?;
//! println!("{}", serde_json::to_string(&outcome.to_answer())?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod logging;

// Re-export commonly used types for convenience
pub use cli::{prompt, Column, EditKind, Outcome, TableConfig, TablePrompt};
pub use error::{Result, TableError};
