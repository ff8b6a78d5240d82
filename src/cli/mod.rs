//! Table Prompt Module
//!
//! An interactive, keyboard-driven table editor that runs inside a
//! terminal prompt session.
//!
//! ## Module Structure
//!
//! - `table` - Column definitions, edit kinds and row storage
//! - `formatter` - Per-keystroke filtering and commit-time coercion
//! - `pagination` - Visible row window around the cursor
//! - `cursor` - Cursor, navigate/edit mode and confirmation flags
//! - `keys` - Key model and crossterm key decoding
//! - `navigation` - Key press state machine
//! - `protocol` - Submit/cancel confirmation and session outcome
//! - `renderer` - Highlight decisions and frame rendering
//! - `utils` - Box drawing and ANSI helpers
//! - `config` - Prompt configuration
//! - `terminal` - crossterm host, cursor guard and input reader
//! - `prompter` - Session orchestration

pub mod config;
pub mod cursor;
pub mod formatter;
pub mod keys;
pub mod navigation;
pub mod pagination;
pub mod prompter;
pub mod protocol;
pub mod renderer;
pub mod table;
pub mod terminal;
pub mod utils;

// Re-export main types for convenience
pub use config::TableConfig;
pub use cursor::{Cursor, Mode, TableState};
pub use formatter::CellFormatter;
pub use keys::{InputEvent, Key};
pub use navigation::Navigator;
pub use pagination::{page_window, PageWindow};
pub use prompter::{prompt, PromptHost, TablePrompt, Validator};
pub use protocol::{Answer, ConfirmPolicy, Notice, Outcome, SubmitProtocol, Transition};
pub use renderer::{Frame, Highlight, Renderer};
pub use table::{Column, EditKind, Record, Table};
pub use terminal::{spawn_input_reader, TerminalHost};
