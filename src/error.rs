//! Error types for table prompt construction and terminal I/O.
//!
//! Key handling itself never fails: rejected keystrokes are dropped and
//! malformed numbers coerce to zero. Errors only come from building a
//! table out of a bad configuration, from the terminal, or from the input
//! stream going away mid-session.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),

    #[error("duplicate column identifier '{0}'")]
    DuplicateColumn(String),

    #[error("row {row} has {found} cells but the table has {expected} columns")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("input stream closed before the prompt finished")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, TableError>;
