//! Table Data Module
//!
//! Column definitions, edit kinds, and the row storage the prompt edits
//! in place. Cells are kept as display strings at all times.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::utils::strip_ansi;
use crate::error::{Result, TableError};

/// Declared edit type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EditKind {
    #[default]
    None,
    Text,
    Integer,
    Decimal,
}

impl EditKind {
    pub fn is_editable(&self) -> bool {
        !matches!(self, EditKind::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditKind::None => "none",
            EditKind::Text => "text",
            EditKind::Integer => "number",
            EditKind::Decimal => "decimal",
        }
    }
}

impl FromStr for EditKind {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "false" => Ok(EditKind::None),
            "text" => Ok(EditKind::Text),
            "number" | "integer" | "int" => Ok(EditKind::Integer),
            "decimal" => Ok(EditKind::Decimal),
            other => Err(TableError::InvalidConfig(format!(
                "unknown edit kind '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for EditKind {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<EditKind> for String {
    fn from(kind: EditKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column definition: header text, result identifier, edit kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub editable: EditKind,
}

impl Column {
    pub fn new(name: impl Into<String>, value: impl Into<String>, editable: EditKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            editable,
        }
    }
}

/// One result row: column identifier to plain cell text
pub type Record = BTreeMap<String, String>;

/// Columns plus rows of display strings, positionally aligned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, checking identifier uniqueness and row widths
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<String>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(TableError::InvalidConfig(
                "at least one column is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.value.as_str()) {
                return Err(TableError::DuplicateColumn(column.value.clone()));
            }
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RowLength {
                    row: index,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Overwrite a cell; out-of-range positions are ignored
    pub fn set_cell(&mut self, row: usize, column: usize, value: String) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = value;
        }
    }

    /// Snapshot every row as identifier -> plain text, in row order
    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(column, cell)| (column.value.clone(), strip_ansi(cell)))
                    .collect()
            })
            .collect()
    }
}
