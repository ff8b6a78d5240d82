//! Table Prompt Configuration
//!
//! This module holds the caller-facing configuration surface: columns and
//! rows, paging, number formatting, messages, key binding, confirmation
//! policy, and highlight colors. Keys are camelCase so existing prompt
//! definitions load as-is.

use std::fs;
use std::path::Path;

use crossterm::style::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::formatter::CellFormatter;
use super::keys::Key;
use super::protocol::ConfirmPolicy;
use super::table::{Column, Table};
use crate::error::{Result, TableError};

/// Configuration for one table prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    pub message: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
    pub page_size: usize,
    pub freeze_columns: usize,
    pub decimal_point: char,
    pub decimal_places: usize,
    pub info_message: String,
    pub hide_info_when_key_pressed: bool,
    pub info_keys: String,
    pub hide_info_keys_when_key_pressed: bool,
    pub escape_message: String,
    pub confirm_message: String,
    pub edit_key: Option<String>,
    pub confirm_policy: ConfirmPolicy,
    pub highlight_row_label: bool,
    pub selected_color: String,
    pub editable_color: String,
    pub editing_color: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            message: String::new(),
            columns: Vec::new(),
            rows: Vec::new(),
            page_size: 5,
            freeze_columns: 0,
            decimal_point: '.',
            decimal_places: 2,
            info_message: String::new(),
            hide_info_when_key_pressed: false,
            info_keys: String::new(),
            hide_info_keys_when_key_pressed: false,
            escape_message: "Press ESC again to exit!".to_string(),
            confirm_message: "Press ENTER again to confirm!".to_string(),
            edit_key: None,
            confirm_policy: ConfirmPolicy::default(),
            highlight_row_label: false,
            selected_color: "Yellow".to_string(),
            editable_color: "Yellow".to_string(),
            editing_color: "Blue".to_string(),
        }
    }
}

impl TableConfig {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Check every constraint that does not depend on runtime input
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(TableError::InvalidConfig(
                "pageSize must be at least 1".to_string(),
            ));
        }
        if !matches!(self.decimal_point, '.' | ',') {
            return Err(TableError::InvalidConfig(format!(
                "decimalPoint must be '.' or ',', got '{}'",
                self.decimal_point
            )));
        }
        if !self.columns.is_empty() && self.freeze_columns >= self.columns.len() {
            return Err(TableError::InvalidConfig(format!(
                "freezeColumns ({}) must be less than the column count ({})",
                self.freeze_columns,
                self.columns.len()
            )));
        }
        self.edit_key()?;
        self.build_table().map(|_| ())
    }

    /// Parsed edit key binding, if one is configured
    pub fn edit_key(&self) -> Result<Option<Key>> {
        self.edit_key.as_deref().map(str::parse::<Key>).transpose()
    }

    pub fn formatter(&self) -> CellFormatter {
        CellFormatter::new(self.decimal_point, self.decimal_places)
    }

    /// Build the editable table, converting every cell to display text
    pub fn build_table(&self) -> Result<Table> {
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        Table::new(self.columns.clone(), rows)
    }

    pub fn get_selected_color(&self) -> Color {
        parse_color(&self.selected_color)
    }

    pub fn get_editable_color(&self) -> Color {
        parse_color(&self.editable_color)
    }

    pub fn get_editing_color(&self) -> Color {
        parse_color(&self.editing_color)
    }
}

/// Display text for a JSON cell value
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Map a color name to a terminal color, falling back to yellow
pub fn parse_color(name: &str) -> Color {
    match name {
        "Black" => Color::Black,
        "DarkBlue" => Color::DarkBlue,
        "Blue" => Color::Blue,
        "Cyan" => Color::Cyan,
        "Gray" | "Grey" => Color::Grey,
        "Magenta" => Color::Magenta,
        "Green" => Color::Green,
        "Red" => Color::Red,
        "White" => Color::White,
        "Yellow" => Color::Yellow,
        _ => Color::Yellow,
    }
}
