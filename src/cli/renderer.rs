//! Renderer Module
//!
//! Projects the table state into printable text. Which cell gets which
//! highlight is decided by [`cell_highlight`] without touching any
//! styling; [`Renderer`] then turns decisions into terminal colors and
//! hands the grid to the box-drawing routine.

use crossterm::style::{style, Color, Stylize};

use super::config::TableConfig;
use super::cursor::TableState;
use super::pagination::page_window;
use super::protocol::Notice;
use super::utils::create_table;

/// Semantic highlight of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Plain,
    /// Cursor on a read-only cell
    Selected,
    /// Cursor on an editable cell while navigating
    Editable,
    /// Cursor on the cell being edited
    Editing,
    /// Frozen label cell of the cursor row
    RowLabel,
}

pub fn cell_highlight(
    state: &TableState,
    row: usize,
    column: usize,
    highlight_row_label: bool,
) -> Highlight {
    let cursor = state.cursor();
    let editable = state
        .table()
        .column(column)
        .map(|c| c.editable.is_editable())
        .unwrap_or(false);

    if cursor.row == row && cursor.column == column {
        if !editable {
            Highlight::Selected
        } else if state.is_editing() {
            Highlight::Editing
        } else {
            Highlight::Editable
        }
    } else if highlight_row_label && cursor.row == row && column < state.freeze_columns() {
        Highlight::RowLabel
    } else {
        Highlight::Plain
    }
}

/// Which info texts are still shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoVisibility {
    pub message: bool,
    pub keys: bool,
}

impl Default for InfoVisibility {
    fn default() -> Self {
        Self {
            message: true,
            keys: true,
        }
    }
}

/// One screen update: main content and the transient bottom area
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub content: String,
    pub bottom: String,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    message: String,
    info_message: String,
    info_keys: String,
    escape_message: String,
    confirm_message: String,
    page_size: usize,
    highlight_row_label: bool,
    selected_color: Color,
    editable_color: Color,
    editing_color: Color,
}

impl Renderer {
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            message: config.message.clone(),
            info_message: config.info_message.clone(),
            info_keys: config.info_keys.clone(),
            escape_message: config.escape_message.clone(),
            confirm_message: config.confirm_message.clone(),
            page_size: config.page_size,
            highlight_row_label: config.highlight_row_label,
            selected_color: config.get_selected_color(),
            editable_color: config.get_editable_color(),
            editing_color: config.get_editing_color(),
        }
    }

    pub fn render(&self, state: &TableState, info: InfoVisibility, notice: Option<&Notice>) -> Frame {
        let mut content = format!("{} {}", "?".green(), self.message.as_str().bold());
        if info.message && !self.info_message.is_empty() {
            content.push(' ');
            content.push_str(&self.info_message);
        }
        if info.keys && !self.info_keys.is_empty() {
            content.push(' ');
            content.push_str(&self.info_keys);
        }

        content.push_str("\n\n");
        content.push_str(&self.table_lines(state).join("\n"));

        Frame {
            content,
            bottom: notice.map(|n| self.notice_text(n)).unwrap_or_default(),
        }
    }

    fn table_lines(&self, state: &TableState) -> Vec<String> {
        let table = state.table();
        let headers = table
            .columns()
            .iter()
            .map(|c| c.name.clone())
            .collect::<Vec<_>>();

        let window = page_window(self.page_size, table.row_count(), state.cursor().row);
        let rows = match window {
            Some(window) => (window.first..=window.last)
                .map(|row| {
                    table.rows()[row]
                        .iter()
                        .enumerate()
                        .map(|(column, cell)| {
                            let editable = table.columns()[column].editable.is_editable();
                            let text = if editable {
                                format!(" {} ", cell)
                            } else {
                                cell.clone()
                            };
                            let highlight =
                                cell_highlight(state, row, column, self.highlight_row_label);
                            self.style_cell(text, highlight)
                        })
                        .collect()
                })
                .collect::<Vec<Vec<String>>>(),
            None => Vec::new(),
        };

        create_table(&headers, &rows)
    }

    fn style_cell(&self, text: String, highlight: Highlight) -> String {
        match highlight {
            Highlight::Plain => text,
            Highlight::Selected => style(text).with(self.selected_color).to_string(),
            Highlight::Editable => style(text).on(self.editable_color).to_string(),
            Highlight::Editing => style(text).on(self.editing_color).to_string(),
            Highlight::RowLabel => style(text).with(self.selected_color).bold().to_string(),
        }
    }

    pub fn notice_text(&self, notice: &Notice) -> String {
        match notice {
            Notice::EscapeWarning => self.escape_message.as_str().red().to_string(),
            Notice::Confirm { reason: Some(reason) } => format!(
                "{}\n{}",
                reason.as_str().red(),
                self.confirm_message.as_str().green()
            ),
            Notice::Confirm { reason: None } => self.confirm_message.as_str().green().to_string(),
        }
    }
}
