//! Cursor and Mode State Module
//!
//! Holds the grid cursor, the navigate/edit mode with its entry snapshot,
//! and the one-shot confirmation flags. The table's cell values are the
//! only other mutable data, and they live here too so that a single owner
//! mutates everything.

use super::table::{Column, EditKind, Table};

/// Zero-based grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub column: usize,
}

/// State carried while a cell is being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub kind: EditKind,
    /// Cell content at entry, restored on Escape
    pub value_before_editing: String,
    /// The next accepted character replaces the cell instead of appending
    pub first_keystroke: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigating,
    Editing(EditSession),
}

/// Two-step confirmation flags; any unrelated key disarms them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confirmations {
    pub escape_armed: bool,
    pub enter_armed: bool,
}

impl Confirmations {
    pub fn disarm(&mut self) {
        self.escape_armed = false;
        self.enter_armed = false;
    }
}

/// Complete mutable state of one prompt session
#[derive(Debug, Clone)]
pub struct TableState {
    table: Table,
    cursor: Cursor,
    mode: Mode,
    freeze_columns: usize,
    pub confirm: Confirmations,
}

impl TableState {
    pub fn new(table: Table, freeze_columns: usize) -> Self {
        let freeze_columns = freeze_columns.min(table.column_count().saturating_sub(1));
        Self {
            table,
            cursor: Cursor {
                row: 0,
                column: freeze_columns,
            },
            mode: Mode::Navigating,
            freeze_columns,
            confirm: Confirmations::default(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn freeze_columns(&self) -> usize {
        self.freeze_columns
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        match &self.mode {
            Mode::Editing(session) => Some(session),
            Mode::Navigating => None,
        }
    }

    pub fn current_column(&self) -> Option<&Column> {
        self.table.column(self.cursor.column)
    }

    pub fn current_value(&self) -> Option<&str> {
        self.table.cell(self.cursor.row, self.cursor.column)
    }

    pub fn set_current_value(&mut self, value: String) {
        self.table.set_cell(self.cursor.row, self.cursor.column, value);
    }

    /// Text that the next keystroke builds on: empty before the first
    /// accepted character of an edit, the cell content afterwards.
    pub fn pending_value(&self) -> &str {
        match &self.mode {
            Mode::Editing(session) if session.first_keystroke => "",
            _ => self.current_value().unwrap_or(""),
        }
    }

    pub fn clear_first_keystroke(&mut self) {
        if let Mode::Editing(session) = &mut self.mode {
            session.first_keystroke = false;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor.row + 1 < self.table.row_count() {
            self.cursor.row += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor.row = self.cursor.row.saturating_sub(1);
    }

    pub fn move_left(&mut self) {
        self.cursor.column = if self.cursor.column > self.freeze_columns {
            self.cursor.column - 1
        } else {
            self.table.column_count() - 1
        };
    }

    pub fn move_right(&mut self) {
        self.cursor.column = if self.cursor.column + 1 < self.table.column_count() {
            self.cursor.column + 1
        } else {
            self.freeze_columns
        };
    }

    /// Switch to editing when the current column is editable.
    ///
    /// Returns whether edit mode was entered.
    pub fn enter_edit_if_editable(&mut self) -> bool {
        if self.is_editing() {
            return false;
        }

        let kind = match self.current_column() {
            Some(column) if column.editable.is_editable() => column.editable,
            _ => return false,
        };
        let value_before_editing = match self.current_value() {
            Some(value) => value.to_string(),
            None => return false,
        };

        self.mode = Mode::Editing(EditSession {
            kind,
            value_before_editing,
            first_keystroke: true,
        });
        true
    }

    /// Leave edit mode, restoring the entry snapshot unless `commit` is set
    pub fn exit_edit(&mut self, commit: bool) {
        let mode = std::mem::replace(&mut self.mode, Mode::Navigating);
        if let Mode::Editing(session) = mode {
            if !commit {
                self.set_current_value(session.value_before_editing);
            }
        }
    }
}
