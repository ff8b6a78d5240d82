//! Navigation Controller Module
//!
//! Applies one key press to the table state and reports the resulting
//! transition. Key handling never fails; keys that mean nothing in the
//! current mode are ignored.
//!
//! | Mode       | Key                       | Effect                              |
//! |------------|---------------------------|-------------------------------------|
//! | Navigating | arrows                    | move cursor                         |
//! | Navigating | Escape                    | two-step cancel                     |
//! | Navigating | edit key / printable char | enter edit (char is then typed)     |
//! | Editing    | printable char            | filter and append                   |
//! | Editing    | Backspace                 | trim one char, commit when empty    |
//! | Editing    | Delete                    | clear and commit                    |
//! | Editing    | Escape                    | revert and leave                    |
//! | Editing    | edit key                  | commit and leave                    |

use tracing::debug;

use super::cursor::TableState;
use super::formatter::CellFormatter;
use super::keys::Key;
use super::protocol::{escape_pressed, Transition};

/// Coerce the cell being edited to its canonical form and leave edit mode
pub fn commit_edit(state: &mut TableState, formatter: &CellFormatter) {
    let kind = match state.edit_session() {
        Some(session) => session.kind,
        None => return,
    };
    let raw = state.current_value().unwrap_or("").to_string();
    state.set_current_value(formatter.coerce(kind, &raw));
    state.exit_edit(true);
}

#[derive(Debug, Clone, Copy)]
pub struct Navigator {
    formatter: CellFormatter,
    edit_key: Option<Key>,
}

impl Navigator {
    pub fn new(formatter: CellFormatter, edit_key: Option<Key>) -> Self {
        Self {
            formatter,
            edit_key,
        }
    }

    fn is_edit_key(&self, key: Key) -> bool {
        self.edit_key == Some(key)
    }

    /// Apply a key press and return what the session should do next
    pub fn handle_key(&self, state: &mut TableState, key: Key) -> Transition {
        if key != Key::Escape {
            state.confirm.escape_armed = false;
        }
        state.confirm.enter_armed = false;

        let transition = if state.is_editing() {
            self.edit(state, key);
            Transition::render()
        } else {
            self.navigate(state, key)
        };

        debug!(
            %key,
            row = state.cursor().row,
            column = state.cursor().column,
            editing = state.is_editing(),
            "key handled"
        );
        transition
    }

    fn navigate(&self, state: &mut TableState, key: Key) -> Transition {
        match key {
            Key::Up => state.move_up(),
            Key::Down => state.move_down(),
            Key::Left => state.move_left(),
            Key::Right => state.move_right(),
            Key::Escape => return escape_pressed(state),
            key if self.is_edit_key(key) => {
                state.enter_edit_if_editable();
            }
            Key::Char(_) if self.edit_key.is_none() => {
                // Without a dedicated edit key, typing on an editable cell
                // starts editing with that character.
                if state.enter_edit_if_editable() {
                    self.edit(state, key);
                }
            }
            _ => {}
        }
        Transition::render()
    }

    fn edit(&self, state: &mut TableState, key: Key) {
        let kind = match state.edit_session() {
            Some(session) => session.kind,
            None => return,
        };

        match key {
            Key::Escape => state.exit_edit(false),
            key if self.is_edit_key(key) => commit_edit(state, &self.formatter),
            Key::Delete => {
                state.set_current_value(String::new());
                commit_edit(state, &self.formatter);
            }
            Key::Backspace => {
                let mut value = state.current_value().unwrap_or("").to_string();
                value.pop();
                state.clear_first_keystroke();
                let empty = value.is_empty();
                state.set_current_value(value);
                if empty {
                    commit_edit(state, &self.formatter);
                }
            }
            Key::Char(c) => {
                if let Some(next) = self.formatter.accept(kind, state.pending_value(), c) {
                    state.set_current_value(next);
                    state.clear_first_keystroke();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::protocol::{Notice, Outcome};
    use crate::cli::table::{Column, EditKind, Table};

    fn state() -> TableState {
        let columns = vec![
            Column::new("Id", "id", EditKind::None),
            Column::new("Qty", "qty", EditKind::Integer),
            Column::new("Price", "price", EditKind::Decimal),
            Column::new("Note", "note", EditKind::Text),
        ];
        let rows = vec![
            vec!["1".into(), "5".into(), "2.50".into(), "first".into()],
            vec!["2".into(), "7".into(), "3.00".into(), "second".into()],
        ];
        TableState::new(Table::new(columns, rows).unwrap(), 1)
    }

    fn press(nav: &Navigator, state: &mut TableState, keys: &[Key]) {
        for &key in keys {
            nav.handle_key(state, key);
        }
    }

    fn typed(text: &str) -> Vec<Key> {
        text.chars().map(Key::Char).collect()
    }

    #[test]
    fn test_typing_starts_edit_and_replaces_content() {
        let nav = Navigator::new(CellFormatter::default(), None);
        let mut state = state();

        press(&nav, &mut state, &typed("12"));
        assert!(state.is_editing());
        assert_eq!(state.current_value(), Some("12"));
    }

    #[test]
    fn test_rejected_first_key_keeps_replace_semantics() {
        let nav = Navigator::new(CellFormatter::default(), None);
        let mut state = state();

        press(&nav, &mut state, &typed("x"));
        assert!(state.is_editing());
        assert_eq!(state.current_value(), Some("5"));

        press(&nav, &mut state, &typed("3"));
        assert_eq!(state.current_value(), Some("3"));
    }

    #[test]
    fn test_non_digits_never_change_integer_cell() {
        let nav = Navigator::new(CellFormatter::default(), None);
        let mut state = state();

        press(&nav, &mut state, &typed("4"));
        press(&nav, &mut state, &typed("a.-,!b "));
        assert_eq!(state.current_value(), Some("4"));
    }

    #[test]
    fn test_escape_reverts_edit() {
        let nav = Navigator::new(CellFormatter::default(), None);
        let mut state = state();

        press(&nav, &mut state, &typed("987"));
        press(&nav, &mut state, &[Key::Escape]);
        assert!(!state.is_editing());
        assert_eq!(state.current_value(), Some("5"));
        assert!(!state.confirm.escape_armed);
    }

    #[test]
    fn test_backspace_to_empty_commits_zero() {
        let nav = Navigator::new(CellFormatter::default(), None);
        let mut state = state();

        press(&nav, &mut state, &typed("12"));
        press(&nav, &mut state, &[Key::Backspace]);
        assert_eq!(state.current_value(), Some("1"));
        assert!(state.is_editing());

        press(&nav, &mut state, &[Key::Backspace]);
        assert!(!state.is_editing());
        assert_eq!(state.current_value(), Some("0"));
    }

    #[test]
    fn test_backspace_right_after_edit_key_trims_existing_value() {
        let nav = Navigator::new(CellFormatter::default(), Some(Key::F(2)));
        let mut state = state();

        press(&nav, &mut state, &[Key::Left, Key::F(2), Key::Backspace]);
        assert_eq!(state.current_value(), Some("firs"));
        press(&nav, &mut state, &typed("t"));
        assert_eq!(state.current_value(), Some("first"));
    }

    #[test]
    fn test_delete_clears_and_commits() {
        let nav = Navigator::new(CellFormatter::default(), None);
        let mut state = state();

        press(&nav, &mut state, &[Key::Right]);
        press(&nav, &mut state, &typed("9"));
        press(&nav, &mut state, &[Key::Delete]);
        assert!(!state.is_editing());
        assert_eq!(state.current_value(), Some("0.00"));
    }

    #[test]
    fn test_decimal_second_separator_ignored() {
        let nav = Navigator::new(CellFormatter::default(), Some(Key::F(2)));
        let mut state = state();

        press(&nav, &mut state, &[Key::Right, Key::F(2)]);
        press(&nav, &mut state, &typed("3.5.,1"));
        assert_eq!(state.current_value(), Some("3.51"));

        press(&nav, &mut state, &[Key::F(2)]);
        assert!(!state.is_editing());
        assert_eq!(state.current_value(), Some("3.51"));
    }

    #[test]
    fn test_edit_key_commit_formats_decimal() {
        let nav = Navigator::new(CellFormatter::default(), Some(Key::F(2)));
        let mut state = state();

        press(&nav, &mut state, &[Key::Right, Key::F(2)]);
        press(&nav, &mut state, &typed("3"));
        press(&nav, &mut state, &[Key::F(2)]);
        assert_eq!(state.current_value(), Some("3.00"));
    }

    #[test]
    fn test_dedicated_edit_key_ignores_plain_typing_while_navigating() {
        let nav = Navigator::new(CellFormatter::default(), Some(Key::F(2)));
        let mut state = state();

        press(&nav, &mut state, &typed("9"));
        assert!(!state.is_editing());
        assert_eq!(state.current_value(), Some("5"));
    }

    #[test]
    fn test_text_column_accepts_words() {
        let nav = Navigator::new(CellFormatter::default(), None);
        let mut state = state();

        press(&nav, &mut state, &[Key::Left]);
        press(&nav, &mut state, &typed("new note!"));
        assert_eq!(state.current_value(), Some("new note"));
    }

    #[test]
    fn test_arrows_ignored_while_editing() {
        let nav = Navigator::new(CellFormatter::default(), None);
        let mut state = state();

        press(&nav, &mut state, &typed("1"));
        press(&nav, &mut state, &[Key::Down, Key::Right]);
        assert_eq!(state.cursor().row, 0);
        assert_eq!(state.cursor().column, 1);
        assert!(state.is_editing());
    }

    #[test]
    fn test_read_only_column_ignores_typing() {
        let columns = vec![
            Column::new("Id", "id", EditKind::None),
            Column::new("Name", "name", EditKind::None),
        ];
        let rows = vec![vec!["1".to_string(), "a".to_string()]];
        let mut state = TableState::new(Table::new(columns, rows).unwrap(), 0);
        let nav = Navigator::new(CellFormatter::default(), None);

        press(&nav, &mut state, &typed("zz"));
        assert!(!state.is_editing());
        assert_eq!(state.current_value(), Some("1"));
    }

    #[test]
    fn test_escape_warning_cleared_by_other_key() {
        let nav = Navigator::new(CellFormatter::default(), None);
        let mut state = state();

        let first = nav.handle_key(&mut state, Key::Escape);
        assert_eq!(first, Transition::Render(Some(Notice::EscapeWarning)));

        nav.handle_key(&mut state, Key::Down);
        assert!(!state.confirm.escape_armed);

        let again = nav.handle_key(&mut state, Key::Escape);
        assert_eq!(again, Transition::Render(Some(Notice::EscapeWarning)));
        let cancel = nav.handle_key(&mut state, Key::Escape);
        assert_eq!(cancel, Transition::Finish(Outcome::Cancelled));
    }

    #[test]
    fn test_key_press_disarms_enter() {
        let nav = Navigator::new(CellFormatter::default(), None);
        let mut state = state();
        state.confirm.enter_armed = true;

        nav.handle_key(&mut state, Key::Up);
        assert!(!state.confirm.enter_armed);
    }
}
