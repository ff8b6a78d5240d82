//! Key and Input Event Module
//!
//! Terminal-independent key model consumed by the prompt, plus decoding of
//! crossterm key events into it.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::TableError;

/// A single key press as seen by the navigation controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Backspace,
    Delete,
    Tab,
    Char(char),
    F(u8),
    Other,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Escape => f.write_str("escape"),
            Key::Backspace => f.write_str("backspace"),
            Key::Delete => f.write_str("delete"),
            Key::Tab => f.write_str("tab"),
            Key::Char(' ') => f.write_str("space"),
            Key::Char(c) => write!(f, "{}", c),
            Key::F(n) => write!(f, "f{}", n),
            Key::Other => f.write_str("other"),
        }
    }
}

impl FromStr for Key {
    type Err = TableError;

    /// Parse a key binding name such as `f2`, `space`, `tab` or `e`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let lower = name.to_lowercase();
        let key = match lower.as_str() {
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "escape" | "esc" => Key::Escape,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "tab" => Key::Tab,
            "space" => Key::Char(' '),
            _ => {
                if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    if (1..=12).contains(&n) {
                        return Ok(Key::F(n));
                    }
                }
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => {
                        return Err(TableError::InvalidConfig(format!(
                            "unknown key name '{}'",
                            name
                        )))
                    }
                }
            }
        };
        Ok(key)
    }
}

/// Events delivered by the host input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// The operator committed the line (Enter)
    Line,
    /// Hard abort (Ctrl+C)
    Interrupt,
}

/// Map a crossterm key event into the prompt's input model.
///
/// Releases and repeats are dropped, as are modified keys other than Shift.
pub fn decode_key(key_event: KeyEvent) -> Option<InputEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    match key_event {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(InputEvent::Interrupt),

        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => Some(InputEvent::Line),

        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::SHIFT,
            ..
        } => Some(InputEvent::Key(Key::Char(c))),

        KeyEvent {
            code: KeyCode::Char(_),
            ..
        } => Some(InputEvent::Key(Key::Other)),

        KeyEvent { code, .. } => {
            let key = match code {
                KeyCode::Up => Key::Up,
                KeyCode::Down => Key::Down,
                KeyCode::Left => Key::Left,
                KeyCode::Right => Key::Right,
                KeyCode::Esc => Key::Escape,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Delete => Key::Delete,
                KeyCode::Tab => Key::Tab,
                KeyCode::F(n) => Key::F(n),
                _ => Key::Other,
            };
            Some(InputEvent::Key(key))
        }
    }
}

/// Decode any terminal event; only key presses produce input
pub fn decode_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => decode_key(key_event),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!("f2".parse::<Key>().unwrap(), Key::F(2));
        assert_eq!("F12".parse::<Key>().unwrap(), Key::F(12));
        assert_eq!("space".parse::<Key>().unwrap(), Key::Char(' '));
        assert_eq!("tab".parse::<Key>().unwrap(), Key::Tab);
        assert_eq!("e".parse::<Key>().unwrap(), Key::Char('e'));
        assert_eq!("f".parse::<Key>().unwrap(), Key::Char('f'));
        assert!("f13".parse::<Key>().is_err());
        assert!("ctrl-x".parse::<Key>().is_err());
    }

    #[test]
    fn test_key_display_round_trips_binding_names() {
        assert_eq!(Key::F(2).to_string(), "f2");
        assert_eq!(Key::Char(' ').to_string(), "space");
        assert_eq!(Key::Escape.to_string(), "escape");
    }

    #[test]
    fn test_decode_special_keys() {
        assert_eq!(
            decode_key(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(InputEvent::Line)
        );
        assert_eq!(
            decode_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Interrupt)
        );
        assert_eq!(
            decode_key(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(InputEvent::Key(Key::Escape))
        );
        assert_eq!(
            decode_key(press(KeyCode::F(2), KeyModifiers::NONE)),
            Some(InputEvent::Key(Key::F(2)))
        );
    }

    #[test]
    fn test_decode_characters() {
        assert_eq!(
            decode_key(press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(InputEvent::Key(Key::Char('A')))
        );
        assert_eq!(
            decode_key(press(KeyCode::Char('x'), KeyModifiers::ALT)),
            Some(InputEvent::Key(Key::Other))
        );
    }

    #[test]
    fn test_decode_ignores_releases_and_non_key_events() {
        let mut release = press(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(decode_key(release), None);
        assert_eq!(decode_event(Event::FocusGained), None);
        assert_eq!(decode_event(Event::Resize(80, 24)), None);
    }
}
