//! Cell Formatter Module
//!
//! Per-keystroke input filtering and commit-time coercion, keyed by the
//! column's edit kind. Rejected keystrokes are simply dropped.

use std::sync::OnceLock;

use regex::Regex;

use super::table::EditKind;

fn integer_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([+-]?)0*([0-9]+)").expect("static integer pattern"))
}

/// Leading base-10 integer of `raw`, kept as digits so no width limit
/// applies. Anything after the digits is ignored; no digits gives `0`.
fn canonical_integer(raw: &str) -> String {
    let Some(caps) = integer_prefix().captures(raw.trim()) else {
        return "0".to_string();
    };
    let digits = &caps[2];
    if digits == "0" || &caps[1] != "-" {
        digits.to_string()
    } else {
        format!("-{}", digits)
    }
}

/// Filters keystrokes and normalizes finished cell text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFormatter {
    decimal_point: char,
    decimal_places: usize,
}

impl Default for CellFormatter {
    fn default() -> Self {
        Self {
            decimal_point: '.',
            decimal_places: 2,
        }
    }
}

impl CellFormatter {
    pub fn new(decimal_point: char, decimal_places: usize) -> Self {
        Self {
            decimal_point,
            decimal_places,
        }
    }

    pub fn decimal_point(&self) -> char {
        self.decimal_point
    }

    fn is_separator(&self, ch: char) -> bool {
        ch == '.' || ch == ',' || ch == self.decimal_point
    }

    /// Apply one typed character to the pending cell text.
    ///
    /// Returns the new text, or `None` when the keystroke is rejected for
    /// this edit kind.
    pub fn accept(&self, kind: EditKind, pending: &str, ch: char) -> Option<String> {
        let accepted = match kind {
            EditKind::None => None,
            EditKind::Integer => ch.is_ascii_digit().then_some(ch),
            EditKind::Text => (ch.is_ascii_alphanumeric() || ch.is_whitespace()).then_some(ch),
            EditKind::Decimal => {
                if ch.is_ascii_digit() {
                    Some(ch)
                } else if self.is_separator(ch) && !pending.chars().any(|c| self.is_separator(c)) {
                    Some(self.decimal_point)
                } else {
                    None
                }
            }
        }?;

        let mut next = String::with_capacity(pending.len() + accepted.len_utf8());
        next.push_str(pending);
        next.push(accepted);
        Some(next)
    }

    /// Canonical stored form of a finished cell.
    ///
    /// Integers and decimals that are empty or unparsable become zero.
    pub fn coerce(&self, kind: EditKind, raw: &str) -> String {
        match kind {
            EditKind::None | EditKind::Text => raw.to_string(),
            EditKind::Integer => canonical_integer(raw),
            EditKind::Decimal => {
                let normalized = raw.trim().replace(self.decimal_point, ".");
                let value = normalized
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .unwrap_or(0.0);
                let formatted = format!("{:.*}", self.decimal_places, value);
                if self.decimal_point == '.' {
                    formatted
                } else {
                    formatted.replace('.', &self.decimal_point.to_string())
                }
            }
        }
    }
}
