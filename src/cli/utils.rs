//! CLI Utilities Module
//!
//! Text measurement and box-drawing helpers used by the renderer.
//! Cells may carry ANSI styling, so widths are always measured on the
//! stripped text.

use std::sync::OnceLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

fn sgr_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("static SGR pattern"))
}

/// Remove ANSI SGR (color/style) sequences from text
pub fn strip_ansi(text: &str) -> String {
    sgr_pattern().replace_all(text, "").into_owned()
}

/// Terminal column width of text, ignoring styling sequences.
///
/// Wide (CJK) characters take two columns, combining marks none.
pub fn visible_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(text).as_str())
}

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
    Center,
}

/// Pad text to specified visible width
pub fn pad_text(text: &str, width: usize, align: TextAlign) -> String {
    let current = visible_width(text);
    if current >= width {
        return text.to_string();
    }

    let padding = width - current;
    match align {
        TextAlign::Left => format!("{}{}", text, " ".repeat(padding)),
        TextAlign::Right => format!("{}{}", " ".repeat(padding), text),
        TextAlign::Center => {
            let left_pad = padding / 2;
            let right_pad = padding - left_pad;
            format!("{}{}{}", " ".repeat(left_pad), text, " ".repeat(right_pad))
        }
    }
}

fn border_line(widths: &[usize], left: char, joint: char, right: char) -> String {
    let segments = widths
        .iter()
        .map(|&w| "─".repeat(w + 2))
        .collect::<Vec<_>>()
        .join(joint.to_string().as_str());
    format!("{}{}{}", left, segments, right)
}

fn content_line(cells: &[String], widths: &[usize]) -> String {
    let body = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            pad_text(cell, w, TextAlign::Left)
        })
        .collect::<Vec<_>>()
        .join(" │ ");
    format!("│ {} │", body)
}

/// Draw a boxed table with a header row
///
/// Returns one string per output line. Rows shorter than the header are
/// padded with empty cells; extra cells are dropped.
pub fn create_table(headers: &[String], rows: &[Vec<String>]) -> Vec<String> {
    if headers.is_empty() {
        return vec![];
    }

    let mut col_widths = headers.iter().map(|h| visible_width(h)).collect::<Vec<_>>();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(visible_width(cell));
            }
        }
    }

    let mut result = Vec::with_capacity(rows.len() + 4);
    result.push(border_line(&col_widths, '┌', '┬', '┐'));
    result.push(content_line(headers, &col_widths));
    result.push(border_line(&col_widths, '├', '┼', '┤'));
    for row in rows {
        result.push(content_line(row, &col_widths));
    }
    result.push(border_line(&col_widths, '└', '┴', '┘'));

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[43m 5 \x1b[0m"), " 5 ");
        assert_eq!(strip_ansi("\x1b[1;32mok\x1b[39m"), "ok");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn test_visible_width_ignores_styling() {
        assert_eq!(visible_width("\x1b[34mabc\x1b[0m"), 3);
        assert_eq!(visible_width("João"), 4);
    }

    #[test]
    fn test_visible_width_counts_terminal_columns() {
        assert_eq!(visible_width("数量"), 4);
        assert_eq!(visible_width("\x1b[33m数量\x1b[0m"), 4);
        assert_eq!(visible_width("e\u{301}"), 1);
    }

    #[test]
    fn test_create_table_aligns_wide_cells() {
        let headers = vec!["数量".to_string(), "Id".to_string()];
        let rows = vec![vec!["12".to_string(), "1".to_string()]];

        let table = create_table(&headers, &rows);
        assert_eq!(table[0], "┌──────┬────┐");
        assert_eq!(table[1], "│ 数量 │ Id │");
        assert_eq!(table[3], "│ 12   │ 1  │");
        for line in &table {
            assert_eq!(visible_width(line), visible_width(&table[0]));
        }
    }

    #[test]
    fn test_pad_text() {
        assert_eq!(pad_text("hello", 10, TextAlign::Left), "hello     ");
        assert_eq!(pad_text("hello", 10, TextAlign::Right), "     hello");
        assert_eq!(pad_text("hello", 10, TextAlign::Center), "  hello   ");
        assert_eq!(pad_text("\x1b[33mhi\x1b[0m", 4, TextAlign::Left), "\x1b[33mhi\x1b[0m  ");
    }

    #[test]
    fn test_create_table() {
        let headers = vec!["Name".to_string(), "Age".to_string()];
        let rows = vec![
            vec!["Alice".to_string(), "30".to_string()],
            vec!["Bob".to_string(), "25".to_string()],
        ];

        let table = create_table(&headers, &rows);
        assert_eq!(table.len(), 6);
        assert_eq!(table[0], "┌───────┬─────┐");
        assert_eq!(table[1], "│ Name  │ Age │");
        assert_eq!(table[3], "│ Alice │ 30  │");
        assert_eq!(table[5], "└───────┴─────┘");
    }

    #[test]
    fn test_create_table_without_rows_still_draws_header() {
        let headers = vec!["Only".to_string()];
        let table = create_table(&headers, &[]);
        assert_eq!(table.len(), 4);
        assert!(table[1].contains("Only"));
        assert!(create_table(&[], &[]).is_empty());
    }
}
