//! Pagination Module
//!
//! Computes which rows are visible, keeping the row cursor vertically
//! centered until the window reaches either end of the table.

/// Inclusive range of visible row indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub first: usize,
    pub last: usize,
}

impl PageWindow {
    pub fn contains(&self, row: usize) -> bool {
        row >= self.first && row <= self.last
    }

    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }
}

/// Visible window for `row_count` rows with the cursor on `row`.
///
/// Returns `None` for an empty table. A `page_size` of zero is treated as one.
pub fn page_window(page_size: usize, row_count: usize, row: usize) -> Option<PageWindow> {
    if row_count == 0 {
        return None;
    }

    let page_size = page_size.max(1);
    let row = row.min(row_count - 1);
    let half = page_size / 2;

    let first = row.saturating_sub(half);
    let last = (first + page_size - 1).min(row_count - 1);
    // Near the bottom the window comes up short; pull its start back.
    let offset = (page_size - 1) - (last - first);

    Some(PageWindow {
        first: first.saturating_sub(offset),
        last,
    })
}
