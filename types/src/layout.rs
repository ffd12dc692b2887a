//! Greedy row packing for the build panel.
//!
//! Labels are placed left to right in input order. A label moves to a new row
//! only when the current row already has content and the label (plus the
//! separator) would overflow. A label wider than the row on its own still gets
//! a row to itself; nothing is dropped or truncated.

use thiserror::Error;
use unicode_width::UnicodeWidthStr;

/// Separator drawn between labels that share a row.
pub const ROW_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("row width must be positive")]
    ZeroWidth,
}

/// Terminal column width of `text`, counting wide glyphs as two columns.
#[must_use]
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Pack `labels` into rows no wider than `max_width` columns.
///
/// Empty input yields no rows.
pub fn pack_rows<I, T>(labels: I, max_width: usize) -> Result<Vec<Vec<T>>, LayoutError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    if max_width == 0 {
        return Err(LayoutError::ZeroWidth);
    }

    let separator = display_width(ROW_SEPARATOR);
    let mut rows: Vec<Vec<T>> = Vec::new();
    let mut line_width = 0;

    for label in labels {
        let width = display_width(label.as_ref());
        match rows.last_mut() {
            Some(row) if line_width + separator + width <= max_width => {
                line_width += separator + width;
                row.push(label);
            }
            _ => {
                line_width = width;
                rows.push(vec![label]);
            }
        }
    }

    Ok(rows)
}
