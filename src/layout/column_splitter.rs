//! Two-column partitioning of a page's fragments.
//!
//! Exam sheets are printed as two independent reading columns. Each column
//! is read top to bottom on its own, so a page is split at its vertical
//! midline and each half is sorted by vertical position.
//!
//! A fragment whose box crosses the midline overlaps both halves and is
//! returned in both streams. Headers spanning the full width, for example,
//! show up at the top of each column; no deduplication is attempted.

use super::fragment::{Column, TextFragment};
use crate::utils::safe_float_cmp;

/// The ordered fragment streams of one page.
///
/// Fragments are borrowed from the page's fragment set, never copied.
#[derive(Debug, Clone, Default)]
pub struct ColumnStreams<'a> {
    /// Fragments overlapping the left half, top to bottom
    pub left: Vec<&'a TextFragment>,
    /// Fragments overlapping the right half, top to bottom
    pub right: Vec<&'a TextFragment>,
}

impl<'a> ColumnStreams<'a> {
    /// Stream for one column.
    pub fn get(&self, column: Column) -> &[&'a TextFragment] {
        match column {
            Column::Left => &self.left,
            Column::Right => &self.right,
        }
    }

    /// Whether both streams are empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// Select the fragments overlapping one column, sorted by top y.
///
/// The sort is stable: fragments sharing a top coordinate keep the order the
/// source supplied them in.
pub fn column_stream(fragments: &[TextFragment], page_width: f32, column: Column) -> Vec<&TextFragment> {
    let (start, end) = column.x_band(page_width);
    let mut stream: Vec<&TextFragment> = fragments
        .iter()
        .filter(|frag| frag.bbox.overlaps_x_band(start, end))
        .collect();
    stream.sort_by(|a, b| safe_float_cmp(a.top(), b.top()));
    stream
}

/// Partition one page's fragments into left and right column streams.
///
/// # Examples
///
/// ```
/// use quiz_oxide::layout::{split_columns, TextFragment};
///
/// let page = vec![
///     TextFragment::new(0, (320.0, 50.0, 580.0, 62.0), "2. Right column"),
///     TextFragment::new(0, (20.0, 80.0, 280.0, 92.0), "① A ② B"),
///     TextFragment::new(0, (20.0, 50.0, 280.0, 62.0), "1. Left column"),
/// ];
/// let streams = split_columns(&page, 600.0);
/// assert_eq!(streams.left[0].text, "1. Left column");
/// assert_eq!(streams.left[1].text, "① A ② B");
/// assert_eq!(streams.right.len(), 1);
/// ```
pub fn split_columns(fragments: &[TextFragment], page_width: f32) -> ColumnStreams<'_> {
    let streams = ColumnStreams {
        left: column_stream(fragments, page_width, Column::Left),
        right: column_stream(fragments, page_width, Column::Right),
    };
    log::trace!(
        "Column split (width={:.1}): {} fragments -> left={}, right={}",
        page_width,
        fragments.len(),
        streams.left.len(),
        streams.right.len()
    );
    streams
}
