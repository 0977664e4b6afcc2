//! Positioned text fragments and the two reading columns of a page.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// A positioned unit of text as supplied by the document source.
///
/// Fragments correspond to text blocks on a rendered page: a bounding box in
/// page space (origin top-left) and the raw content of the block, which may
/// span several visual lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// Page index (0-based)
    pub page: usize,
    /// Bounding box of the fragment
    pub bbox: Rect,
    /// Raw content as extracted, not yet trimmed
    pub text: String,
}

impl TextFragment {
    /// Create a fragment from corner coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use quiz_oxide::layout::TextFragment;
    ///
    /// let frag = TextFragment::new(0, (40.0, 100.0, 280.0, 112.0), "1. What is X?");
    /// assert_eq!(frag.top(), 100.0);
    /// ```
    pub fn new(page: usize, (x0, y0, x1, y1): (f32, f32, f32, f32), text: impl Into<String>) -> Self {
        Self {
            page,
            bbox: Rect::from_points(x0, y0, x1, y1),
            text: text.into(),
        }
    }

    /// Top y-coordinate, the sort key inside a column.
    pub fn top(&self) -> f32 {
        self.bbox.top()
    }
}

/// One of the two independent vertical reading regions of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// Left half, `[0, W/2]`
    Left,
    /// Right half, `[W/2, W]`
    Right,
}

impl Column {
    /// Both columns in reading order.
    pub const ALL: [Column; 2] = [Column::Left, Column::Right];

    /// Zero-based side index (left = 0, right = 1).
    pub fn index(self) -> usize {
        match self {
            Column::Left => 0,
            Column::Right => 1,
        }
    }

    /// Horizontal extent `(start, end)` of this column on a page of the given width.
    ///
    /// # Examples
    ///
    /// ```
    /// use quiz_oxide::layout::Column;
    ///
    /// assert_eq!(Column::Left.x_band(600.0), (0.0, 300.0));
    /// assert_eq!(Column::Right.x_band(600.0), (300.0, 600.0));
    /// ```
    pub fn x_band(self, page_width: f32) -> (f32, f32) {
        let half = page_width / 2.0;
        match self {
            Column::Left => (0.0, half),
            Column::Right => (half, page_width),
        }
    }
}
