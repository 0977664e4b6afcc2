//! Page layout primitives for two-column exam sheets.
//!
//! - Positioned text fragments and the left/right reading columns
//! - Column splitting at the page midline
//! - Option marker glyph recognition

pub mod column_splitter;
pub mod fragment;
pub mod markers;

// Re-export main types
pub use column_splitter::{column_stream, split_columns, ColumnStreams};
pub use fragment::{Column, TextFragment};
pub use markers::{
    contains_marker, split_markers, MarkedLine, MarkedSegment, MarkerKind, OptionMarker,
    FILLED_MARKERS, PLAIN_MARKERS,
};
