//! Error types for the exam extraction library.
//!
//! The segmentation and cropping core never fails: malformed questions are
//! dropped, missing answer markers default, and blank crops return the input.
//! Errors only come from the document source (I/O, page lookup, rendering)
//! and from configuration validation.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or rendering exam documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fragment dump or configuration JSON could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Page raster could not be decoded or encoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Requested page does not exist in the document
    #[error("Page {page} out of range (document has {page_count} pages)")]
    PageOutOfRange {
        /// Requested page index (0-based)
        page: usize,
        /// Number of pages in the document
        page_count: usize,
    },

    /// A render request whose clip rectangle has no area after clamping
    #[error("Empty render region on page {page}: {width}x{height}")]
    EmptyRegion {
        /// Page the region was requested from
        page: usize,
        /// Clamped width in points
        width: f32,
        /// Clamped height in points
        height: f32,
    },

    /// Configuration value outside its valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
