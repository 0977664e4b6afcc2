//! Document source capability.
//!
//! Segmentation needs two things from a document: the positioned text
//! fragments of each page and the ability to render any page rectangle to a
//! raster. [`DocumentSource`] captures that contract so the pipeline works
//! the same over a PDF backend, a pre-extracted fragment dump, or test data.

mod memory;

pub use memory::{MemoryDocument, MemoryPage};

use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::TextFragment;
use crate::rendering::RasterImage;

/// Supplier of page fragments and region renders.
pub trait DocumentSource {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Page size `(width, height)` in points.
    fn page_size(&self, page: usize) -> Result<(f32, f32)>;

    /// All text fragments of a page, in no particular order.
    fn fragments(&self, page: usize) -> Result<Vec<TextFragment>>;

    /// Render `clip` (page space, points) at `scale` pixels per point.
    ///
    /// Each call produces a fresh, independently owned raster.
    fn render(&self, page: usize, clip: Rect, scale: f32) -> Result<RasterImage>;
}

impl<D: DocumentSource + ?Sized> DocumentSource for &D {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_size(&self, page: usize) -> Result<(f32, f32)> {
        (**self).page_size(page)
    }

    fn fragments(&self, page: usize) -> Result<Vec<TextFragment>> {
        (**self).fragments(page)
    }

    fn render(&self, page: usize, clip: Rect, scale: f32) -> Result<RasterImage> {
        (**self).render(page, clip, scale)
    }
}
