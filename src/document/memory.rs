//! In-memory document source.
//!
//! Holds pre-extracted fragments per page, optionally backed by a page
//! raster. Dumps produced by an external extractor can be loaded from JSON:
//!
//! ```json
//! {
//!   "pages": [
//!     {
//!       "width": 595.0,
//!       "height": 842.0,
//!       "image": "page-000.png",
//!       "fragments": [
//!         { "bbox": [40.0, 100.0, 280.0, 112.0], "text": "1. What is X?" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `image` paths are resolved relative to the dump file. Pages without a
//! raster render their fragment boxes as solid ink blocks on white, which
//! keeps crops meaningful for text-only dumps.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::Rgb;
use serde::Deserialize;

use super::DocumentSource;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::layout::TextFragment;
use crate::rendering::RasterImage;

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([32, 32, 32]);

/// One page of a [`MemoryDocument`].
#[derive(Debug, Clone)]
pub struct MemoryPage {
    width: f32,
    height: f32,
    fragments: Vec<TextFragment>,
    raster: Option<RasterImage>,
}

impl MemoryPage {
    /// Create an empty page of the given size in points.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            fragments: Vec::new(),
            raster: None,
        }
    }

    /// Add a fragment given its corners `(x0, y0, x1, y1)`.
    pub fn with_fragment(mut self, bbox: (f32, f32, f32, f32), text: impl Into<String>) -> Self {
        self.fragments.push(TextFragment::new(0, bbox, text));
        self
    }

    /// Back the page with a raster covering the full page.
    ///
    /// The raster may have any resolution; it is resampled on render.
    pub fn with_raster(mut self, raster: RasterImage) -> Self {
        self.raster = Some(raster);
        self
    }

    /// Page width in points.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Page height in points.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Fragments on this page.
    pub fn fragments(&self) -> &[TextFragment] {
        &self.fragments
    }

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Resample the backing raster over `region`.
    fn resample(&self, raster: &RasterImage, region: &Rect, out_w: u32, out_h: u32) -> RasterImage {
        let (rw, rh) = raster.dimensions();
        if rw == 0 || rh == 0 {
            return RasterImage::from_pixel(out_w, out_h, PAPER);
        }
        let sx = rw as f32 / self.width;
        let sy = rh as f32 / self.height;

        let x0 = ((region.left() * sx).floor().max(0.0) as u32).min(rw - 1);
        let y0 = ((region.top() * sy).floor().max(0.0) as u32).min(rh - 1);
        let x1 = ((region.right() * sx).ceil() as u32).clamp(x0 + 1, rw);
        let y1 = ((region.bottom() * sy).ceil() as u32).clamp(y0 + 1, rh);

        let source = imageops::crop_imm(raster, x0, y0, x1 - x0, y1 - y0).to_image();
        if source.dimensions() == (out_w, out_h) {
            source
        } else {
            imageops::resize(&source, out_w, out_h, FilterType::Triangle)
        }
    }

    /// Paint fragment boxes intersecting `region` onto a blank canvas.
    fn paint_fragments(&self, region: &Rect, scale: f32, out_w: u32, out_h: u32) -> RasterImage {
        let mut canvas = RasterImage::from_pixel(out_w, out_h, PAPER);
        for hit in self.fragments.iter().filter_map(|f| f.bbox.intersection(region)) {
            let x0 = ((hit.left() - region.left()) * scale).floor().max(0.0) as u32;
            let y0 = ((hit.top() - region.top()) * scale).floor().max(0.0) as u32;
            let x1 = (((hit.right() - region.left()) * scale).ceil() as u32).min(out_w);
            let y1 = (((hit.bottom() - region.top()) * scale).ceil() as u32).min(out_h);
            for y in y0..y1 {
                for x in x0..x1 {
                    canvas.put_pixel(x, y, INK);
                }
            }
        }
        canvas
    }
}

/// Document source backed by in-memory pages.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pages: Vec<MemoryPage>,
}

#[derive(Debug, Deserialize)]
struct DumpFile {
    pages: Vec<DumpPage>,
}

#[derive(Debug, Deserialize)]
struct DumpPage {
    width: f32,
    height: f32,
    #[serde(default)]
    fragments: Vec<DumpFragment>,
    #[serde(default)]
    image: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct DumpFragment {
    bbox: [f32; 4],
    text: String,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from pages.
    pub fn from_pages(pages: impl IntoIterator<Item = MemoryPage>) -> Self {
        let mut doc = Self::new();
        for page in pages {
            doc.push_page(page);
        }
        doc
    }

    /// Append a page and return its index.
    pub fn push_page(&mut self, mut page: MemoryPage) -> usize {
        let index = self.pages.len();
        for fragment in &mut page.fragments {
            fragment.page = index;
        }
        self.pages.push(page);
        index
    }

    /// Access a page.
    pub fn page(&self, page: usize) -> Result<&MemoryPage> {
        self.pages.get(page).ok_or(Error::PageOutOfRange {
            page,
            page_count: self.pages.len(),
        })
    }

    /// Load a fragment dump from JSON.
    ///
    /// Relative `image` paths are resolved against `base_dir` when given.
    pub fn from_json_reader<R: Read>(reader: R, base_dir: Option<&Path>) -> Result<Self> {
        let dump: DumpFile = serde_json::from_reader(reader)?;
        let mut doc = Self::new();

        for page in dump.pages {
            let mut memory_page = MemoryPage::new(page.width, page.height);
            for frag in page.fragments {
                let [x0, y0, x1, y1] = frag.bbox;
                memory_page = memory_page.with_fragment((x0, y0, x1, y1), frag.text);
            }
            if let Some(path) = page.image {
                let path = match base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path,
                };
                log::debug!("Loading page raster {}", path.display());
                memory_page = memory_page.with_raster(image::open(&path)?.to_rgb8());
            }
            doc.push_page(memory_page);
        }

        log::debug!("Loaded fragment dump: {} pages", doc.pages.len());
        Ok(doc)
    }

    /// Load a fragment dump from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        Self::from_json_reader(reader, path.parent())
    }
}

impl DocumentSource for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_size(&self, page: usize) -> Result<(f32, f32)> {
        let p = self.page(page)?;
        Ok((p.width, p.height))
    }

    fn fragments(&self, page: usize) -> Result<Vec<TextFragment>> {
        Ok(self.page(page)?.fragments.clone())
    }

    fn render(&self, page: usize, clip: Rect, scale: f32) -> Result<RasterImage> {
        let p = self.page(page)?;
        let region = clip
            .intersection(&p.bounds())
            .filter(|r| !r.is_empty())
            .ok_or(Error::EmptyRegion {
                page,
                width: clip.width.max(0.0),
                height: clip.height.max(0.0),
            })?;

        let out_w = ((region.width * scale).round() as u32).max(1);
        let out_h = ((region.height * scale).round() as u32).max(1);

        Ok(match &p.raster {
            Some(raster) => p.resample(raster, &region, out_w, out_h),
            None => p.paint_fragments(&region, scale, out_w, out_h),
        })
    }
}
