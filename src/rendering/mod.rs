//! Raster post-processing for rendered question regions.
//!
//! Rendering itself belongs to the [`DocumentSource`](crate::document::DocumentSource);
//! this module only trims the resulting rasters.
//!
//! ## Example
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use quiz_oxide::rendering::{crop_to_content, BackgroundPolicy};
//!
//! let mut region = RgbImage::from_pixel(300, 120, Rgb([255, 255, 255]));
//! region.put_pixel(40, 30, Rgb([20, 20, 20]));
//! let trimmed = crop_to_content(region, BackgroundPolicy::white(), 0);
//! assert_eq!(trimmed.dimensions(), (1, 1));
//! ```

mod cropper;

pub use cropper::{content_bounds, crop_to_content, BackgroundPolicy, Corner, CropBounds, RegionCropper};

/// Raster produced by rendering a page region.
pub type RasterImage = image::RgbImage;
