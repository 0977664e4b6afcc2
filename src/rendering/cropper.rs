//! Trimming rendered regions to their visible content.
//!
//! A question clip is computed from fragment geometry, so it usually carries
//! blank margins. The cropper compares every pixel with a background
//! reference and keeps the smallest box enclosing all pixels that differ.

use image::{imageops, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Image corner used as the background sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    /// Pixel (0, 0)
    #[default]
    TopLeft,
    /// Pixel (w-1, 0)
    TopRight,
    /// Pixel (0, h-1)
    BottomLeft,
    /// Pixel (w-1, h-1)
    BottomRight,
}

impl Corner {
    /// Pixel coordinates of this corner, `None` for an empty image.
    pub fn pixel(self, width: u32, height: u32) -> Option<(u32, u32)> {
        if width == 0 || height == 0 {
            return None;
        }
        let (right, bottom) = (width - 1, height - 1);
        Some(match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (right, 0),
            Corner::BottomLeft => (0, bottom),
            Corner::BottomRight => (right, bottom),
        })
    }
}

/// How the background color of a raster is determined.
///
/// `SampledCorner` adapts to off-white scans, but a corner pixel that happens
/// to carry foreground ink turns that ink tone into "background" and content
/// of that exact color is then left out of the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BackgroundPolicy {
    /// Compare against a fixed color (white by default)
    Fixed {
        /// Reference RGB color
        color: [u8; 3],
    },
    /// Compare against the color of one corner pixel of the same image
    SampledCorner {
        /// Corner to sample
        corner: Corner,
    },
}

impl Default for BackgroundPolicy {
    fn default() -> Self {
        Self::white()
    }
}

impl BackgroundPolicy {
    /// Fixed pure-white reference.
    pub fn white() -> Self {
        Self::Fixed {
            color: [255, 255, 255],
        }
    }

    /// Sample the top-left pixel.
    pub fn sampled() -> Self {
        Self::SampledCorner {
            corner: Corner::TopLeft,
        }
    }

    /// Resolve the reference color for `img`.
    ///
    /// Returns `None` only for a sampled policy on an empty image.
    pub fn reference(&self, img: &RgbImage) -> Option<Rgb<u8>> {
        match *self {
            BackgroundPolicy::Fixed { color } => Some(Rgb(color)),
            BackgroundPolicy::SampledCorner { corner } => {
                let (x, y) = corner.pixel(img.width(), img.height())?;
                Some(*img.get_pixel(x, y))
            },
        }
    }
}

/// Pixel-space bounding box of the non-background content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBounds {
    /// Left column (inclusive)
    pub x: u32,
    /// Top row (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Largest per-channel absolute difference between two pixels.
#[inline]
fn channel_difference(a: &Rgb<u8>, b: &Rgb<u8>) -> u8 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}

/// Compute the minimal box enclosing every pixel whose difference from
/// `reference` exceeds `threshold`.
///
/// Returns `None` when no pixel differs.
pub fn content_bounds(img: &RgbImage, reference: Rgb<u8>, threshold: u8) -> Option<CropBounds> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in img.enumerate_pixels() {
        if channel_difference(pixel, &reference) > threshold {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| CropBounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Trims rasters to the bounding box of their non-background content.
///
/// # Examples
///
/// ```
/// use image::{Rgb, RgbImage};
/// use quiz_oxide::rendering::{BackgroundPolicy, RegionCropper};
///
/// let mut img = RgbImage::from_pixel(40, 30, Rgb([255, 255, 255]));
/// img.put_pixel(10, 5, Rgb([0, 0, 0]));
/// img.put_pixel(20, 12, Rgb([0, 0, 0]));
///
/// let cropped = RegionCropper::new(BackgroundPolicy::white()).crop(img);
/// assert_eq!(cropped.dimensions(), (11, 8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionCropper {
    background: BackgroundPolicy,
    threshold: u8,
}

impl RegionCropper {
    /// Create a cropper with the given background policy and a zero threshold.
    pub fn new(background: BackgroundPolicy) -> Self {
        Self {
            background,
            threshold: 0,
        }
    }

    /// Set the largest per-channel difference still treated as background.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// The configured background policy.
    pub fn background(&self) -> BackgroundPolicy {
        self.background
    }

    /// Locate the content box of `img` without cropping.
    pub fn bounds(&self, img: &RgbImage) -> Option<CropBounds> {
        let reference = self.background.reference(img)?;
        content_bounds(img, reference, self.threshold)
    }

    /// Crop `img` to its content box.
    ///
    /// A raster with no content is returned unchanged; a blank region is a
    /// valid result, not an error.
    pub fn crop(&self, img: RgbImage) -> RgbImage {
        match self.bounds(&img) {
            Some(b) if (b.width, b.height) != img.dimensions() => {
                log::trace!(
                    "Crop {}x{} -> {}x{} at ({}, {})",
                    img.width(),
                    img.height(),
                    b.width,
                    b.height,
                    b.x,
                    b.y
                );
                imageops::crop_imm(&img, b.x, b.y, b.width, b.height).to_image()
            },
            Some(_) => img,
            None => {
                log::trace!("Crop {}x{}: no content, keeping raster", img.width(), img.height());
                img
            },
        }
    }
}

/// Crop `img` with the given background policy and threshold.
pub fn crop_to_content(img: RgbImage, background: BackgroundPolicy, threshold: u8) -> RgbImage {
    RegionCropper::new(background).with_threshold(threshold).crop(img)
}
