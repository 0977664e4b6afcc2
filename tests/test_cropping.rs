//! Integration tests for clip geometry, rendering and region cropping.

use image::{Rgb, RgbImage};
use proptest::prelude::*;
use quiz_oxide::document::{MemoryDocument, MemoryPage};
use quiz_oxide::pipeline::{ExamPipeline, ExamPipelineConfig, LoadedExam};
use quiz_oxide::rendering::{crop_to_content, BackgroundPolicy, Corner, RegionCropper};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const PAPER: Rgb<u8> = Rgb([236, 232, 220]);
const INK: Rgb<u8> = Rgb([10, 10, 10]);

// ============================================================================
// Helper Functions
// ============================================================================

/// A 600x800pt scanned page at 1px per point: off-white paper with an ink
/// block where the question text sits.
fn scanned_page_raster() -> RgbImage {
    let mut raster = RgbImage::from_pixel(600, 800, PAPER);
    for y in 102..110 {
        for x in 50..200 {
            raster.put_pixel(x, y, INK);
        }
    }
    raster
}

fn scanned_exam(config: ExamPipelineConfig) -> LoadedExam<MemoryDocument> {
    let page = MemoryPage::new(600.0, 800.0)
        .with_fragment((50.0, 100.0, 200.0, 112.0), "1. Question text")
        .with_fragment((50.0, 150.0, 250.0, 162.0), "① A ② B ❸ C ④ D")
        .with_raster(scanned_page_raster());
    LoadedExam::load(MemoryDocument::from_pages([page]), ExamPipeline::with_config(config)).unwrap()
}

// ============================================================================
// Cropper
// ============================================================================

#[test]
fn test_blank_raster_keeps_dimensions() {
    for policy in [BackgroundPolicy::white(), BackgroundPolicy::sampled()] {
        let img = RgbImage::from_pixel(64, 48, WHITE);
        assert_eq!(crop_to_content(img, policy, 0).dimensions(), (64, 48));
    }
}

#[test]
fn test_crop_to_content_box() {
    let mut img = RgbImage::from_pixel(100, 60, WHITE);
    img.put_pixel(10, 20, INK);
    img.put_pixel(70, 45, INK);
    let cropper = RegionCropper::new(BackgroundPolicy::white());

    let bounds = cropper.bounds(&img).unwrap();
    assert_eq!((bounds.x, bounds.y, bounds.width, bounds.height), (10, 20, 61, 26));

    let out = cropper.crop(img);
    assert_eq!(out.dimensions(), (61, 26));
    assert_eq!(*out.get_pixel(0, 0), INK);
    assert_eq!(*out.get_pixel(60, 25), INK);
}

#[test]
fn test_sampled_corner_choice() {
    // Dark strip along the bottom edge, content in the middle
    let mut img = RgbImage::from_pixel(40, 40, WHITE);
    for x in 0..40 {
        img.put_pixel(x, 39, INK);
    }
    img.put_pixel(20, 20, INK);

    let top = RegionCropper::new(BackgroundPolicy::SampledCorner {
        corner: Corner::TopLeft,
    });
    assert_eq!(top.crop(img.clone()).dimensions(), (40, 20));

    // Sampling the ink makes the white paper the "content"
    let bottom = RegionCropper::new(BackgroundPolicy::SampledCorner {
        corner: Corner::BottomRight,
    });
    assert_eq!(bottom.crop(img).dimensions(), (40, 39));
}

// ============================================================================
// Render + crop through the pipeline
// ============================================================================

#[test]
fn test_render_question_scanned_with_sampled_background() {
    let exam = scanned_exam(ExamPipelineConfig::scanned().with_render_scale(1.0));
    let body = exam.render(0).unwrap().unwrap();
    assert_eq!(body.dimensions(), (150, 8));
}

#[test]
fn test_render_question_scanned_with_white_background_keeps_paper() {
    let exam = scanned_exam(ExamPipelineConfig::default().with_render_scale(1.0));
    let body = exam.render(0).unwrap().unwrap();
    // Every paper pixel differs from pure white, so the whole clip survives:
    // x 5..295, y 90..145
    assert_eq!(body.dimensions(), (290, 55));
}

#[test]
fn test_render_scale_multiplies_crop() {
    let exam = scanned_exam(ExamPipelineConfig::scanned().with_render_scale(2.0));
    let body = exam.render(0).unwrap().unwrap();
    // Resampling softens the block edges by at most one pixel per side
    assert!((300..=302).contains(&body.width()), "width {}", body.width());
    assert!((16..=18).contains(&body.height()), "height {}", body.height());
}

#[test]
fn test_text_only_page_renders_fragment_boxes() {
    let page = MemoryPage::new(600.0, 800.0)
        .with_fragment((320.0, 400.0, 500.0, 412.0), "7. Right column question")
        .with_fragment((320.0, 414.0, 420.0, 426.0), "second body line")
        .with_fragment((320.0, 440.0, 560.0, 452.0), "① a ② b ③ c ④ d");
    let config = ExamPipelineConfig::new().with_render_scale(1.0);
    let exam = LoadedExam::load(MemoryDocument::from_pages([page]), ExamPipeline::with_config(config)).unwrap();

    let record = &exam.records()[0];
    let clip = exam.pipeline().clip_rect(record, 600.0);
    assert_eq!((clip.left(), clip.top(), clip.right(), clip.bottom()), (305.0, 390.0, 595.0, 435.0));

    let body = exam.render(0).unwrap().unwrap();
    assert_eq!(body.dimensions(), (180, 26));
}

#[test]
fn test_fallback_height_without_option_line() {
    let pipeline = ExamPipeline::with_config(ExamPipelineConfig::new().with_fallback_body_height(100.0));
    let mut record = scanned_exam(ExamPipelineConfig::default()).records()[0].clone();
    record.options_top = None;
    let clip = pipeline.clip_rect(&record, 600.0);
    assert_eq!(clip.top(), 90.0);
    assert_eq!(clip.bottom(), 200.0);
}

proptest! {
    #[test]
    fn prop_blank_crop_is_identity(w in 1u32..64, h in 1u32..64, shade in 0u8..=255) {
        let img = RgbImage::from_pixel(w, h, Rgb([shade, shade, shade]));
        let out = crop_to_content(img, BackgroundPolicy::sampled(), 0);
        prop_assert_eq!(out.dimensions(), (w, h));
    }

    #[test]
    fn prop_single_ink_pixel_crops_to_one_pixel(w in 1u32..48, h in 1u32..48, px in 0u32..48, py in 0u32..48) {
        let mut img = RgbImage::from_pixel(w, h, WHITE);
        img.put_pixel(px % w, py % h, INK);
        let out = crop_to_content(img, BackgroundPolicy::white(), 0);
        prop_assert_eq!(out.dimensions(), (1, 1));
    }
}
