//! Exam extraction pipeline.
//!
//! ```text
//! DocumentSource (fragments per page)
//!     ↓
//! [split_columns] (left / right streams, sorted by top y)
//!     ↓
//! [QuestionSegmenter] (state machine, marker resolution)
//!     ↓
//! QuestionRecord[] (immutable once loaded)
//!     ↓
//! [clip_rect] → DocumentSource::render → [RegionCropper]
//!     ↓
//! Question body raster
//! ```
//!
//! One document load performs exactly one synchronous segmentation pass.
//! Rendering happens later, once per displayed question, and every call
//! owns its raster.

pub mod config;
pub mod record;
pub mod segmenter;

// Re-export main types
pub use config::{ClipConfig, ExamPipelineConfig, RenderConfig, SegmenterConfig};
pub use record::{AnswerKey, AnswerSource, QuestionRecord, OPTION_COUNT};
pub use segmenter::{question_number, PartialQuestion, QuestionSegmenter, SegmenterState};

use crate::document::DocumentSource;
use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::{split_columns, Column, TextFragment};
use crate::rendering::{RasterImage, RegionCropper};

/// The extraction pipeline: segmentation plus question rendering.
#[derive(Debug, Clone, Default)]
pub struct ExamPipeline {
    config: ExamPipelineConfig,
    segmenter: QuestionSegmenter,
}

impl ExamPipeline {
    /// Create a new pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(ExamPipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: ExamPipelineConfig) -> Self {
        let segmenter = QuestionSegmenter::new(config.segmenter.clone());
        Self { config, segmenter }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ExamPipelineConfig {
        &self.config
    }

    /// Segment one page: left column first, then right.
    pub fn segment_page(&self, fragments: &[TextFragment], page_width: f32) -> Vec<QuestionRecord> {
        let streams = split_columns(fragments, page_width);
        let mut records = Vec::new();
        for column in Column::ALL {
            let stream = streams.get(column);
            let found = self.segmenter.segment_column(stream.iter().copied(), column);
            log::debug!(
                "{:?} column: {} fragments -> {} questions",
                column,
                stream.len(),
                found.len()
            );
            records.extend(found);
        }
        records
    }

    /// Segment a whole document into question records, page by page.
    ///
    /// An empty document or one without any complete question yields an
    /// empty list. Errors only come from the document source.
    pub fn segment<D: DocumentSource + ?Sized>(&self, doc: &D) -> Result<Vec<QuestionRecord>> {
        let mut records = Vec::new();
        for page in 0..doc.page_count() {
            let (width, _) = doc.page_size(page)?;
            let fragments = doc.fragments(page)?;
            records.extend(self.segment_page(&fragments, width));
        }
        log::debug!("Segmented {} pages -> {} questions", doc.page_count(), records.len());
        Ok(records)
    }

    /// Page rectangle covering a question's body text.
    ///
    /// The region starts `vertical_margin` above the question line and ends
    /// `option_gap` above the first option line. Without a usable option line
    /// (missing, or not below the start) it spans `fallback_body_height` from
    /// the question line. Horizontally it covers the question's column, inset
    /// on both sides.
    pub fn clip_rect(&self, record: &QuestionRecord, page_width: f32) -> Rect {
        let clip = &self.config.clip;
        let (start, end) = record.column.x_band(page_width);
        let top = (record.question_top - clip.vertical_margin).max(0.0);
        let bottom = match record.options_top {
            Some(y) if y - clip.option_gap > top => y - clip.option_gap,
            _ => record.question_top + clip.fallback_body_height,
        };
        Rect::from_points(start + clip.horizontal_inset, top, end - clip.horizontal_inset, bottom)
    }

    /// Region cropper configured from the render settings.
    pub fn cropper(&self) -> RegionCropper {
        RegionCropper::new(self.config.render.background).with_threshold(self.config.render.crop_threshold)
    }

    /// Trim a rendered raster to its content.
    pub fn crop(&self, raster: RasterImage) -> RasterImage {
        self.cropper().crop(raster)
    }

    /// Render a question's body region and trim it to its content.
    pub fn render_question<D: DocumentSource + ?Sized>(
        &self,
        doc: &D,
        record: &QuestionRecord,
    ) -> Result<RasterImage> {
        let (width, _) = doc.page_size(record.page)?;
        let clip = self.clip_rect(record, width);
        log::trace!(
            "Rendering question {} (page {}): clip=({:.1}, {:.1}) {:.1}x{:.1} at {}x",
            record.number,
            record.page,
            clip.x,
            clip.y,
            clip.width,
            clip.height,
            self.config.render.scale
        );
        let raster = doc.render(record.page, clip, self.config.render.scale)?;
        Ok(self.crop(raster))
    }
}

/// A loaded document together with its one-time segmentation result.
///
/// Reloading means building a new `LoadedExam`; the records of an instance
/// never change.
#[derive(Debug)]
pub struct LoadedExam<D> {
    source: D,
    pipeline: ExamPipeline,
    records: Vec<QuestionRecord>,
}

impl<D: DocumentSource> LoadedExam<D> {
    /// Segment `source` once and keep the result.
    pub fn load(source: D, pipeline: ExamPipeline) -> Result<Self> {
        let records = pipeline.segment(&source)?;
        Ok(Self {
            source,
            pipeline,
            records,
        })
    }

    /// Segmented questions in document order.
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// Number of questions found.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no question was found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The underlying document source.
    pub fn source(&self) -> &D {
        &self.source
    }

    /// The pipeline used for loading and rendering.
    pub fn pipeline(&self) -> &ExamPipeline {
        &self.pipeline
    }

    /// Render and crop the body of question `index`.
    ///
    /// Returns `Ok(None)` for an index past the end.
    pub fn render(&self, index: usize) -> Result<Option<RasterImage>> {
        self.records
            .get(index)
            .map(|record| self.pipeline.render_question(&self.source, record))
            .transpose()
    }
}
