// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Quiz Oxide
//!
//! Extracts multiple-choice questions from two-column exam sheets and crops
//! each question's body to its visible extent.
//!
//! ## Core Features
//!
//! - **Column splitting**: fragments are partitioned at the page midline and
//!   read top to bottom per column
//! - **Question segmentation**: a small state machine turns each column stream
//!   into records with exactly four options
//! - **Answer detection**: filled option markers (`❶`, `●`, ...) mark the key;
//!   every record says whether its answer was marked or defaulted
//! - **Region cropping**: rendered question regions are trimmed to the
//!   bounding box of their non-background pixels
//! - **Quiz sessions**: owned walk-through state with retry and seeded shuffle
//!
//! ## Quick Start
//!
//! ```
//! use quiz_oxide::document::{MemoryDocument, MemoryPage};
//! use quiz_oxide::pipeline::{ExamPipeline, LoadedExam};
//!
//! # fn main() -> quiz_oxide::Result<()> {
//! let page = MemoryPage::new(600.0, 800.0)
//!     .with_fragment((40.0, 100.0, 280.0, 112.0), "1. What is X?")
//!     .with_fragment((40.0, 150.0, 280.0, 162.0), "① A ② B ③ C ❹ D");
//!
//! let exam = LoadedExam::load(MemoryDocument::from_pages([page]), ExamPipeline::new())?;
//! let question = &exam.records()[0];
//! assert_eq!(question.options, ["A", "B", "C", "D"]);
//! assert_eq!(question.answer_index(), 3);
//!
//! let body = exam.render(0)?.expect("question exists");
//! assert!(body.width() > 0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Layout analysis
pub mod geometry;
pub mod layout;

// Document source capability
pub mod document;

// Segmentation pipeline
pub mod pipeline;

// Raster cropping
pub mod rendering;

// Presentation-side session state
pub mod session;

// Re-exports
pub use document::{DocumentSource, MemoryDocument, MemoryPage};
pub use error::{Error, Result};
pub use layout::{Column, TextFragment};
pub use pipeline::{
    AnswerKey, AnswerSource, ExamPipeline, ExamPipelineConfig, LoadedExam, QuestionRecord,
};
pub use rendering::{BackgroundPolicy, RasterImage, RegionCropper};
pub use session::QuizSession;

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values,
    /// so fragments with a broken coordinate sort to the end of a column.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_float_cmp_normal() {
            assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
            assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(1.5, 1.5), Ordering::Equal);
        }

        #[test]
        fn test_safe_float_cmp_nan() {
            assert_eq!(safe_float_cmp(f32::NAN, f32::NAN), Ordering::Equal);
            assert_eq!(safe_float_cmp(f32::NAN, 0.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(0.0, f32::NAN), Ordering::Less);
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
