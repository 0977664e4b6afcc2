//! Validated question records.

use crate::layout::Column;
use serde::{Deserialize, Serialize};

/// Number of choices every surviving question carries.
pub const OPTION_COUNT: usize = 4;

/// How the answer index of a record was obtained.
///
/// The source document only encodes the key graphically, so a record
/// without a filled marker still needs an index. This tag keeps "the sheet
/// marked choice 1" apart from "nothing was marked, index 0 by policy".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// Exactly one filled marker was seen.
    Marked,
    /// More than one filled marker was seen; the last one wins.
    ///
    /// Either the sheet really carries several keyed choices or a glyph was
    /// misdetected upstream. The index is still reported, the conflict is
    /// left for the caller to judge.
    Conflicting,
    /// No filled marker was seen; the index is the fallback 0.
    #[default]
    Defaulted,
}

impl AnswerSource {
    /// Whether the index came from the document rather than policy.
    pub fn is_detected(&self) -> bool {
        !matches!(self, AnswerSource::Defaulted)
    }

    /// Get source name for debugging.
    pub fn name(&self) -> &'static str {
        match self {
            AnswerSource::Marked => "Marked",
            AnswerSource::Conflicting => "Conflicting",
            AnswerSource::Defaulted => "Defaulted",
        }
    }
}

/// The keyed choice of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerKey {
    /// Choice index in `[0, 4)`
    pub index: usize,
    /// Provenance of `index`
    pub source: AnswerSource,
}

impl AnswerKey {
    /// Key read from a filled marker.
    pub fn marked(index: usize) -> Self {
        Self {
            index,
            source: AnswerSource::Marked,
        }
    }

    /// Fallback key when no filled marker exists.
    pub fn defaulted() -> Self {
        Self {
            index: 0,
            source: AnswerSource::Defaulted,
        }
    }

    /// Whether `choice` matches the key.
    pub fn accepts(&self, choice: usize) -> bool {
        self.index == choice
    }
}

/// One finalized multiple-choice question.
///
/// Only questions that accumulated exactly four options become records, so
/// the options are held in a fixed-size array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Printed question number (leading digits of the question line)
    pub number: String,
    /// Page index (0-based)
    pub page: usize,
    /// Reading column the question was found in
    pub column: Column,
    /// Top y of the question-start fragment
    pub question_top: f32,
    /// Top y of the first option-bearing fragment
    pub options_top: Option<f32>,
    /// Choice texts in printed order
    pub options: [String; OPTION_COUNT],
    /// Keyed choice
    pub answer: AnswerKey,
}

impl QuestionRecord {
    /// Index of the keyed choice.
    pub fn answer_index(&self) -> usize {
        self.answer.index
    }

    /// Text of the keyed choice.
    pub fn answer_text(&self) -> &str {
        &self.options[self.answer.index]
    }

    /// Whether the answer came from a filled marker rather than the fallback.
    pub fn answer_detected(&self) -> bool {
        self.answer.source.is_detected()
    }
}
