//! Question segmentation over one column's fragment stream.
//!
//! The segmenter is a two-state machine. While [`SegmenterState::Idle`] it
//! waits for a question-start line (`"<digits>."`). Once a question is open
//! ([`SegmenterState::Accumulating`]) each fragment is one of:
//!
//! - another question start: the open question is finalized and a new one opened
//! - an option-bearing line: every marker glyph opens one choice, up to four
//! - a plain line after the first choice: wrapped text of the last choice
//! - a plain line before any choice: question body, skipped
//!
//! Finalizing keeps only questions with exactly four choices. Transitions are
//! pure functions of `(state, fragment)`; nothing is carried between columns
//! or documents.

use lazy_static::lazy_static;
use regex::Regex;

use super::config::SegmenterConfig;
use super::record::{AnswerKey, AnswerSource, QuestionRecord, OPTION_COUNT};
use crate::layout::{contains_marker, split_markers, Column, TextFragment};

lazy_static! {
    /// Leading question number followed by a period
    static ref RE_QUESTION_START: Regex = Regex::new(r"^(\d+)\.").unwrap();
}

/// Extract the question number if `text` starts a new question.
///
/// `text` is expected to be trimmed already.
///
/// # Examples
///
/// ```
/// use quiz_oxide::pipeline::question_number;
///
/// assert_eq!(question_number("12. Which of the following"), Some("12"));
/// assert_eq!(question_number("12 apples"), None);
/// assert_eq!(question_number("Q1. text"), None);
/// ```
pub fn question_number(text: &str) -> Option<&str> {
    RE_QUESTION_START
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A question still collecting its options.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialQuestion {
    /// Printed question number
    pub number: String,
    /// Page index
    pub page: usize,
    /// Column the question lives in
    pub column: Column,
    /// Top y of the question-start fragment
    pub question_top: f32,
    /// Top y of the first option-bearing fragment
    pub options_top: Option<f32>,
    /// Options collected so far; empty strings mark choices with no text yet
    pub options: Vec<String>,
    /// Index of the last filled marker seen
    pub answer: Option<usize>,
    /// Number of filled markers seen
    pub filled_markers: usize,
}

impl PartialQuestion {
    fn open(number: &str, fragment: &TextFragment, column: Column) -> Self {
        Self {
            number: number.to_string(),
            page: fragment.page,
            column,
            question_top: fragment.top(),
            options_top: None,
            options: Vec::with_capacity(OPTION_COUNT),
            answer: None,
            filled_markers: 0,
        }
    }

    /// Whether the option list is at its hard cap.
    pub fn is_full(&self) -> bool {
        self.options.len() >= OPTION_COUNT
    }

    /// Append wrapped text to the last option. No-op before the first option.
    fn continue_last(&mut self, text: &str) {
        if let Some(last) = self.options.last_mut() {
            if last.is_empty() {
                last.push_str(text);
            } else {
                last.push(' ');
                last.push_str(text);
            }
        }
    }

    /// Consume an option-bearing line.
    fn absorb_options(&mut self, fragment: &TextFragment, text: &str) {
        let line = split_markers(text);

        if self.options_top.is_none() {
            self.options_top = Some(fragment.top());
        }
        if !line.leading.is_empty() {
            self.continue_last(line.leading);
        }

        for (i, segment) in line.segments.iter().enumerate() {
            if self.is_full() {
                log::debug!(
                    "Question {} (page {}): ignoring {} surplus marker(s)",
                    self.number,
                    self.page,
                    line.segments.len() - i
                );
                break;
            }
            if segment.marker.is_filled() {
                self.answer = Some(self.options.len());
                self.filled_markers += 1;
            }
            self.options.push(segment.text.to_string());
        }
    }

    /// Validate and convert into a record.
    ///
    /// Returns `None` unless exactly four options were collected.
    pub fn finalize(self, config: &SegmenterConfig) -> Option<QuestionRecord> {
        if self.options.len() != OPTION_COUNT {
            log::debug!(
                "Discarding question {} (page {}, {:?}): {} option(s)",
                self.number,
                self.page,
                self.column,
                self.options.len()
            );
            return None;
        }

        let answer = match (self.answer, self.filled_markers) {
            (Some(index), 1) => AnswerKey::marked(index),
            (Some(index), n) => {
                log::warn!(
                    "Question {} (page {}): {} filled markers, keeping the last (choice {})",
                    self.number,
                    self.page,
                    n,
                    index + 1
                );
                AnswerKey {
                    index,
                    source: AnswerSource::Conflicting,
                }
            },
            (None, _) => {
                log::debug!(
                    "Question {} (page {}): no filled marker, defaulting to choice 1",
                    self.number,
                    self.page
                );
                AnswerKey::defaulted()
            },
        };

        let mut options = self.options.into_iter().map(|text| {
            if text.is_empty() {
                config.empty_option_placeholder.clone()
            } else {
                text
            }
        });
        let options: [String; OPTION_COUNT] = std::array::from_fn(|_| options.next().unwrap_or_default());

        log::trace!("Finalized question {} (page {}, {:?})", self.number, self.page, self.column);
        Some(QuestionRecord {
            number: self.number,
            page: self.page,
            column: self.column,
            question_top: self.question_top,
            options_top: self.options_top,
            options,
            answer,
        })
    }
}

/// Segmentation state between fragments.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SegmenterState {
    /// No question open
    #[default]
    Idle,
    /// A question is collecting options
    Accumulating(PartialQuestion),
}

/// Question segmentation state machine.
///
/// # Examples
///
/// ```
/// use quiz_oxide::layout::{Column, TextFragment};
/// use quiz_oxide::pipeline::QuestionSegmenter;
///
/// let column = vec![
///     TextFragment::new(0, (20.0, 100.0, 280.0, 112.0), "1. What is X?"),
///     TextFragment::new(0, (20.0, 150.0, 280.0, 162.0), "① A ② B ③ C ❹ D"),
/// ];
/// let records = QuestionSegmenter::default().segment_column(&column, Column::Left);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].number, "1");
/// assert_eq!(records[0].options, ["A", "B", "C", "D"]);
/// assert_eq!(records[0].answer_index(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuestionSegmenter {
    config: SegmenterConfig,
}

impl QuestionSegmenter {
    /// Create a segmenter with the given configuration.
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Advance the state machine by one fragment.
    ///
    /// Returns the next state and the record finalized by this fragment, if
    /// any. A finalized question with fewer than four options yields `None`.
    pub fn step(
        &self,
        state: SegmenterState,
        fragment: &TextFragment,
        column: Column,
    ) -> (SegmenterState, Option<QuestionRecord>) {
        let text = fragment.text.trim();
        if text.is_empty() || self.config.is_noise(text) {
            return (state, None);
        }

        if let Some(number) = question_number(text) {
            let finalized = match state {
                SegmenterState::Accumulating(open) => open.finalize(&self.config),
                SegmenterState::Idle => None,
            };
            let opened = PartialQuestion::open(number, fragment, column);
            return (SegmenterState::Accumulating(opened), finalized);
        }

        match state {
            SegmenterState::Idle => (SegmenterState::Idle, None),
            SegmenterState::Accumulating(mut open) => {
                if contains_marker(text) {
                    open.absorb_options(fragment, text);
                } else if !open.options.is_empty() {
                    open.continue_last(text);
                }
                (SegmenterState::Accumulating(open), None)
            },
        }
    }

    /// Finalize whatever is open at the end of a stream.
    pub fn finish(&self, state: SegmenterState) -> Option<QuestionRecord> {
        match state {
            SegmenterState::Accumulating(open) => open.finalize(&self.config),
            SegmenterState::Idle => None,
        }
    }

    /// Segment one ordered column stream into validated records.
    pub fn segment_column<'a, I>(&self, fragments: I, column: Column) -> Vec<QuestionRecord>
    where
        I: IntoIterator<Item = &'a TextFragment>,
    {
        let mut records = Vec::new();
        let mut state = SegmenterState::Idle;

        for fragment in fragments {
            let (next, finalized) = self.step(state, fragment, column);
            records.extend(finalized);
            state = next;
        }
        records.extend(self.finish(state));

        records
    }
}
