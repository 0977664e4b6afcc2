//! Quiz session state for a loaded exam.
//!
//! A [`QuizSession`] is built once per loaded document and owns everything
//! a front end needs to walk through the questions: the visiting order, a
//! cursor into it and the latest result per question. It changes only
//! through its named transitions (answer, advance, retreat, reset,
//! retry-incorrect, shuffle).

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::pipeline::{AnswerKey, QuestionRecord, OPTION_COUNT};

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The chosen option matches the key
    Correct,
    /// The chosen option does not match
    Incorrect {
        /// Keyed option index
        expected: usize,
    },
}

impl AnswerOutcome {
    /// Whether the answer was correct.
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct)
    }
}

/// Snapshot of session progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position in the current order, 0 when empty
    pub position: usize,
    /// Number of questions in the current order
    pub total: usize,
    /// Questions in the current order with a recorded result
    pub answered: usize,
    /// Questions in the current order answered correctly
    pub correct: usize,
}

/// Walk-through state over the questions of one exam.
///
/// # Examples
///
/// ```
/// use quiz_oxide::pipeline::AnswerKey;
/// use quiz_oxide::session::{AnswerOutcome, QuizSession};
///
/// let mut session = QuizSession::new(vec![AnswerKey::marked(2), AnswerKey::marked(0)]);
/// assert_eq!(session.answer(2), Some(AnswerOutcome::Correct));
/// assert!(session.advance());
/// assert_eq!(session.answer(3), Some(AnswerOutcome::Incorrect { expected: 0 }));
/// assert_eq!(session.progress().correct, 1);
/// ```
#[derive(Debug, Clone)]
pub struct QuizSession {
    keys: Vec<AnswerKey>,
    order: Vec<usize>,
    cursor: usize,
    results: BTreeMap<usize, bool>,
}

impl QuizSession {
    /// Create a session over questions with the given answer keys.
    pub fn new(keys: Vec<AnswerKey>) -> Self {
        let order = (0..keys.len()).collect();
        Self {
            keys,
            order,
            cursor: 0,
            results: BTreeMap::new(),
        }
    }

    /// Create a session for segmented records.
    pub fn from_records(records: &[QuestionRecord]) -> Self {
        Self::new(records.iter().map(|r| r.answer).collect())
    }

    /// Record index of the current question.
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.cursor).copied()
    }

    /// Current visiting order (record indices).
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Latest result for a record index.
    pub fn result(&self, question: usize) -> Option<bool> {
        self.results.get(&question).copied()
    }

    /// Answer the current question with option `choice`.
    ///
    /// Returns `None` when there is no current question or `choice` is not
    /// a valid option index. A repeated answer replaces the earlier result.
    pub fn answer(&mut self, choice: usize) -> Option<AnswerOutcome> {
        if choice >= OPTION_COUNT {
            return None;
        }
        let question = self.current()?;
        let key = self.keys[question];
        let outcome = if key.accepts(choice) {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect {
                expected: key.index,
            }
        };
        self.results.insert(question, outcome.is_correct());
        log::trace!("Question #{}: choice {} -> {:?}", question, choice, outcome);
        Some(outcome)
    }

    /// Move to the next question. Returns false at the end.
    pub fn advance(&mut self) -> bool {
        if self.cursor + 1 < self.order.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous question. Returns false at the start.
    pub fn retreat(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Restore document order, rewind and forget all results.
    pub fn reset(&mut self) {
        self.order = (0..self.keys.len()).collect();
        self.cursor = 0;
        self.results.clear();
    }

    /// Restrict the order to questions answered incorrectly and rewind.
    ///
    /// Their results are cleared so they can be answered again. Returns the
    /// number of questions queued; with nothing to retry the session is left
    /// untouched.
    pub fn retry_incorrect(&mut self) -> usize {
        let retry: Vec<usize> = self
            .order
            .iter()
            .copied()
            .filter(|q| self.results.get(q) == Some(&false))
            .collect();
        if retry.is_empty() {
            return 0;
        }
        for q in &retry {
            self.results.remove(q);
        }
        self.order = retry;
        self.cursor = 0;
        self.order.len()
    }

    /// Shuffle the current order deterministically from `seed` and rewind.
    ///
    /// Results are kept.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.order.shuffle(&mut rng);
        self.cursor = 0;
    }

    /// Progress over the current order.
    pub fn progress(&self) -> Progress {
        let mut answered = 0;
        let mut correct = 0;
        for q in &self.order {
            if let Some(&ok) = self.results.get(q) {
                answered += 1;
                if ok {
                    correct += 1;
                }
            }
        }
        Progress {
            position: if self.order.is_empty() { 0 } else { self.cursor + 1 },
            total: self.order.len(),
            answered,
            correct,
        }
    }

    /// Whether every question in the current order has a result.
    pub fn is_complete(&self) -> bool {
        let p = self.progress();
        p.answered == p.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(n: usize) -> QuizSession {
        QuizSession::new((0..n).map(|i| AnswerKey::marked(i % OPTION_COUNT)).collect())
    }

    #[test]
    fn test_empty_session() {
        let mut s = session(0);
        assert_eq!(s.current(), None);
        assert_eq!(s.answer(0), None);
        assert!(!s.advance());
        assert_eq!(s.progress().position, 0);
        assert!(s.is_complete());
    }

    #[test]
    fn test_navigation_bounds() {
        let mut s = session(3);
        assert!(!s.retreat());
        assert!(s.advance());
        assert!(s.advance());
        assert!(!s.advance());
        assert_eq!(s.current(), Some(2));
        assert!(s.retreat());
        assert_eq!(s.progress().position, 2);
    }

    #[test]
    fn test_invalid_choice() {
        let mut s = session(1);
        assert_eq!(s.answer(OPTION_COUNT), None);
        assert_eq!(s.result(0), None);
    }

    #[test]
    fn test_reanswer_replaces_result() {
        let mut s = session(1);
        assert!(!s.answer(3).unwrap().is_correct());
        assert!(s.answer(0).unwrap().is_correct());
        assert_eq!(s.result(0), Some(true));
    }

    #[test]
    fn test_retry_incorrect() {
        let mut s = session(4);
        s.answer(0); // q0 correct
        s.advance();
        s.answer(0); // q1 wrong
        s.advance();
        s.answer(2); // q2 correct
        s.advance();
        s.answer(0); // q3 wrong

        assert_eq!(s.retry_incorrect(), 2);
        assert_eq!(s.order(), &[1, 3]);
        assert_eq!(s.current(), Some(1));
        assert_eq!(s.progress().answered, 0);
        assert_eq!(s.result(0), Some(true));
    }

    #[test]
    fn test_retry_with_nothing_wrong_is_noop() {
        let mut s = session(2);
        s.answer(0);
        s.advance();
        assert_eq!(s.retry_incorrect(), 0);
        assert_eq!(s.order(), &[0, 1]);
        assert_eq!(s.current(), Some(1));
    }

    #[test]
    fn test_shuffle_deterministic() {
        let mut a = session(20);
        let mut b = session(20);
        a.shuffle(42);
        b.shuffle(42);
        assert_eq!(a.order(), b.order());

        let mut sorted = a.order().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_reset() {
        let mut s = session(5);
        s.shuffle(7);
        s.answer(1);
        s.advance();
        s.reset();
        assert_eq!(s.order(), &[0, 1, 2, 3, 4]);
        assert_eq!(s.current(), Some(0));
        assert_eq!(s.progress().answered, 0);
    }
}
