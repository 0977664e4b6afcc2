//! Integration tests for quiz sessions over segmented exams.

use quiz_oxide::document::{MemoryDocument, MemoryPage};
use quiz_oxide::pipeline::{ExamPipeline, LoadedExam};
use quiz_oxide::session::{AnswerOutcome, Progress, QuizSession};

fn loaded_exam() -> LoadedExam<MemoryDocument> {
    let mut page = MemoryPage::new(600.0, 800.0);
    let keyed = ["❶ a ② b ③ c ④ d", "① a ❷ b ③ c ④ d", "① a ② b ❸ c ④ d", "① a ② b ③ c ❹ d"];
    for (i, options) in keyed.iter().enumerate() {
        let y = 80.0 + i as f32 * 120.0;
        page = page
            .with_fragment((30.0, y, 280.0, y + 12.0), format!("{}. Question {}", i + 1, i + 1))
            .with_fragment((30.0, y + 40.0, 280.0, y + 52.0), *options);
    }
    LoadedExam::load(MemoryDocument::from_pages([page]), ExamPipeline::new()).unwrap()
}

#[test]
fn test_walk_through_exam() {
    let exam = loaded_exam();
    assert_eq!(exam.len(), 4);
    let mut session = QuizSession::from_records(exam.records());

    // Answer everything with choice 3 (index 2): only question 3 is right
    let mut outcomes = Vec::new();
    loop {
        outcomes.push(session.answer(2).unwrap());
        if !session.advance() {
            break;
        }
    }

    assert_eq!(
        outcomes,
        vec![
            AnswerOutcome::Incorrect { expected: 0 },
            AnswerOutcome::Incorrect { expected: 1 },
            AnswerOutcome::Correct,
            AnswerOutcome::Incorrect { expected: 3 },
        ]
    );
    assert!(session.is_complete());
    assert_eq!(
        session.progress(),
        Progress {
            position: 4,
            total: 4,
            answered: 4,
            correct: 1
        }
    );
}

#[test]
fn test_retry_then_shuffle() {
    let exam = loaded_exam();
    let mut session = QuizSession::from_records(exam.records());
    loop {
        session.answer(2);
        if !session.advance() {
            break;
        }
    }

    assert_eq!(session.retry_incorrect(), 3);
    assert_eq!(session.order(), &[0, 1, 3]);

    session.shuffle(2024);
    let mut order = session.order().to_vec();
    order.sort_unstable();
    assert_eq!(order, vec![0, 1, 3]);
    assert_eq!(session.progress().position, 1);

    // Answer the retried questions correctly, whatever the order
    loop {
        let q = session.current().unwrap();
        let key = exam.records()[q].answer_index();
        assert!(session.answer(key).unwrap().is_correct());
        if !session.advance() {
            break;
        }
    }
    assert_eq!(session.progress().correct, 3);
    assert_eq!(session.retry_incorrect(), 0);
}

#[test]
fn test_same_seed_same_order_across_sessions() {
    let exam = loaded_exam();
    let mut a = QuizSession::from_records(exam.records());
    let mut b = QuizSession::from_records(exam.records());
    a.shuffle(99);
    b.shuffle(99);
    assert_eq!(a.order(), b.order());
}

#[test]
fn test_reset_restores_document_order() {
    let exam = loaded_exam();
    let mut session = QuizSession::from_records(exam.records());
    session.shuffle(5);
    session.answer(0);
    session.reset();
    assert_eq!(session.order(), &[0, 1, 2, 3]);
    assert_eq!(session.progress().answered, 0);
}
