//! End-to-end exam flows through the public API.
//!
//! These tests drive a session from sampling to scoring the way a
//! presentation layer would: poll the timer, record answers by option text,
//! submit, evaluate.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use mockexam_core::answers::AnswerTracker;
use mockexam_core::config::ExamConfig;
use mockexam_core::engine::ExamEngine;
use mockexam_core::model::Question;
use mockexam_core::pool::QuestionPool;
use mockexam_core::scoring::evaluate;
use mockexam_core::session::{ExamSession, SessionStatus, SubmitTrigger};
use mockexam_core::timer::{ExamTimer, ManualClock};
use mockexam_core::ExamError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn question(text: &str, options: &[&str], answer: &str) -> Question {
    let options = options.iter().map(|o| o.to_string()).collect();
    Question::new(text, options, answer).unwrap()
}

fn three_question_pool() -> QuestionPool {
    QuestionPool::new(vec![
        question("Capital of France?", &["Paris", "Lyon", "Nice"], "Paris"),
        question("2 + 3?", &["4", "5"], "5"),
        question("Largest planet?", &["Mars", "Jupiter", "Venus"], "Jupiter"),
    ])
}

#[test]
fn clamped_sample_scored_with_one_correct_one_blank_one_wrong() {
    let pool = three_question_pool();
    let questions = pool.sample_with(5, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(questions.len(), 3);

    let mut session = ExamSession::create(questions);
    let correct_0 = session.questions()[0].correct_answer().to_string();
    let wrong_2 = session.questions()[2]
        .options()
        .iter()
        .find(|o| o.as_str() != session.questions()[2].correct_answer())
        .cloned()
        .unwrap();

    let mut tracker = AnswerTracker::new(&mut session);
    tracker.record(0, &correct_0).unwrap();
    tracker.record(2, &wrong_2).unwrap();

    session.submit(SubmitTrigger::Manual).unwrap();
    let result = evaluate(&session).unwrap();

    assert_eq!(result.correct_count, 1);
    assert_eq!(result.total(), 3);
    assert_eq!(result.reviews[1].chosen_answer_text, None);
    assert_eq!(
        result.reviews[2].chosen_answer_text.as_deref(),
        Some(wrong_2.as_str())
    );
}

#[test]
fn idle_session_expires_and_is_auto_submitted() {
    let clock = Arc::new(ManualClock::default());
    let engine = ExamEngine::with_clock(
        Arc::new(three_question_pool()),
        ExamConfig {
            total_questions: 40,
            exam_duration_secs: 1,
        },
        clock.clone(),
    );
    let mut session = engine.start_session().unwrap();
    let timer = engine.timer();

    assert!(!timer.is_expired(&session));
    clock.advance(Duration::from_secs(2));
    assert!(timer.is_expired(&session));
    assert_eq!(timer.remaining(&session), Duration::ZERO);

    assert!(engine.enforce_deadline(&mut session).unwrap());
    assert_eq!(session.status(), SessionStatus::Submitted);

    let result = evaluate(&session).unwrap();
    assert_eq!(result.correct_count, 0);
    assert!(result
        .reviews
        .iter()
        .all(|r| r.chosen_answer_text.is_none()));
}

#[test]
fn real_clock_expiry() {
    let session = ExamSession::create(vec![question("Q", &["a", "b"], "a")]);
    let timer = ExamTimer::from_secs(1);
    assert!(!timer.is_expired(&session));
    std::thread::sleep(Duration::from_millis(1100));
    assert!(timer.is_expired(&session));
}

#[test]
fn unknown_selection_leaves_answer_untouched() {
    let mut session = ExamSession::create(three_question_pool().questions().to_vec());
    let mut tracker = AnswerTracker::new(&mut session);
    tracker.record(1, "5").unwrap();

    let err = tracker.record(1, "five").unwrap_err();
    assert!(matches!(err, ExamError::UnknownOption { index: 1, .. }));
    assert_eq!(session.answer(1).unwrap(), Some(1));
}

#[test]
fn answer_slots_never_change_length() {
    let mut session = ExamSession::create(three_question_pool().questions().to_vec());
    let n = session.len();

    let _ = session.record_answer(0, 1);
    let _ = session.record_answer(7, 0);
    let _ = session.record_answer(1, 9);
    assert_eq!(session.answers().len(), n);

    session.submit(SubmitTrigger::Manual).unwrap();
    let _ = session.record_answer(2, 0);
    assert_eq!(session.answers().len(), n);
}

#[test]
fn duplicate_submit_and_late_answers_are_recoverable() {
    let mut session = ExamSession::create(three_question_pool().questions().to_vec());
    session.record_answer(0, 0).unwrap();
    session.submit(SubmitTrigger::Manual).unwrap();
    let before = session.answers().to_vec();

    let dup = session.submit(SubmitTrigger::Expired).unwrap_err();
    assert_eq!(dup, ExamError::AlreadySubmitted);
    assert!(dup.is_recoverable());

    let late = session.record_answer(1, 1).unwrap_err();
    assert_eq!(late, ExamError::SessionClosed);
    assert!(late.is_recoverable());

    assert_eq!(session.answers(), before.as_slice());
    assert_eq!(session.status(), SessionStatus::Submitted);
    assert_eq!(evaluate(&session).unwrap(), evaluate(&session).unwrap());
}

#[test]
fn shared_pool_serves_independent_sessions() {
    let pool = Arc::new(QuestionPool::new(
        (0..50)
            .map(|i| question(&format!("Q{i}"), &["x", "y"], "x"))
            .collect(),
    ));
    let engine = ExamEngine::new(Arc::clone(&pool), ExamConfig::default());

    let mut first = engine.start_session().unwrap();
    let second = engine.start_session().unwrap();
    assert_eq!(first.len(), 40);

    let texts: HashSet<&str> = first.questions().iter().map(Question::text).collect();
    assert_eq!(texts.len(), 40);

    first.record_answer(0, 0).unwrap();
    assert_eq!(second.answer(0).unwrap(), None);
    assert_eq!(pool.len(), 50);
}
