//! Exam session state machine.
//!
//! A session moves from [`SessionStatus::Active`] to
//! [`SessionStatus::Submitted`] exactly once and never back. The question list
//! and start timestamp are fixed at creation; only the answer slots and the
//! submission change afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ExamError, ExamResult};
use crate::model::Question;
use crate::timer::{Clock, SystemClock};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Submitted,
}

/// What caused a session to be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitTrigger {
    /// The participant asked to submit.
    Manual,
    /// The deadline was observed to have passed.
    Expired,
}

impl fmt::Display for SubmitTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitTrigger::Manual => write!(f, "manual"),
            SubmitTrigger::Expired => write!(f, "expired"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Submission {
    at: DateTime<Utc>,
    trigger: SubmitTrigger,
}

/// One exam attempt, from creation to submission.
#[derive(Debug, Clone)]
pub struct ExamSession {
    id: Uuid,
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    started_at: DateTime<Utc>,
    submission: Option<Submission>,
}

impl ExamSession {
    /// Start a session now, with every question unanswered.
    pub fn create(questions: Vec<Question>) -> Self {
        Self::create_with_clock(questions, &SystemClock)
    }

    /// Start a session at the clock's current time.
    pub fn create_with_clock(questions: Vec<Question>, clock: &dyn Clock) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            answers: vec![None; questions.len()],
            questions,
            started_at: clock.now(),
            submission: None,
        };
        tracing::info!(
            session_id = %session.id,
            questions = session.questions.len(),
            "exam session started"
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> ExamResult<&Question> {
        self.questions.get(index).ok_or(ExamError::InvalidIndex {
            index,
            question_count: self.questions.len(),
        })
    }

    /// Number of questions in this session.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn status(&self) -> SessionStatus {
        if self.submission.is_some() {
            SessionStatus::Submitted
        } else {
            SessionStatus::Active
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.submission.is_some()
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submission.map(|s| s.at)
    }

    pub fn submit_trigger(&self) -> Option<SubmitTrigger> {
        self.submission.map(|s| s.trigger)
    }

    /// Snapshot of every answer slot; `None` means unanswered.
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    /// The selected option index for question `index`, if any.
    pub fn answer(&self, index: usize) -> ExamResult<Option<usize>> {
        self.question(index)?;
        Ok(self.answers[index])
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Select option `option` for question `index`, replacing any earlier
    /// selection.
    pub fn record_answer(&mut self, index: usize, option: usize) -> ExamResult<()> {
        if self.is_submitted() {
            return Err(ExamError::SessionClosed);
        }

        let option_count = self.question(index)?.options().len();
        if option >= option_count {
            return Err(ExamError::InvalidOption {
                index,
                option,
                option_count,
            });
        }

        let previous = self.answers[index].replace(option);
        tracing::debug!(
            session_id = %self.id,
            index,
            option,
            ?previous,
            "answer recorded"
        );
        Ok(())
    }

    /// Close the session at the system clock's current time.
    pub fn submit(&mut self, trigger: SubmitTrigger) -> ExamResult<()> {
        self.submit_with_clock(trigger, &SystemClock)
    }

    /// Close the session. A second call fails with
    /// [`ExamError::AlreadySubmitted`] and leaves the first submission intact,
    /// so a manual submit racing an expiry submit is detectable.
    pub fn submit_with_clock(
        &mut self,
        trigger: SubmitTrigger,
        clock: &dyn Clock,
    ) -> ExamResult<()> {
        if self.is_submitted() {
            return Err(ExamError::AlreadySubmitted);
        }

        self.submission = Some(Submission {
            at: clock.now(),
            trigger,
        });
        tracing::info!(
            session_id = %self.id,
            %trigger,
            answered = self.answered_count(),
            questions = self.questions.len(),
            "exam session submitted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;

    fn question(text: &str) -> Question {
        Question::new(text, vec!["A".into(), "B".into(), "C".into()], "A").unwrap()
    }

    fn session(n: usize) -> ExamSession {
        ExamSession::create((0..n).map(|i| question(&format!("Q{i}"))).collect())
    }

    #[test]
    fn new_session_is_active_and_unanswered() {
        let s = session(3);
        assert_eq!(s.status(), SessionStatus::Active);
        assert_eq!(s.answers(), &[None, None, None]);
        assert_eq!(s.answered_count(), 0);
        assert!(s.submitted_at().is_none());
    }

    #[test]
    fn start_time_comes_from_clock() {
        let clock = ManualClock::default();
        let s = ExamSession::create_with_clock(vec![question("Q")], &clock);
        assert_eq!(s.started_at(), clock.now());
    }

    #[test]
    fn last_write_wins() {
        let mut s = session(2);
        s.record_answer(1, 2).unwrap();
        assert_eq!(s.answer(1).unwrap(), Some(2));
        s.record_answer(1, 0).unwrap();
        assert_eq!(s.answer(1).unwrap(), Some(0));
        assert_eq!(s.answers().len(), 2);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut s = session(2);
        assert_eq!(
            s.record_answer(2, 0).unwrap_err(),
            ExamError::InvalidIndex {
                index: 2,
                question_count: 2
            }
        );
        assert!(s.answer(5).is_err());
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let mut s = session(1);
        assert_eq!(
            s.record_answer(0, 3).unwrap_err(),
            ExamError::InvalidOption {
                index: 0,
                option: 3,
                option_count: 3
            }
        );
        assert_eq!(s.answer(0).unwrap(), None);
    }

    #[test]
    fn second_submit_fails_and_keeps_first() {
        let clock = ManualClock::default();
        let mut s = session(1);
        s.submit_with_clock(SubmitTrigger::Expired, &clock).unwrap();

        clock.advance(std::time::Duration::from_secs(3));
        assert_eq!(
            s.submit_with_clock(SubmitTrigger::Manual, &clock)
                .unwrap_err(),
            ExamError::AlreadySubmitted
        );
        assert_eq!(s.status(), SessionStatus::Submitted);
        assert_eq!(s.submit_trigger(), Some(SubmitTrigger::Expired));
        let first_submit = clock.now() - chrono::Duration::seconds(3);
        assert_eq!(s.submitted_at(), Some(first_submit));
    }

    #[test]
    fn answers_are_frozen_after_submit() {
        let mut s = session(2);
        s.record_answer(0, 1).unwrap();
        s.submit(SubmitTrigger::Manual).unwrap();

        assert_eq!(s.record_answer(0, 2).unwrap_err(), ExamError::SessionClosed);
        assert_eq!(s.record_answer(1, 0).unwrap_err(), ExamError::SessionClosed);
        assert_eq!(s.answers(), &[Some(1), None]);
    }

    #[test]
    fn closed_check_precedes_index_check() {
        let mut s = session(1);
        s.submit(SubmitTrigger::Manual).unwrap();
        assert_eq!(s.record_answer(9, 9).unwrap_err(), ExamError::SessionClosed);
    }
}
