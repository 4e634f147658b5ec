//! Exam engine error types.
//!
//! Every failure the engine can report is local and synchronous. Nothing here
//! is transient, so no variant is ever retried; the caller decides whether to
//! ignore, log, or display it.

use thiserror::Error;

/// Result alias for engine operations.
pub type ExamResult<T> = Result<T, ExamError>;

/// Errors raised by the exam session engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExamError {
    /// Sampling was attempted against a pool with no questions.
    #[error("question pool is empty")]
    InvalidPool,

    /// A question failed validation when it was built.
    #[error("invalid question {text:?}: {reason}")]
    InvalidQuestion { text: String, reason: String },

    /// The question index is outside `0..question_count`.
    #[error("question index {index} out of range (session has {question_count} questions)")]
    InvalidIndex { index: usize, question_count: usize },

    /// The option index is outside the question's option list.
    #[error("option {option} out of range for question {index} ({option_count} options)")]
    InvalidOption {
        index: usize,
        option: usize,
        option_count: usize,
    },

    /// A selection value did not exactly match any option of the question.
    #[error("{value:?} is not an option of question {index}")]
    UnknownOption { index: usize, value: String },

    /// An answer was recorded after the session was submitted.
    #[error("session is closed; answers can no longer be changed")]
    SessionClosed,

    /// `submit` was called on a session that is already submitted.
    #[error("session has already been submitted")]
    AlreadySubmitted,

    /// Scoring was requested before the session was submitted.
    #[error("session has not been submitted yet")]
    NotSubmitted,
}

impl ExamError {
    /// Returns `true` if the caller can safely ignore this error and keep
    /// showing the final result.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExamError::SessionClosed | ExamError::AlreadySubmitted)
    }
}
