//! Answer recording by option value.
//!
//! The presentation layer hands over what the participant picked (the option
//! text it displayed). The tracker maps that value to an option index by exact
//! match and writes it into the session.

use serde::{Deserialize, Serialize};

use crate::error::{ExamError, ExamResult};
use crate::session::ExamSession;

/// An answer-selection event coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSelection {
    pub question_index: usize,
    pub selected_option_value: String,
}

impl AnswerSelection {
    pub fn new(question_index: usize, selected_option_value: impl Into<String>) -> Self {
        Self {
            question_index,
            selected_option_value: selected_option_value.into(),
        }
    }
}

/// Validated write access to a session's answers.
#[derive(Debug)]
pub struct AnswerTracker<'s> {
    session: &'s mut ExamSession,
}

impl<'s> AnswerTracker<'s> {
    pub fn new(session: &'s mut ExamSession) -> Self {
        Self { session }
    }

    /// Record `value` as the answer to question `index`, returning the
    /// option index it resolved to.
    ///
    /// `value` must equal one of the question's options byte for byte; there
    /// is no partial or case-insensitive matching. On any error the session
    /// is left unchanged.
    pub fn record(&mut self, index: usize, value: &str) -> ExamResult<usize> {
        if self.session.is_submitted() {
            return Err(ExamError::SessionClosed);
        }

        let option = self
            .session
            .question(index)?
            .option_index(value)
            .ok_or_else(|| ExamError::UnknownOption {
                index,
                value: value.to_string(),
            })?;

        self.session.record_answer(index, option)?;
        Ok(option)
    }

    /// Apply a selection event.
    pub fn apply(&mut self, selection: &AnswerSelection) -> ExamResult<usize> {
        self.record(selection.question_index, &selection.selected_option_value)
    }

    pub fn session(&self) -> &ExamSession {
        self.session
    }
}
