//! Core data model types for mockexam.
//!
//! A [`Question`] is validated once when it is built and never changes after
//! that. Both the constructor and deserialization go through the same checks,
//! so every `Question` in the system satisfies its invariants.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ExamError, ExamResult};

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    /// The question prompt.
    #[serde(rename = "question")]
    text: String,
    /// Answer options, in display order.
    options: Vec<String>,
    /// The correct option text. Always equal to exactly one entry of `options`.
    #[serde(rename = "answer")]
    correct_answer: String,
}

/// Question bank record as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = ExamError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Question::new(record.question, record.options, record.answer)
    }
}

impl Question {
    /// Build a question, checking that it has a non-empty prompt, at least
    /// two distinct options, and an answer matching exactly one option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> ExamResult<Self> {
        let text = text.into();
        let correct_answer = correct_answer.into();

        let invalid = |reason: String| ExamError::InvalidQuestion {
            text: text.clone(),
            reason,
        };

        if text.trim().is_empty() {
            return Err(invalid("question text is empty".into()));
        }
        if options.len() < 2 {
            return Err(invalid(format!(
                "needs at least 2 options, found {}",
                options.len()
            )));
        }

        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.as_str()) {
                return Err(invalid(format!("duplicate option {option:?}")));
            }
        }

        if !options.contains(&correct_answer) {
            return Err(invalid(format!(
                "answer {correct_answer:?} is not one of the options"
            )));
        }

        Ok(Self {
            text,
            options,
            correct_answer,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Option text at `index`, if it exists.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Index of the option exactly equal to `value`. No trimming, no case-folding.
    pub fn option_index(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o == value)
    }

    /// Index of the correct option.
    pub fn correct_index(&self) -> usize {
        // Construction guarantees the answer is present.
        self.option_index(&self.correct_answer).unwrap_or_default()
    }
}
