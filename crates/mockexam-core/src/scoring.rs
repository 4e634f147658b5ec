//! Scoring and per-question review.
//!
//! Scoring is a pure function of a submitted session. Unanswered questions
//! count as incorrect and stay in the denominator.

use serde::{Deserialize, Serialize};

use crate::error::{ExamError, ExamResult};
use crate::session::ExamSession;

/// Chosen vs. correct answer for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionReview {
    pub question_text: String,
    pub correct_answer_text: String,
    /// `None` when the question was left unanswered.
    pub chosen_answer_text: Option<String>,
    pub is_correct: bool,
}

/// Final score of a submitted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub correct_count: usize,
    pub reviews: Vec<QuestionReview>,
}

impl ScoreResult {
    /// Number of questions scored.
    pub fn total(&self) -> usize {
        self.reviews.len()
    }

    pub fn unanswered_count(&self) -> usize {
        self.reviews
            .iter()
            .filter(|r| r.chosen_answer_text.is_none())
            .count()
    }

    /// Share of questions answered correctly, in percent. An empty exam scores 0.
    pub fn percentage(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        self.correct_count as f64 / self.reviews.len() as f64 * 100.0
    }

    /// Render the review as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# Exam Review\n\n");
        md.push_str(&format!(
            "Score: **{} / {}** ({:.1}%)\n\n",
            self.correct_count,
            self.total(),
            self.percentage()
        ));

        for (i, r) in self.reviews.iter().enumerate() {
            let mark = if r.is_correct { "correct" } else { "incorrect" };
            md.push_str(&format!("## Q{}. {}\n\n", i + 1, r.question_text));
            md.push_str(&format!("- Correct: **{}**\n", r.correct_answer_text));
            md.push_str(&format!(
                "- Your answer: {} ({mark})\n\n",
                r.chosen_answer_text.as_deref().unwrap_or("Not Answered")
            ));
        }
        md
    }
}

/// Score a submitted session.
///
/// Fails with [`ExamError::NotSubmitted`] while the session is still active,
/// so a partial score can never be mistaken for a final one. Calling it twice
/// on the same session yields equal results.
pub fn evaluate(session: &ExamSession) -> ExamResult<ScoreResult> {
    if !session.is_submitted() {
        return Err(ExamError::NotSubmitted);
    }

    let reviews: Vec<QuestionReview> = session
        .questions()
        .iter()
        .zip(session.answers())
        .map(|(question, &answer)| {
            let chosen = answer.and_then(|idx| question.option(idx));
            QuestionReview {
                question_text: question.text().to_string(),
                correct_answer_text: question.correct_answer().to_string(),
                chosen_answer_text: chosen.map(str::to_string),
                is_correct: chosen == Some(question.correct_answer()),
            }
        })
        .collect();

    let correct_count = reviews.iter().filter(|r| r.is_correct).count();
    tracing::debug!(
        session_id = %session.id(),
        correct_count,
        total = reviews.len(),
        "session evaluated"
    );

    Ok(ScoreResult {
        correct_count,
        reviews,
    })
}
