//! Read-only question pool and sampling.
//!
//! A pool is built once by whoever loads the question bank and is then shared
//! (typically as `Arc<QuestionPool>`) by every session.

use rand::seq::index;
use rand::Rng;

use crate::error::{ExamError, ExamResult};
use crate::model::Question;

/// The full set of candidate questions.
#[derive(Debug, Clone, Default)]
pub struct QuestionPool {
    questions: Vec<Question>,
}

impl QuestionPool {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Draw up to `count` distinct questions in random order using the
    /// thread-local RNG.
    pub fn sample(&self, count: usize) -> ExamResult<Vec<Question>> {
        self.sample_with(count, &mut rand::rng())
    }

    /// Draw `min(count, len)` distinct questions without replacement, in
    /// random order.
    ///
    /// A `count` larger than the pool is clamped to the pool size rather than
    /// rejected, so a small bank yields a shorter exam instead of a failure.
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> ExamResult<Vec<Question>> {
        if self.questions.is_empty() {
            return Err(ExamError::InvalidPool);
        }

        let amount = count.min(self.questions.len());
        if amount < count {
            tracing::warn!(
                requested = count,
                available = self.questions.len(),
                "pool smaller than requested exam size, sampling every question"
            );
        }

        let picked: Vec<Question> = index::sample(rng, self.questions.len(), amount)
            .into_iter()
            .map(|i| self.questions[i].clone())
            .collect();

        tracing::debug!(sampled = picked.len(), "sampled questions from pool");
        Ok(picked)
    }
}

impl From<Vec<Question>> for QuestionPool {
    fn from(questions: Vec<Question>) -> Self {
        Self::new(questions)
    }
}
