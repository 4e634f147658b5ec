//! Exam orchestration.
//!
//! Ties a shared pool, the exam configuration, and a clock together so a
//! presentation layer only has to start sessions, poll the deadline, and
//! submit.

use std::sync::Arc;

use rand::Rng;

use crate::config::ExamConfig;
use crate::error::{ExamError, ExamResult};
use crate::pool::QuestionPool;
use crate::scoring::{evaluate, ScoreResult};
use crate::session::{ExamSession, SubmitTrigger};
use crate::timer::{Clock, ExamTimer, SystemClock};

/// Starts and closes exam sessions against one question pool.
#[derive(Clone)]
pub struct ExamEngine {
    pool: Arc<QuestionPool>,
    config: ExamConfig,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ExamEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExamEngine")
            .field("pool_size", &self.pool.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ExamEngine {
    pub fn new(pool: Arc<QuestionPool>, config: ExamConfig) -> Self {
        Self::with_clock(pool, config, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: Arc<QuestionPool>, config: ExamConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &ExamConfig {
        &self.config
    }

    pub fn pool(&self) -> &QuestionPool {
        &self.pool
    }

    /// Sample `total_questions` from the pool and start a session.
    pub fn start_session(&self) -> ExamResult<ExamSession> {
        self.start_session_with(&mut rand::rng())
    }

    /// Like [`start_session`](Self::start_session) with a caller-supplied RNG.
    pub fn start_session_with<R: Rng + ?Sized>(&self, rng: &mut R) -> ExamResult<ExamSession> {
        let questions = self.pool.sample_with(self.config.total_questions, rng)?;
        let session = ExamSession::create_with_clock(questions, self.clock.as_ref());
        Ok(session)
    }

    /// A timer for the configured duration on this engine's clock.
    pub fn timer(&self) -> ExamTimer {
        ExamTimer::with_clock(self.config.exam_duration(), Arc::clone(&self.clock))
    }

    /// Submit the session automatically if its time is up.
    ///
    /// Returns `true` only for the call that performed the automatic submit.
    /// A session that is already submitted, manually or by an earlier poll,
    /// is left alone.
    pub fn enforce_deadline(&self, session: &mut ExamSession) -> ExamResult<bool> {
        if session.is_submitted() || !self.timer().is_expired(session) {
            return Ok(false);
        }

        match session.submit_with_clock(SubmitTrigger::Expired, self.clock.as_ref()) {
            Ok(()) => {
                tracing::info!(session_id = %session.id(), "time expired, session auto-submitted");
                Ok(true)
            }
            Err(ExamError::AlreadySubmitted) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Submit on the participant's request and score the result.
    pub fn finish(&self, session: &mut ExamSession) -> ExamResult<ScoreResult> {
        session.submit_with_clock(SubmitTrigger::Manual, self.clock.as_ref())?;
        evaluate(session)
    }
}
