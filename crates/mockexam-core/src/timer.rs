//! Exam clock and countdown.
//!
//! There is no background timer. Remaining time is a pure function of the
//! clock and the session's start timestamp, and callers poll it. Expiry is
//! therefore only observed when someone asks: an answer that arrives a moment
//! after the nominal deadline is still accepted if no poll has run yet, and
//! the first poll that sees `is_expired() == true` is the authoritative
//! deadline.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::session::ExamSession;

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Useful for tests and replays.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = add_saturating(*now, by);
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Computes elapsed and remaining time for a session against a fixed duration.
#[derive(Clone)]
pub struct ExamTimer {
    duration: Duration,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for ExamTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExamTimer")
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl ExamTimer {
    /// A timer on the system clock.
    pub fn new(duration: Duration) -> Self {
        Self::with_clock(duration, Arc::new(SystemClock))
    }

    pub fn with_clock(duration: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { duration, clock }
    }

    pub fn from_secs(duration_secs: u64) -> Self {
        Self::new(Duration::from_secs(duration_secs))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time since the session started. A clock that reads earlier than the
    /// start timestamp yields zero.
    pub fn elapsed(&self, session: &ExamSession) -> Duration {
        (self.clock.now() - session.started_at())
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// `max(0, duration - elapsed)`.
    pub fn remaining(&self, session: &ExamSession) -> Duration {
        self.duration.saturating_sub(self.elapsed(session))
    }

    /// Whether the session has run out of time. Must be checked on every
    /// poll; nothing pushes an expiry notification.
    pub fn is_expired(&self, session: &ExamSession) -> bool {
        self.remaining(session).is_zero()
    }

    /// The nominal wall-clock deadline.
    pub fn deadline(&self, session: &ExamSession) -> DateTime<Utc> {
        add_saturating(session.started_at(), self.duration)
    }

    pub fn countdown(&self, session: &ExamSession) -> Countdown {
        Countdown(self.remaining(session))
    }
}

fn add_saturating(at: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(by)
        .ok()
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Remaining time formatted as `MM:SS`. Minutes are not wrapped into hours,
/// so a two-hour exam starts at `120:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown(pub Duration);

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        write!(f, "{:02}:{:02}", secs / 60, secs % 60)
    }
}
