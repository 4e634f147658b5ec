//! Exam report with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::{evaluate, ScoreResult};
use crate::session::{ExamSession, SubmitTrigger};

/// A scored exam attempt, ready to be stored or shown later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub trigger: SubmitTrigger,
    /// Configured exam length in seconds.
    pub duration_secs: u64,
    pub score: ScoreResult,
}

impl ExamReport {
    /// Build a report from a submitted session.
    pub fn from_session(session: &ExamSession, duration_secs: u64) -> Result<Self> {
        let score = evaluate(session)?;
        let submission = session.submitted_at().zip(session.submit_trigger());
        let Some((submitted_at, trigger)) = submission else {
            anyhow::bail!("session {} has no submission record", session.id());
        };

        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            session_id: session.id(),
            started_at: session.started_at(),
            submitted_at,
            trigger,
            duration_secs,
            score,
        })
    }

    /// Seconds the participant actually spent.
    pub fn time_taken_secs(&self) -> u64 {
        (self.submitted_at - self.started_at).num_seconds().max(0) as u64
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create report directory {}", parent.display())
            })?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ExamReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
