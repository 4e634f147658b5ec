//! Exam configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level mockexam configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamConfig {
    /// Number of questions sampled per exam.
    #[serde(default = "default_total_questions")]
    pub total_questions: usize,
    /// Exam length in seconds.
    #[serde(default = "default_duration_secs")]
    pub exam_duration_secs: u64,
}

fn default_total_questions() -> usize {
    40
}
fn default_duration_secs() -> u64 {
    7200
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            total_questions: default_total_questions(),
            exam_duration_secs: default_duration_secs(),
        }
    }
}

impl ExamConfig {
    pub fn exam_duration(&self) -> Duration {
        Duration::from_secs(self.exam_duration_secs)
    }

    /// Reject settings that cannot produce an exam.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.total_questions >= 1,
            "total_questions must be at least 1"
        );
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mockexam.toml` in the current directory
/// 2. `~/.config/mockexam/config.toml`
///
/// Environment variable overrides: `MOCKEXAM_TOTAL_QUESTIONS`, `MOCKEXAM_DURATION_SECS`.
pub fn load_config() -> Result<ExamConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
///
/// The result is not validated, so callers can layer command-line overrides
/// on top before calling [`ExamConfig::validate`].
pub fn load_config_from(path: Option<&Path>) -> Result<ExamConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mockexam.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => ExamConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str) -> Result<ExamConfig> {
    Ok(toml::from_str::<ExamConfig>(content)?)
}

/// Apply `MOCKEXAM_*` overrides read through `lookup`.
fn apply_env_overrides(
    config: &mut ExamConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(raw) = lookup("MOCKEXAM_TOTAL_QUESTIONS") {
        config.total_questions = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid MOCKEXAM_TOTAL_QUESTIONS: '{raw}'"))?;
    }
    if let Some(raw) = lookup("MOCKEXAM_DURATION_SECS") {
        config.exam_duration_secs = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid MOCKEXAM_DURATION_SECS: '{raw}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mockexam"))
}
