//! Question bank loading and validation.
//!
//! Banks are JSON arrays of `{question, options, answer}` records or TOML
//! files with `[[questions]]` tables. Every record goes through
//! [`Question::new`], so a malformed question fails the whole file.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::Question;

/// On-disk bank format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankFormat {
    Json,
    Toml,
}

impl BankFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(BankFormat::Json),
            "toml" => Some(BankFormat::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlBankFile {
    #[serde(default)]
    questions: Vec<Question>,
}

/// Parse a single bank file.
pub fn load_bank(path: &Path) -> Result<Vec<Question>> {
    let format = BankFormat::from_path(path).with_context(|| {
        format!(
            "unsupported question bank extension (expected .json or .toml): {}",
            path.display()
        )
    })?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, format, path)
}

/// Parse bank content (useful for testing).
pub fn parse_bank_str(
    content: &str,
    format: BankFormat,
    source_path: &Path,
) -> Result<Vec<Question>> {
    let questions = match format {
        BankFormat::Json => serde_json::from_str::<Vec<Question>>(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?,
        BankFormat::Toml => {
            toml::from_str::<TomlBankFile>(content)
                .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?
                .questions
        }
    };

    tracing::debug!(
        count = questions.len(),
        "parsed question bank {}",
        source_path.display()
    );
    Ok(questions)
}

/// Recursively load every `.json` and `.toml` bank in a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<Question>> {
    let mut questions = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            questions.extend(load_bank_directory(&path)?);
        } else if BankFormat::from_path(&path).is_some() {
            match load_bank(&path) {
                Ok(bank) => questions.extend(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {e:#}", path.display());
                }
            }
        }
    }

    Ok(questions)
}

/// Load a single file or a whole directory.
pub fn load_bank_path(path: &Path) -> Result<Vec<Question>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        load_bank(path)
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Zero-based position in the bank (if applicable).
    pub position: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a bank for issues that do not make it unusable but change the exam.
pub fn validate_bank(questions: &[Question], total_questions: usize) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if questions.is_empty() {
        warnings.push(ValidationWarning {
            position: None,
            message: "question bank is empty; no exam can be started".into(),
        });
        return warnings;
    }

    let mut seen = HashSet::new();
    for (i, q) in questions.iter().enumerate() {
        if !seen.insert(q.text()) {
            warnings.push(ValidationWarning {
                position: Some(i),
                message: format!("duplicate question text: {}", q.text()),
            });
        }
    }

    if questions.len() < total_questions {
        warnings.push(ValidationWarning {
            position: None,
            message: format!(
                "bank has {} questions but the exam asks for {total_questions}; \
                 exams will be shortened to {}",
                questions.len(),
                questions.len()
            ),
        });
    }

    warnings
}
