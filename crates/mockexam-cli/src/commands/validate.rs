//! The `mockexam validate` command.

use std::path::PathBuf;

use anyhow::Result;

use mockexam_core::bank;
use mockexam_core::config::load_config_from;

pub fn execute(bank_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    config.validate()?;
    let questions = bank::load_bank_path(&bank_path)?;

    println!(
        "Question bank: {} ({} questions)",
        bank_path.display(),
        questions.len()
    );

    let warnings = bank::validate_bank(&questions, config.total_questions);
    for w in &warnings {
        let prefix = w
            .position
            .map(|i| format!("  [#{}]", i + 1))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
