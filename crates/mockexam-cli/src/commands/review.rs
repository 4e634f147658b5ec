//! The `mockexam review` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use mockexam_core::report::ExamReport;
use mockexam_core::scoring::ScoreResult;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = ExamReport::load_json(&report_path)?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.score.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Exam taken {} ({} submit, {}s of {}s used)",
                report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.trigger,
                report.time_taken_secs(),
                report.duration_secs
            );
            print_score(&report.score);
        }
    }

    Ok(())
}

/// Print the score line and the per-question review table.
pub fn print_score(score: &ScoreResult) {
    println!(
        "You scored {} out of {} ({:.1}%)",
        score.correct_count,
        score.total(),
        score.percentage()
    );

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Correct", "Your Answer", "Result"]);

    for (i, r) in score.reviews.iter().enumerate() {
        let result = match (&r.chosen_answer_text, r.is_correct) {
            (None, _) => "SKIPPED",
            (Some(_), true) => "OK",
            (Some(_), false) => "WRONG",
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&r.question_text),
            Cell::new(&r.correct_answer_text),
            Cell::new(r.chosen_answer_text.as_deref().unwrap_or("Not Answered")),
            Cell::new(result),
        ]);
    }

    println!("\n{table}");
}
