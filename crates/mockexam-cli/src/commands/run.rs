//! The `mockexam run` command.
//!
//! A line-oriented exam screen. Input lines arrive from a reader thread over
//! a channel; a one-second tick polls the deadline so an idle participant is
//! still submitted when time runs out.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use mockexam_core::answers::AnswerTracker;
use mockexam_core::bank;
use mockexam_core::config::load_config_from;
use mockexam_core::engine::ExamEngine;
use mockexam_core::pool::QuestionPool;
use mockexam_core::report::ExamReport;
use mockexam_core::scoring::evaluate;
use mockexam_core::session::{ExamSession, SubmitTrigger};

use super::review::print_score;

/// One parsed line of participant input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    /// 1-based option number.
    Choose(usize),
    /// Literal option text.
    Text(String),
    Next,
    Prev,
    /// 1-based question number.
    Goto(usize),
    List,
    Time,
    Help,
    Submit,
    Show,
}

fn parse_input(line: &str) -> Input {
    // `=` forces literal option text, for options that look like numbers.
    if let Some(text) = line.trim_start().strip_prefix('=') {
        return Input::Text(text.trim_end_matches(['\r', '\n']).to_string());
    }
    let trimmed = line.trim();
    let mut parts = trimmed.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => Input::Show,
        (Some("n" | "next"), None, _) => Input::Next,
        (Some("p" | "prev"), None, _) => Input::Prev,
        (Some("l" | "list"), None, _) => Input::List,
        (Some("t" | "time"), None, _) => Input::Time,
        (Some("h" | "help" | "?"), None, _) => Input::Help,
        (Some("s" | "submit"), None, _) => Input::Submit,
        (Some("g" | "goto"), Some(k), None) if k.parse::<usize>().is_ok() => {
            Input::Goto(k.parse().unwrap_or_default())
        }
        (Some(k), None, _) if k.parse::<usize>().is_ok() => {
            Input::Choose(k.parse().unwrap_or_default())
        }
        // Option text is matched exactly, so keep the raw line.
        _ => Input::Text(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

const HELP: &str = "\
Commands:
  <number>       choose by position; numbers never match option text
  <option text>  choose the option with exactly that text
  =<option text> choose by exact text, even if it looks like a number
  n / p          next / previous question
  g <number>     go to question
  l              list answered and unanswered questions
  t              show remaining time
  s              submit the exam
";

struct ExamScreen {
    engine: ExamEngine,
    session: ExamSession,
    current: usize,
}

impl ExamScreen {
    fn show_timer(&self) {
        let countdown = self.engine.timer().countdown(&self.session);
        println!("Time Remaining: {countdown}");
    }

    fn show_question(&self) {
        let Ok(q) = self.session.question(self.current) else {
            return;
        };
        let selected = self.session.answer(self.current).ok().flatten();

        println!();
        self.show_timer();
        println!("Q{}/{}. {}", self.current + 1, self.session.len(), q.text());
        for (i, option) in q.options().iter().enumerate() {
            let marker = if selected == Some(i) { "*" } else { " " };
            println!("  {marker}{}) {option}", i + 1);
        }
    }

    fn show_list(&self) {
        for (i, answer) in self.session.answers().iter().enumerate() {
            let status = match answer {
                Some(idx) => format!("option {}", idx + 1),
                None => "not answered".to_string(),
            };
            println!("  Q{}: {status}", i + 1);
        }
        println!(
            "{} of {} answered",
            self.session.answered_count(),
            self.session.len()
        );
    }

    fn select(&mut self, value: &str) {
        let index = self.current;
        match AnswerTracker::new(&mut self.session).record(index, value) {
            Ok(_) => {
                println!("Saved Q{}: {value}", index + 1);
                if index + 1 < self.session.len() {
                    self.current += 1;
                }
                self.show_question();
            }
            Err(e) if e.is_recoverable() => println!("{e}"),
            Err(e) => {
                tracing::debug!("rejected selection: {e}");
                println!("{e}");
            }
        }
    }

    /// Returns `true` once the session is submitted.
    fn handle(&mut self, input: Input) -> Result<bool> {
        match input {
            Input::Show => self.show_question(),
            Input::Help => print!("{HELP}"),
            Input::Time => self.show_timer(),
            Input::List => self.show_list(),
            Input::Next => {
                if self.current + 1 < self.session.len() {
                    self.current += 1;
                }
                self.show_question();
            }
            Input::Prev => {
                self.current = self.current.saturating_sub(1);
                self.show_question();
            }
            Input::Goto(k) => {
                if (1..=self.session.len()).contains(&k) {
                    self.current = k - 1;
                    self.show_question();
                } else {
                    println!("No question {k} (1-{})", self.session.len());
                }
            }
            Input::Choose(k) => {
                let option = self
                    .session
                    .question(self.current)?
                    .option(k.wrapping_sub(1))
                    .map(str::to_string);
                match option {
                    Some(text) => self.select(&text),
                    None => println!("No option {k} for this question"),
                }
            }
            Input::Text(text) => self.select(&text),
            Input::Submit => {
                submit(&mut self.session, SubmitTrigger::Manual)?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Poll the deadline; prints the notice when this poll closed the exam.
    fn deadline_passed(&mut self) -> Result<bool> {
        if self.engine.enforce_deadline(&mut self.session)? {
            println!("\nTime's up! Submitting your test...");
        }
        Ok(self.session.is_submitted())
    }
}

fn submit(session: &mut ExamSession, trigger: SubmitTrigger) -> Result<()> {
    match session.submit(trigger) {
        Ok(()) => Ok(()),
        Err(e) if e.is_recoverable() => {
            tracing::debug!("ignoring duplicate submit: {e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Forward stdin lines to the exam loop. Bytes that are not UTF-8 are
/// replaced rather than ending input; only EOF or a read error closes the
/// channel.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let mut stdin = std::io::stdin().lock();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match stdin.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("stdin read failed: {e}");
                    break;
                }
            }
            let line = String::from_utf8_lossy(&buf)
                .trim_end_matches(['\r', '\n'])
                .to_string();
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub async fn execute(
    bank_path: PathBuf,
    questions: Option<usize>,
    duration: Option<u64>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(n) = questions {
        config.total_questions = n;
    }
    if let Some(secs) = duration {
        config.exam_duration_secs = secs;
    }
    config.validate()?;

    let questions = bank::load_bank_path(&bank_path)?;
    for w in bank::validate_bank(&questions, config.total_questions) {
        eprintln!("Warning: {}", w.message);
    }

    let engine = ExamEngine::new(Arc::new(QuestionPool::new(questions)), config.clone());
    let session = match seed {
        Some(seed) => engine.start_session_with(&mut StdRng::seed_from_u64(seed))?,
        None => engine.start_session()?,
    };

    println!(
        "Mock exam: {} questions, {} minutes. Type 'h' for help.",
        session.len(),
        config.exam_duration_secs / 60
    );

    let mut screen = ExamScreen {
        engine,
        session,
        current: 0,
    };

    let mut lines = spawn_stdin_reader();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    if !screen.deadline_passed()? {
        screen.show_question();
    }

    while !screen.deadline_passed()? {
        tokio::select! {
            _ = ticker.tick() => {}
            line = lines.recv() => {
                if screen.deadline_passed()? {
                    break;
                }
                match line {
                    Some(line) => {
                        if screen.handle(parse_input(&line))? {
                            break;
                        }
                    }
                    None => {
                        tracing::info!("input closed, submitting");
                        submit(&mut screen.session, SubmitTrigger::Manual)?;
                        break;
                    }
                }
            }
        }
    }

    let session = screen.session;
    let score = evaluate(&session)?;
    println!();
    print_score(&score);

    if let Some(dir) = output {
        let report = ExamReport::from_session(&session, config.exam_duration_secs)?;
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("report-{timestamp}.json"));
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}
