//! mockexam CLI — timed multiple-choice mock exams in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mockexam", version, about = "Timed multiple-choice mock exams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a timed exam
    Run {
        /// Path to a .json/.toml question bank or a directory of banks
        #[arg(long, default_value = "questions.json")]
        bank: PathBuf,

        /// Number of questions to sample (overrides config)
        #[arg(long)]
        questions: Option<usize>,

        /// Exam length in seconds (overrides config)
        #[arg(long)]
        duration: Option<u64>,

        /// Seed for reproducible question sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to save the JSON report in
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank files
    Validate {
        /// Path to a question bank file or directory
        #[arg(long, default_value = "questions.json")]
        bank: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show a saved exam report
    Review {
        /// Report JSON written by `mockexam run --output`
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, markdown, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mockexam=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            bank,
            questions,
            duration,
            seed,
            output,
            config,
        } => commands::run::execute(bank, questions, duration, seed, output, config).await,
        Commands::Validate { bank, config } => commands::validate::execute(bank, config),
        Commands::Review { report, format } => commands::review::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
