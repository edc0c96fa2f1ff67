use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use quiz_quest::{
    DEFAULT_LEADERBOARD_PATH, DEFAULT_QUESTIONS_PATH, Exit, Game, LoadError, QuizError,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long, default_value = DEFAULT_QUESTIONS_PATH)]
    questions: PathBuf,

    /// JSON file holding the top-5 leaderboard
    #[arg(short, long, default_value = DEFAULT_LEADERBOARD_PATH)]
    leaderboard: PathBuf,

    /// Write logs to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("Error setting up logging: {:#}", e);
        std::process::exit(1);
    }

    let game = match Game::from_json(&args.questions, &args.leaderboard) {
        Ok(game) => game,
        Err(QuizError::Load(e)) => {
            tracing::error!("{}", e);
            eprintln!("{}", e);
            if e.is_malformed() {
                let path = args.questions.display();
                eprintln!("Question file is malformed. Please check '{}'.", path);
            } else if matches!(e, LoadError::NotFound { .. }) {
                eprintln!("Pass the question file with --questions <PATH>.");
            }
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("An unexpected error occurred: {}", e);
            std::process::exit(1);
        }
    };

    match game.run() {
        Ok(Exit::Quit) => println!("Goodbye!"),
        Ok(Exit::Interrupted) => println!("Closing Quiz Quest. See you next time!"),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("An unexpected error occurred: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(log_file) = log_file else {
        return Ok(());
    };

    let file_name = log_file
        .file_name()
        .with_context(|| format!("invalid log file path {}", log_file.display()))?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(tracing_appender::rolling::never(dir, file_name))
        .with_ansi(false)
        .init();

    Ok(())
}
