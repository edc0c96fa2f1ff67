//! # quiz-quest
//!
//! A terminal trivia game: pick a nickname and avatar, choose a category and
//! difficulty, answer up to ten questions on three lives, and land on the
//! top-5 leaderboard.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_quest::{Exit, Game, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Load and validate the question bank
//!     let game = Game::from_json("questions.json", "leaderboard.json")?;
//!
//!     // Run the game in the terminal
//!     match game.run()? {
//!         Exit::Quit => println!("Goodbye!"),
//!         Exit::Interrupted => println!("See you next time!"),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
pub mod engine;
pub mod leaderboard;
mod models;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;

pub use app::{App, Control, Notice, NoticeKind, Screen};
pub use data::{
    DEFAULT_QUESTIONS_PATH, LoadError, NodePath, Problem, load_question_bank_from_path,
    unreachable_answers, validate,
};
pub use engine::{AnswerOutcome, Round, RoundError, RoundResult, RoundState};
pub use leaderboard::{
    DEFAULT_LEADERBOARD_PATH, LeaderboardEntry, LeaderboardError, LeaderboardStore,
};
pub use models::{Category, Difficulty, Player, Question, QuestionBank};

/// Error type for game operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question bank is missing or malformed.
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    /// The leaderboard could not be written.
    #[error("Failed to save score: {0}")]
    Leaderboard(#[from] LeaderboardError),
    /// Terminal IO failed during the game.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// How the player left the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Chose "Exit" from the main menu.
    Quit,
    /// Pressed Ctrl-C.
    Interrupted,
}

/// A game instance that can be run in the terminal.
pub struct Game {
    app: App,
}

impl Game {
    /// Create a new game over an already validated question bank.
    pub fn new(bank: QuestionBank, store: LeaderboardStore) -> Self {
        Self {
            app: App::new(bank, store),
        }
    }

    /// Load and validate the question bank, then set up the leaderboard.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quiz_quest::Game;
    ///
    /// let game = Game::from_json("questions.json", "leaderboard.json")
    ///     .expect("Failed to load questions");
    /// ```
    pub fn from_json<P: AsRef<Path>, L: AsRef<Path>>(
        questions: P,
        leaderboard: L,
    ) -> Result<Self, QuizError> {
        let bank = load_question_bank_from_path(questions)?;
        Ok(Self::new(bank, LeaderboardStore::new(leaderboard)))
    }

    /// Run the game in the terminal.
    ///
    /// Takes over the terminal until the player exits; the terminal is
    /// restored before this returns, whatever the outcome.
    pub fn run(mut self) -> Result<Exit, QuizError> {
        let mut session = terminal::TerminalSession::start()?;
        run_event_loop(session.terminal(), &mut self.app)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::GameTerminal, app: &mut App) -> Result<Exit, QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(exit) = handle_key(app, key)? {
                tracing::info!("Leaving game: {:?}", exit);
                return Ok(exit);
            }
        }
    }
}

/// Returns the exit reason if the game should end.
fn handle_key(app: &mut App, key: KeyEvent) -> Result<Option<Exit>, QuizError> {
    if is_interrupt(&key) {
        return Ok(Some(Exit::Interrupted));
    }

    match key.code {
        KeyCode::Enter => {
            if app.submit_input()? == Control::Quit {
                return Ok(Some(Exit::Quit));
            }
        }
        KeyCode::Backspace => app.input_pop(),
        KeyCode::Char(c) => app.input_push(c),
        _ => {}
    }

    Ok(None)
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}
