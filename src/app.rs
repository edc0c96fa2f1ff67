use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::{AnswerOutcome, Round, RoundError, RoundResult};
use crate::leaderboard::{LeaderboardEntry, LeaderboardError, LeaderboardStore};
use crate::models::{Player, QuestionBank, normalize_nickname, parse_avatar};

/// Which prompt the player is looking at.
#[derive(Debug, Clone)]
pub enum Screen {
    Nickname,
    Avatar { nickname: String },
    MainMenu,
    Category,
    Difficulty { category: String },
    Quiz {
        title: String,
        round: Round,
        last_outcome: Option<AnswerOutcome>,
    },
    RoundOver {
        title: String,
        result: RoundResult,
        last_outcome: Option<AnswerOutcome>,
    },
    Leaderboard { entries: Vec<LeaderboardEntry> },
}

/// Style of the status line under the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// What the event loop should do after a submitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

enum MenuChoice {
    Play,
    Leaderboard,
    Exit,
}

pub struct App {
    pub screen: Screen,
    bank: QuestionBank,
    store: LeaderboardStore,
    player: Option<Player>,
    input: String,
    notice: Option<Notice>,
    rng: StdRng,
}

impl App {
    pub fn new(bank: QuestionBank, store: LeaderboardStore) -> Self {
        Self::with_rng(bank, store, StdRng::from_os_rng())
    }

    pub fn with_rng(bank: QuestionBank, store: LeaderboardStore, rng: StdRng) -> Self {
        Self {
            screen: Screen::Nickname,
            bank,
            store,
            player: None,
            input: String::new(),
            notice: None,
            rng,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn input_push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_pop(&mut self) {
        self.input.pop();
    }

    /// Submits the prompt's contents and clears it.
    pub fn submit_input(&mut self) -> Result<Control, LeaderboardError> {
        let line = std::mem::take(&mut self.input);
        self.submit_line(&line)
    }

    /// Handles one line of input for the current screen.
    ///
    /// Only a failed leaderboard write is an error; bad input re-prompts.
    pub fn submit_line(&mut self, line: &str) -> Result<Control, LeaderboardError> {
        self.notice = None;
        let line = line.trim();

        match &mut self.screen {
            Screen::Nickname => match normalize_nickname(line) {
                Ok(nickname) => self.screen = Screen::Avatar { nickname },
                Err(msg) => self.warn(msg),
            },
            Screen::Avatar { nickname } => match parse_avatar(line) {
                Ok(avatar) => {
                    let player = Player::new(std::mem::take(nickname), avatar.to_string());
                    tracing::info!("Player {} {} joined", player.avatar(), player.nickname());
                    self.player = Some(player);
                    self.screen = Screen::MainMenu;
                }
                Err(msg) => self.warn(msg),
            },
            Screen::MainMenu => match parse_menu_choice(line) {
                Some(MenuChoice::Play) if self.bank.is_empty() => {
                    self.warn("No questions available. Please check the questions file.")
                }
                Some(MenuChoice::Play) => self.screen = Screen::Category,
                Some(MenuChoice::Leaderboard) => {
                    self.screen = Screen::Leaderboard {
                        entries: self.store.load(),
                    }
                }
                Some(MenuChoice::Exit) => return Ok(Control::Quit),
                None => self.warn("Invalid input."),
            },
            Screen::Category => {
                if is_back(line) {
                    self.screen = Screen::MainMenu;
                } else if let Some(category) = self.bank.category(line) {
                    self.screen = Screen::Difficulty {
                        category: category.name.clone(),
                    };
                } else {
                    self.warn(RoundError::UnknownCategory.to_string());
                }
            }
            Screen::Difficulty { category } => {
                if is_back(line) {
                    self.screen = Screen::MainMenu;
                } else {
                    let category = category.clone();
                    self.start_round(&category, line);
                }
            }
            Screen::Quiz {
                title,
                round,
                last_outcome,
            } => {
                if let Some(outcome) = round.submit(line) {
                    *last_outcome = Some(outcome);
                }
                if round.is_over() {
                    let title = std::mem::take(title);
                    let result = round.result();
                    let last_outcome = last_outcome.take();
                    self.finish_round(title, result, last_outcome)?;
                }
            }
            Screen::RoundOver { .. } | Screen::Leaderboard { .. } => {
                self.screen = Screen::MainMenu;
            }
        }

        Ok(Control::Continue)
    }

    fn start_round(&mut self, category: &str, difficulty: &str) {
        match Round::start(&self.bank, category, difficulty, &mut self.rng) {
            Ok(round) => {
                // Both lookups succeeded inside Round::start
                let difficulty = self
                    .bank
                    .category(category)
                    .and_then(|c| c.difficulty(difficulty))
                    .map(|d| d.name.clone())
                    .unwrap_or_default();

                self.screen = Screen::Quiz {
                    title: format!("{} - {}", category, difficulty),
                    round,
                    last_outcome: None,
                };
            }
            Err(e) => self.warn(e.to_string()),
        }
    }

    fn finish_round(
        &mut self,
        title: String,
        result: RoundResult,
        last_outcome: Option<AnswerOutcome>,
    ) -> Result<(), LeaderboardError> {
        if let Some(player) = &self.player {
            let entry = LeaderboardEntry::new(player.nickname(), player.avatar(), result.score);
            self.store.record(entry)?;
        }

        self.notice = Some(Notice {
            kind: NoticeKind::Info,
            text: "Score saved to the leaderboard.".to_string(),
        });
        self.screen = Screen::RoundOver {
            title,
            result,
            last_outcome,
        };
        Ok(())
    }

    fn warn(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Warning,
            text: text.into(),
        });
    }
}

fn is_back(line: &str) -> bool {
    line.eq_ignore_ascii_case("back")
}

fn parse_menu_choice(line: &str) -> Option<MenuChoice> {
    match line.to_lowercase().as_str() {
        "1" | "play" | "play quiz" => Some(MenuChoice::Play),
        "2" | "leaderboard" | "view leaderboard" => Some(MenuChoice::Leaderboard),
        "3" | "exit" | "quit" => Some(MenuChoice::Exit),
        _ => None,
    }
}
