//! Quiz round state machine.
//!
//! A round draws up to ten shuffled questions from one category and
//! difficulty, then consumes one answer line per question. Every wrong or
//! unusable answer costs a life; losing the last life ends the round at once.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::models::{Question, QuestionBank};

pub const QUESTIONS_PER_ROUND: usize = 10;
pub const STARTING_LIVES: u32 = 3;
pub const COINS_PER_CORRECT: u32 = 10;

/// Answers are always picked from a four-option display.
pub const ANSWER_RANGE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("Invalid category.")]
    UnknownCategory,
    #[error("Invalid difficulty. Please choose from the available options.")]
    UnknownDifficulty,
    #[error("No questions available at this difficulty.")]
    NoQuestions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for the answer to the question at this index.
    Asking(usize),
    /// All lives lost before the questions ran out.
    LivesExhausted,
    /// Every selected question was asked.
    Complete,
}

/// What happened to a single submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong { correct_answer: String },
    /// The input was not a number.
    InvalidInput,
    /// A number outside the options on display.
    InvalidOption(i64),
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct)
    }

    /// Feedback line shown to the player.
    pub fn message(&self) -> String {
        match self {
            AnswerOutcome::Correct => "Correct!".to_string(),
            AnswerOutcome::Wrong { correct_answer } => {
                format!("Wrong! Correct answer: {}", correct_answer)
            }
            AnswerOutcome::InvalidInput => "Invalid input. Skipping.".to_string(),
            AnswerOutcome::InvalidOption(_) => {
                "Invalid option number. You must choose between 1-4.".to_string()
            }
        }
    }
}

/// Summary of a finished (or abandoned) round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub score: u32,
    pub questions_answered: usize,
    pub state: RoundState,
    pub lives_left: u32,
}

#[derive(Debug, Clone)]
pub struct Round {
    questions: Vec<Question>,
    state: RoundState,
    lives: u32,
    score: u32,
    answered: usize,
}

impl Round {
    /// Shuffles a copy of `questions` and keeps the first ten.
    pub fn new<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Self {
        let mut questions = questions.to_vec();
        questions.shuffle(rng);
        questions.truncate(QUESTIONS_PER_ROUND);

        let state = if questions.is_empty() {
            RoundState::Complete
        } else {
            RoundState::Asking(0)
        };

        Self {
            questions,
            state,
            lives: STARTING_LIVES,
            score: 0,
            answered: 0,
        }
    }

    /// Resolves `category` and `difficulty` (by name or number) and starts a round.
    pub fn start<R: Rng + ?Sized>(
        bank: &QuestionBank,
        category: &str,
        difficulty: &str,
        rng: &mut R,
    ) -> Result<Self, RoundError> {
        let category = bank.category(category).ok_or(RoundError::UnknownCategory)?;
        let difficulty = category
            .difficulty(difficulty)
            .ok_or(RoundError::UnknownDifficulty)?;

        if difficulty.questions.is_empty() {
            return Err(RoundError::NoQuestions);
        }

        tracing::info!(
            "Starting round: {} - {} ({} questions available)",
            category.name,
            difficulty.name,
            difficulty.questions.len()
        );
        Ok(Self::new(&difficulty.questions, rng))
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        !matches!(self.state, RoundState::Asking(_))
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            RoundState::Asking(index) => self.questions.get(index),
            _ => None,
        }
    }

    /// 1-based number of the question being asked.
    pub fn question_number(&self) -> usize {
        match self.state {
            RoundState::Asking(index) => index + 1,
            _ => self.answered,
        }
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn result(&self) -> RoundResult {
        RoundResult {
            score: self.score,
            questions_answered: self.answered,
            state: self.state,
            lives_left: self.lives,
        }
    }

    /// Answers the current question with one line of player input.
    ///
    /// Returns `None` once the round is over.
    pub fn submit(&mut self, input: &str) -> Option<AnswerOutcome> {
        let RoundState::Asking(index) = self.state else {
            return None;
        };
        let question = &self.questions[index];

        let outcome = match parse_choice(input) {
            None => AnswerOutcome::InvalidInput,
            Some(choice) => match option_index(choice, question.options.len()) {
                None => AnswerOutcome::InvalidOption(choice),
                Some(i) if question.is_correct(&question.options[i]) => AnswerOutcome::Correct,
                Some(_) => AnswerOutcome::Wrong {
                    correct_answer: question.answer.clone(),
                },
            },
        };
        tracing::debug!("Question {}: {:?}", index + 1, outcome);

        self.answered += 1;
        if outcome.is_correct() {
            self.score += COINS_PER_CORRECT;
        } else {
            self.lives = self.lives.saturating_sub(1);
        }

        self.state = if self.lives == 0 {
            RoundState::LivesExhausted
        } else if index + 1 < self.questions.len() {
            RoundState::Asking(index + 1)
        } else {
            RoundState::Complete
        };

        if self.is_over() {
            tracing::info!(
                "Round over ({:?}): {} coins after {} questions",
                self.state,
                self.score,
                self.answered
            );
        }

        Some(outcome)
    }

    /// Feeds answers until the round ends or the answers run out.
    pub fn play<I, S>(&mut self, answers: I) -> RoundResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for answer in answers {
            if self.submit(answer.as_ref()).is_none() {
                break;
            }
        }
        self.result()
    }
}

/// Parses a typed choice. Integers too large for `i64` saturate, so they
/// still count as a number outside the options rather than as garbage.
fn parse_choice(input: &str) -> Option<i64> {
    let input = input.trim();
    if let Ok(choice) = input.parse::<i64>() {
        return Some(choice);
    }

    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(if negative { i64::MIN } else { i64::MAX })
}

/// Maps a 1-based choice to an option index, if it is on display.
fn option_index(choice: i64, option_count: usize) -> Option<usize> {
    let index = usize::try_from(choice).ok()?.checked_sub(1)?;
    (index < ANSWER_RANGE && index < option_count).then_some(index)
}
