mod player;
mod question;

pub use player::{AVATAR_CHOICES, Player, normalize_nickname, parse_avatar};
pub use question::{Category, Difficulty, Question, QuestionBank};
