mod loader;

pub use loader::{
    DEFAULT_QUESTIONS_PATH, LoadError, NodePath, Problem, load_question_bank_from_path,
    unreachable_answers, validate,
};
