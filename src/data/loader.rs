use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::engine::ANSWER_RANGE;
use crate::models::{Category, Difficulty, Question, QuestionBank};

pub const DEFAULT_QUESTIONS_PATH: &str = "questions.json";

const REQUIRED_FIELDS: [&str; 3] = ["question", "options", "answer"];

/// Errors raised while loading the question bank. All of them are fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("question file {} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid JSON: {source}", path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("question file is malformed at {location}: {problem}")]
    Malformed { location: NodePath, problem: Problem },
}

impl LoadError {
    /// Whether the file was found but its content is unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, LoadError::Syntax { .. } | LoadError::Malformed { .. })
    }
}

/// What is wrong with the node named by a [`NodePath`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("expected an object")]
    NotAnObject,
    #[error("expected a list")]
    NotAList,
    #[error("expected a string")]
    NotAString,
    #[error("missing field")]
    MissingField,
    #[error("answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },
}

/// Location of a node inside the question file.
///
/// Each level is filled in as the validator descends, so a diagnostic names
/// exactly the node that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    /// 0-based position in the difficulty's question list.
    pub question: Option<usize>,
    pub field: Option<String>,
}

impl NodePath {
    fn category(name: &str) -> Self {
        Self {
            category: Some(name.to_string()),
            ..Self::default()
        }
    }

    fn difficulty(&self, name: &str) -> Self {
        Self {
            difficulty: Some(name.to_string()),
            ..self.clone()
        }
    }

    fn question(&self, index: usize) -> Self {
        Self {
            question: Some(index),
            ..self.clone()
        }
    }

    fn field(&self, name: impl Into<String>) -> Self {
        Self {
            field: Some(name.into()),
            ..self.clone()
        }
    }

    fn fail(self, problem: Problem) -> LoadError {
        LoadError::Malformed {
            location: self,
            problem,
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(category) = &self.category {
            parts.push(format!("category {:?}", category));
        }
        if let Some(difficulty) = &self.difficulty {
            parts.push(format!("difficulty {:?}", difficulty));
        }
        if let Some(question) = self.question {
            parts.push(format!("question #{}", question + 1));
        }
        if let Some(field) = &self.field {
            parts.push(format!("field {:?}", field));
        }

        if parts.is_empty() {
            write!(f, "top level")
        } else {
            write!(f, "{}", parts.join(" > "))
        }
    }
}

pub fn load_question_bank_from_path<P: AsRef<Path>>(path: P) -> Result<QuestionBank, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let root: Value = serde_json::from_str(&json_content).map_err(|source| LoadError::Syntax {
        path: path.to_path_buf(),
        source,
    })?;

    let bank = validate(&root)?;
    tracing::info!(
        "Loaded {} questions in {} categories from {}",
        bank.question_count(),
        bank.categories().len(),
        path.display()
    );

    Ok(bank)
}

/// Checks the structure of a parsed question file and builds the bank.
///
/// Stops at the first offending node.
pub fn validate(root: &Value) -> Result<QuestionBank, LoadError> {
    let categories = as_object(root, NodePath::default())?;

    let mut bank = Vec::with_capacity(categories.len());
    for (category_name, levels) in categories {
        let at = NodePath::category(category_name);
        let levels = as_object(levels, at.clone())?;

        let mut difficulties = Vec::with_capacity(levels.len());
        for (difficulty_name, records) in levels {
            let at = at.difficulty(difficulty_name);
            let Value::Array(records) = records else {
                return Err(at.fail(Problem::NotAList));
            };

            let questions = records
                .iter()
                .enumerate()
                .map(|(index, record)| validate_question(record, at.question(index)))
                .collect::<Result<Vec<_>, _>>()?;

            difficulties.push(Difficulty {
                name: difficulty_name.clone(),
                questions,
            });
        }

        bank.push(Category {
            name: category_name.clone(),
            difficulties,
        });
    }

    let bank = QuestionBank::new(bank);
    for at in unreachable_answers(&bank) {
        tracing::warn!(
            "{}: answer is past option {} and can never be picked",
            at,
            ANSWER_RANGE
        );
    }

    Ok(bank)
}

/// Questions whose answer sits beyond the options a player can choose.
pub fn unreachable_answers(bank: &QuestionBank) -> Vec<NodePath> {
    let mut found = Vec::new();
    for category in bank.categories() {
        let at = NodePath::category(&category.name);
        for difficulty in &category.difficulties {
            let at = at.difficulty(&difficulty.name);
            for (index, question) in difficulty.questions.iter().enumerate() {
                if question.answer_choice().is_some_and(|n| n > ANSWER_RANGE) {
                    found.push(at.question(index).field("answer"));
                }
            }
        }
    }
    found
}

fn validate_question(record: &Value, at: NodePath) -> Result<Question, LoadError> {
    let record = as_object(record, at.clone())?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|key| !record.contains_key(**key)) {
        return Err(at.field(*missing).fail(Problem::MissingField));
    }

    let text = as_string(&record["question"], at.field("question"))?;

    let Value::Array(raw_options) = &record["options"] else {
        return Err(at.field("options").fail(Problem::NotAList));
    };
    let options = raw_options
        .iter()
        .enumerate()
        .map(|(i, option)| as_string(option, at.field(format!("options[{}]", i))))
        .collect::<Result<Vec<_>, _>>()?;

    let answer = as_string(&record["answer"], at.field("answer"))?;
    if !options.contains(&answer) {
        return Err(at.field("answer").fail(Problem::AnswerNotInOptions { answer }));
    }

    Ok(Question {
        text,
        options,
        answer,
    })
}

fn as_object(value: &Value, at: NodePath) -> Result<&Map<String, Value>, LoadError> {
    value.as_object().ok_or_else(|| at.fail(Problem::NotAnObject))
}

fn as_string(value: &Value, at: NodePath) -> Result<String, LoadError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| at.fail(Problem::NotAString))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn valid_bank() -> Value {
        json!({
            "Science": {
                "Easy": [
                    {
                        "question": "What planet is known as the Red Planet?",
                        "options": ["Earth", "Mars", "Venus", "Jupiter"],
                        "answer": "Mars"
                    },
                    {
                        "question": "What gas do plants absorb?",
                        "options": ["Oxygen", "Nitrogen", "Carbon dioxide", "Helium"],
                        "answer": "Carbon dioxide",
                        "hint": "extra keys are fine"
                    }
                ],
                "Hard": []
            },
            "History": {}
        })
    }

    fn malformed(value: Value) -> (NodePath, Problem) {
        match validate(&value) {
            Err(LoadError::Malformed { location, problem }) => (location, problem),
            other => panic!("expected a malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_bank() {
        let bank = validate(&valid_bank()).unwrap();
        assert_eq!(bank.question_count(), 2);

        let science = bank.category("Science").unwrap();
        assert_eq!(science.difficulties.len(), 2);
        assert_eq!(science.difficulties[0].questions[1].answer, "Carbon dioxide");
        assert!(bank.category("History").unwrap().difficulties.is_empty());
    }

    #[test]
    fn test_preserves_source_order() {
        let text = r#"{"Zoology": {"Hard": [], "Easy": []}, "Art": {}, "Music": {}}"#;
        let bank = validate(&serde_json::from_str(text).unwrap()).unwrap();

        let names: Vec<&str> = bank.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Zoology", "Art", "Music"]);

        let levels: Vec<&str> = bank.categories()[0]
            .difficulties
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(levels, ["Hard", "Easy"]);
    }

    #[test]
    fn test_top_level_must_be_object() {
        let (location, problem) = malformed(json!([1, 2, 3]));
        assert_eq!(location, NodePath::default());
        assert_eq!(problem, Problem::NotAnObject);
    }

    #[test]
    fn test_category_must_be_object() {
        let (location, problem) = malformed(json!({ "Science": ["Easy"] }));
        assert_eq!(location.category.as_deref(), Some("Science"));
        assert_eq!(location.difficulty, None);
        assert_eq!(problem, Problem::NotAnObject);
    }

    #[test]
    fn test_difficulty_must_be_list() {
        let (location, problem) = malformed(json!({ "Science": { "Easy": { "q": 1 } } }));
        assert_eq!(location.category.as_deref(), Some("Science"));
        assert_eq!(location.difficulty.as_deref(), Some("Easy"));
        assert_eq!(location.question, None);
        assert_eq!(problem, Problem::NotAList);
    }

    #[test]
    fn test_record_must_have_required_fields() {
        let mut bank = valid_bank();
        bank["Science"]["Easy"][1]
            .as_object_mut()
            .unwrap()
            .remove("options");

        let (location, problem) = malformed(bank);
        assert_eq!(location.category.as_deref(), Some("Science"));
        assert_eq!(location.difficulty.as_deref(), Some("Easy"));
        assert_eq!(location.question, Some(1));
        assert_eq!(location.field.as_deref(), Some("options"));
        assert_eq!(problem, Problem::MissingField);
    }

    #[test]
    fn test_record_must_be_object() {
        let (location, problem) = malformed(json!({ "Science": { "Easy": ["not a record"] } }));
        assert_eq!(location.question, Some(0));
        assert_eq!(location.field, None);
        assert_eq!(problem, Problem::NotAnObject);
    }

    #[test]
    fn test_options_must_be_list() {
        let mut bank = valid_bank();
        bank["Science"]["Easy"][0]["options"] = json!("Earth, Mars");

        let (location, problem) = malformed(bank);
        assert_eq!(location.question, Some(0));
        assert_eq!(location.field.as_deref(), Some("options"));
        assert_eq!(problem, Problem::NotAList);
    }

    #[test]
    fn test_answer_must_be_an_option() {
        let mut bank = valid_bank();
        bank["Science"]["Easy"][0]["answer"] = json!("mars");

        let (location, problem) = malformed(bank);
        assert_eq!(location.question, Some(0));
        assert_eq!(location.field.as_deref(), Some("answer"));
        assert_eq!(
            problem,
            Problem::AnswerNotInOptions {
                answer: "mars".to_string()
            }
        );
    }

    #[test]
    fn test_fields_must_be_strings() {
        let mut bank = valid_bank();
        bank["Science"]["Easy"][1]["options"][2] = json!(42);

        let (location, problem) = malformed(bank);
        assert_eq!(location.question, Some(1));
        assert_eq!(location.field.as_deref(), Some("options[2]"));
        assert_eq!(problem, Problem::NotAString);
    }

    #[test]
    fn test_diagnostic_message_names_node() {
        let mut bank = valid_bank();
        bank["Science"]["Easy"][1]
            .as_object_mut()
            .unwrap()
            .remove("answer");

        let message = validate(&bank).unwrap_err().to_string();
        assert_eq!(
            message,
            concat!(
                "question file is malformed at category \"Science\" > difficulty \"Easy\"",
                " > question #2 > field \"answer\": missing field"
            )
        );
    }

    #[test]
    fn test_answer_past_fourth_option_is_flagged() {
        let mut bank = valid_bank();
        bank["Science"]["Easy"][1]["options"] = json!(["a", "b", "c", "d", "e"]);
        bank["Science"]["Easy"][1]["answer"] = json!("e");

        let bank = validate(&bank).unwrap();
        let flagged = unreachable_answers(&bank);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].category.as_deref(), Some("Science"));
        assert_eq!(flagged[0].difficulty.as_deref(), Some("Easy"));
        assert_eq!(flagged[0].question, Some(1));
        assert_eq!(flagged[0].field.as_deref(), Some("answer"));

        assert!(unreachable_answers(&validate(&valid_bank()).unwrap()).is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_question_bank_from_path(temp_dir.path().join("questions.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("questions.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_question_bank_from_path(&path).unwrap_err();
        assert!(matches!(err, LoadError::Syntax { .. }));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("questions.json");
        fs::write(&path, serde_json::to_string_pretty(&valid_bank()).unwrap()).unwrap();

        let bank = load_question_bank_from_path(&path).unwrap();
        assert_eq!(bank, validate(&valid_bank()).unwrap());
    }
}
