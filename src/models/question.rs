/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl Question {
    /// Whether `choice` matches the answer, ignoring case.
    pub fn is_correct(&self, choice: &str) -> bool {
        choice.to_lowercase() == self.answer.to_lowercase()
    }

    /// 1-based number of the option holding the answer.
    pub fn answer_choice(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.answer).map(|i| i + 1)
    }
}

/// The questions of one category at one difficulty level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difficulty {
    pub name: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub difficulties: Vec<Difficulty>,
}

impl Category {
    /// Look up a difficulty by name (case-insensitive) or by 1-based index.
    pub fn difficulty(&self, selection: &str) -> Option<&Difficulty> {
        select(&self.difficulties, selection, |d| &d.name)
    }
}

/// Every category, difficulty and question, in source file order.
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    categories: Vec<Category>,
}

impl QuestionBank {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by name (case-insensitive) or by 1-based index.
    pub fn category(&self, selection: &str) -> Option<&Category> {
        select(&self.categories, selection, |c| &c.name)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of questions across all categories and difficulties.
    pub fn question_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.difficulties.iter())
            .map(|d| d.questions.len())
            .sum()
    }
}

fn select<'a, T>(items: &'a [T], selection: &str, name: impl Fn(&T) -> &String) -> Option<&'a T> {
    let selection = selection.trim();
    let wanted = selection.to_lowercase();
    if let Some(item) = items.iter().find(|item| name(item).to_lowercase() == wanted) {
        return Some(item);
    }

    selection
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|i| items.get(i))
}
