use serde::{Deserialize, Serialize};

/// Outcome recorded for one question of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub question_index: usize,
    pub correct: bool,
}

impl ResultEntry {
    #[must_use]
    pub fn new(question_index: usize, correct: bool) -> Self {
        Self {
            question_index,
            correct,
        }
    }
}
