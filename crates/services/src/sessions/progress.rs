use serde::Serialize;

use medmoji_core::model::ResultEntry;

/// Aggregated score of a quiz, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub total: usize,
    pub correct_count: usize,
    pub results: Vec<ResultEntry>,
    pub complete: bool,
}
