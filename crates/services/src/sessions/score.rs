use medmoji_core::model::ResultEntry;

use super::progress::QuizSummary;

/// Per-question results for one run of the quiz.
///
/// Holds at most one entry per question index; the first record wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    total: usize,
    results: Vec<ResultEntry>,
}

impl ScoreBoard {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            results: Vec::with_capacity(total),
        }
    }

    /// Records the outcome for `question_index`.
    ///
    /// Returns false, changing nothing, for an index already recorded or
    /// outside the bank.
    pub fn record(&mut self, question_index: usize, correct: bool) -> bool {
        if question_index >= self.total || self.is_recorded(question_index) {
            return false;
        }
        self.results.push(ResultEntry::new(question_index, correct));
        tracing::debug!(question_index, correct, recorded = self.results.len(), "result recorded");
        if self.is_complete() {
            tracing::info!(correct = self.correct_count(), total = self.total, "quiz complete");
        }
        true
    }

    #[must_use]
    pub fn is_recorded(&self, question_index: usize) -> bool {
        self.results.iter().any(|entry| entry.question_index == question_index)
    }

    #[must_use]
    pub fn results(&self) -> &[ResultEntry] {
        &self.results
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|entry| entry.correct).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.results.len() == self.total
    }

    #[must_use]
    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            total: self.total,
            correct_count: self.correct_count(),
            results: self.results.clone(),
            complete: self.is_complete(),
        }
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }
}
