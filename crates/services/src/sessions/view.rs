use serde::Serialize;

use medmoji_core::model::{Letter, Prompt, Question, QuestionType};

use super::progress::QuizSummary;
use super::question::{QuestionState, QuestionStatus};

/// How a keyboard key should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMark {
    Unused,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyView {
    pub letter: char,
    pub mark: KeyMark,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub index: usize,
    pub total: usize,
    pub kind: QuestionType,
    pub prompt: Prompt,
    /// Present only while the hint is toggled on.
    pub hint: Option<String>,
    pub hint_visible: bool,
    /// One entry per answer letter; `None` while hidden.
    pub slots: Vec<Option<char>>,
    pub guessed: Vec<char>,
    pub keyboard: Vec<KeyView>,
    pub attempts_left: f64,
    pub seconds_left: u32,
    pub status: QuestionStatus,
    pub resolved: bool,
    pub locked: bool,
    pub can_advance: bool,
    pub is_last: bool,
    /// Seconds until the automatic move after a timeout.
    pub auto_advance_in: Option<u32>,
    pub summary: QuizSummary,
}

impl QuizView {
    pub(crate) fn build(
        question: &Question,
        state: &QuestionState,
        total: usize,
        hint_visible: bool,
        auto_advance_in: Option<u32>,
        summary: QuizSummary,
    ) -> Self {
        let is_last = state.index() + 1 >= total;
        let keyboard = Letter::alphabet()
            .map(|letter| {
                let mark = if !state.guessed().contains(&letter) {
                    KeyMark::Unused
                } else if state.answer().contains(letter) {
                    KeyMark::Correct
                } else {
                    KeyMark::Wrong
                };
                KeyView {
                    letter: letter.as_char(),
                    mark,
                }
            })
            .collect();

        Self {
            index: state.index(),
            total,
            kind: question.kind(),
            prompt: question.prompt().clone(),
            hint: hint_visible.then(|| question.hint().to_owned()),
            hint_visible,
            slots: state
                .slots()
                .into_iter()
                .map(|slot| slot.map(Letter::as_char))
                .collect(),
            guessed: state.guessed().iter().map(|letter| letter.as_char()).collect(),
            keyboard,
            attempts_left: state.attempts_left().as_f64(),
            seconds_left: state.seconds_left(),
            status: state.status(),
            resolved: state.is_resolved(),
            locked: state.is_locked(),
            can_advance: state.can_advance() && !is_last,
            is_last,
            auto_advance_in,
            summary,
        }
    }

    /// Answer slots as text, `_` for hidden letters.
    #[must_use]
    pub fn masked_answer(&self) -> String {
        self.slots
            .iter()
            .map(|slot| slot.unwrap_or('_').to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
