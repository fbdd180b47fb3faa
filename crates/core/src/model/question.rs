use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::letter::Answer;

/// How a question's prompt is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// A row of emoji glyphs.
    Emoji,
    /// Word fragments shown as one line of text.
    Text,
    /// Emoji and word fragments side by side.
    Mixed,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [Self::Emoji, Self::Text, Self::Mixed];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emoji => "emoji",
            Self::Text => "text",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

/// Normalized prompt content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Prompt {
    /// Trimmed assets, rendered one by one (emoji and mixed prompts).
    Assets(Vec<String>),
    /// Text fragments joined into one display line.
    Text(String),
}

impl Prompt {
    /// Single-line rendering of the prompt.
    #[must_use]
    pub fn display_line(&self) -> String {
        match self {
            Prompt::Assets(assets) => assets.join(" "),
            Prompt::Text(text) => text.clone(),
        }
    }
}

/// A validated question. Read-only once built by the bank validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    kind: QuestionType,
    prompt: Prompt,
    answer: Answer,
    hint: String,
}

impl Question {
    pub(crate) fn new(kind: QuestionType, prompt: Prompt, answer: Answer, hint: String) -> Self {
        Self {
            kind,
            prompt,
            answer,
            hint,
        }
    }

    #[must_use]
    pub fn kind(&self) -> QuestionType {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }
}
