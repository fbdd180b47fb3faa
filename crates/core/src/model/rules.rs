use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::attempts::Attempts;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RulesError {
    #[error("starting attempts must be > 0")]
    InvalidStartingAttempts,

    #[error("wrong submission penalty must be > 0")]
    InvalidSubmissionPenalty,

    #[error("countdown seconds must be > 0")]
    InvalidCountdown,

    #[error("reveal percent must be between 1 and 100, got {0}")]
    InvalidRevealPercent(u8),
}

//
// ─── RULES ─────────────────────────────────────────────────────────────────────
//

/// Tunable rules for a quiz session.
///
/// The standard rules give every question 3 attempts, charge half an attempt
/// per wrong letter and a full attempt per wrong submission, run a 90 second
/// countdown, and pre-reveal a quarter of the answer's distinct letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RulesDraft", into = "RulesDraft")]
pub struct GameRules {
    starting_attempts: Attempts,
    wrong_letter_penalty: Attempts,
    wrong_submission_penalty: Attempts,
    countdown_secs: u32,
    auto_advance_delay_secs: u32,
    reveal_percent: u8,
}

impl GameRules {
    /// The rules the game ships with.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            starting_attempts: Attempts::whole(3),
            wrong_letter_penalty: Attempts::HALF,
            wrong_submission_penalty: Attempts::ONE,
            countdown_secs: 90,
            auto_advance_delay_secs: 5,
            reveal_percent: 25,
        }
    }

    /// Creates custom rules.
    ///
    /// # Errors
    ///
    /// Returns `RulesError` if attempts, the submission penalty or the
    /// countdown are zero, or the reveal percent is outside `1..=100`.
    pub fn new(
        starting_attempts: Attempts,
        wrong_letter_penalty: Attempts,
        wrong_submission_penalty: Attempts,
        countdown_secs: u32,
        auto_advance_delay_secs: u32,
        reveal_percent: u8,
    ) -> Result<Self, RulesError> {
        if starting_attempts.is_exhausted() {
            return Err(RulesError::InvalidStartingAttempts);
        }
        if wrong_submission_penalty.is_exhausted() {
            return Err(RulesError::InvalidSubmissionPenalty);
        }
        if countdown_secs == 0 {
            return Err(RulesError::InvalidCountdown);
        }
        if !(1..=100).contains(&reveal_percent) {
            return Err(RulesError::InvalidRevealPercent(reveal_percent));
        }

        Ok(Self {
            starting_attempts,
            wrong_letter_penalty,
            wrong_submission_penalty,
            countdown_secs,
            auto_advance_delay_secs,
            reveal_percent,
        })
    }

    /// Returns a copy with a different countdown.
    ///
    /// # Errors
    ///
    /// Returns `RulesError::InvalidCountdown` for zero.
    pub fn with_countdown_secs(mut self, countdown_secs: u32) -> Result<Self, RulesError> {
        if countdown_secs == 0 {
            return Err(RulesError::InvalidCountdown);
        }
        self.countdown_secs = countdown_secs;
        Ok(self)
    }

    #[must_use]
    pub fn starting_attempts(&self) -> Attempts {
        self.starting_attempts
    }

    #[must_use]
    pub fn wrong_letter_penalty(&self) -> Attempts {
        self.wrong_letter_penalty
    }

    #[must_use]
    pub fn wrong_submission_penalty(&self) -> Attempts {
        self.wrong_submission_penalty
    }

    #[must_use]
    pub fn countdown_secs(&self) -> u32 {
        self.countdown_secs
    }

    /// Delay between a timeout and the automatic move to the next question.
    #[must_use]
    pub fn auto_advance_delay_secs(&self) -> u32 {
        self.auto_advance_delay_secs
    }

    #[must_use]
    pub fn reveal_percent(&self) -> u8 {
        self.reveal_percent
    }

    /// How many distinct letters to pre-reveal: `ceil(percent * distinct)`,
    /// at least one, never more than `distinct`.
    #[must_use]
    pub fn reveal_count(&self, distinct: usize) -> usize {
        distinct
            .saturating_mul(usize::from(self.reveal_percent))
            .div_ceil(100)
            .max(1)
            .min(distinct)
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Serialize, Deserialize)]
struct RulesDraft {
    starting_attempts: Attempts,
    wrong_letter_penalty: Attempts,
    wrong_submission_penalty: Attempts,
    countdown_secs: u32,
    auto_advance_delay_secs: u32,
    reveal_percent: u8,
}

impl TryFrom<RulesDraft> for GameRules {
    type Error = RulesError;

    fn try_from(draft: RulesDraft) -> Result<Self, Self::Error> {
        Self::new(
            draft.starting_attempts,
            draft.wrong_letter_penalty,
            draft.wrong_submission_penalty,
            draft.countdown_secs,
            draft.auto_advance_delay_secs,
            draft.reveal_percent,
        )
    }
}

impl From<GameRules> for RulesDraft {
    fn from(rules: GameRules) -> Self {
        Self {
            starting_attempts: rules.starting_attempts,
            wrong_letter_penalty: rules.wrong_letter_penalty,
            wrong_submission_penalty: rules.wrong_submission_penalty,
            countdown_secs: rules.countdown_secs,
            auto_advance_delay_secs: rules.auto_advance_delay_secs,
            reveal_percent: rules.reveal_percent,
        }
    }
}
