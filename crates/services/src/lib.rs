#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use error::QuizError;
pub use sessions as session;

pub use sessions::{
    AdvanceOutcome, CheckOutcome, GuessOutcome, QuestionState, QuestionStatus, QuizSession,
    QuizSummary, QuizTick, QuizView, RevealSource, ScoreBoard, TickOutcome, TimerHandle,
};
