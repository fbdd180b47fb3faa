mod plan;
mod progress;
mod question;
mod score;
mod service;
mod timer;
mod view;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use plan::{RevealSource, plan_reveal};
pub use progress::QuizSummary;
pub use question::{CheckOutcome, GuessOutcome, QuestionState, QuestionStatus, TickOutcome};
pub use score::ScoreBoard;
pub use service::{AdvanceOutcome, QuizSession, QuizTick};
pub use timer::{PendingAdvance, TimerHandle};
pub use view::{KeyMark, KeyView, QuizView};
