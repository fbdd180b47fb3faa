//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted while starting a quiz session.
///
/// Gameplay itself never fails; invalid moves come back as `Ignored` or
/// `Refused` outcomes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question bank has no questions")]
    EmptyBank,
}
