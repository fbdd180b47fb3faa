use thiserror::Error;

use crate::model::{BankError, RulesError, ValidationError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Rules(#[from] RulesError),
}
