mod attempts;
pub mod bank;
pub mod hint;
mod letter;
mod question;
mod result;
mod rules;

pub use attempts::{Attempts, AttemptsError};
pub use bank::{BankError, QuestionBank, RawQuestion, ValidationError, ValidationReason};
pub use letter::{Answer, Letter, LetterError};
pub use question::{Prompt, Question, QuestionType};
pub use result::ResultEntry;
pub use rules::{GameRules, RulesError};
