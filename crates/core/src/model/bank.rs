use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::model::hint::leaks_answer;
use crate::model::letter::Answer;
use crate::model::question::{Prompt, Question, QuestionType};

const BUILTIN_BANK_JSON: &str = include_str!("../../data/med_questions.json");

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Why a single raw entry was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationReason {
    #[error("entry is missing; supply a valid object before proceeding")]
    MissingEntry,

    #[error("type {found:?} is invalid; expected one of emoji, text, mixed")]
    InvalidType { found: Option<String> },

    #[error("a string answer with at least one letter is required")]
    MissingAnswer,

    #[error("hint is missing; provide an indirect educational clue")]
    MissingHint,

    #[error("hint is too direct and gives away the answer; revise it")]
    HintLeaksAnswer,

    #[error("at least one prompt asset is required")]
    MissingPrompt,

    #[error("emoji entries are invalid; each entry must be a non-empty string")]
    InvalidEmoji,
}

/// First invalid entry found while validating a bank.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("question {}: {}", .index + 1, .reason)]
pub struct ValidationError {
    /// Zero-based position of the entry in the raw list.
    pub index: usize,
    pub reason: ValidationReason,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

//
// ─── RAW INPUT ─────────────────────────────────────────────────────────────────
//

/// An unvalidated question record, as authored or loaded from JSON.
///
/// Fields stay untyped so that a value of the wrong shape is reported by
/// the validator against its entry, not by the JSON parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(default, rename = "question")]
    pub prompt: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub answer: Option<Value>,
    #[serde(default)]
    pub hint: Option<Value>,
}

impl RawQuestion {
    /// Convenience constructor for authored content.
    #[must_use]
    pub fn new<I, S>(kind: QuestionType, prompt: I, answer: &str, hint: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: Some(Value::Array(
                prompt.into_iter().map(|asset| Value::String(asset.into())).collect(),
            )),
            kind: Some(kind.as_str().into()),
            answer: Some(answer.into()),
            hint: Some(hint.into()),
        }
    }

    /// One element of a JSON bank. `null` is a missing entry; any other
    /// non-object is an entry with no fields.
    fn from_element(element: Value) -> Option<Self> {
        match element {
            Value::Null => None,
            Value::Object(mut fields) => Some(Self {
                prompt: fields.remove("question"),
                kind: fields.remove("type"),
                answer: fields.remove("answer"),
                hint: fields.remove("hint"),
            }),
            _ => Some(Self::default()),
        }
    }

    fn prompt_assets(&self) -> Vec<String> {
        let items: &[Value] = match &self.prompt {
            None => &[],
            Some(Value::Array(items)) => items.as_slice(),
            Some(single) => std::slice::from_ref(single),
        };
        items.iter().filter_map(asset_text).collect()
    }
}

/// Text of one prompt item. Null, false, zero and empty strings are
/// dropped; nested arrays and objects become an empty asset.
fn asset_text(item: &Value) -> Option<String> {
    match item {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_owned()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Array(_) | Value::Object(_) => Some(String::new()),
    }
}

//
// ─── VALIDATION ────────────────────────────────────────────────────────────────
//

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

fn validate_entry(index: usize, entry: Option<&RawQuestion>) -> Result<Question, ValidationError> {
    let fail = |reason| ValidationError { index, reason };

    let entry = entry.ok_or_else(|| fail(ValidationReason::MissingEntry))?;

    let kind = entry
        .kind
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse::<QuestionType>().ok())
        .ok_or_else(|| {
            let found = entry
                .kind
                .as_ref()
                .map(|value| value.as_str().map_or_else(|| value.to_string(), str::to_owned));
            fail(ValidationReason::InvalidType { found })
        })?;

    let raw_answer = non_blank(entry.answer.as_ref()).ok_or_else(|| fail(ValidationReason::MissingAnswer))?;
    let answer = Answer::parse(raw_answer).ok_or_else(|| fail(ValidationReason::MissingAnswer))?;

    let hint = non_blank(entry.hint.as_ref()).ok_or_else(|| fail(ValidationReason::MissingHint))?;

    if leaks_answer(raw_answer, hint) {
        return Err(fail(ValidationReason::HintLeaksAnswer));
    }

    let assets = entry.prompt_assets();
    if assets.iter().all(String::is_empty) {
        return Err(fail(ValidationReason::MissingPrompt));
    }

    let prompt = match kind {
        QuestionType::Emoji => {
            if assets.iter().any(String::is_empty) {
                return Err(fail(ValidationReason::InvalidEmoji));
            }
            Prompt::Assets(assets)
        }
        QuestionType::Text => Prompt::Text(
            assets
                .into_iter()
                .filter(|asset| !asset.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        QuestionType::Mixed => {
            Prompt::Assets(assets.into_iter().filter(|asset| !asset.is_empty()).collect())
        }
    };

    Ok(Question::new(kind, prompt, answer, hint.trim().to_owned()))
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Ordered, validated questions. Fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Arc<[Question]>,
}

impl QuestionBank {
    /// Validates every raw entry in order and freezes the result.
    ///
    /// `None` items stand for null/missing entries.
    ///
    /// # Errors
    ///
    /// Returns the `ValidationError` of the first invalid entry.
    pub fn validate<I>(raw: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = Option<RawQuestion>>,
    {
        let questions = raw
            .into_iter()
            .enumerate()
            .map(|(index, entry)| validate_entry(index, entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| {
                tracing::warn!(index = err.index, reason = %err.reason, "rejected question entry");
            })?;

        tracing::debug!(count = questions.len(), "question bank validated");
        Ok(Self {
            questions: questions.into(),
        })
    }

    /// Parses a JSON array of raw entries and validates it.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Json` when the input is not a JSON array and
    /// `BankError::Validation` for the first invalid entry, whatever the
    /// shape of its fields.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let elements: Vec<Value> = serde_json::from_str(json)?;
        Ok(Self::validate(elements.into_iter().map(RawQuestion::from_element))?)
    }

    /// The medical question bank shipped with the game.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the embedded content fails validation.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_json(BUILTIN_BANK_JSON)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn emoji(answer: &str, hint: &str) -> RawQuestion {
        RawQuestion::new(QuestionType::Emoji, ["🍬", "🔑"], answer, hint)
    }

    fn reason_of(raw: Vec<Option<RawQuestion>>) -> (usize, ValidationReason) {
        let err = QuestionBank::validate(raw).unwrap_err();
        (err.index, err.reason)
    }

    #[test]
    fn builtin_bank_validates() {
        let bank = QuestionBank::builtin().unwrap();
        assert_eq!(bank.len(), 10);
        assert!(bank.iter().all(|q| q.kind() == QuestionType::Emoji));
        assert_eq!(bank.get(4).unwrap().answer().as_str(), "GERD");
    }

    #[test]
    fn normalizes_answer_hint_and_assets() {
        let raw = RawQuestion::new(
            QuestionType::Emoji,
            ["  🍬 ", "🔑"],
            "insulin!",
            "  Hormone that unlocks glucose transport.  ",
        );
        let bank = QuestionBank::validate([Some(raw)]).unwrap();
        let q = bank.get(0).unwrap();
        assert_eq!(q.answer().as_str(), "INSULIN");
        assert_eq!(q.hint(), "Hormone that unlocks glucose transport.");
        assert_eq!(q.prompt(), &Prompt::Assets(vec!["🍬".into(), "🔑".into()]));
    }

    #[test]
    fn text_prompt_is_joined() {
        let raw = RawQuestion::new(QuestionType::Text, [" high ", "sugar", "", "disease"], "DIABETES", "Chronic hyperglycemia");
        let bank = QuestionBank::validate([Some(raw)]).unwrap();
        assert_eq!(bank.get(0).unwrap().prompt(), &Prompt::Text("high sugar disease".into()));
    }

    #[test]
    fn missing_entry_is_rejected_with_its_index() {
        let raw = vec![Some(emoji("INSULIN", "Key hormone")), None];
        assert_eq!(reason_of(raw), (1, ValidationReason::MissingEntry));
    }

    #[test]
    fn checks_run_in_order() {
        let mut raw = emoji("", "");
        raw.kind = Some("video".into());
        assert_eq!(
            reason_of(vec![Some(raw.clone())]),
            (0, ValidationReason::InvalidType { found: Some("video".into()) })
        );

        raw.kind = Some("emoji".into());
        assert_eq!(reason_of(vec![Some(raw.clone())]).1, ValidationReason::MissingAnswer);

        raw.answer = Some("GERD".into());
        assert_eq!(reason_of(vec![Some(raw.clone())]).1, ValidationReason::MissingHint);

        raw.hint = Some("gerd again".into());
        assert_eq!(reason_of(vec![Some(raw.clone())]).1, ValidationReason::HintLeaksAnswer);

        raw.hint = Some("Reflux after meals".into());
        raw.prompt = Some(json!([null, ""]));
        assert_eq!(reason_of(vec![Some(raw.clone())]).1, ValidationReason::MissingPrompt);

        raw.prompt = Some(json!(["🔥", "   "]));
        assert_eq!(reason_of(vec![Some(raw)]).1, ValidationReason::InvalidEmoji);
    }

    #[test]
    fn answer_without_letters_is_rejected() {
        let raw = emoji("1234", "Numbers only");
        assert_eq!(reason_of(vec![Some(raw)]).1, ValidationReason::MissingAnswer);
    }

    #[test]
    fn fragment_leak_is_rejected() {
        let raw = emoji("CONSTIPATION", "Hard stools, sometimes from obstruction");
        assert_eq!(reason_of(vec![Some(raw)]).1, ValidationReason::HintLeaksAnswer);
    }

    #[test]
    fn json_input_goes_through_validation() {
        let ok = r#"[{"question": "🔥", "type": "mixed", "answer": "gerd", "hint": "Reflux"}]"#;
        let bank = QuestionBank::from_json(ok).unwrap();
        assert_eq!(bank.get(0).unwrap().prompt(), &Prompt::Assets(vec!["🔥".into()]));

        let leaking = r#"[{"question": ["🔥"], "type": "emoji", "answer": "GERD", "hint": "It is GERD"}]"#;
        assert!(matches!(
            QuestionBank::from_json(leaking),
            Err(BankError::Validation(ValidationError {
                index: 0,
                reason: ValidationReason::HintLeaksAnswer
            }))
        ));

        let with_null = r#"[null]"#;
        assert!(matches!(
            QuestionBank::from_json(with_null),
            Err(BankError::Validation(ValidationError { reason: ValidationReason::MissingEntry, .. }))
        ));

        assert!(matches!(QuestionBank::from_json("{"), Err(BankError::Json(_))));
    }

    fn json_reason(json: &str) -> (usize, ValidationReason) {
        match QuestionBank::from_json(json) {
            Err(BankError::Validation(err)) => (err.index, err.reason),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    const VALID: &str = r#"{"question": ["🔥"], "type": "emoji", "answer": "GERD", "hint": "Reflux"}"#;

    #[test]
    fn wrongly_typed_fields_are_reported_per_entry() {
        let answer = format!(r#"[{VALID}, {{"question": "🔥", "type": "emoji", "answer": 42, "hint": "Reflux"}}]"#);
        assert_eq!(json_reason(&answer), (1, ValidationReason::MissingAnswer));

        let hint = format!(r#"[{VALID}, {{"question": "🔥", "type": "emoji", "answer": "GERD", "hint": true}}]"#);
        assert_eq!(json_reason(&hint), (1, ValidationReason::MissingHint));

        let kind = format!(r#"[{VALID}, {{"question": "🔥", "type": 7, "answer": "GERD", "hint": "Reflux"}}]"#);
        assert_eq!(
            json_reason(&kind),
            (1, ValidationReason::InvalidType { found: Some("7".into()) })
        );
    }

    #[test]
    fn non_object_entries_are_reported_per_entry() {
        assert_eq!(
            json_reason(&format!(r#"[{VALID}, "oops"]"#)),
            (1, ValidationReason::InvalidType { found: None })
        );
        assert_eq!(
            json_reason(&format!(r#"[{VALID}, null]"#)),
            (1, ValidationReason::MissingEntry)
        );
        assert!(matches!(QuestionBank::from_json(VALID), Err(BankError::Json(_))));
    }

    #[test]
    fn prompt_items_of_other_shapes() {
        let numbers = r#"[{"question": ["🔥", 7, 0, null, false], "type": "emoji", "answer": "GERD", "hint": "Reflux"}]"#;
        let bank = QuestionBank::from_json(numbers).unwrap();
        assert_eq!(bank.get(0).unwrap().prompt(), &Prompt::Assets(vec!["🔥".into(), "7".into()]));

        let nested = format!(r#"[{VALID}, {{"question": ["🔥", {{}}], "type": "emoji", "answer": "GERD", "hint": "Reflux"}}]"#);
        assert_eq!(json_reason(&nested), (1, ValidationReason::InvalidEmoji));

        let only_nested = format!(r#"[{VALID}, {{"question": [[1]], "type": "mixed", "answer": "GERD", "hint": "Reflux"}}]"#);
        assert_eq!(json_reason(&only_nested), (1, ValidationReason::MissingPrompt));
    }

    #[test]
    fn error_message_uses_one_based_numbers() {
        let err = QuestionBank::validate([Some(emoji("GERD", "")), None]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "question 1: hint is missing; provide an indirect educational clue"
        );
    }
}
