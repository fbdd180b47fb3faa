use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LetterError {
    #[error("not a letter A-Z: {0:?}")]
    NotALetter(char),
}

//
// ─── LETTER ────────────────────────────────────────────────────────────────────
//

/// A single upper-case ASCII letter, `A` through `Z`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(u8);

impl Letter {
    /// Parses a keyboard character, upper-casing ASCII lower-case input.
    ///
    /// Returns `None` for anything outside `a-z`/`A-Z`.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(Self(upper as u8))
        } else {
            None
        }
    }

    /// All 26 letters in keyboard order.
    pub fn alphabet() -> impl Iterator<Item = Letter> {
        (b'A'..=b'Z').map(Letter)
    }

    #[must_use]
    pub fn as_char(self) -> char {
        char::from(self.0)
    }
}

impl fmt::Debug for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Letter({})", self.as_char())
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Letter {
    type Error = LetterError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::from_char(value).ok_or(LetterError::NotALetter(value))
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        letter.as_char()
    }
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// A normalized answer: letters only, upper-cased, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Answer(String);

impl Answer {
    /// Strips everything but ASCII letters and upper-cases the rest.
    ///
    /// Returns `None` when no letters remain.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let letters: String = raw
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if letters.is_empty() {
            None
        } else {
            Some(Self(letters))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letter positions, repeats included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Letters in answer order, repeats included.
    pub fn letters(&self) -> impl Iterator<Item = Letter> + '_ {
        self.0.bytes().map(Letter)
    }

    #[must_use]
    pub fn contains(&self, letter: Letter) -> bool {
        self.0.as_bytes().contains(&letter.0)
    }

    /// Distinct letters in order of first appearance.
    #[must_use]
    pub fn distinct_letters(&self) -> Vec<Letter> {
        let mut seen = Vec::with_capacity(self.0.len());
        for letter in self.letters() {
            if !seen.contains(&letter) {
                seen.push(letter);
            }
        }
        seen
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_accepts_lowercase_and_rejects_symbols() {
        assert_eq!(Letter::from_char('g').unwrap().as_char(), 'G');
        assert_eq!(Letter::from_char('Z').unwrap().as_char(), 'Z');
        assert!(Letter::from_char('1').is_none());
        assert!(Letter::from_char('é').is_none());
        assert_eq!(Letter::try_from('-'), Err(LetterError::NotALetter('-')));
        assert_eq!(Letter::alphabet().count(), 26);
    }

    #[test]
    fn answer_is_letters_only_and_uppercased() {
        let answer = Answer::parse("Parkinson's").unwrap();
        assert_eq!(answer.as_str(), "PARKINSONS");
        assert!(Answer::parse(" 12-3 ").is_none());
    }

    #[test]
    fn distinct_letters_keep_first_appearance_order() {
        let answer = Answer::parse("INSULIN").unwrap();
        let distinct: String = answer.distinct_letters().into_iter().map(Letter::as_char).collect();
        assert_eq!(distinct, "INSUL");
        assert!(answer.contains(Letter::from_char('u').unwrap()));
        assert!(!answer.contains(Letter::from_char('x').unwrap()));
    }
}
