//! Fragment leak check for question hints.
//!
//! A hint leaks when, after dropping everything but ASCII letters and
//! lower-casing, it contains the whole answer or any run of 4 to 12
//! consecutive answer letters.

const MIN_FRAGMENT_LEN: usize = 4;
const MAX_FRAGMENT_LEN: usize = 12;

fn letters_lowercase(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Returns true when `hint` gives away `answer` or a long enough piece of it.
#[must_use]
pub fn leaks_answer(answer: &str, hint: &str) -> bool {
    leaked_fragment(answer, hint).is_some()
}

/// Returns the longest leaked fragment, checking the full answer first.
#[must_use]
pub fn leaked_fragment(answer: &str, hint: &str) -> Option<String> {
    let answer = letters_lowercase(answer);
    let hint = letters_lowercase(hint);
    if answer.is_empty() || hint.is_empty() {
        return None;
    }
    if hint.contains(&answer) {
        return Some(answer);
    }

    let longest = answer.len().min(MAX_FRAGMENT_LEN);
    (MIN_FRAGMENT_LEN..=longest).rev().find_map(|len| {
        (0..=answer.len() - len)
            .map(|start| &answer[start..start + len])
            .find(|fragment| hint.contains(fragment))
            .map(str::to_owned)
    })
}
