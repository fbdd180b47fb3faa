use rand::Rng;

use medmoji_core::model::{Answer, GameRules, Letter};

/// Source of randomness for the initial letter reveal.
///
/// Every `rand::Rng` is a source; tests can script the picks.
pub trait RevealSource {
    /// Picks an index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> RevealSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Draws the reveal set for `answer` without replacement from its distinct letters.
///
/// The draw size comes from `GameRules::reveal_count`.
pub fn plan_reveal<S>(answer: &Answer, rules: &GameRules, source: &mut S) -> Vec<Letter>
where
    S: RevealSource + ?Sized,
{
    let mut available = answer.distinct_letters();
    let count = rules.reveal_count(available.len());

    let mut picked = Vec::with_capacity(count);
    while picked.len() < count && !available.is_empty() {
        let index = source.pick_index(available.len()).min(available.len() - 1);
        picked.push(available.remove(index));
    }
    picked
}
