use serde::Serialize;
use std::collections::BTreeSet;

use medmoji_core::model::{Answer, Attempts, GameRules, Letter, Question};

use super::plan::{RevealSource, plan_reveal};
use super::timer::{QuestionTimer, TimerHandle, TimerTick};

//
// ─── STATUS & OUTCOMES ─────────────────────────────────────────────────────────
//

/// Lifecycle of one question. Everything but `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Active,
    Won,
    Lost,
    TimedOut,
}

impl QuestionStatus {
    #[must_use]
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Result of `QuestionState::guess_letter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Resolved, locked, out of attempts, or a repeated letter.
    Ignored,
    Hit,
    Miss { attempts_left: Attempts },
    Won,
}

/// Result of `QuestionState::check_answer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Ignored,
    Incorrect { attempts_left: Attempts },
    Lost,
    Won,
}

/// Result of `QuestionState::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Counting { seconds_left: u32 },
    TimedOut,
}

//
// ─── QUESTION STATE ────────────────────────────────────────────────────────────
//

/// Guessing state for the question currently on screen.
///
/// Built fresh by `load` for every question and only changed through
/// `guess_letter`, `check_answer` and `tick`. Once resolved, all three are
/// inert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionState {
    index: usize,
    answer: Answer,
    guessed: BTreeSet<Letter>,
    revealed: BTreeSet<Letter>,
    attempts_left: Attempts,
    wrong_letter_penalty: Attempts,
    wrong_submission_penalty: Attempts,
    status: QuestionStatus,
    locked: bool,
    timer: QuestionTimer,
}

impl QuestionState {
    /// Loads `question` at `index`: full attempts, fresh timer, and the
    /// random reveal set already in the guessed letters.
    pub fn load<S>(
        index: usize,
        question: &Question,
        rules: &GameRules,
        handle: TimerHandle,
        source: &mut S,
    ) -> Self
    where
        S: RevealSource + ?Sized,
    {
        let answer = question.answer().clone();
        let revealed: BTreeSet<Letter> = plan_reveal(&answer, rules, source).into_iter().collect();

        tracing::debug!(
            index,
            reveal = revealed.len(),
            generation = handle.generation(),
            "question loaded"
        );

        let mut state = Self {
            index,
            answer,
            guessed: revealed.clone(),
            revealed,
            attempts_left: rules.starting_attempts(),
            wrong_letter_penalty: rules.wrong_letter_penalty(),
            wrong_submission_penalty: rules.wrong_submission_penalty(),
            status: QuestionStatus::Active,
            locked: false,
            timer: QuestionTimer::start(handle, rules.countdown_secs()),
        };
        // A reveal can cover every letter of a short answer.
        if state.is_solved() {
            state.resolve(QuestionStatus::Won);
        }
        state
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    /// Every letter tried so far, reveal set included.
    #[must_use]
    pub fn guessed(&self) -> &BTreeSet<Letter> {
        &self.guessed
    }

    /// Letters pre-revealed when the question loaded.
    #[must_use]
    pub fn revealed(&self) -> &BTreeSet<Letter> {
        &self.revealed
    }

    #[must_use]
    pub fn attempts_left(&self) -> Attempts {
        self.attempts_left
    }

    #[must_use]
    pub fn seconds_left(&self) -> u32 {
        self.timer.seconds_left()
    }

    #[must_use]
    pub fn status(&self) -> QuestionStatus {
        self.status
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status.is_resolved()
    }

    /// True once the countdown ran out.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The timer's handle while it is still counting.
    #[must_use]
    pub fn timer_handle(&self) -> Option<TimerHandle> {
        self.timer.is_running().then(|| self.timer.handle())
    }

    /// True when every letter of the answer has been guessed.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.answer.letters().all(|letter| self.guessed.contains(&letter))
    }

    /// The full answer is shown after a loss or a timeout.
    #[must_use]
    pub fn is_answer_revealed(&self) -> bool {
        matches!(self.status, QuestionStatus::Lost | QuestionStatus::TimedOut)
    }

    /// Answer positions, `None` for letters still hidden.
    #[must_use]
    pub fn slots(&self) -> Vec<Option<Letter>> {
        let show_all = self.is_answer_revealed();
        self.answer
            .letters()
            .map(|letter| (show_all || self.guessed.contains(&letter)).then_some(letter))
            .collect()
    }

    /// Whether the quiz may move past this question.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.is_resolved() || self.attempts_left.is_exhausted() || self.locked
    }

    /// Guesses one letter. A wrong letter costs the wrong-letter penalty.
    ///
    /// A win is detected right after the guess. Running out of attempts
    /// here never loses the question; only `check_answer` does that.
    pub fn guess_letter(&mut self, letter: Letter) -> GuessOutcome {
        if self.is_resolved()
            || self.locked
            || self.attempts_left.is_exhausted()
            || self.guessed.contains(&letter)
        {
            return GuessOutcome::Ignored;
        }

        self.guessed.insert(letter);
        let hit = self.answer.contains(letter);
        if !hit {
            self.attempts_left = self.attempts_left.saturating_sub(self.wrong_letter_penalty);
        }
        tracing::debug!(index = self.index, %letter, hit, attempts_left = %self.attempts_left, "letter guessed");

        if self.is_solved() {
            self.resolve(QuestionStatus::Won);
            return GuessOutcome::Won;
        }
        if hit {
            GuessOutcome::Hit
        } else {
            GuessOutcome::Miss {
                attempts_left: self.attempts_left,
            }
        }
    }

    /// Explicit submission. An unsolved answer costs the submission penalty
    /// and loses the question when no attempts remain.
    pub fn check_answer(&mut self) -> CheckOutcome {
        if self.is_resolved() {
            return CheckOutcome::Ignored;
        }
        if self.is_solved() {
            self.resolve(QuestionStatus::Won);
            return CheckOutcome::Won;
        }

        self.attempts_left = self.attempts_left.saturating_sub(self.wrong_submission_penalty);
        if self.attempts_left.is_exhausted() {
            self.resolve(QuestionStatus::Lost);
            CheckOutcome::Lost
        } else {
            CheckOutcome::Incorrect {
                attempts_left: self.attempts_left,
            }
        }
    }

    /// Counts down one time unit; at zero the question times out and locks.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_resolved() {
            return TickOutcome::Ignored;
        }
        match self.timer.tick() {
            TimerTick::Stopped => TickOutcome::Ignored,
            TimerTick::Counting(seconds_left) => TickOutcome::Counting { seconds_left },
            TimerTick::Expired => {
                self.locked = true;
                self.resolve(QuestionStatus::TimedOut);
                TickOutcome::TimedOut
            }
        }
    }

    fn resolve(&mut self, status: QuestionStatus) {
        self.status = status;
        self.timer.stop();
        tracing::info!(index = self.index, ?status, answer = %self.answer, "question resolved");
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use medmoji_core::model::{QuestionBank, QuestionType, RawQuestion};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct FirstPick;

    impl RevealSource for FirstPick {
        fn pick_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn question(answer: &str) -> Question {
        let raw = RawQuestion::new(QuestionType::Emoji, ["❓"], answer, "No clue here");
        QuestionBank::validate([Some(raw)])
            .unwrap()
            .get(0)
            .unwrap()
            .clone()
    }

    fn load(answer: &str) -> QuestionState {
        QuestionState::load(
            0,
            &question(answer),
            &GameRules::standard(),
            TimerHandle::initial(),
            &mut FirstPick,
        )
    }

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    #[test]
    fn load_starts_active_with_reveal() {
        let state = load("GERD");
        assert_eq!(state.status(), QuestionStatus::Active);
        assert_eq!(state.attempts_left(), Attempts::whole(3));
        assert_eq!(state.seconds_left(), 90);
        assert!(!state.is_locked());
        assert_eq!(state.revealed().iter().copied().collect::<Vec<_>>(), vec![letter('G')]);
        assert_eq!(state.guessed(), state.revealed());
        assert!(state.timer_handle().is_some());
    }

    #[test]
    fn gerd_is_won_on_the_last_letter_without_losing_attempts() {
        let mut state = load("GERD");
        assert_eq!(state.guess_letter(letter('G')), GuessOutcome::Ignored);
        assert_eq!(state.guess_letter(letter('E')), GuessOutcome::Hit);
        assert_eq!(state.guess_letter(letter('R')), GuessOutcome::Hit);
        assert_eq!(state.guess_letter(letter('D')), GuessOutcome::Won);
        assert_eq!(state.status(), QuestionStatus::Won);
        assert_eq!(state.attempts_left(), Attempts::whole(3));
        assert!(state.timer_handle().is_none());
    }

    #[test]
    fn wrong_letters_drain_attempts_but_never_lose() {
        let mut state = load("INSULIN");
        assert_eq!(state.revealed().len(), 2);
        for c in ['A', 'B', 'C', 'D', 'E', 'F'] {
            assert!(matches!(state.guess_letter(letter(c)), GuessOutcome::Miss { .. }));
        }
        assert!(state.attempts_left().is_exhausted());
        assert_eq!(state.status(), QuestionStatus::Active);
        assert!(state.can_advance());

        // Out of attempts: further letters are inert.
        assert_eq!(state.guess_letter(letter('S')), GuessOutcome::Ignored);

        assert_eq!(state.check_answer(), CheckOutcome::Lost);
        assert_eq!(state.status(), QuestionStatus::Lost);
        assert!(state.is_answer_revealed());
    }

    #[test]
    fn repeated_guess_changes_nothing() {
        let mut once = load("INSULIN");
        let mut twice = once.clone();
        once.guess_letter(letter('X'));
        twice.guess_letter(letter('X'));
        assert_eq!(twice.guess_letter(letter('X')), GuessOutcome::Ignored);
        assert_eq!(once, twice);
    }

    #[test]
    fn check_answer_costs_a_full_attempt() {
        let mut state = load("INSULIN");
        assert_eq!(
            state.check_answer(),
            CheckOutcome::Incorrect {
                attempts_left: Attempts::whole(2)
            }
        );
        state.guess_letter(letter('Z'));
        assert_eq!(
            state.check_answer(),
            CheckOutcome::Incorrect {
                attempts_left: Attempts::HALF
            }
        );
        assert_eq!(state.check_answer(), CheckOutcome::Lost);
        assert_eq!(state.attempts_left(), Attempts::ZERO);
    }

    #[test]
    fn timeout_locks_and_reveals() {
        let rules = GameRules::standard().with_countdown_secs(3).unwrap();
        let mut state = QuestionState::load(0, &question("GERD"), &rules, TimerHandle::initial(), &mut FirstPick);
        assert_eq!(state.tick(), TickOutcome::Counting { seconds_left: 2 });
        assert_eq!(state.tick(), TickOutcome::Counting { seconds_left: 1 });
        assert_eq!(state.tick(), TickOutcome::TimedOut);
        assert_eq!(state.status(), QuestionStatus::TimedOut);
        assert!(state.is_locked());
        assert!(state.can_advance());
        assert!(state.slots().iter().all(Option::is_some));
        assert_eq!(state.tick(), TickOutcome::Ignored);
    }

    #[test]
    fn resolved_question_ignores_everything() {
        let mut state = load("GERD");
        for c in ['E', 'R', 'D'] {
            state.guess_letter(letter(c));
        }
        let frozen = state.clone();
        assert_eq!(state.guess_letter(letter('Q')), GuessOutcome::Ignored);
        assert_eq!(state.check_answer(), CheckOutcome::Ignored);
        assert_eq!(state.tick(), TickOutcome::Ignored);
        assert_eq!(state, frozen);
    }

    #[test]
    fn lost_question_ignores_everything() {
        let mut state = load("GERD");
        while state.check_answer() != CheckOutcome::Lost {}
        let frozen = state.clone();

        assert_eq!(state.guess_letter(letter('E')), GuessOutcome::Ignored);
        assert_eq!(state.check_answer(), CheckOutcome::Ignored);
        assert_eq!(state.tick(), TickOutcome::Ignored);
        assert_eq!(state, frozen);
        assert_eq!(state.status(), QuestionStatus::Lost);
        assert_eq!(state.seconds_left(), 90);
        assert!(!state.guessed().contains(&letter('E')));
    }

    #[test]
    fn slots_hide_unguessed_letters() {
        let mut state = load("GERD");
        state.guess_letter(letter('R'));
        let shown: String = state
            .slots()
            .into_iter()
            .map(|slot| slot.map_or('_', Letter::as_char))
            .collect();
        assert_eq!(shown, "G_R_");
    }

    #[test]
    fn guessed_always_contains_reveal() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = QuestionState::load(0, &question("TIGECYCLINE"), &GameRules::standard(), TimerHandle::initial(), &mut rng);
        let reveal = state.revealed().clone();
        for c in Letter::alphabet() {
            state.guess_letter(c);
            assert!(state.guessed().is_superset(&reveal));
        }
    }

    #[test]
    fn single_letter_answer_is_won_on_load() {
        let state = load("A");
        assert_eq!(state.status(), QuestionStatus::Won);
    }
}
