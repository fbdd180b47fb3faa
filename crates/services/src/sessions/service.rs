use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

use medmoji_core::model::{GameRules, Letter, Question, QuestionBank};

use crate::error::QuizError;
use super::plan::RevealSource;
use super::progress::QuizSummary;
use super::question::{CheckOutcome, GuessOutcome, QuestionState, QuestionStatus, TickOutcome};
use super::score::ScoreBoard;
use super::timer::{PendingAdvance, TimerHandle};
use super::view::QuizView;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of `QuizSession::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The current question is still in play.
    Refused,
    /// Already on the last question.
    AtEnd,
    Loaded { index: usize },
}

/// Result of `QuizSession::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizTick {
    /// No timer is running for this handle.
    Ignored,
    Counting { seconds_left: u32 },
    /// The question ran out of time; `auto_advance_in` is `None` on the last question.
    TimedOut { auto_advance_in: Option<u32> },
    AdvancePending { remaining: u32 },
    Advanced { index: usize },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through of a question bank.
///
/// Owns the bank, the state of the current question, the score board, the
/// reveal randomness and the deferred auto-advance. The presentation layer
/// drives it through the methods below and renders `view()`.
pub struct QuizSession<R = StdRng> {
    bank: QuestionBank,
    rules: GameRules,
    source: R,
    handle: TimerHandle,
    question: QuestionState,
    score: ScoreBoard,
    hint_visible: bool,
    pending_advance: Option<PendingAdvance>,
}

impl QuizSession<StdRng> {
    /// Session with an OS-seeded random reveal.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyBank` for a bank without questions.
    pub fn with_os_rng(bank: QuestionBank, rules: GameRules) -> Result<Self, QuizError> {
        Self::new(bank, rules, StdRng::from_os_rng())
    }
}

impl<R: RevealSource> QuizSession<R> {
    /// Starts a session on question 0.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyBank` for a bank without questions.
    pub fn new(bank: QuestionBank, rules: GameRules, mut source: R) -> Result<Self, QuizError> {
        let Some(first) = bank.get(0) else {
            return Err(QuizError::EmptyBank);
        };
        let handle = TimerHandle::initial();
        let question = QuestionState::load(0, first, &rules, handle, &mut source);
        let score = ScoreBoard::new(bank.len());

        let mut session = Self {
            bank,
            rules,
            source,
            handle,
            question,
            score,
            hint_visible: false,
            pending_advance: None,
        };
        session.record_if_resolved();
        Ok(session)
    }

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.question.index()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.bank.len()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_index() + 1 >= self.total()
    }

    /// State of the question on screen.
    #[must_use]
    pub fn question(&self) -> &QuestionState {
        &self.question
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.bank.get(self.current_index())
    }

    #[must_use]
    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<&PendingAdvance> {
        self.pending_advance.as_ref()
    }

    /// Handle for the periodic trigger, while the session still needs ticks.
    #[must_use]
    pub fn active_timer(&self) -> Option<TimerHandle> {
        self.question
            .timer_handle()
            .or_else(|| self.pending_advance.map(|pending| pending.handle()))
    }

    #[must_use]
    pub fn summary(&self) -> QuizSummary {
        self.score.summary()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.score.is_complete()
    }

    /// Snapshot for rendering.
    ///
    /// Returns `None` only if the current index fell outside the bank,
    /// which `load` never allows.
    #[must_use]
    pub fn view(&self) -> Option<QuizView> {
        let question = self.current_question()?;
        Some(QuizView::build(
            question,
            &self.question,
            self.total(),
            self.hint_visible,
            self.pending_advance.map(|pending| pending.remaining()),
            self.score.summary(),
        ))
    }

    pub fn guess_letter(&mut self, letter: Letter) -> GuessOutcome {
        let outcome = self.question.guess_letter(letter);
        if outcome == GuessOutcome::Won {
            self.record_if_resolved();
        }
        outcome
    }

    /// Keyboard input; anything that is not a letter is ignored.
    pub fn guess_char(&mut self, c: char) -> GuessOutcome {
        Letter::from_char(c).map_or(GuessOutcome::Ignored, |letter| self.guess_letter(letter))
    }

    pub fn check_answer(&mut self) -> CheckOutcome {
        let outcome = self.question.check_answer();
        if matches!(outcome, CheckOutcome::Won | CheckOutcome::Lost) {
            self.record_if_resolved();
        }
        outcome
    }

    /// Flips hint visibility; returns the new value.
    pub fn toggle_hint(&mut self) -> bool {
        self.hint_visible = !self.hint_visible;
        self.hint_visible
    }

    /// Moves to the next question once the current one is finished.
    ///
    /// A question left with no attempts but never submitted is scored as
    /// incorrect when the quiz moves past it.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if !self.question.can_advance() {
            return AdvanceOutcome::Refused;
        }
        let next = self.current_index() + 1;
        if next >= self.total() {
            return AdvanceOutcome::AtEnd;
        }
        self.score.record(self.current_index(), false);
        self.load(next);
        AdvanceOutcome::Loaded { index: next }
    }

    /// Clears every result and starts over from question 0.
    pub fn restart(&mut self) {
        tracing::info!("quiz restarted");
        self.score.clear();
        self.load(0);
    }

    /// One time unit for the current question, or for a pending auto-advance.
    pub fn tick(&mut self) -> QuizTick {
        if let Some(pending) = self.pending_advance.as_mut() {
            if pending.handle() != self.handle {
                self.pending_advance = None;
                return QuizTick::Ignored;
            }
            if !pending.countdown() {
                return QuizTick::AdvancePending {
                    remaining: pending.remaining(),
                };
            }
            self.pending_advance = None;
            return match self.advance() {
                AdvanceOutcome::Loaded { index } => QuizTick::Advanced { index },
                AdvanceOutcome::Refused | AdvanceOutcome::AtEnd => QuizTick::Ignored,
            };
        }

        match self.question.tick() {
            TickOutcome::Ignored => QuizTick::Ignored,
            TickOutcome::Counting { seconds_left } => QuizTick::Counting { seconds_left },
            TickOutcome::TimedOut => {
                self.record_if_resolved();
                let auto_advance_in = if self.is_last() {
                    None
                } else {
                    let delay = self.rules.auto_advance_delay_secs();
                    self.pending_advance = Some(PendingAdvance::new(self.handle, delay));
                    Some(delay)
                };
                QuizTick::TimedOut { auto_advance_in }
            }
        }
    }

    /// Like `tick`, but only for the question `handle` was issued to.
    pub fn tick_for(&mut self, handle: TimerHandle) -> QuizTick {
        if handle != self.handle {
            return QuizTick::Ignored;
        }
        self.tick()
    }

    fn load(&mut self, index: usize) {
        let Some(question) = self.bank.get(index) else {
            return;
        };
        self.handle = self.handle.next();
        self.question = QuestionState::load(index, question, &self.rules, self.handle, &mut self.source);
        self.hint_visible = false;
        self.pending_advance = None;
        self.record_if_resolved();
    }

    fn record_if_resolved(&mut self) {
        let correct = match self.question.status() {
            QuestionStatus::Active => return,
            QuestionStatus::Won => true,
            QuestionStatus::Lost | QuestionStatus::TimedOut => false,
        };
        self.score.record(self.question.index(), correct);
    }
}

impl<R> fmt::Debug for QuizSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("bank_len", &self.bank.len())
            .field("handle", &self.handle)
            .field("question", &self.question)
            .field("score", &self.score)
            .field("hint_visible", &self.hint_visible)
            .field("pending_advance", &self.pending_advance)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
