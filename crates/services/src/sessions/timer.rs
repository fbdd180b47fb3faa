/// Token for one loaded question's timer.
///
/// Each load gets a new generation; ticks carrying an older handle are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    generation: u64,
}

impl TimerHandle {
    #[must_use]
    pub fn initial() -> Self {
        Self { generation: 0 }
    }

    /// The handle for the next loaded question.
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            generation: self.generation.wrapping_add(1),
        }
    }

    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerTick {
    Stopped,
    Counting(u32),
    Expired,
}

/// Countdown scoped to a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuestionTimer {
    handle: TimerHandle,
    seconds_left: u32,
    running: bool,
}

impl QuestionTimer {
    pub(crate) fn start(handle: TimerHandle, seconds: u32) -> Self {
        Self {
            handle,
            seconds_left: seconds,
            running: seconds > 0,
        }
    }

    pub(crate) fn handle(&self) -> TimerHandle {
        self.handle
    }

    pub(crate) fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn stop(&mut self) {
        self.running = false;
    }

    pub(crate) fn tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Stopped;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            self.running = false;
            TimerTick::Expired
        } else {
            TimerTick::Counting(self.seconds_left)
        }
    }
}

/// Move to the next question, deferred by a number of ticks after a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    handle: TimerHandle,
    remaining: u32,
}

impl PendingAdvance {
    pub(crate) fn new(handle: TimerHandle, delay: u32) -> Self {
        Self {
            handle,
            remaining: delay,
        }
    }

    /// Handle of the question that scheduled this advance.
    #[must_use]
    pub fn handle(&self) -> TimerHandle {
        self.handle
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Counts one tick; true once the advance is due.
    pub(crate) fn countdown(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}
