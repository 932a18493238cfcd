//! Pre-round countdown: 3 → 2 → 1 → GO, one step per tick.

use embassy_time::{Duration, Instant};

use crate::timer::Ticker;

/// What the countdown is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownStep {
    /// A digit, counting down towards 1
    Digit(u8),
    /// Final "GO" cue
    Go,
}

/// Result of advancing the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Deadline not reached yet
    Pending,
    /// Moved on to a new step
    Stepped(CountdownStep),
    /// "GO" has been shown for a full tick; the round may begin
    Finished,
}

/// Countdown timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u8,
    ticker: Ticker,
}

impl Countdown {
    /// Start counting down from `from` (0 shows "GO" straight away).
    pub fn start(now: Instant, from: u8, tick: Duration) -> Self {
        Self {
            remaining: from,
            ticker: Ticker::start(now, tick),
        }
    }

    /// Step currently shown.
    pub fn step(&self) -> CountdownStep {
        match self.remaining {
            0 => CountdownStep::Go,
            n => CountdownStep::Digit(n),
        }
    }

    /// Digits left before "GO" (0 while "GO" is shown).
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// When [`advance`](Self::advance) next has work to do.
    pub fn next_deadline(&self) -> Instant {
        self.ticker.deadline()
    }

    /// Process every tick due at `now`.
    pub fn advance(&mut self, now: Instant) -> CountdownTick {
        let mut result = CountdownTick::Pending;
        while self.ticker.poll(now) {
            if self.remaining == 0 {
                return CountdownTick::Finished;
            }
            self.remaining = self.remaining.saturating_sub(1);
            result = CountdownTick::Stepped(self.step());
        }
        result
    }
}
