//! Detection window: a bounded run of once-per-tick classifier samples.
//!
//! The window only maintains the live "currently detected colour". Each
//! tick overwrites the previous verdict; when the last tick fires the
//! window closes and that final verdict becomes the confirmation candidate.
//! Advancing the game is left to the session.

use embassy_time::{Duration, Instant};

use crate::palette::Verdict;
use crate::timer::Ticker;

/// Result of advancing the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowTick {
    /// Deadline not reached yet
    Pending,
    /// A sample was taken; more ticks remain
    Sampled(Verdict),
    /// The final sample was taken; the window is closed
    Closed(Verdict),
}

/// Timer state for one detection window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionWindow {
    remaining: u8,
    ticker: Ticker,
}

impl DetectionWindow {
    /// Open a window of `ticks` samples, the first one `period` after `now`.
    pub fn start(now: Instant, ticks: u8, period: Duration) -> Self {
        Self {
            remaining: ticks,
            ticker: Ticker::start(now, period),
        }
    }

    /// Samples still to be taken.
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Whether more samples remain.
    pub fn is_open(&self) -> bool {
        self.remaining > 0
    }

    /// When the next sample is due; `None` once closed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.is_open().then(|| self.ticker.deadline())
    }

    /// Take every sample due at `now`, calling `sample` once per tick.
    pub fn advance<F>(&mut self, now: Instant, mut sample: F) -> WindowTick
    where
        F: FnMut() -> Verdict,
    {
        let mut result = WindowTick::Pending;
        while self.is_open() && self.ticker.poll(now) {
            let verdict = sample();
            self.remaining = self.remaining.saturating_sub(1);
            tracing::debug!(
                verdict = verdict.as_str(),
                remaining = self.remaining,
                "detection sample"
            );
            result = if self.is_open() {
                WindowTick::Sampled(verdict)
            } else {
                WindowTick::Closed(verdict)
            };
        }
        result
    }
}
