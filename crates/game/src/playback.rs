//! Playback scheduler: flashes the target sequence one token at a time.
//!
//! ```text
//! [Flash t0] --flash--> [Gap] --gap--> [Flash t1] --flash--> [Gap] ... [Gap] --gap--> Finished
//! ```
//!
//! While a scheduler is running it is the only writer of the displayed
//! colour. It cannot be interrupted by player input; the session ignores
//! start/confirm actions until [`PlaybackStatus::Finished`].

use embassy_time::{Duration, Instant};

use crate::palette::Color;
use crate::sequence::Sequence;
use crate::timer::later;

/// Result of advancing the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// More tokens (or the trailing gap) remain
    Running,
    /// The last token's gap has elapsed; display is blank
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Flash,
    Gap,
    Done,
}

/// Timer state for one playback pass.
#[derive(Debug, Clone)]
pub struct PlaybackScheduler {
    sequence: Sequence,
    index: usize,
    stage: Stage,
    deadline: Instant,
    flash: Duration,
    gap: Duration,
}

impl PlaybackScheduler {
    /// Start showing the first token of `sequence` at `now`.
    pub fn start(sequence: Sequence, flash: Duration, gap: Duration, now: Instant) -> Self {
        let stage = if sequence.is_empty() {
            Stage::Done
        } else {
            Stage::Flash
        };
        Self {
            sequence,
            index: 0,
            stage,
            deadline: later(now, flash),
            flash,
            gap,
        }
    }

    /// Token on screen right now, `None` while blank.
    pub fn displayed(&self) -> Option<Color> {
        match self.stage {
            Stage::Flash => self.sequence.get(self.index).copied(),
            Stage::Gap | Stage::Done => None,
        }
    }

    /// When [`advance`](Self::advance) next has work to do; `None` once finished.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.stage {
            Stage::Done => None,
            Stage::Flash | Stage::Gap => Some(self.deadline),
        }
    }

    /// Whether the last gap has elapsed.
    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Process every stage change due at `now`.
    pub fn advance(&mut self, now: Instant) -> PlaybackStatus {
        while self.stage != Stage::Done && now >= self.deadline {
            match self.stage {
                Stage::Flash => {
                    tracing::trace!(index = self.index, "playback: blank");
                    self.stage = Stage::Gap;
                    self.deadline = later(self.deadline, self.gap);
                }
                Stage::Gap => {
                    self.index = self.index.saturating_add(1);
                    if self.index < self.sequence.len() {
                        tracing::trace!(index = self.index, "playback: flash");
                        self.stage = Stage::Flash;
                        self.deadline = later(self.deadline, self.flash);
                    } else {
                        self.stage = Stage::Done;
                    }
                }
                Stage::Done => {}
            }
        }
        if self.is_finished() {
            PlaybackStatus::Finished
        } else {
            PlaybackStatus::Running
        }
    }
}
