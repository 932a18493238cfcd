//! Read-only view of a session for the rendering layer.

use crate::difficulty::Difficulty;
use crate::mode::Mode;
use crate::palette::{Color, Verdict};
use crate::prompt::Prompt;
use crate::state::{Outcome, Phase};

/// What the flash panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Display {
    /// Blank panel
    #[default]
    Blank,
    /// A palette token during playback
    Color(Color),
    /// A countdown digit
    Countdown(u8),
    /// The "GO" cue
    Go,
}

/// Confirmed steps out of the target length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Progress {
    /// Confirmed tokens
    pub done: u8,
    /// Target length (0 when no sequence is active)
    pub total: u8,
}

impl Progress {
    /// `done / total`, 0 when no sequence is active.
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            f32::from(self.done) / f32::from(self.total)
        }
    }

    /// Rounded percentage for a progress bar, 0 when no sequence is active.
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let done = u16::from(self.done.min(self.total));
        let total = u16::from(self.total);
        let pct = done
            .saturating_mul(100)
            .saturating_add(total / 2)
            .checked_div(total)
            .unwrap_or(0);
        u8::try_from(pct).unwrap_or(100)
    }

    /// 1-based number of the step being worked on ("Step n / m").
    pub fn current_step(self) -> u8 {
        self.done.saturating_add(1).min(self.total)
    }
}

/// Everything the rendering layer needs to draw one frame of UI.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Active phase
    pub phase: Phase,
    /// Current level
    pub level: u32,
    /// Rounds won
    pub stars: u32,
    /// Stored difficulty (not the SPEED-adjusted value)
    pub difficulty: Difficulty,
    /// Active mode
    pub mode: Mode,
    /// Flash panel content
    pub display: Display,
    /// Live detected colour
    pub detected: Option<Verdict>,
    /// Seconds left in the pre-round countdown or the detection window
    pub countdown: Option<u8>,
    /// Input progress
    pub progress: Progress,
    /// Last round outcome while in [`Phase::Result`]
    pub outcome: Option<Outcome>,
    /// Player's camera switch
    pub camera_on: bool,
    /// Message to show the player
    pub notice: Option<Prompt>,
}
