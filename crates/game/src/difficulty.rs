//! Flash pacing: the stored difficulty and its per-mode effective value.
//!
//! Difficulty is the number of milliseconds each token stays on screen
//! during playback. It only ever shrinks, one step per finished round,
//! and never below [`Difficulty::FLOOR_MS`].

use embassy_time::Duration;

use crate::mode::Mode;

/// Flash duration in milliseconds, never below [`Difficulty::FLOOR_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Difficulty(u32);

impl Difficulty {
    /// Starting flash duration of a fresh session.
    pub const START_MS: u32 = 1000;

    /// Shortest flash duration ever used.
    pub const FLOOR_MS: u32 = 300;

    /// Reduction applied after every finished round.
    pub const STEP_MS: u32 = 50;

    /// Extra reduction applied at use-time in [`Mode::Speed`].
    pub const SPEED_REDUCTION_MS: u32 = 300;

    /// Create a `Difficulty`, clamping values below the floor up to it.
    #[must_use]
    pub const fn new(ms: u32) -> Self {
        if ms < Self::FLOOR_MS {
            Self(Self::FLOOR_MS)
        } else {
            Self(ms)
        }
    }

    /// Return the stored flash duration in milliseconds.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Difficulty for the next round: one step shorter, floored.
    #[must_use]
    pub const fn stepped(self) -> Self {
        Self::new(self.0.saturating_sub(Self::STEP_MS))
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(Self::START_MS)
    }
}

/// Per-token flash duration actually used for playback.
///
/// `Speed` mode subtracts [`Difficulty::SPEED_REDUCTION_MS`] (still floored);
/// every other mode uses the stored value unchanged. The stored difficulty
/// is never modified here.
pub fn effective_delay(difficulty: Difficulty, mode: Mode) -> Duration {
    let ms = match mode {
        Mode::Speed => Difficulty::new(
            difficulty
                .get()
                .saturating_sub(Difficulty::SPEED_REDUCTION_MS),
        )
        .get(),
        Mode::Length | Mode::Mix => difficulty.get(),
    };
    Duration::from_millis(u64::from(ms))
}
