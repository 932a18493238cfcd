//! Session phase, progression fields and the end-of-round scoring rules.

use crate::difficulty::Difficulty;
use crate::mode::Mode;

/// Session phase. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No round in progress, camera released
    #[default]
    Idle,
    /// 3 → 2 → 1 → GO before the sequence is shown
    PreCountdown,
    /// Target sequence is being flashed
    Playback,
    /// Waiting for the player (or an automatic delay) to open detection
    AwaitingDetectionStart,
    /// Sampling the camera / waiting for confirmation of one step
    Detecting,
    /// Round over; outcome on display
    Result,
}

impl Phase {
    /// Short lower-case name for logs and status lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PreCountdown => "countdown",
            Self::Playback => "playback",
            Self::AwaitingDetectionStart => "awaiting detection",
            Self::Detecting => "detecting",
            Self::Result => "result",
        }
    }

    /// Whether a target sequence exists and is being worked on.
    pub const fn has_active_sequence(self) -> bool {
        matches!(
            self,
            Self::Playback | Self::AwaitingDetectionStart | Self::Detecting
        )
    }
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Every position matched
    Win,
    /// At least one position differed
    Lose,
}

impl Outcome {
    /// Compare two equal-length sequences position by position.
    pub fn judge<T: PartialEq>(target: &[T], input: &[T]) -> Self {
        if target.len() == input.len() && target.iter().zip(input).all(|(t, i)| t == i) {
            Self::Win
        } else {
            Self::Lose
        }
    }

    /// `"win"` or `"lose"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Lose => "lose",
        }
    }
}

/// Progression fields owned by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionState {
    /// Current level, starts at 1
    pub level: u32,
    /// Rounds won, never decreases
    pub stars: u32,
    /// Stored flash duration
    pub difficulty: Difficulty,
    /// Active mode
    pub mode: Mode,
    /// Active phase
    pub phase: Phase,
}

impl SessionState {
    /// Fresh session: level 1, no stars, starting difficulty, idle.
    pub fn new(mode: Mode) -> Self {
        Self {
            level: 1,
            stars: 0,
            difficulty: Difficulty::default(),
            mode,
            phase: Phase::Idle,
        }
    }

    /// Apply the end-of-round rules.
    ///
    /// - Win: level + 1, stars + 1, difficulty one step shorter.
    /// - Lose: level back to 1, difficulty *also* one step shorter.
    ///
    /// The loss branch keeps shortening the flash even though the level
    /// resets. That pairing looks accidental but it is what players have
    /// always seen; confirm the intent before changing it.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => {
                self.level = self.level.saturating_add(1);
                self.stars = self.stars.saturating_add(1);
            }
            Outcome::Lose => self.level = 1,
        }
        self.difficulty = self.difficulty.stepped();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
