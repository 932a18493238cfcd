//! Session timings and policy knobs.
//!
//! Defaults reproduce the classic game: 3-2-1-GO at one second per step,
//! 200 ms blank between flashed tokens, five one-second detection samples,
//! detection opened by the player, result screen waits for the player.

use embassy_time::Duration;

use crate::difficulty::Difficulty;
use crate::error::ConfigError;
use crate::mode::Mode;

/// How the session leaves [`Phase::AwaitingDetectionStart`](crate::state::Phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DetectionStart {
    /// Wait for `start_detection`
    Manual,
    /// Open the window by itself after the given delay
    Auto(Duration),
}

/// What happens once a round's result is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResultPolicy {
    /// Wait for `advance_after_result`
    WaitForPlayer,
    /// Start the next round after the given delay
    AutoContinue(Duration),
}

/// Configuration for one [`Session`](crate::session::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// Mode selected when the session is created
    pub mode: Mode,
    /// Flash duration for the first round
    pub difficulty: Difficulty,
    /// First countdown digit
    pub countdown_from: u8,
    /// Time each countdown step is shown
    pub countdown_tick: Duration,
    /// Blank between two flashed tokens
    pub symbol_gap: Duration,
    /// Interval between detection samples
    pub detection_tick: Duration,
    /// Samples per detection window
    pub detection_ticks: u8,
    /// How detection is opened after playback
    pub detection_start: DetectionStart,
    /// What follows the result screen
    pub result_policy: ResultPolicy,
    /// Camera switch position at start-up
    pub camera_on: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Mix,
            difficulty: Difficulty::default(),
            countdown_from: 3,
            countdown_tick: Duration::from_secs(1),
            symbol_gap: Duration::from_millis(200),
            detection_tick: Duration::from_secs(1),
            detection_ticks: 5,
            detection_start: DetectionStart::Manual,
            result_policy: ResultPolicy::WaitForPlayer,
            camera_on: true,
        }
    }
}

impl GameConfig {
    /// Set the starting mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the first round's flash duration (clamped to the floor).
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the countdown start digit and step duration.
    #[must_use]
    pub fn with_countdown(mut self, from: u8, tick: Duration) -> Self {
        self.countdown_from = from;
        self.countdown_tick = tick;
        self
    }

    /// Set the blank between flashed tokens.
    #[must_use]
    pub fn with_symbol_gap(mut self, gap: Duration) -> Self {
        self.symbol_gap = gap;
        self
    }

    /// Set the detection window length and sample interval.
    #[must_use]
    pub fn with_detection_window(mut self, ticks: u8, tick: Duration) -> Self {
        self.detection_ticks = ticks;
        self.detection_tick = tick;
        self
    }

    /// Set how detection is opened after playback.
    #[must_use]
    pub fn with_detection_start(mut self, start: DetectionStart) -> Self {
        self.detection_start = start;
        self
    }

    /// Set what follows the result screen.
    #[must_use]
    pub fn with_result_policy(mut self, policy: ResultPolicy) -> Self {
        self.result_policy = policy;
        self
    }

    /// Set the camera switch position at start-up.
    #[must_use]
    pub fn with_camera(mut self, on: bool) -> Self {
        self.camera_on = on;
        self
    }

    /// Reject settings the timers cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detection_ticks == 0 {
            return Err(ConfigError::EmptyDetectionWindow);
        }
        if self.countdown_tick == Duration::from_ticks(0) {
            return Err(ConfigError::ZeroPeriod("countdown"));
        }
        if self.detection_tick == Duration::from_ticks(0) {
            return Err(ConfigError::ZeroPeriod("detection"));
        }
        Ok(())
    }
}
