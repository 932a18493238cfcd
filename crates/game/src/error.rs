//! Errors returned by player actions and configuration checks.
//!
//! None of these is fatal: a rejected action leaves the session exactly as
//! it was, apart from the notice shown to the player.

use thiserror_no_std::Error;

use crate::state::Phase;

/// Why a player action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameError {
    /// Confirm pressed while the live verdict is `Unknown` (or absent)
    #[error("No color detected. Try again.")]
    NoColorDetected,
    /// Confirm pressed before the detection window closed
    #[error("detection window still open")]
    DetectionInProgress,
    /// Action not accepted in the current phase
    #[error("action not accepted while {0}")]
    Busy(Phase),
}

/// Invalid [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Detection window of zero ticks
    #[error("detection window must have at least one tick")]
    EmptyDetectionWindow,
    /// A tick or flash period of zero would spin the scheduler
    #[error("{0} period must be non-zero")]
    ZeroPeriod(&'static str),
}
