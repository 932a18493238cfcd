//! Player-facing cues: spoken prompts and on-screen notices share one text table.

/// A short cue the session emits at a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prompt {
    /// Countdown digit
    Countdown(u8),
    /// End of countdown
    Go,
    /// Playback finished, player should get cards ready
    ShowCards,
    /// Confirm pressed without a usable verdict
    NoColorDetected,
    /// Round won
    LevelComplete,
    /// Round lost
    WrongSequence,
    /// Camera could not be started
    CameraUnavailable,
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Prompt {
    /// Text to speak or show.
    pub fn text(self) -> &'static str {
        match self {
            Self::Countdown(n) => DIGITS.get(usize::from(n)).copied().unwrap_or(""),
            Self::Go => "GO",
            Self::ShowCards => "Show your cards",
            Self::NoColorDetected => "No color detected. Try again.",
            Self::LevelComplete => "Level Complete!",
            Self::WrongSequence => "Wrong sequence!",
            Self::CameraUnavailable => "Camera unavailable",
        }
    }
}
