//! Audio prompt abstraction

/// Fire-and-forget spoken prompt output (speech synthesis or a chime).
///
/// Callers must treat every error as non-fatal.
pub trait PromptSink {
    /// Speak a short text prompt.
    fn say(&mut self, text: &str) -> Result<(), PromptError>;
}

/// Prompt output errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PromptError {
    /// No speech engine on this target
    Unsupported,
    /// The engine refused the utterance
    Rejected,
}

#[cfg(feature = "std")]
impl std::error::Error for PromptError {}

impl core::fmt::Display for PromptError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "Speech output unsupported"),
            Self::Rejected => write!(f, "Speech output rejected the prompt"),
        }
    }
}

/// Prompt sink that discards everything (targets without audio).
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPrompts;

impl PromptSink for SilentPrompts {
    fn say(&mut self, _text: &str) -> Result<(), PromptError> {
        Ok(())
    }
}
