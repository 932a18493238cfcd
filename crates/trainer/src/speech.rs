//! Prompt sink that "speaks" into the log.

use platform::{PromptError, PromptSink};

/// Logs every prompt under the `speech` target.
#[derive(Debug, Default)]
pub struct LoggedSpeech {
    spoken: usize,
}

impl LoggedSpeech {
    pub fn spoken(&self) -> usize {
        self.spoken
    }
}

impl PromptSink for LoggedSpeech {
    fn say(&mut self, text: &str) -> Result<(), PromptError> {
        self.spoken = self.spoken.saturating_add(1);
        tracing::info!(target: "speech", "🔊 {text}");
        Ok(())
    }
}
