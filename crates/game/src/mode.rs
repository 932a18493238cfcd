//! Game modes.

/// Selects sequence length and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Short sequences, faster flashes
    Speed,
    /// Five-token sequences at normal pace
    Length,
    /// Short sequences at normal pace
    #[default]
    Mix,
}

impl Mode {
    /// Number of tokens in a target sequence for this mode.
    pub const fn sequence_len(self) -> usize {
        match self {
            Self::Length => 5,
            Self::Speed | Self::Mix => 3,
        }
    }

    /// Menu label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Length => "length",
            Self::Mix => "mix",
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Mode;

    #[test]
    fn test_default_mode_is_mix() {
        assert_eq!(Mode::default(), Mode::Mix);
    }

    #[test]
    fn test_only_length_mode_is_long() {
        assert_eq!(Mode::Length.sequence_len(), 5);
        assert_eq!(Mode::Speed.sequence_len(), 3);
        assert_eq!(Mode::Mix.sequence_len(), 3);
    }
}
