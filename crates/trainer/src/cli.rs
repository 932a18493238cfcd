//! Command-line options.

use clap::{Parser, ValueEnum};
use embassy_time::Duration;
use game::{DetectionStart, Difficulty, GameConfig, Mode};

#[derive(Parser, Debug)]
#[command(name = "colour-recall")]
#[command(about = "Play Colour Recall rounds against a simulated camera and player", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game mode
    #[arg(long, value_enum, default_value_t = ModeArg::Mix)]
    pub mode: ModeArg,

    /// Rounds to play before exiting
    #[arg(long, default_value_t = 3)]
    pub rounds: u32,

    /// Seed for both the sequence generator and the simulated player
    #[arg(long)]
    pub seed: Option<u64>,

    /// Samples per detection window
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub window: u8,

    /// Open detection automatically this many ms after playback
    #[arg(long)]
    pub auto_detect_ms: Option<u64>,

    /// Shrink every timing so a round takes about a second
    #[arg(long)]
    pub fast: bool,

    /// Chance (percent) that the simulated player shows a wrong card
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub mistakes: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Three tokens, shorter flashes
    Speed,
    /// Five tokens
    Length,
    /// Three tokens
    Mix,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Speed => Mode::Speed,
            ModeArg::Length => Mode::Length,
            ModeArg::Mix => Mode::Mix,
        }
    }
}

impl Cli {
    /// Session configuration for these options.
    pub fn game_config(&self) -> GameConfig {
        let mut config = GameConfig::default().with_mode(self.mode.into());
        let tick = if self.fast {
            config = config
                .with_difficulty(Difficulty::new(Difficulty::FLOOR_MS))
                .with_countdown(3, Duration::from_millis(100))
                .with_symbol_gap(Duration::from_millis(50));
            Duration::from_millis(100)
        } else {
            config.detection_tick
        };
        config = config.with_detection_window(self.window, tick);
        if let Some(ms) = self.auto_detect_ms {
            config = config.with_detection_start(DetectionStart::Auto(Duration::from_millis(ms)));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_give_classic_config() {
        let cli = Cli::parse_from(["colour-recall"]);
        assert_eq!(cli.game_config(), GameConfig::default());
        assert_eq!(cli.rounds, 3);
    }

    #[test]
    fn test_fast_and_auto_detect() {
        let cli = Cli::parse_from([
            "colour-recall",
            "--fast",
            "--mode",
            "length",
            "--window",
            "3",
            "--auto-detect-ms",
            "250",
        ]);
        let config = cli.game_config();
        assert_eq!(config.mode, Mode::Length);
        assert_eq!(config.detection_ticks, 3);
        assert_eq!(config.detection_tick, Duration::from_millis(100));
        assert_eq!(
            config.detection_start,
            DetectionStart::Auto(Duration::from_millis(250))
        );
        assert_eq!(config.difficulty.get(), Difficulty::FLOOR_MS);
    }

    #[test]
    fn test_window_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["colour-recall", "--window", "0"]).is_err());
        assert!(Cli::try_parse_from(["colour-recall", "--mistakes", "101"]).is_err());
    }
}
