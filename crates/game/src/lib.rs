//! Colour Recall game engine: session state machine, sequence generator,
//! playback scheduler and camera colour classifier.
//!
//! This crate is `no_std` and allocation-free; it only uses `core`,
//! `heapless` and embassy time values. Devices come in through the
//! [`platform`] traits.
//!
//! # Driving a session
//!
//! ```no_run
//! use embassy_time::Instant;
//! use game::{GameConfig, Session};
//! use platform::SilentPrompts;
//! # fn demo<C: platform::FrameSource, R: rand::RngCore>(camera: C, rng: R) -> Result<(), game::ConfigError> {
//! let mut session = Session::new(GameConfig::default(), camera, SilentPrompts, rng)?;
//! session.start_game(Instant::now()).ok();
//! while let Some(deadline) = session.next_deadline() {
//!     // sleep until `deadline`, then:
//!     session.tick(deadline);
//! #   break;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`runner::run`] does the waiting on an embassy executor (or tokio, via the
//! embassy-time `std` driver).

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod classifier;
pub mod config;
pub mod countdown;
pub mod detection;
pub mod difficulty;
pub mod error;
pub mod mode;
pub mod palette;
pub mod playback;
pub mod prompt;
pub mod runner;
pub mod sequence;
pub mod session;
pub mod snapshot;
pub mod state;
mod timer;

pub use classifier::classify;
pub use config::{DetectionStart, GameConfig, ResultPolicy};
pub use difficulty::{effective_delay, Difficulty};
pub use error::{ConfigError, GameError};
pub use mode::Mode;
pub use palette::{Color, Verdict, PALETTE};
pub use prompt::Prompt;
pub use runner::Action;
pub use sequence::{generate, Sequence};
pub use session::Session;
pub use snapshot::{Display, Progress, Snapshot};
pub use state::{Outcome, Phase, SessionState};
