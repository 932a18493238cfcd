//! Hardware Abstraction Layer (HAL) for the Colour Recall trainer
//!
//! This crate provides trait-based abstractions for the devices the game
//! core talks to, enabling development and testing without a camera or a
//! speech engine.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (trainer crate / rendering shell)
//!         ↓
//! Game Engine (game crate: session, classifier, scheduler)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Device Layer (camera stream, speech synthesis)
//! ```
//!
//! # Peripherals
//! - [`FrameSource`] - Camera stream + snapshot canvas
//! - [`PromptSink`] - Spoken prompts
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{Facing, FrameSource};
//!
//! fn first_pixel<C: FrameSource>(camera: &mut C) -> Option<[u8; 4]> {
//!     camera.acquire(Facing::Environment).ok()?;
//!     let frame = camera.capture().ok()?;
//!     frame.pixels().next()
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)] // device accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod camera;
pub mod config;
pub mod mocks;
pub mod prompt;

// Re-export main high-level traits
pub use camera::{CaptureError, Facing, Frame, FrameSource, FRAME_BYTES};
pub use prompt::{PromptError, PromptSink, SilentPrompts};
