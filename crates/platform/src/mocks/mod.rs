//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use std::string::String;
use std::vec::Vec;

use crate::camera::BYTES_PER_PIXEL;
use crate::config::{FRAME_HEIGHT, FRAME_WIDTH};
use crate::*;

/// Mock camera with a test-controlled snapshot buffer
pub struct MockCamera {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    streaming: bool,
    frame_ready: bool,
    acquire_error: Option<CaptureError>,
    acquire_count: usize,
    release_count: usize,
    capture_count: usize,
    last_facing: Option<Facing>,
}

impl MockCamera {
    /// Create a mock camera at the full snapshot resolution, showing black.
    pub fn new() -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self::with_size(FRAME_WIDTH as u32, FRAME_HEIGHT as u32)
    }

    /// Create a mock camera with a custom resolution.
    pub fn with_size(width: u32, height: u32) -> Self {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(BYTES_PER_PIXEL);
        Self {
            width,
            height,
            pixels: std::vec![0; len],
            streaming: false,
            frame_ready: true,
            acquire_error: None,
            acquire_count: 0,
            release_count: 0,
            capture_count: 0,
            last_facing: None,
        }
    }

    /// Fill every pixel with one opaque colour.
    pub fn fill(&mut self, rgb: [u8; 3]) {
        let [r, g, b] = rgb;
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&[r, g, b, 255]);
        }
        self.frame_ready = true;
    }

    /// Detach the snapshot surface: captures fail with `NoFrame`.
    pub fn drop_frame(&mut self) {
        self.frame_ready = false;
    }

    /// Make the next acquisitions fail with `err` (`None` to succeed again).
    pub fn fail_acquire(&mut self, err: Option<CaptureError>) {
        self.acquire_error = err;
    }

    /// Number of acquire attempts
    pub fn acquire_count(&self) -> usize {
        self.acquire_count
    }

    /// Number of releases of a live stream
    pub fn release_count(&self) -> usize {
        self.release_count
    }

    /// Number of capture attempts
    pub fn capture_count(&self) -> usize {
        self.capture_count
    }

    /// Facing hint of the most recent acquire attempt
    pub fn last_facing(&self) -> Option<Facing> {
        self.last_facing
    }
}

impl Default for MockCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for MockCamera {
    fn acquire(&mut self, facing: Facing) -> Result<(), CaptureError> {
        self.acquire_count += 1;
        self.last_facing = Some(facing);
        if let Some(err) = self.acquire_error {
            return Err(err);
        }
        self.streaming = true;
        Ok(())
    }

    fn release(&mut self) {
        if self.streaming {
            self.streaming = false;
            self.release_count += 1;
        }
    }

    fn is_streaming(&self) -> bool {
        self.streaming
    }

    fn capture(&mut self) -> Result<Frame<'_>, CaptureError> {
        self.capture_count += 1;
        if !self.streaming || !self.frame_ready {
            return Err(CaptureError::NoFrame);
        }
        Frame::new(self.width, self.height, &self.pixels)
    }
}

/// Mock prompt sink recording every utterance
#[derive(Default)]
pub struct MockPrompts {
    spoken: Vec<String>,
    failing: bool,
}

impl MockPrompts {
    /// Create new mock prompt sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `say` fail (the text is still recorded).
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Everything said so far, oldest first
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }
}

impl PromptSink for MockPrompts {
    fn say(&mut self, text: &str) -> Result<(), PromptError> {
        self.spoken.push(String::from(text));
        if self.failing {
            Err(PromptError::Rejected)
        } else {
            Ok(())
        }
    }
}
