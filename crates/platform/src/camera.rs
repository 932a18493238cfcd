//! Video capture abstraction
//!
//! The game core never owns a camera stream directly. It asks a
//! [`FrameSource`] to draw the current frame into the source's own
//! fixed-size snapshot buffer and reads it back as a borrowed [`Frame`].

use crate::config::{FRAME_HEIGHT, FRAME_WIDTH};

/// Bytes per pixel in every frame (R, G, B, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// Size in bytes of a full-resolution RGBA frame.
pub const FRAME_BYTES: usize = FRAME_WIDTH * FRAME_HEIGHT * BYTES_PER_PIXEL;

/// Video capture device trait (camera stream + snapshot canvas)
pub trait FrameSource {
    /// Request a live stream, preferring the camera facing `facing`.
    ///
    /// On failure the device stays stopped; subsequent [`capture`] calls
    /// return [`CaptureError::NoFrame`].
    ///
    /// [`capture`]: FrameSource::capture
    fn acquire(&mut self, facing: Facing) -> Result<(), CaptureError>;

    /// Stop every track of the active stream. No-op when already stopped.
    fn release(&mut self);

    /// Returns `true` while a live stream is attached.
    fn is_streaming(&self) -> bool;

    /// Draw the current frame into the snapshot buffer and borrow it.
    fn capture(&mut self) -> Result<Frame<'_>, CaptureError>;
}

/// Camera direction hint passed to [`FrameSource::acquire`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Facing {
    /// Rear / environment-facing camera (preferred for card detection)
    Environment,
    /// Front / user-facing camera
    User,
}

/// Borrowed RGBA pixel buffer of a single captured frame.
///
/// Rows are tightly packed, four bytes per pixel. The constructor checks
/// that the byte length matches `width * height * 4`.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    width: u32,
    height: u32,
    rgba: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Wrap an RGBA byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::BadDimensions`] when the slice length does not
    /// equal `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba: &'a [u8]) -> Result<Self, CaptureError> {
        let expected = usize::try_from(width)
            .ok()
            .and_then(|w| usize::try_from(height).ok().and_then(|h| w.checked_mul(h)))
            .and_then(|px| px.checked_mul(BYTES_PER_PIXEL));
        match expected {
            Some(len) if len == rgba.len() => Ok(Self {
                width,
                height,
                rgba,
            }),
            _ => Err(CaptureError::BadDimensions),
        }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Iterate pixels as `[r, g, b, a]`.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + 'a {
        self.rgba.chunks_exact(BYTES_PER_PIXEL).map(|px| match *px {
            [r, g, b, a] => [r, g, b, a],
            // chunks_exact never yields a short chunk
            _ => [0, 0, 0, 0],
        })
    }

    /// Number of pixels in the frame.
    pub fn pixel_count(&self) -> usize {
        self.rgba.len() / BYTES_PER_PIXEL
    }
}

/// Capture errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError {
    /// Device not streaming, or the snapshot surface is not attached
    NoFrame,
    /// The user or OS refused camera access
    PermissionDenied,
    /// Another client holds the device
    Busy,
    /// Pixel buffer length does not match its declared dimensions
    BadDimensions,
}

#[cfg(feature = "std")]
impl std::error::Error for CaptureError {}

impl core::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoFrame => write!(f, "No camera frame available"),
            Self::PermissionDenied => write!(f, "Camera permission denied"),
            Self::Busy => write!(f, "Camera is busy"),
            Self::BadDimensions => write!(f, "Frame size does not match its dimensions"),
        }
    }
}
