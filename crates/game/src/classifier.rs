//! Frame → colour verdict.
//!
//! Pixels whose brightness `(R + G + B) / 3` falls outside
//! [`MIN_BRIGHTNESS`]`..=`[`MAX_BRIGHTNESS`] are discarded (dark borders,
//! shadows, blown-out highlights). The surviving pixels are averaged per
//! channel and the dominant channel wins.
//!
//! # Blue is the fallback branch
//!
//! Red wins only when its average strictly exceeds both others, green
//! likewise. *Everything else* resolves to blue: a genuinely blue-dominant
//! frame, but also any tie (grey, or red == green > blue). This asymmetry
//! is observable behaviour that players' cards and lighting have been tuned
//! against. Do not turn it into a three-way max with tie-breaking.
//!
//! All comparisons are done on integer channel sums, which order exactly
//! like the averages because every channel shares the same pixel count.

use platform::Frame;
use thiserror_no_std::Error;

use crate::palette::{Color, Verdict};

/// Darkest accepted pixel brightness (inclusive).
pub const MIN_BRIGHTNESS: u32 = 50;

/// Brightest accepted pixel brightness (inclusive).
pub const MAX_BRIGHTNESS: u32 = 240;

// Brightness is compared as a channel sum: sum / 3 < 50  <=>  sum < 150.
const MIN_SUM: u32 = MIN_BRIGHTNESS * 3;
const MAX_SUM: u32 = MAX_BRIGHTNESS * 3;

/// Why a frame produced no sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClassifyError {
    /// Every pixel fell outside the brightness band (or the frame was empty)
    #[error("every pixel is outside the brightness band")]
    AllPixelsRejected,
}

/// Channel totals over the pixels that passed the brightness filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    sums: [u64; 3],
    count: u64,
}

impl Sample {
    /// Number of pixels that survived the filter (always at least one).
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Per-channel averages `(r, g, b)`.
    #[allow(clippy::cast_precision_loss)]
    pub fn averages(&self) -> (f32, f32, f32) {
        let [r, g, b] = self.sums;
        let n = self.count.max(1) as f32;
        (r as f32 / n, g as f32 / n, b as f32 / n)
    }

    /// Dominant colour of this sample, blue on ties.
    pub fn color(&self) -> Color {
        let [r, g, b] = self.sums;
        if r > g && r > b {
            Color::Red
        } else if g > r && g > b {
            Color::Green
        } else {
            Color::Blue
        }
    }
}

/// Average the in-band pixels of `frame`.
///
/// # Errors
///
/// Returns [`ClassifyError::AllPixelsRejected`] when no pixel survives.
pub fn sample(frame: &Frame<'_>) -> Result<Sample, ClassifyError> {
    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for [r, g, b, _alpha] in frame.pixels() {
        let brightness_sum = u32::from(r)
            .saturating_add(u32::from(g))
            .saturating_add(u32::from(b));
        if !(MIN_SUM..=MAX_SUM).contains(&brightness_sum) {
            continue;
        }
        let [sr, sg, sb] = &mut sums;
        *sr = sr.saturating_add(u64::from(r));
        *sg = sg.saturating_add(u64::from(g));
        *sb = sb.saturating_add(u64::from(b));
        count = count.saturating_add(1);
    }
    if count == 0 {
        return Err(ClassifyError::AllPixelsRejected);
    }
    Ok(Sample { sums, count })
}

/// Classify one frame. Pure and deterministic.
pub fn classify(frame: &Frame<'_>) -> Verdict {
    match sample(frame) {
        Ok(s) => Verdict::Color(s.color()),
        Err(ClassifyError::AllPixelsRejected) => Verdict::Unknown,
    }
}
