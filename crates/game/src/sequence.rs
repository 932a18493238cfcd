//! Target sequence generation.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::mode::Mode;
use crate::palette::{Color, PALETTE};

/// Longest sequence any mode produces.
pub const MAX_SEQUENCE_LEN: usize = 5;

/// Bounded, allocation-free colour sequence (target or player input).
pub type Sequence = heapless::Vec<Color, MAX_SEQUENCE_LEN>;

/// Draw a new target sequence for `mode`.
///
/// Each token is drawn independently and uniformly from [`PALETTE`], with
/// replacement, so repeats such as red-red-blue are valid.
pub fn generate<R: RngCore + ?Sized>(mode: Mode, rng: &mut R) -> Sequence {
    let mut sequence = Sequence::new();
    for _ in 0..mode.sequence_len() {
        if let Some(&color) = PALETTE.choose(rng) {
            // Never full: every mode length is <= MAX_SEQUENCE_LEN.
            sequence.push(color).ok();
        }
    }
    sequence
}
