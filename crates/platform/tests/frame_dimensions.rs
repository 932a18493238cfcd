//! Property-based tests for the frame view.
//! A frame must be accepted exactly when its byte length matches its size.

use platform::{CaptureError, Frame};

proptest::proptest! {
    /// Exact-length buffers are always accepted and report their geometry.
    #[test]
    fn frame_accepts_exact_length(w in 1u32..=32, h in 1u32..=32) {
        let bytes = vec![0u8; (w * h * 4) as usize];
        let frame = Frame::new(w, h, &bytes).unwrap();
        assert_eq!(frame.width(), w);
        assert_eq!(frame.height(), h);
        assert_eq!(frame.pixel_count(), (w * h) as usize);
        assert_eq!(frame.pixels().count(), (w * h) as usize);
    }

    /// Any other length is rejected, never truncated.
    #[test]
    fn frame_rejects_wrong_length(w in 1u32..=32, h in 1u32..=32, extra in 1usize..=7) {
        let bytes = vec![0u8; (w * h * 4) as usize + extra];
        assert_eq!(Frame::new(w, h, &bytes).err(), Some(CaptureError::BadDimensions));
    }
}

#[test]
fn empty_frame_has_no_pixels() {
    let frame = Frame::new(0, 0, &[]).unwrap();
    assert_eq!(frame.pixels().count(), 0);
}
