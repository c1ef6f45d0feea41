//! Common test utilities and helpers for the fovea integration tests
//!
//! Synthetic panoramas whose pixels encode their own source column, so a
//! test can tell exactly where a decoded pixel came from.

#![allow(dead_code)]

/// Synthetic frame generators
pub mod test_frames {
    use fovea::{Frame, Size};

    /// The 3600x1800 frame used by the full-size scenario tests.
    pub const PANORAMA: Size = Size::new(3600, 1800);

    /// Each pixel stores its column in the first two channels (little
    /// endian) and `y % 256` in the third.
    pub fn column_coded(size: Size) -> Frame {
        Frame::from_fn(size, |x, y| {
            let [lo, hi, ..] = x.to_le_bytes();
            [lo, hi, (y % 256) as u8, 255]
        })
    }

    /// Source column stored in a [`column_coded`] pixel.
    pub fn source_col(px: [u8; 4]) -> u32 {
        u32::from(px[0]) | (u32::from(px[1]) << 8)
    }

    /// Smooth gradient, friendlier to resampling filters.
    pub fn gradient(size: Size) -> Frame {
        Frame::from_fn(size, |x, y| {
            [
                (x * 255 / size.w.max(1)) as u8,
                (y * 255 / size.h.max(1)) as u8,
                96,
                255,
            ]
        })
    }
}

/// Assertion helpers
pub mod assertions {
    use fovea::{Frame, OptimizedImage};

    pub const PAD: [u8; 4] = [0, 0, 0, 255];

    /// Assert the decoded frame carries the focused patch verbatim at
    /// `origin` (source coordinates of the patch's top-left pixel).
    pub fn assert_focus_bit_identical(
        source: &Frame,
        decoded: &Frame,
        record: &OptimizedImage,
        origin: (u32, u32),
    ) {
        let patch = record.focused();
        let (ox, oy) = origin;
        for y in 0..patch.height() {
            for x in 0..patch.width() {
                let sx = (ox + x) % source.width();
                assert_eq!(
                    decoded.pixel(sx, oy + y),
                    source.pixel(sx, oy + y),
                    "focus pixel ({sx}, {}) changed",
                    oy + y
                );
            }
        }
    }

    /// Source column where the focused patch starts.
    pub fn focus_origin_col(record: &OptimizedImage) -> u32 {
        (record.left_buffer() + record.orig_h_size().w) % record.full_size().w
    }

    /// Source row where the focused patch starts.
    pub fn focus_origin_row(record: &OptimizedImage) -> u32 {
        record.orig_v_size().h
    }
}
