// SPDX-License-Identifier: MIT
// CPU scaler built on fast_image_resize (SIMD-accelerated).
// 4x8-bit in → 4x8-bit out, exact target size, no letterboxing.

use fast_image_resize as fir;
use fir::images::{TypedImage, TypedImageRef};
use fir::pixels::U8x4;
use fir::{ResizeOptions, Resizer};

use crate::frame::{Frame, CHANNELS};
use crate::presets::{ResampleFilter, Size};

#[derive(thiserror::Error, Debug)]
pub enum ScaleError {
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },
    #[error("cannot resize {from} to {to}: empty image")]
    EmptyImage { from: Size, to: Size },
    #[error("region {roi:?} lies outside {frame} frame")]
    OutOfBounds { roi: (u32, u32, u32, u32), frame: Size },
    #[error("panel {axis} mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        axis: &'static str,
        expected: u32,
        actual: u32,
    },
    #[error("no panels to join")]
    NothingToJoin,
    #[error("fast image resize error: {0}")]
    Fir(#[from] fir::ResizeError),
    #[error("image buffer error: {0}")]
    ImageBuf(#[from] fir::ImageBufferError),
}

/// Resize `src` to exactly `out`, ignoring aspect ratio.
///
/// Same-size requests return a copy without touching the resizer, so a
/// shrink factor of 1 is lossless.
pub fn resize_exact(
    resizer: &mut Resizer,
    src: &Frame,
    out: Size,
    filter: ResampleFilter,
) -> Result<Frame, ScaleError> {
    if src.is_empty() || out.is_empty() {
        return Err(ScaleError::EmptyImage {
            from: src.size(),
            to: out,
        });
    }
    if src.size() == out {
        return Ok(src.clone());
    }

    let src_view = TypedImageRef::<U8x4>::from_buffer(src.width(), src.height(), src.as_bytes())?;

    let mut dst = vec![0u8; out.area() * CHANNELS];
    {
        let mut dst_image = TypedImage::<U8x4>::from_buffer(out.w, out.h, &mut dst)?;
        let opts = ResizeOptions::new()
            .resize_alg(filter.to_alg())
            .use_alpha(false);
        resizer.resize_typed::<U8x4>(&src_view, &mut dst_image, &opts)?;
    }

    Frame::from_raw(out.w, out.h, dst)
}
