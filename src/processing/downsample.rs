//! Peripheral strip shrinking and restoring.
//!
//! Resizing is not invertible on its own: shrinking 503 columns by 5 gives
//! 100, and 100 × 5 is 500. The pre-shrink size therefore travels in the
//! record and [`restore`] scales back to that exact size.

use fast_image_resize::Resizer;
use fovea_scale::cpu::resize_exact;
use fovea_scale::presets::shrink_size;
use fovea_scale::{Frame, ResampleFilter, Size};

use crate::error::FoveaResult;

/// A strip after shrinking, with the size it had before.
#[derive(Debug, Clone)]
pub struct Shrunk {
    pub panel: Frame,
    pub orig: Size,
}

/// Shrink `strip` by `factor` on both axes.
pub fn shrink(
    resizer: &mut Resizer,
    strip: &Frame,
    factor: u32,
    filter: ResampleFilter,
) -> FoveaResult<Shrunk> {
    let orig = strip.size();
    let panel = resize_exact(resizer, strip, shrink_size(orig, factor), filter)?;
    Ok(Shrunk { panel, orig })
}

/// Scale a shrunk strip back up to `orig`.
pub fn restore(
    resizer: &mut Resizer,
    panel: &Frame,
    orig: Size,
    filter: ResampleFilter,
) -> FoveaResult<Frame> {
    let restored = resize_exact(resizer, panel, orig, filter)?;
    crate::ensures!(restored.size() == orig, "restored {} instead of {}", restored.size(), orig);
    Ok(restored)
}
