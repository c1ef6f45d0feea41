//! Focus splitting: one horizontal cut, then one vertical cut.
//!
//! The horizontal cut keeps a band of `h_focus_angle` degrees in the middle
//! of the viewport. Left and right strips always come out the same width;
//! when the crop width is odd the band takes the extra column.
//!
//! The vertical cut works inside that band only. Elevation does not wrap, so
//! a patch centred near a pole can poke outside the frame. [`PolePolicy`]
//! decides whether to slide it back in or refuse the frame.

use fovea_scale::tiles::{crop_cols, crop_rows};
use fovea_scale::Frame;
use tracing::debug;

use crate::config::PolePolicy;
use crate::error::{FoveaError, FoveaResult};

/// Output of the horizontal cut.
#[derive(Debug, Clone)]
pub struct HorizontalSplit {
    pub left: Frame,
    pub band: Frame,
    pub right: Frame,
}

/// Output of the vertical cut.
#[derive(Debug, Clone)]
pub struct VerticalSplit {
    pub top: Frame,
    pub focused: Frame,
    pub bottom: Frame,
}

/// Column range `[left, right)` of the focus band inside a crop of
/// `crop_width` columns.
pub fn band_columns(crop_width: u32, focus_width: u32) -> FoveaResult<(u32, u32)> {
    let left = (crop_width / 2).saturating_sub(focus_width / 2);
    let right = crop_width - left;
    if left == 0 || right <= left {
        return Err(FoveaError::validation(
            "frame width",
            "room for a focus band with a strip on each side",
            format!("crop of {crop_width}px with {focus_width}px band"),
        )
        .with_recovery_suggestion("use a wider frame or a narrower h_focus_angle"));
    }
    Ok((left, right))
}

/// Row range `[top, bottom)` of the focus patch inside a band of `height`
/// rows, centred on `center_row`.
pub fn patch_rows(
    height: u32,
    center_row: i64,
    focus_height: u32,
    policy: PolePolicy,
) -> FoveaResult<(u32, u32)> {
    let half = i64::from(focus_height / 2);
    let span = 2 * half;
    let height = i64::from(height);
    // one row must survive above and below the patch
    if span == 0 || span > height - 2 {
        return Err(FoveaError::validation(
            "frame height",
            "room for a focus patch with a strip above and below",
            format!("{height} rows with {focus_height}px patch"),
        )
        .with_recovery_suggestion("use a taller frame or a smaller v_focus_angle"));
    }

    let top = center_row - half;
    let bottom = center_row + half;
    let inside = top >= 1 && bottom <= height - 1;
    let top = match (inside, policy) {
        (true, _) => top,
        (false, PolePolicy::Clamp) => {
            let clamped = top.clamp(1, height - 1 - span);
            debug!(requested = top, clamped, "focus patch moved away from pole");
            clamped
        }
        (false, PolePolicy::Reject) => {
            return Err(FoveaError::validation(
                "elevation",
                format!("focus rows within 1..{}", height - 1),
                format!("rows {top}..{bottom}"),
            )
            .with_recovery_suggestion("look further from the poles or use the clamp pole policy"));
        }
    };

    Ok((top as u32, (top + span) as u32))
}

/// Cut the crop into left strip, focus band and right strip.
pub fn split_horizontal(crop: &Frame, focus_width: u32) -> FoveaResult<HorizontalSplit> {
    let (left_col, right_col) = band_columns(crop.width(), focus_width)?;
    crate::invariant!(
        crop.width() - right_col == left_col,
        "left and right strips differ"
    );
    Ok(HorizontalSplit {
        left: crop_cols(crop, 0, left_col)?,
        band: crop_cols(crop, left_col, right_col)?,
        right: crop_cols(crop, right_col, crop.width())?,
    })
}

/// Cut the focus band into top strip, focused patch and bottom strip.
pub fn split_vertical(
    band: &Frame,
    center_row: i64,
    focus_height: u32,
    policy: PolePolicy,
) -> FoveaResult<VerticalSplit> {
    let (top_row, bottom_row) = patch_rows(band.height(), center_row, focus_height, policy)?;
    Ok(VerticalSplit {
        top: crop_rows(band, 0, top_row)?,
        focused: crop_rows(band, top_row, bottom_row)?,
        bottom: crop_rows(band, bottom_row, band.height())?,
    })
}
