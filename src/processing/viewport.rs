//! Viewport extraction around the viewing azimuth.
//!
//! The crop is exactly `crop_angle` degrees wide, centred on the azimuth
//! (odd widths put the extra degree on the right). When the
//! window straddles the 0°/360° seam it is assembled from the frame's tail
//! followed by its head, so the crop reads left to right exactly as the
//! viewer sees it.

use fovea_scale::tiles::{crop_cols, hconcat};
use fovea_scale::Frame;

use crate::core::{constrain_angle, AngleMapper};
use crate::error::FoveaResult;

/// Column bounds of the viewport in source-frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First column of the crop (inclusive).
    pub left_col: u32,
    /// Column where the crop ends (exclusive). Smaller than or equal to
    /// `left_col` when the crop wraps.
    pub right_col: u32,
    /// Source frame width.
    pub frame_width: u32,
}

impl Viewport {
    /// True when the window crosses the seam.
    pub fn wraps(&self) -> bool {
        self.left_col >= self.right_col
    }

    /// Crop width in pixels.
    pub fn width(&self) -> u32 {
        if self.wraps() {
            self.frame_width - self.left_col + self.right_col
        } else {
            self.right_col - self.left_col
        }
    }
}

/// Compute the viewport columns for `azimuth` and `crop_angle` degrees.
pub fn locate(mapper: &AngleMapper, azimuth: i32, crop_angle: u32) -> Viewport {
    let half = (crop_angle / 2) as i32;
    let azimuth = constrain_angle(azimuth);
    let left_angle = constrain_angle(azimuth - half);
    // measured from the left edge so odd crops keep every degree
    let right_angle = constrain_angle(left_angle + crop_angle as i32);

    let width = mapper.frame().w;
    let left_col = mapper.column(left_angle);
    let right_col = mapper.column(right_angle);
    crate::invariant!(left_col < width, "left column {} outside width {}", left_col, width);
    crate::invariant!(right_col < width, "right column {} outside width {}", right_col, width);

    Viewport {
        left_col,
        right_col,
        frame_width: width,
    }
}

/// Copy the viewport out of `frame`.
pub fn extract(frame: &Frame, viewport: &Viewport) -> FoveaResult<Frame> {
    crate::requires!(
        frame.width() == viewport.frame_width,
        "viewport computed for width {} applied to width {}",
        viewport.frame_width,
        frame.width()
    );

    if !viewport.wraps() {
        return Ok(crop_cols(frame, viewport.left_col, viewport.right_col)?);
    }

    let tail = crop_cols(frame, viewport.left_col, frame.width())?;
    let head = crop_cols(frame, 0, viewport.right_col)?;
    Ok(hconcat(&[&tail, &head])?)
}
