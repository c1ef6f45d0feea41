// SPDX-License-Identifier: MIT
//! # Panel Cutting and Stacking
//!
//! Crops rectangular regions out of a [`Frame`] and stitches panels back
//! together side by side or top to bottom. The foveated codec is built from
//! these two moves: encode cuts a viewport into five panels, decode stacks
//! them back and pads the result out to the full panorama width.
//!
//! Zero-width or zero-height parts are accepted by the concatenators so the
//! caller does not need to special-case an empty seam half or an empty
//! padding gap.

use crate::cpu::ScaleError;
use crate::frame::{Frame, CHANNELS};
use crate::presets::Size;

/// Rectangle definition in source pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn size(&self) -> Size {
        Size {
            w: self.w,
            h: self.h,
        }
    }
}

/// Copy `roi` out of `src` into a tightly packed frame.
pub fn crop(src: &Frame, roi: Rect) -> Result<Frame, ScaleError> {
    let fits_w = roi.x.checked_add(roi.w).is_some_and(|r| r <= src.width());
    let fits_h = roi.y.checked_add(roi.h).is_some_and(|b| b <= src.height());
    if !fits_w || !fits_h {
        return Err(ScaleError::OutOfBounds {
            roi: (roi.x, roi.y, roi.w, roi.h),
            frame: src.size(),
        });
    }

    let row_bytes = roi.w as usize * CHANNELS;
    let mut buf = Vec::with_capacity(row_bytes * roi.h as usize);
    for r in 0..roi.h {
        let row = src.row(roi.y + r);
        let off = roi.x as usize * CHANNELS;
        buf.extend_from_slice(&row[off..off + row_bytes]);
    }
    Frame::from_raw(roi.w, roi.h, buf)
}

/// Columns `[start, end)` over the full height.
pub fn crop_cols(src: &Frame, start: u32, end: u32) -> Result<Frame, ScaleError> {
    crop(
        src,
        Rect {
            x: start,
            y: 0,
            w: end.saturating_sub(start),
            h: src.height(),
        },
    )
}

/// Rows `[start, end)` over the full width.
pub fn crop_rows(src: &Frame, start: u32, end: u32) -> Result<Frame, ScaleError> {
    crop(
        src,
        Rect {
            x: 0,
            y: start,
            w: src.width(),
            h: end.saturating_sub(start),
        },
    )
}

/// Place `parts` left to right. Every part must share the same height.
pub fn hconcat(parts: &[&Frame]) -> Result<Frame, ScaleError> {
    let Some(first) = parts.first() else {
        return Err(ScaleError::NothingToJoin);
    };
    let height = first.height();
    if let Some(bad) = parts.iter().find(|p| p.height() != height) {
        return Err(ScaleError::ShapeMismatch {
            axis: "height",
            expected: height,
            actual: bad.height(),
        });
    }

    let width: u32 = parts.iter().map(|p| p.width()).sum();
    let mut buf = Vec::with_capacity(width as usize * height as usize * CHANNELS);
    for y in 0..height {
        for p in parts.iter().filter(|p| p.width() > 0) {
            buf.extend_from_slice(p.row(y));
        }
    }
    Frame::from_raw(width, height, buf)
}

/// Place `parts` top to bottom. Every part must share the same width.
pub fn vconcat(parts: &[&Frame]) -> Result<Frame, ScaleError> {
    let Some(first) = parts.first() else {
        return Err(ScaleError::NothingToJoin);
    };
    let width = first.width();
    if let Some(bad) = parts.iter().find(|p| p.width() != width) {
        return Err(ScaleError::ShapeMismatch {
            axis: "width",
            expected: width,
            actual: bad.width(),
        });
    }

    let height: u32 = parts.iter().map(|p| p.height()).sum();
    let mut buf = Vec::with_capacity(width as usize * height as usize * CHANNELS);
    for p in parts {
        buf.extend_from_slice(p.as_bytes());
    }
    Frame::from_raw(width, height, buf)
}
