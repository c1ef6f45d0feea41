//! Reassembly of a full panorama from restored panels.
//!
//! Two stacking steps undo the focus split, then the crop is put back where
//! it came from. Crop column 0 was source column `left_buffer`, so:
//!
//! ```text
//! contained:  [ pad: left_buffer ][ crop ][ pad: rest ]
//! wrapped:    [ crop[w - lb ..] ][ pad ][ crop[.. w - lb] ]
//!               lands at col 0           lands at col lb
//! ```

use fovea_scale::tiles::{crop_cols, hconcat, vconcat};
use fovea_scale::{Frame, Size};

use crate::error::FoveaResult;

/// How a crop of a given width sits inside the full frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The crop crossed the seam. Its first `trailing` columns belong at the
    /// end of the frame, the rest at the start, with `gap` pad columns in
    /// between.
    Wrap { trailing: u32, gap: u32 },
    /// The crop lies inside the frame with padding on either side.
    Contained { left_pad: u32, right_pad: u32 },
}

/// Decide where a `crop_width`-wide crop starting at `left_buffer` goes.
pub fn placement(crop_width: u32, left_buffer: u32, full_width: u32) -> Placement {
    crate::requires!(
        left_buffer < full_width,
        "left buffer {} outside width {}",
        left_buffer,
        full_width
    );
    crate::requires!(
        crop_width <= full_width,
        "crop width {} exceeds frame width {}",
        crop_width,
        full_width
    );

    if crop_width + left_buffer >= full_width {
        let trailing = full_width - left_buffer;
        crate::invariant!(trailing <= crop_width, "trailing part wider than crop");
        Placement::Wrap {
            trailing,
            gap: full_width - crop_width,
        }
    } else {
        Placement::Contained {
            left_pad: left_buffer,
            right_pad: full_width - left_buffer - crop_width,
        }
    }
}

/// Stack `top/focused/bottom` into the middle column, then
/// `left/middle/right` into the crop.
pub fn reassemble(
    left: &Frame,
    top: &Frame,
    focused: &Frame,
    bottom: &Frame,
    right: &Frame,
) -> FoveaResult<Frame> {
    let middle = vconcat(&[top, focused, bottom])?;
    Ok(hconcat(&[left, &middle, right])?)
}

/// Put `crop` back into a `full`-sized canvas, filling uncovered columns
/// with `pad_bg`.
pub fn reanchor(crop: &Frame, left_buffer: u32, full: Size, pad_bg: [u8; 4]) -> FoveaResult<Frame> {
    crate::requires!(
        crop.height() == full.h,
        "crop height {} differs from frame height {}",
        crop.height(),
        full.h
    );
    let pad = |w: u32| Frame::filled(Size { w, h: full.h }, pad_bg);

    let out = match placement(crop.width(), left_buffer, full.w) {
        Placement::Wrap { trailing, gap } => {
            let tail = crop_cols(crop, 0, trailing)?;
            let head = crop_cols(crop, trailing, crop.width())?;
            hconcat(&[&head, &pad(gap), &tail])?
        }
        Placement::Contained {
            left_pad,
            right_pad,
        } => hconcat(&[&pad(left_pad), crop, &pad(right_pad)])?,
    };

    crate::ensures!(out.size() == full, "reconstructed {} instead of {}", out.size(), full);
    Ok(out)
}
