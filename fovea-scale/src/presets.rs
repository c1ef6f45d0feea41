// SPDX-License-Identifier: MIT
//! # Sizes, Shrink Plans and Resample Filters
//!
//! The foveated codec shrinks every peripheral strip by the same linear
//! factor on both axes and later scales it back to the size it had before
//! shrinking. This module computes the shrunk size and names the filters the
//! resizer may use.
//!
//! - Integer division floors the shrunk size
//! - Each component is clamped to at least 1px so a thin strip never
//!   collapses into an empty buffer

use serde::{Deserialize, Serialize};

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Number of pixels covered by this size.
    pub fn area(self) -> usize {
        self.w as usize * self.h as usize
    }

    /// True when either side is zero.
    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Size of a strip after shrinking by `factor` on both axes.
///
/// `factor` of 0 is treated as 1; callers validate configuration before
/// getting here.
pub fn shrink_size(orig: Size, factor: u32) -> Size {
    let factor = factor.max(1);
    Size {
        w: (orig.w / factor).max(1),
        h: (orig.h / factor).max(1),
    }
}

/// Resampling filter used when shrinking and restoring peripheral strips.
///
/// Bilinear is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    /// Nearest-neighbour sampling; blocky but the cheapest option
    Nearest,
    /// Bilinear convolution
    #[default]
    Bilinear,
    /// Catmull-Rom cubic convolution
    CatmullRom,
    /// Lanczos3 convolution; sharpest, slowest
    Lanczos3,
}

impl ResampleFilter {
    /// Map to the fast_image_resize algorithm.
    pub fn to_alg(self) -> fast_image_resize::ResizeAlg {
        use fast_image_resize::{FilterType, ResizeAlg};
        match self {
            ResampleFilter::Nearest => ResizeAlg::Nearest,
            ResampleFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResampleFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResampleFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_floors_each_axis() {
        let s = shrink_size(Size::new(500, 1800), 5);
        assert_eq!(s, Size::new(100, 360));
        let s = shrink_size(Size::new(503, 1804), 5);
        assert_eq!(s, Size::new(100, 360));
    }

    #[test]
    fn shrink_never_reaches_zero() {
        assert_eq!(shrink_size(Size::new(3, 2), 5), Size::new(1, 1));
        assert_eq!(shrink_size(Size::new(40, 30), 0), Size::new(40, 30));
    }
}
