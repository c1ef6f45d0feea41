//! Angle normalization and equirectangular angle↔pixel mapping.
//!
//! Azimuth spans 360° across the frame width and wraps at the seam.
//! Elevation spans 180° down the frame height and does not wrap, which is
//! why [`AngleMapper::row`] may return values outside the frame.

use fovea_scale::Size;

/// Normalize an integer angle into `[0, 360)`.
pub fn constrain_angle(x: i32) -> i32 {
    let x = x.rem_euclid(360);
    crate::ensures!((0..360).contains(&x), "constrained angle {} outside [0, 360)", x);
    x
}

/// Normalize a finite real angle into `[0, 360)`.
///
/// # Panics
/// On NaN or infinite input.
pub fn constrain_angle_f64(x: f64) -> f64 {
    crate::requires!(x.is_finite(), "angle must be finite, got {}", x);
    let mut x = x % 360.0;
    if x < 0.0 {
        x += 360.0;
    }
    // -1e-20 % 360 + 360 rounds to exactly 360
    if x >= 360.0 {
        x = 0.0;
    }
    crate::ensures!((0.0..360.0).contains(&x), "constrained angle {} outside [0, 360)", x);
    x
}

/// Degree-to-pixel scale factors for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleMapper {
    frame: Size,
    angle_to_width: f64,
    angle_to_height: f64,
}

impl AngleMapper {
    pub fn new(frame: Size) -> Self {
        Self {
            frame,
            angle_to_width: f64::from(frame.w) / 360.0,
            angle_to_height: f64::from(frame.h) / 180.0,
        }
    }

    pub fn frame(&self) -> Size {
        self.frame
    }

    pub fn angle_to_width(&self) -> f64 {
        self.angle_to_width
    }

    pub fn angle_to_height(&self) -> f64 {
        self.angle_to_height
    }

    /// Column of a normalized azimuth. Truncates toward zero.
    pub fn column(&self, azimuth: i32) -> u32 {
        crate::requires!(
            (0..360).contains(&azimuth),
            "azimuth {} must be normalized before mapping",
            azimuth
        );
        (f64::from(azimuth) * self.angle_to_width) as u32
    }

    /// Pixel width of an angular span.
    pub fn width_of(&self, degrees: u32) -> u32 {
        (f64::from(degrees) * self.angle_to_width) as u32
    }

    /// Row of an elevation. Not clamped: elevations outside `[0, 180]`
    /// land outside the frame.
    pub fn row(&self, elevation: i32) -> i64 {
        (f64::from(elevation) * self.angle_to_height) as i64
    }

    /// Pixel height of an angular span.
    pub fn height_of(&self, degrees: u32) -> u32 {
        (f64::from(degrees) * self.angle_to_height) as u32
    }
}
