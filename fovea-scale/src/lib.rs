// SPDX-License-Identifier: MIT
//! # fovea-scale: Panel Geometry and Resizing for Foveated Panoramas
//!
//! This crate owns every pixel copy and every resample performed by the
//! foveated transcoder. The transcoder itself only decides *where* to cut;
//! the functions here do the cutting, stacking and scaling.
//!
//! ## Key Components
//!
//! - [`frame`]: the owned 4-channel, 8-bit pixel buffer shared by all stages
//! - [`presets`]: sizes, shrink-size computation and resample filter choice
//! - [`tiles`]: column/row crops and concatenation
//! - [`cpu`]: exact-size resizing built on fast_image_resize
//!
//! ## Pixel Format
//!
//! Every buffer is tightly packed, row-major, 4 bytes per pixel. The channel
//! order is opaque: resizes run with alpha handling disabled, so BGRA and
//! RGBA input behave identically.
//!
//! ## Usage Example
//!
//! ```rust
//! use fovea_scale::{cpu::resize_exact, frame::Frame, presets::{shrink_size, ResampleFilter, Size}};
//!
//! let strip = Frame::filled(Size { w: 500, h: 1800 }, [10, 20, 30, 255]);
//! let small = shrink_size(strip.size(), 5);
//!
//! let mut resizer = fast_image_resize::Resizer::new();
//! let blurred = resize_exact(&mut resizer, &strip, small, ResampleFilter::Bilinear)?;
//! assert_eq!(blurred.size(), Size { w: 100, h: 360 });
//! # Ok::<(), fovea_scale::cpu::ScaleError>(())
//! ```

pub mod cpu;
pub mod frame;
pub mod presets;
pub mod tiles;

pub use cpu::ScaleError;
pub use frame::Frame;
pub use presets::{ResampleFilter, Size};
