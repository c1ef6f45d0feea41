//! # Foveated Panorama Transcoder
//!
//! Shrinks an equirectangular 360° frame to what a viewer actually looks at:
//! a full-resolution patch around the gaze, blurred low-resolution strips
//! around it, and nothing outside the viewport. Decoding puts the pieces back
//! into a frame of the original size.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//! - `core`: angle normalization and the angle-to-pixel mapping
//! - `processing`: viewport extraction, focus splitting, downsampling and
//!   reconstruction, driven by [`Foveator`]
//! - `record`: the [`OptimizedImage`] record and its JSON interchange format
//! - `config`: the foveation policy and its validation
//! - `io`: PNG/JPEG loading and saving
//! - `logging`: tracing setup and per-stage timing
//!
//! Resizing and pixel-buffer plumbing live in the `fovea-scale` crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fovea::{FoveaConfig, Foveator};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let frame = fovea::io::load_frame("pano.png")?;
//! let foveator = Foveator::try_new(FoveaConfig::default())?;
//!
//! let record = foveator.optimize_image(&frame, 180, 90)?;
//! record.save("pano.fovea.json")?;
//!
//! let restored = foveator.extract_image(&record)?;
//! assert_eq!(restored.size(), frame.size());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod contract;
pub mod core;
pub mod error;
pub mod io;
pub mod logging;
pub mod processing;
pub mod record;

/// Re-export error types for convenience
pub use error::{ErrorSeverity, FoveaError, FoveaResult, HasRecoverySuggestion, HasSeverity};

pub use config::{FoveaConfig, PolePolicy};
pub use core::{constrain_angle, constrain_angle_f64, AngleMapper};
pub use processing::Foveator;
pub use record::OptimizedImage;

/// Re-export commonly used types from the scale crate
pub use fovea_scale::{Frame, ResampleFilter, Size};
