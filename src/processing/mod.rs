//! # Processing Module
//!
//! The encode/decode pipeline, one file per stage:
//!
//! 1. [`viewport`]: crop the angular window around the azimuth (seam aware)
//! 2. [`split`]: cut the crop into the focus patch and four strips
//! 3. [`downsample`]: shrink strips for transport, restore them for display
//! 4. [`reconstruct`]: stack the panels and re-anchor them in the full frame
//!
//! [`optimizer::Foveator`] drives the stages in order.

pub mod downsample;
pub mod optimizer;
pub mod reconstruct;
pub mod split;
pub mod viewport;

pub use optimizer::Foveator;
