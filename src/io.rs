//! Image file I/O.
//!
//! Files are decoded to 8-bit RGBA so every frame has four channels. Saving
//! picks the encoder from the path extension.

use std::path::Path;

use fovea_scale::Frame;
use image::RgbaImage;

use crate::error::{FoveaError, FoveaResult};

/// Load a PNG, JPEG or any other format `image` can decode.
pub fn load_frame(path: impl AsRef<Path>) -> FoveaResult<Frame> {
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|e| FoveaError::from(e).with_context(path.display().to_string()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    Ok(Frame::from_raw(w, h, img.into_raw())?)
}

/// Write `frame` to `path`.
pub fn save_frame(frame: &Frame, path: impl AsRef<Path>) -> FoveaResult<()> {
    let path = path.as_ref();
    let img = RgbaImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
        .ok_or_else(|| {
            FoveaError::processing("save frame", "pixel buffer does not match dimensions")
        })?;
    img.save(path)
        .map_err(|e| FoveaError::from(e).with_context(path.display().to_string()))
}
