// SPDX-License-Identifier: MIT
// Owned, tightly packed 4-channel u8 pixel buffer.

use crate::cpu::ScaleError;
use crate::presets::Size;

/// Bytes per pixel for every buffer handled by this crate.
pub const CHANNELS: usize = 4;

/// A row-major image with 4 interleaved 8-bit channels and no row padding.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Frame {
    /// Wrap an existing buffer. Fails if `data` is not exactly `w * h * 4` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ScaleError> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(ScaleError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame where every pixel is `px`.
    pub fn filled(size: Size, px: [u8; 4]) -> Self {
        let mut data = vec![0u8; size.area() * CHANNELS];
        for chunk in data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&px);
        }
        Self {
            width: size.w,
            height: size.h,
            data,
        }
    }

    /// Build a frame by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(size: Size, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(size.area() * CHANNELS);
        for y in 0..size.h {
            for x in 0..size.w {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width: size.w,
            height: size.h,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size {
            w: self.width,
            h: self.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Total byte footprint of the pixel data.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixel bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    /// Single pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = y as usize * self.stride() + x as usize * CHANNELS;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}
