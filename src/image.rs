use alloc::vec::Vec;

use crate::error::QoiError;
use crate::limits::buffer_len;
use crate::pixel::{Channels, ColorSpace};

/// Canonical pixel buffer exchanged with the QOI codec.
///
/// Row-major, interleaved R, G, B\[, A\], one byte per channel. The pixel
/// vector always holds exactly `width * height * channels` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QoiImage {
    width: u32,
    height: u32,
    channels: Channels,
    color_space: ColorSpace,
    pixels: Vec<u8>,
}

impl QoiImage {
    /// Wrap an existing pixel vector.
    ///
    /// Returns [`QoiError::BufferSizeMismatch`] if the length does not match
    /// the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        color_space: ColorSpace,
        pixels: Vec<u8>,
    ) -> Result<Self, QoiError> {
        let expected = buffer_len(width, height, channels.count())?;
        if pixels.len() != expected {
            return Err(QoiError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            color_space,
            pixels,
        })
    }

    /// Zero-filled buffer; callers have already checked the size.
    pub(crate) fn zeroed(
        width: u32,
        height: u32,
        channels: Channels,
        color_space: ColorSpace,
    ) -> Result<Self, QoiError> {
        let len = buffer_len(width, height, channels.count())?;
        Ok(Self {
            width,
            height,
            channels,
            color_space,
            pixels: alloc::vec![0u8; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Retag the buffer. Pixel values are left untouched.
    pub fn set_color_space(&mut self, color_space: ColorSpace) {
        self.color_space = color_space;
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable pixel access. The length cannot change.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Bytes in one row.
    pub(crate) fn row_bytes(&self) -> usize {
        self.width as usize * self.channels.count()
    }
}
