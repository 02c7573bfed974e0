use alloc::vec::Vec;

use crate::error::QoiError;

/// Color space tag carried by a canonical buffer.
///
/// Tagging only: nothing in this crate converts between spaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// sRGB color channels.
    #[default]
    Srgb,
    /// All channels linear.
    Linear,
    /// sRGB color channels with linear alpha.
    SrgbLinearAlpha,
}

/// Channel count of a canonical buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channels {
    /// Opaque R, G, B.
    Rgb = 3,
    /// R, G, B, A.
    Rgba = 4,
}

impl Channels {
    /// Map a band count to a canonical channel count.
    ///
    /// Anything other than 3 or 4 is [`QoiError::UnsupportedBandCount`].
    pub fn from_count(count: usize) -> Result<Self, QoiError> {
        match count {
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            n => Err(QoiError::UnsupportedBandCount(n)),
        }
    }

    pub(crate) fn with_alpha(alpha: bool) -> Self {
        if alpha { Self::Rgba } else { Self::Rgb }
    }

    /// Bytes per pixel.
    #[inline]
    pub fn count(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }
}

/// Band layout of a prospective destination: bits per band, one entry per band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageType {
    bits_per_band: Vec<u32>,
}

impl ImageType {
    pub fn new(bits_per_band: &[u32]) -> Self {
        Self {
            bits_per_band: bits_per_band.to_vec(),
        }
    }

    /// `bands` bands of `bits` bits each.
    pub fn uniform(bands: usize, bits: u32) -> Self {
        Self {
            bits_per_band: alloc::vec![bits; bands],
        }
    }

    /// Describe an existing raster.
    pub fn of<R: crate::Raster + ?Sized>(raster: &R) -> Self {
        Self {
            bits_per_band: (0..raster.num_bands())
                .map(|b| raster.bits_per_band(b))
                .collect(),
        }
    }

    pub fn num_bands(&self) -> usize {
        self.bits_per_band.len()
    }

    pub fn bits_per_band(&self) -> &[u32] {
        &self.bits_per_band
    }
}

/// QOI stream magic.
pub const MAGIC: [u8; 4] = *b"qoif";

/// Whether `data` starts with the QOI magic.
pub fn can_decode(data: &[u8]) -> bool {
    data.starts_with(&MAGIC)
}

/// Whether a pixel layout can be encoded: 3 or 4 bands, exactly 8 bits each.
pub fn can_encode(image_type: &ImageType) -> bool {
    let bands = image_type.num_bands();
    (bands == 3 || bands == 4) && image_type.bits_per_band.iter().all(|&b| b == 8)
}
