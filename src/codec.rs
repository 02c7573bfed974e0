//! QOI codec boundary, backed by `rapid-qoi`.
//!
//! Compression lives entirely in `rapid-qoi`; this module only maps the
//! canonical buffer's channel count and color space onto its header.

use alloc::vec::Vec;

use rapid_qoi::{Colors, Qoi};

use crate::error::QoiError;
use crate::image::QoiImage;
use crate::limits::Limits;
use crate::log::trace;
use crate::pixel::{Channels, ColorSpace};

fn colors(channels: Channels, color_space: ColorSpace) -> Colors {
    match (color_space, channels) {
        (ColorSpace::Srgb | ColorSpace::SrgbLinearAlpha, Channels::Rgb) => Colors::Srgb,
        (ColorSpace::Srgb | ColorSpace::SrgbLinearAlpha, Channels::Rgba) => Colors::SrgbLinA,
        (ColorSpace::Linear, Channels::Rgb) => Colors::Rgb,
        (ColorSpace::Linear, Channels::Rgba) => Colors::Rgba,
    }
}

fn from_colors(colors: Colors) -> (Channels, ColorSpace) {
    match colors {
        Colors::Srgb => (Channels::Rgb, ColorSpace::Srgb),
        Colors::SrgbLinA => (Channels::Rgba, ColorSpace::Srgb),
        Colors::Rgb => (Channels::Rgb, ColorSpace::Linear),
        Colors::Rgba => (Channels::Rgba, ColorSpace::Linear),
    }
}

/// Compress a canonical buffer.
pub(crate) fn encode_qoi(image: &QoiImage) -> Result<Vec<u8>, QoiError> {
    let qoi = Qoi {
        width: image.width(),
        height: image.height(),
        colors: colors(image.channels(), image.color_space()),
    };
    let out = qoi
        .encode_alloc(image.pixels())
        .map_err(|e| QoiError::Codec(alloc::format!("{e:?}")))?;
    trace!("encoded {} pixel bytes into {} bytes", image.pixels().len(), out.len());
    Ok(out)
}

/// Header fields: width, height, channels, color space.
pub(crate) fn decode_header(data: &[u8]) -> Result<(u32, u32, Channels, ColorSpace), QoiError> {
    if !crate::pixel::can_decode(data) {
        return Err(QoiError::UnrecognizedFormat);
    }
    let qoi = Qoi::decode_header(data).map_err(|e| QoiError::Codec(alloc::format!("{e:?}")))?;
    let (channels, color_space) = from_colors(qoi.colors);
    Ok((qoi.width, qoi.height, channels, color_space))
}

/// Decompress into a canonical buffer, checking limits against the header
/// before any pixel is decoded.
pub(crate) fn decode_qoi(data: &[u8], limits: Option<&Limits>) -> Result<QoiImage, QoiError> {
    let (width, height, channels, _) = decode_header(data)?;
    if let Some(limits) = limits {
        limits.check_buffer(width, height, channels.count())?;
    }
    let (qoi, pixels) =
        Qoi::decode_alloc(data).map_err(|e| QoiError::Codec(alloc::format!("{e:?}")))?;
    let (channels, color_space) = from_colors(qoi.colors);
    QoiImage::new(qoi.width, qoi.height, channels, color_space, pixels)
}
