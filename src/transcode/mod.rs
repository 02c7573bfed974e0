//! Raster → canonical buffer.
//!
//! A default configuration goes through [`fast`] when the raster's storage
//! is one of the recognized layouts and through [`generic`] otherwise. Any
//! customized window goes through [`window`].

pub(crate) mod fast;
pub(crate) mod generic;
pub(crate) mod window;

use crate::error::QoiError;
use crate::image::QoiImage;
use crate::limits::Limits;
use crate::log::debug;
use crate::pixel::{Channels, ColorSpace};
use crate::raster::Raster;

/// Full-image extraction for a default configuration.
///
/// Four channels iff the raster has alpha. No progress, no cancellation.
pub(crate) fn extract_full<R: Raster + ?Sized>(
    raster: &R,
    color_space: ColorSpace,
    limits: Option<&Limits>,
) -> Result<QoiImage, QoiError> {
    let (width, height) = (raster.width(), raster.height());
    let channels = Channels::with_alpha(raster.has_alpha());
    if let Some(limits) = limits {
        limits.check_buffer(width, height, channels.count())?;
    }

    let mut image = QoiImage::zeroed(width, height, channels, color_space)?;
    let n = channels.count();
    if fast::extract(
        raster.layout(),
        width as usize,
        height as usize,
        n,
        image.pixels_mut(),
    ) {
        debug!("fast extraction of {}x{} ({} channels)", width, height, n);
    } else {
        debug!("generic extraction of {}x{} ({} channels)", width, height, n);
        generic::extract(raster, n, image.pixels_mut());
    }
    Ok(image)
}
