//! Canonical buffer → raster.
//!
//! [`place`], [`place_mut`] and [`into_raster`] never copy pixel bytes: the
//! returned raster is a view over the canonical storage. Writes made through
//! a [`place_mut`] view are visible in the [`QoiImage`] once the view is
//! dropped, and writes to the image show up in any view created afterwards.
//! [`into_raster`] moves the storage; [`InterleavedRaster::into_inner`]
//! hands it back.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::QoiError;
use crate::image::QoiImage;
use crate::limits::{Limits, buffer_len};
use crate::log::{debug, trace};
use crate::params::ReadParams;
use crate::pixel::ColorSpace;
use crate::progress::{Outcome, ProgressListener};
use crate::raster::{ColorModel, DisplayColorSpace, InterleavedRaster, WritableRaster};
use crate::transcode::window::{read_regions, select_bands};

/// Display space a reconstructed raster is managed in.
pub fn display_color_space(color_space: ColorSpace) -> DisplayColorSpace {
    match color_space {
        ColorSpace::Srgb | ColorSpace::SrgbLinearAlpha => DisplayColorSpace::Srgb,
        ColorSpace::Linear => DisplayColorSpace::LinearRgb,
    }
}

/// Color model for a canonical buffer: its display space, alpha iff four
/// channels, straight alpha, 8 bits per channel.
pub fn color_model(image: &QoiImage) -> ColorModel {
    ColorModel::new(
        display_color_space(image.color_space()),
        image.channels().has_alpha(),
    )
}

/// Borrowing view over the canonical buffer.
pub fn place(image: &QoiImage) -> InterleavedRaster<&[u8]> {
    let model = color_model(image);
    InterleavedRaster::tight(
        image.pixels(),
        image.width(),
        image.height(),
        image.channels().count(),
        model,
    )
}

/// Mutable view over the canonical buffer.
pub fn place_mut(image: &mut QoiImage) -> InterleavedRaster<&mut [u8]> {
    let model = color_model(image);
    let (width, height, bands) = (image.width(), image.height(), image.channels().count());
    InterleavedRaster::tight(image.pixels_mut(), width, height, bands, model)
}

/// Owning raster that takes over the canonical storage.
pub fn into_raster(image: QoiImage) -> InterleavedRaster<Vec<u8>> {
    let model = color_model(&image);
    let (width, height, bands) = (image.width(), image.height(), image.channels().count());
    InterleavedRaster::tight(image.into_pixels(), width, height, bands, model)
}

/// Copy a window of the canonical buffer into an existing raster.
///
/// Band and format problems are reported before any pixel is written. The
/// stop token is polled once per destination row.
pub fn read_into<R: WritableRaster + ?Sized>(
    image: &QoiImage,
    params: &ReadParams,
    dest: &mut R,
    stop: &dyn Stop,
    listener: &mut dyn ProgressListener,
) -> Result<Outcome<()>, QoiError> {
    let channels = image.channels().count();
    let src_bands = select_bands(params.source_bands.as_deref(), channels)?;
    let dst_bands = select_bands(params.destination_bands.as_deref(), dest.num_bands())?;
    if let Some(dup) = dst_bands
        .iter()
        .enumerate()
        .find_map(|(i, b)| dst_bands[..i].contains(b).then_some(*b))
    {
        return Err(QoiError::InvalidParameter(alloc::format!(
            "destination band {dup} selected twice"
        )));
    }
    if src_bands.len() != dst_bands.len() {
        return Err(QoiError::BandCountMismatch {
            selected: src_bands.len(),
            destination: dst_bands.len(),
        });
    }
    if let Some(&band) = dst_bands.iter().find(|&&b| dest.bits_per_band(b) != 8) {
        return Err(QoiError::UnsupportedFormat(alloc::format!(
            "destination band {band} has {} bits, only 8 are supported",
            dest.bits_per_band(band)
        )));
    }

    let subsampling = params.subsampling;
    let regions = read_regions(
        image.width(),
        image.height(),
        params.source_region,
        &subsampling,
        params.destination_offset,
        Some((dest.width(), dest.height())),
    )?;
    debug!("windowed read: {:?}", regions);

    let pixels = image.pixels();
    let row_bytes = image.row_bytes();
    for y in 0..regions.height {
        let sy = (regions.src_y + y * subsampling.y_stride()) as usize;
        let src_row = &pixels[sy * row_bytes..(sy + 1) * row_bytes];
        for x in 0..regions.width {
            let sx = (regions.src_x + x * subsampling.x_stride()) as usize;
            let px = &src_row[sx * channels..(sx + 1) * channels];
            for (&s, &d) in src_bands.iter().zip(&dst_bands) {
                dest.set_sample(regions.dst_x + x, regions.dst_y + y, d, u32::from(px[s]));
            }
        }

        listener.image_progress(y as f32 * 100.0 / regions.height as f32);
        if let Err(reason) = stop.check() {
            trace!("read stopped after row {} of {}", y + 1, regions.height);
            listener.aborted();
            return Ok(Outcome::Aborted(reason));
        }
    }
    Ok(Outcome::Complete(()))
}

/// Allocate a raster sized to the read window and fill it.
///
/// The band count comes from `destination_type` when set (8-bit, one to
/// four bands), otherwise from the source band selection. A positive
/// destination offset leaves untouched (zero) pixels before the window.
pub fn read_raster(
    image: &QoiImage,
    params: &ReadParams,
    limits: Option<&Limits>,
    stop: &dyn Stop,
    listener: &mut dyn ProgressListener,
) -> Result<Outcome<InterleavedRaster<Vec<u8>>>, QoiError> {
    let bands = match &params.destination_type {
        Some(image_type) => {
            let n = image_type.num_bands();
            if !(1..=4).contains(&n) || image_type.bits_per_band().iter().any(|&b| b != 8) {
                return Err(QoiError::UnsupportedFormat(alloc::format!(
                    "destination bits per band {:?}",
                    image_type.bits_per_band()
                )));
            }
            n
        }
        None => match &params.source_bands {
            Some(selected) => selected.len(),
            None => image.channels().count(),
        },
    };
    if !(1..=4).contains(&bands) {
        return Err(QoiError::UnsupportedBandCount(bands));
    }

    let regions = read_regions(
        image.width(),
        image.height(),
        params.source_region,
        &params.subsampling,
        params.destination_offset,
        None,
    )?;
    let (width, height) = regions
        .dst_x
        .checked_add(regions.width)
        .zip(regions.dst_y.checked_add(regions.height))
        .ok_or(QoiError::DimensionsTooLarge {
            width: regions.width,
            height: regions.height,
        })?;
    if let Some(limits) = limits {
        limits.check_buffer(width, height, bands)?;
    }

    let has_alpha = bands == 2 || bands == 4;
    let model = ColorModel::new(display_color_space(image.color_space()), has_alpha);
    let data = alloc::vec![0u8; buffer_len(width, height, bands)?];
    let mut raster = InterleavedRaster::tight(data, width, height, bands, model);
    Ok(read_into(image, params, &mut raster, stop, listener)?.map(|()| raster))
}
