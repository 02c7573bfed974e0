//! Region clipping, subsampling and band selection.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::QoiError;
use crate::image::QoiImage;
use crate::limits::Limits;
use crate::log::{debug, trace};
use crate::params::{Point, Rect, Subsampling, WriteParams};
use crate::pixel::{Channels, ColorSpace, can_encode};
use crate::progress::{Outcome, ProgressListener};
use crate::raster::Raster;

/// Source region after intersection with the image bounds and the
/// subsampling phase shift. Width or height may be non-positive.
pub(crate) fn source_region(
    width: u32,
    height: u32,
    region: Option<Rect>,
    subsampling: &Subsampling,
) -> Rect {
    let bounds = Rect::new(0, 0, saturate(width), saturate(height));
    let clipped = match region {
        Some(r) => bounds.intersection(&r),
        None => bounds,
    };
    let dx = saturate(subsampling.x_offset());
    let dy = saturate(subsampling.y_offset());
    Rect {
        x: clipped.x.saturating_add(dx),
        y: clipped.y.saturating_add(dy),
        width: clipped.width.saturating_sub(dx),
        height: clipped.height.saturating_sub(dy),
    }
}

fn saturate(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// `ceil(len / stride)`, zero for a non-positive length.
pub(crate) fn subsampled_len(len: i64, stride: u32) -> u32 {
    if len <= 0 {
        return 0;
    }
    let stride = i64::from(stride);
    ((len + stride - 1) / stride) as u32
}

/// Destination size of a clipped region.
pub(crate) fn subsampled_size(region: &Rect, subsampling: &Subsampling) -> (u32, u32) {
    (
        subsampled_len(i64::from(region.width), subsampling.x_stride()),
        subsampled_len(i64::from(region.height), subsampling.y_stride()),
    )
}

/// Check every band index against `bands`, or default to all of them.
pub(crate) fn select_bands(selection: Option<&[usize]>, bands: usize) -> Result<Vec<usize>, QoiError> {
    match selection {
        Some(selected) => {
            if let Some(&band) = selected.iter().find(|&&b| b >= bands) {
                return Err(QoiError::InvalidBand { band, bands });
            }
            Ok(selected.to_vec())
        }
        None => Ok((0..bands).collect()),
    }
}

/// A raster restricted to an origin and a band selection.
struct RasterWindow<'a, R: ?Sized> {
    raster: &'a R,
    x0: u32,
    y0: u32,
    bands: &'a [usize],
}

impl<R: Raster + ?Sized> RasterWindow<'_, R> {
    #[inline]
    fn sample(&self, x: u32, y: u32, band: usize) -> u32 {
        self.raster
            .sample(self.x0 + x, self.y0 + y, self.bands[band])
    }
}

/// Windowed encode: region, subsampling and band selection applied to raw
/// band values.
///
/// Samples are taken as stored, without consulting the color model, and
/// truncated to one byte.
pub(crate) fn transcode<R: Raster + ?Sized>(
    raster: &R,
    params: &WriteParams,
    color_space: ColorSpace,
    limits: Option<&Limits>,
    stop: &dyn Stop,
    listener: &mut dyn ProgressListener,
) -> Result<Outcome<QoiImage>, QoiError> {
    if let Some(image_type) = &params.destination_type {
        if !can_encode(image_type) {
            return Err(QoiError::UnsupportedFormat(alloc::format!(
                "destination bits per band {:?}",
                image_type.bits_per_band()
            )));
        }
    }

    let subsampling = params.subsampling;
    let region = source_region(
        raster.width(),
        raster.height(),
        params.source_region,
        &subsampling,
    );
    let bands = select_bands(params.source_bands.as_deref(), raster.num_bands())?;
    let channels = Channels::from_count(bands.len())?;
    let (width, height) = subsampled_size(&region, &subsampling);

    if let Some(limits) = limits {
        limits.check_buffer(width, height, channels.count())?;
    }
    debug!(
        "windowed transcode: region {:?}, stride {}x{}, bands {:?} -> {}x{}",
        region,
        subsampling.x_stride(),
        subsampling.y_stride(),
        bands,
        width,
        height
    );

    let mut image = QoiImage::zeroed(width, height, channels, color_space)?;
    if width == 0 || height == 0 {
        return Ok(Outcome::Complete(image));
    }

    let window = RasterWindow {
        raster,
        x0: region.x as u32,
        y0: region.y as u32,
        bands: &bands,
    };
    let n = channels.count();
    let row_bytes = image.row_bytes();
    for (y, row) in image.pixels_mut().chunks_exact_mut(row_bytes).enumerate() {
        let sy = y as u32 * subsampling.y_stride();
        for (x, px) in row.chunks_exact_mut(n).enumerate() {
            let sx = x as u32 * subsampling.x_stride();
            for (band, out) in px.iter_mut().enumerate() {
                *out = window.sample(sx, sy, band) as u8;
            }
        }

        listener.image_progress(y as f32 * 100.0 / height as f32);
        if let Err(reason) = stop.check() {
            trace!("transcode stopped after row {} of {}", y + 1, height);
            listener.aborted();
            return Ok(Outcome::Aborted(reason));
        }
    }

    Ok(Outcome::Complete(image))
}

/// Where a decode window reads from and writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ReadRegions {
    pub src_x: u32,
    pub src_y: u32,
    pub dst_x: u32,
    pub dst_y: u32,
    /// Destination pixels per row.
    pub width: u32,
    /// Destination rows.
    pub height: u32,
}

/// Decode-side regions.
///
/// Negative destination offsets drop the leading destination pixels and
/// advance the source origin by the matching number of source pixels. The
/// destination is clipped to `dest_size` when one is given.
pub(crate) fn read_regions(
    src_width: u32,
    src_height: u32,
    region: Option<Rect>,
    subsampling: &Subsampling,
    offset: Point,
    dest_size: Option<(u32, u32)>,
) -> Result<ReadRegions, QoiError> {
    let src = source_region(src_width, src_height, region, subsampling);
    let (x_stride, y_stride) = (
        i64::from(subsampling.x_stride()),
        i64::from(subsampling.y_stride()),
    );
    let (mut sx, mut sy) = (i64::from(src.x), i64::from(src.y));
    let (mut sw, mut sh) = (i64::from(src.width), i64::from(src.height));
    let (mut dx, mut dy) = (i64::from(offset.x), i64::from(offset.y));

    if dx < 0 {
        let delta = -dx * x_stride;
        sx += delta;
        sw -= delta;
        dx = 0;
    }
    if dy < 0 {
        let delta = -dy * y_stride;
        sy += delta;
        sh -= delta;
        dy = 0;
    }

    let mut dw = i64::from(subsampled_len(sw, subsampling.x_stride()));
    let mut dh = i64::from(subsampled_len(sh, subsampling.y_stride()));
    if let Some((w, h)) = dest_size {
        dw = dw.min(i64::from(w) - dx);
        dh = dh.min(i64::from(h) - dy);
    }
    if sw <= 0 || sh <= 0 || dw <= 0 || dh <= 0 {
        return Err(QoiError::EmptyRegion);
    }

    let out = |v: i64| u32::try_from(v).map_err(|_| QoiError::EmptyRegion);
    Ok(ReadRegions {
        src_x: out(sx)?,
        src_y: out(sy)?,
        dst_x: out(dx)?,
        dst_y: out(dy)?,
        width: out(dw)?,
        height: out(dh)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(xs: u32, ys: u32, xo: u32, yo: u32) -> Subsampling {
        Subsampling::new(xs, ys, xo, yo).unwrap()
    }

    #[test]
    fn full_image_without_window() {
        let r = source_region(8, 6, None, &Subsampling::NONE);
        assert_eq!(r, Rect::new(0, 0, 8, 6));
        assert_eq!(subsampled_size(&r, &Subsampling::NONE), (8, 6));
    }

    #[test]
    fn offset_shrinks_region() {
        let s = sub(2, 3, 1, 2);
        let r = source_region(10, 10, Some(Rect::new(2, 2, 6, 6)), &s);
        assert_eq!(r, Rect::new(3, 4, 5, 4));
        // ceil(5 / 2) x ceil(4 / 3)
        assert_eq!(subsampled_size(&r, &s), (3, 2));
    }

    #[test]
    fn stride_larger_than_region() {
        let s = sub(16, 16, 0, 0);
        let r = source_region(8, 8, Some(Rect::new(1, 1, 3, 3)), &s);
        assert_eq!(subsampled_size(&r, &s), (1, 1));
    }

    #[test]
    fn region_outside_clips_to_nothing() {
        let r = source_region(8, 8, Some(Rect::new(20, 30, 5, 5)), &Subsampling::NONE);
        assert_eq!(subsampled_size(&r, &Subsampling::NONE), (0, 0));
    }

    #[test]
    fn offset_larger_than_region() {
        let s = sub(1, 1, 5, 5);
        let r = source_region(4, 4, None, &s);
        assert_eq!(subsampled_size(&r, &s), (0, 0));
    }

    #[test]
    fn band_selection_rejects_out_of_range() {
        assert!(matches!(
            select_bands(Some(&[0, 5, 1][..]), 4),
            Err(QoiError::InvalidBand { band: 5, bands: 4 })
        ));
        assert_eq!(select_bands(None, 3).unwrap(), [0, 1, 2]);
    }

    #[test]
    fn read_regions_clip_negative_offset() {
        let s = sub(2, 3, 0, 0);
        let r = read_regions(20, 20, None, &s, Point::new(-2, -1), Some((100, 100))).unwrap();
        assert_eq!((r.src_x, r.src_y), (4, 3));
        assert_eq!((r.dst_x, r.dst_y), (0, 0));
        // ceil(16 / 2) x ceil(17 / 3)
        assert_eq!((r.width, r.height), (8, 6));
    }

    #[test]
    fn read_regions_clip_to_destination() {
        let r = read_regions(
            10,
            10,
            None,
            &Subsampling::NONE,
            Point::new(6, 7),
            Some((8, 8)),
        )
        .unwrap();
        assert_eq!((r.dst_x, r.dst_y, r.width, r.height), (6, 7, 2, 1));
    }

    #[test]
    fn read_regions_empty_is_error() {
        let r = read_regions(
            10,
            10,
            None,
            &Subsampling::NONE,
            Point::new(20, 0),
            Some((8, 8)),
        );
        assert!(matches!(r, Err(QoiError::EmptyRegion)));
    }
}
