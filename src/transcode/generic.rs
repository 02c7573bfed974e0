//! Pixel-at-a-time extraction through the raster's color model.
//!
//! Slowest path; only taken when the layout is not recognized.

use crate::raster::Raster;
use crate::transcode::fast::put_argb;

pub(crate) fn extract<R: Raster + ?Sized>(raster: &R, channels: usize, out: &mut [u8]) {
    let width = raster.width() as usize;
    let row_bytes = width * channels;
    if row_bytes == 0 {
        return;
    }
    for (y, row) in out.chunks_exact_mut(row_bytes).enumerate() {
        for (x, px) in row.chunks_exact_mut(channels).enumerate() {
            put_argb(px, raster.argb(x as u32, y as u32));
        }
    }
}
