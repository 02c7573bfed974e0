//! Per-layout row loops for the recognized physical layouts.

use crate::raster::Layout;

/// Extract a full raster straight from its storage.
///
/// `out` holds `height` rows of `width * channels` bytes (3 or 4 channels).
/// Returns `false` for [`Layout::Generic`] and for storage too short for the
/// claimed geometry, leaving `out` untouched.
pub(crate) fn extract(
    layout: Layout<'_>,
    width: usize,
    height: usize,
    channels: usize,
    out: &mut [u8],
) -> bool {
    match layout {
        Layout::PackedArgb { words, stride } => {
            if !covers(words.len(), width, height, stride, 1) {
                return false;
            }
            for_each_row(out, width, channels, |y, row| {
                let src = &words[y * stride..y * stride + width];
                for (px, &w) in row.chunks_exact_mut(channels).zip(src) {
                    put_argb(px, w);
                }
            });
        }
        Layout::PackedBgr { words, stride } => {
            if !covers(words.len(), width, height, stride, 1) {
                return false;
            }
            for_each_row(out, width, channels, |y, row| {
                let src = &words[y * stride..y * stride + width];
                for (px, &w) in row.chunks_exact_mut(channels).zip(src) {
                    put_argb(px, 0xFF00_0000 | (w.swap_bytes() >> 8));
                }
            });
        }
        Layout::Bgr8 { bytes, stride } => {
            if !covers(bytes.len(), width, height, stride, 3) {
                return false;
            }
            for_each_row(out, width, channels, |y, row| {
                let src = &bytes[y * stride..y * stride + width * 3];
                for (px, raw) in row.chunks_exact_mut(channels).zip(src.chunks_exact(3)) {
                    px[0] = raw[2];
                    px[1] = raw[1];
                    px[2] = raw[0];
                    if channels == 4 {
                        px[3] = 0xFF;
                    }
                }
            });
        }
        Layout::Abgr8 { bytes, stride } => {
            if !covers(bytes.len(), width, height, stride, 4) {
                return false;
            }
            for_each_row(out, width, channels, |y, row| {
                let src = &bytes[y * stride..y * stride + width * 4];
                for (px, raw) in row.chunks_exact_mut(channels).zip(src.chunks_exact(4)) {
                    px[0] = raw[3];
                    px[1] = raw[2];
                    px[2] = raw[1];
                    if channels == 4 {
                        px[3] = raw[0];
                    }
                }
            });
        }
        Layout::Generic => return false,
    }
    true
}

/// Unpack `0xAARRGGBB` into R, G, B\[, A\].
#[inline]
pub(crate) fn put_argb(px: &mut [u8], argb: u32) {
    px[0] = (argb >> 16) as u8;
    px[1] = (argb >> 8) as u8;
    px[2] = argb as u8;
    if px.len() == 4 {
        px[3] = (argb >> 24) as u8;
    }
}

fn for_each_row(
    out: &mut [u8],
    width: usize,
    channels: usize,
    mut f: impl FnMut(usize, &mut [u8]),
) {
    let row_bytes = width * channels;
    if row_bytes == 0 {
        return;
    }
    for (y, row) in out.chunks_exact_mut(row_bytes).enumerate() {
        f(y, row);
    }
}

/// Whether `len` elements hold `height` rows of `width * unit` at `stride`.
fn covers(len: usize, width: usize, height: usize, stride: usize, unit: usize) -> bool {
    if width == 0 || height == 0 {
        return true;
    }
    let row = width * unit;
    row <= stride
        && (height - 1)
            .checked_mul(stride)
            .and_then(|n| n.checked_add(row))
            .is_some_and(|needed| needed <= len)
}
