//! Raster model: the capability interface the transcoder reads from and the
//! concrete storage types shipped with the crate.
//!
//! Bands are logical channels. For color rasters they are always ordered
//! R, G, B\[, A\] no matter how the bytes are laid out in memory; the
//! physical arrangement is reported separately through [`Raster::layout`].

use alloc::vec::Vec;

use crate::error::QoiError;
use crate::limits::buffer_len;

/// Physical storage classification.
///
/// Computed on demand by [`Raster::layout`]; the fast extractor matches on it
/// once per call.
#[derive(Clone, Copy, Debug)]
pub enum Layout<'a> {
    /// One word per pixel, `0xAARRGGBB`. Covers packed RGB (alpha byte
    /// ignored) and packed ARGB.
    PackedArgb { words: &'a [u32], stride: usize },
    /// One word per pixel, `0x??BBGGRR`.
    PackedBgr { words: &'a [u32], stride: usize },
    /// Three bytes per pixel, stored B, G, R.
    Bgr8 { bytes: &'a [u8], stride: usize },
    /// Four bytes per pixel, stored A, B, G, R.
    Abgr8 { bytes: &'a [u8], stride: usize },
    /// Anything else; read through [`Raster::argb`] or [`Raster::sample`].
    Generic,
}

/// Read access to a raster and its color model.
pub trait Raster {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn num_bands(&self) -> usize;

    /// Storage precision of `band`.
    fn bits_per_band(&self, _band: usize) -> u32 {
        8
    }

    /// Whether the color model is anything other than opaque.
    fn has_alpha(&self) -> bool;

    /// Raw value of one band. `x < width`, `y < height`, `band < num_bands`.
    fn sample(&self, x: u32, y: u32, band: usize) -> u32;

    /// Color-model query: the pixel as packed `0xAARRGGBB`.
    fn argb(&self, x: u32, y: u32) -> u32;

    fn layout(&self) -> Layout<'_> {
        Layout::Generic
    }
}

/// A raster that accepts band writes.
pub trait WritableRaster: Raster {
    /// Store `value` into one band, truncated to the band's precision.
    fn set_sample(&mut self, x: u32, y: u32, band: usize, value: u32);
}

/// Display color space of a [`ColorModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayColorSpace {
    Srgb,
    LinearRgb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transparency {
    Opaque,
    Translucent,
}

/// Component color model: one byte per channel, never premultiplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorModel {
    color_space: DisplayColorSpace,
    has_alpha: bool,
    premultiplied: bool,
    transparency: Transparency,
    bits_per_channel: u32,
}

impl ColorModel {
    pub const fn new(color_space: DisplayColorSpace, has_alpha: bool) -> Self {
        Self {
            color_space,
            has_alpha,
            premultiplied: false,
            transparency: if has_alpha {
                Transparency::Translucent
            } else {
                Transparency::Opaque
            },
            bits_per_channel: 8,
        }
    }

    pub const SRGB: Self = Self::new(DisplayColorSpace::Srgb, false);
    pub const SRGB_ALPHA: Self = Self::new(DisplayColorSpace::Srgb, true);

    pub fn color_space(&self) -> DisplayColorSpace {
        self.color_space
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn is_premultiplied(&self) -> bool {
        self.premultiplied
    }

    pub fn transparency(&self) -> Transparency {
        self.transparency
    }

    pub fn bits_per_channel(&self) -> u32 {
        self.bits_per_channel
    }
}

#[inline]
pub(crate) fn pack_argb(r: u32, g: u32, b: u32, a: u32) -> u32 {
    ((a & 0xFF) << 24) | ((r & 0xFF) << 16) | ((g & 0xFF) << 8) | (b & 0xFF)
}

fn check_len(have: usize, needed: usize) -> Result<(), QoiError> {
    if have < needed {
        return Err(QoiError::BufferSizeMismatch {
            expected: needed,
            actual: have,
        });
    }
    Ok(())
}

/// Elements needed for `height` rows of `stride` with `row` used per row.
fn strided_len(width: u32, height: u32, stride: usize, row: usize) -> Result<usize, QoiError> {
    if height == 0 || row == 0 {
        return Ok(0);
    }
    if row > stride {
        return Err(QoiError::InvalidParameter(alloc::format!(
            "row of {row} elements exceeds stride {stride}"
        )));
    }
    (height as usize - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(row))
        .ok_or(QoiError::DimensionsTooLarge { width, height })
}

// ── Packed 32-bit rasters ────────────────────────────────────────────

/// Channel arrangement inside a packed 32-bit word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PackedFormat {
    /// `0x00RRGGBB`, opaque.
    Rgb,
    /// `0xAARRGGBB`, straight alpha.
    Argb,
    /// `0x00BBGGRR`, opaque.
    Bgr,
}

impl PackedFormat {
    /// Bit position of each logical band (R, G, B, A).
    const fn shifts(self) -> &'static [u32] {
        match self {
            Self::Rgb => &[16, 8, 0],
            Self::Argb => &[16, 8, 0, 24],
            Self::Bgr => &[0, 8, 16],
        }
    }
}

/// One `u32` word per pixel.
#[derive(Clone, Debug)]
pub struct PackedRaster<C = Vec<u32>> {
    width: u32,
    height: u32,
    stride: usize,
    format: PackedFormat,
    data: C,
}

impl<C: AsRef<[u32]>> PackedRaster<C> {
    /// Tightly packed rows (`stride == width`).
    pub fn new(data: C, width: u32, height: u32, format: PackedFormat) -> Result<Self, QoiError> {
        Self::with_stride(data, width, height, width as usize, format)
    }

    /// Rows start every `stride` words.
    pub fn with_stride(
        data: C,
        width: u32,
        height: u32,
        stride: usize,
        format: PackedFormat,
    ) -> Result<Self, QoiError> {
        check_len(
            data.as_ref().len(),
            strided_len(width, height, stride, width as usize)?,
        )?;
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    pub fn format(&self) -> PackedFormat {
        self.format
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u32] {
        self.data.as_ref()
    }

    pub fn into_inner(self) -> C {
        self.data
    }

    #[inline]
    fn word(&self, x: u32, y: u32) -> u32 {
        self.data.as_ref()[y as usize * self.stride + x as usize]
    }
}

impl<C: AsRef<[u32]>> Raster for PackedRaster<C> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn num_bands(&self) -> usize {
        self.format.shifts().len()
    }

    fn has_alpha(&self) -> bool {
        self.format == PackedFormat::Argb
    }

    fn sample(&self, x: u32, y: u32, band: usize) -> u32 {
        (self.word(x, y) >> self.format.shifts()[band]) & 0xFF
    }

    fn argb(&self, x: u32, y: u32) -> u32 {
        let w = self.word(x, y);
        match self.format {
            PackedFormat::Rgb => 0xFF00_0000 | (w & 0x00FF_FFFF),
            PackedFormat::Argb => w,
            PackedFormat::Bgr => 0xFF00_0000 | (w.swap_bytes() >> 8),
        }
    }

    fn layout(&self) -> Layout<'_> {
        let words = self.data.as_ref();
        match self.format {
            PackedFormat::Rgb | PackedFormat::Argb => Layout::PackedArgb {
                words,
                stride: self.stride,
            },
            PackedFormat::Bgr => Layout::PackedBgr {
                words,
                stride: self.stride,
            },
        }
    }
}

impl<C: AsRef<[u32]> + AsMut<[u32]>> WritableRaster for PackedRaster<C> {
    fn set_sample(&mut self, x: u32, y: u32, band: usize, value: u32) {
        let shift = self.format.shifts()[band];
        let idx = y as usize * self.stride + x as usize;
        let word = &mut self.data.as_mut()[idx];
        *word = (*word & !(0xFF << shift)) | ((value & 0xFF) << shift);
    }
}

// ── Byte-interleaved rasters ─────────────────────────────────────────

/// One byte per band, bands interleaved within each pixel.
///
/// Band `b` of pixel `(x, y)` lives at
/// `y * row_stride + x * pixel_stride + band_offsets[b]`.
#[derive(Clone, Debug)]
pub struct InterleavedRaster<C = Vec<u8>> {
    width: u32,
    height: u32,
    row_stride: usize,
    pixel_stride: usize,
    band_offsets: [usize; 4],
    bands: usize,
    color_model: ColorModel,
    data: C,
}

const OFFSETS_BGR: [usize; 3] = [2, 1, 0];
const OFFSETS_ABGR: [usize; 4] = [3, 2, 1, 0];

impl<C: AsRef<[u8]>> InterleavedRaster<C> {
    /// Describe `data` as an interleaved raster.
    ///
    /// Between one and four bands; every offset must fall inside a pixel.
    pub fn new(
        data: C,
        width: u32,
        height: u32,
        row_stride: usize,
        pixel_stride: usize,
        band_offsets: &[usize],
        color_model: ColorModel,
    ) -> Result<Self, QoiError> {
        let bands = band_offsets.len();
        if bands == 0 || bands > 4 {
            return Err(QoiError::UnsupportedBandCount(bands));
        }
        if let Some(&bad) = band_offsets.iter().find(|&&o| o >= pixel_stride) {
            return Err(QoiError::InvalidParameter(alloc::format!(
                "band offset {bad} outside pixel stride {pixel_stride}"
            )));
        }
        let row = (width as usize)
            .checked_mul(pixel_stride)
            .ok_or(QoiError::DimensionsTooLarge { width, height })?;
        check_len(
            data.as_ref().len(),
            strided_len(width, height, row_stride, row)?,
        )?;
        let mut offsets = [0usize; 4];
        offsets[..bands].copy_from_slice(band_offsets);
        Ok(Self {
            width,
            height,
            row_stride,
            pixel_stride,
            band_offsets: offsets,
            bands,
            color_model,
            data,
        })
    }

    /// Tightly packed bands at offsets `0..bands`, `1 <= bands <= 4`.
    /// The caller guarantees `data` holds `width * height * bands` bytes.
    pub(crate) fn tight(
        data: C,
        width: u32,
        height: u32,
        bands: usize,
        color_model: ColorModel,
    ) -> Self {
        debug_assert!((1..=4).contains(&bands));
        Self {
            width,
            height,
            row_stride: width as usize * bands,
            pixel_stride: bands,
            band_offsets: [0, 1, 2, 3],
            bands,
            color_model,
            data,
        }
    }

    /// Three bytes per pixel stored B, G, R.
    pub fn bgr8(data: C, width: u32, height: u32) -> Result<Self, QoiError> {
        Self::new(
            data,
            width,
            height,
            width as usize * 3,
            3,
            &OFFSETS_BGR,
            ColorModel::SRGB,
        )
    }

    /// Four bytes per pixel stored A, B, G, R.
    pub fn abgr8(data: C, width: u32, height: u32) -> Result<Self, QoiError> {
        Self::new(
            data,
            width,
            height,
            width as usize * 4,
            4,
            &OFFSETS_ABGR,
            ColorModel::SRGB_ALPHA,
        )
    }

    /// Tightly packed R, G, B.
    pub fn rgb8(data: C, width: u32, height: u32) -> Result<Self, QoiError> {
        Self::new(
            data,
            width,
            height,
            width as usize * 3,
            3,
            &[0, 1, 2],
            ColorModel::SRGB,
        )
    }

    /// Tightly packed R, G, B, A.
    pub fn rgba8(data: C, width: u32, height: u32) -> Result<Self, QoiError> {
        Self::new(
            data,
            width,
            height,
            width as usize * 4,
            4,
            &[0, 1, 2, 3],
            ColorModel::SRGB_ALPHA,
        )
    }

    /// One gray byte per pixel.
    pub fn gray8(data: C, width: u32, height: u32) -> Result<Self, QoiError> {
        Self::new(
            data,
            width,
            height,
            width as usize,
            1,
            &[0],
            ColorModel::SRGB,
        )
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    pub fn pixel_stride(&self) -> usize {
        self.pixel_stride
    }

    pub fn band_offsets(&self) -> &[usize] {
        &self.band_offsets[..self.bands]
    }

    pub fn color_model(&self) -> &ColorModel {
        &self.color_model
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Give the storage back.
    pub fn into_inner(self) -> C {
        self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32, band: usize) -> usize {
        y as usize * self.row_stride + x as usize * self.pixel_stride + self.band_offsets[band]
    }

    /// Offsets are `0..bands`, no padding between pixels or rows.
    #[cfg(feature = "rgb")]
    fn is_tightly_packed(&self) -> bool {
        self.pixel_stride == self.bands
            && self.row_stride == self.width as usize * self.pixel_stride
            && self.band_offsets().iter().enumerate().all(|(i, &o)| i == o)
    }
}

impl<C: AsRef<[u8]> + AsMut<[u8]>> InterleavedRaster<C> {
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data.as_mut()
    }
}

impl<C: AsRef<[u8]>> Raster for InterleavedRaster<C> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn num_bands(&self) -> usize {
        self.bands
    }

    fn has_alpha(&self) -> bool {
        self.color_model.has_alpha
    }

    fn sample(&self, x: u32, y: u32, band: usize) -> u32 {
        u32::from(self.data.as_ref()[self.index(x, y, band)])
    }

    fn argb(&self, x: u32, y: u32) -> u32 {
        let s = |band| self.sample(x, y, band);
        let alpha = |band| if self.has_alpha() { s(band) } else { 0xFF };
        match self.bands {
            1 => pack_argb(s(0), s(0), s(0), 0xFF),
            2 => pack_argb(s(0), s(0), s(0), alpha(1)),
            3 => pack_argb(s(0), s(1), s(2), 0xFF),
            _ => pack_argb(s(0), s(1), s(2), alpha(3)),
        }
    }

    fn layout(&self) -> Layout<'_> {
        let bytes = self.data.as_ref();
        let stride = self.row_stride;
        match (self.pixel_stride, self.band_offsets()) {
            (3, offsets) if offsets == &OFFSETS_BGR[..] => Layout::Bgr8 { bytes, stride },
            (4, offsets) if offsets == &OFFSETS_ABGR[..] => Layout::Abgr8 { bytes, stride },
            _ => Layout::Generic,
        }
    }
}

impl<C: AsRef<[u8]> + AsMut<[u8]>> WritableRaster for InterleavedRaster<C> {
    fn set_sample(&mut self, x: u32, y: u32, band: usize, value: u32) {
        let idx = self.index(x, y, band);
        self.data.as_mut()[idx] = value as u8;
    }
}

/// Pixel types a tightly packed 8-bit raster can be viewed as.
#[cfg(feature = "rgb")]
pub trait RasterPixel: Copy + 'static {
    const BANDS: usize;
}

#[cfg(feature = "rgb")]
impl RasterPixel for rgb::RGB8 {
    const BANDS: usize = 3;
}

#[cfg(feature = "rgb")]
impl RasterPixel for rgb::RGBA8 {
    const BANDS: usize = 4;
}

impl<C: AsRef<[u8]>> InterleavedRaster<C> {
    /// Reinterpret the storage as typed pixels without copying.
    ///
    /// Only tightly packed rasters whose band count matches `P` qualify;
    /// anything else is [`QoiError::UnsupportedFormat`].
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: RasterPixel>(&self) -> Result<&[P], QoiError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        use rgb::AsPixels as _;

        if P::BANDS != self.bands || !self.is_tightly_packed() {
            return Err(QoiError::UnsupportedFormat(alloc::format!(
                "{} bands with pixel stride {} cannot be viewed as {}-channel pixels",
                self.bands,
                self.pixel_stride,
                P::BANDS
            )));
        }
        let len = buffer_len(self.width, self.height, self.bands)?;
        Ok(self.data.as_ref()[..len].as_pixels())
    }

    /// Zero-copy [`imgref::ImgRef`] over the raster.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: RasterPixel>(&self) -> Result<imgref::ImgRef<'_, P>, QoiError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}

// ── Palette rasters ──────────────────────────────────────────────────

/// One palette index per pixel; the color model maps indices to ARGB.
///
/// Has a single band (the index), so it only reaches the canonical buffer
/// through the color model.
#[derive(Clone, Debug)]
pub struct IndexedRaster<C = Vec<u8>> {
    width: u32,
    height: u32,
    palette: Vec<u32>,
    has_alpha: bool,
    indices: C,
}

impl<C: AsRef<[u8]>> IndexedRaster<C> {
    /// `palette` entries are `0xAARRGGBB`; every index must address one.
    pub fn new(indices: C, width: u32, height: u32, palette: Vec<u32>) -> Result<Self, QoiError> {
        let needed = buffer_len(width, height, 1)?;
        check_len(indices.as_ref().len(), needed)?;
        if let Some(&bad) = indices.as_ref()[..needed]
            .iter()
            .find(|&&i| usize::from(i) >= palette.len())
        {
            return Err(QoiError::InvalidParameter(alloc::format!(
                "palette index {bad} outside palette of {} entries",
                palette.len()
            )));
        }
        let has_alpha = palette.iter().any(|&c| c >> 24 != 0xFF);
        Ok(Self {
            width,
            height,
            palette,
            has_alpha,
            indices,
        })
    }

    pub fn palette(&self) -> &[u32] {
        &self.palette
    }
}

impl<C: AsRef<[u8]>> Raster for IndexedRaster<C> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn num_bands(&self) -> usize {
        1
    }

    fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    fn sample(&self, x: u32, y: u32, _band: usize) -> u32 {
        u32::from(self.indices.as_ref()[y as usize * self.width as usize + x as usize])
    }

    fn argb(&self, x: u32, y: u32) -> u32 {
        self.palette[self.sample(x, y, 0) as usize]
    }
}
