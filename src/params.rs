//! Window configuration for encode and decode.

use alloc::vec::Vec;

use crate::error::QoiError;
use crate::pixel::ImageType;

/// Rectangle in pixel coordinates. May extend past the image; it is clipped
/// by intersection before use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Overlap of two rectangles; a non-overlapping pair yields an empty
    /// rectangle (non-positive width or height), never an error.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x0 = i64::from(self.x).max(i64::from(other.x));
        let y0 = i64::from(self.y).max(i64::from(other.y));
        let x1 = (i64::from(self.x) + i64::from(self.width))
            .min(i64::from(other.x) + i64::from(other.width));
        let y1 = (i64::from(self.y) + i64::from(self.height))
            .min(i64::from(other.y) + i64::from(other.height));
        Rect {
            x: clamp_i32(x0),
            y: clamp_i32(y0),
            width: clamp_i32(x1 - x0),
            height: clamp_i32(y1 - y0),
        }
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Sampling period and phase, applied to both axes independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subsampling {
    x_stride: u32,
    y_stride: u32,
    x_offset: u32,
    y_offset: u32,
}

impl Default for Subsampling {
    fn default() -> Self {
        Self::NONE
    }
}

impl Subsampling {
    /// Every pixel, no offset.
    pub const NONE: Subsampling = Subsampling {
        x_stride: 1,
        y_stride: 1,
        x_offset: 0,
        y_offset: 0,
    };

    /// Strides must be at least 1.
    pub fn new(x_stride: u32, y_stride: u32, x_offset: u32, y_offset: u32) -> Result<Self, QoiError> {
        if x_stride == 0 || y_stride == 0 {
            return Err(QoiError::InvalidParameter(alloc::format!(
                "subsampling stride must be at least 1, got {x_stride}x{y_stride}"
            )));
        }
        Ok(Self {
            x_stride,
            y_stride,
            x_offset,
            y_offset,
        })
    }

    pub fn x_stride(&self) -> u32 {
        self.x_stride
    }

    pub fn y_stride(&self) -> u32 {
        self.y_stride
    }

    pub fn x_offset(&self) -> u32 {
        self.x_offset
    }

    pub fn y_offset(&self) -> u32 {
        self.y_offset
    }
}

/// Encode-side window: which part of the source raster reaches the
/// canonical buffer, and in which band order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteParams {
    pub source_region: Option<Rect>,
    pub subsampling: Subsampling,
    /// Source band per canonical channel. `None` keeps every source band.
    pub source_bands: Option<Vec<usize>>,
    pub destination_type: Option<ImageType>,
    pub destination_offset: Point,
}

impl WriteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_region(mut self, region: Rect) -> Self {
        self.source_region = Some(region);
        self
    }

    pub fn with_subsampling(mut self, subsampling: Subsampling) -> Self {
        self.subsampling = subsampling;
        self
    }

    pub fn with_source_bands(mut self, bands: &[usize]) -> Self {
        self.source_bands = Some(bands.to_vec());
        self
    }

    pub fn with_destination_type(mut self, image_type: ImageType) -> Self {
        self.destination_type = Some(image_type);
        self
    }

    /// True when nothing differs from a plain full-image write.
    pub fn is_default(&self) -> bool {
        self.source_region.is_none()
            && self.subsampling == Subsampling::NONE
            && self.source_bands.is_none()
            && self.destination_type.is_none()
            && self.destination_offset == Point::ORIGIN
    }
}

/// Decode-side window, including where and into which bands the pixels
/// land in a destination raster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadParams {
    pub source_region: Option<Rect>,
    pub subsampling: Subsampling,
    /// Canonical channels to read. `None` reads all of them.
    pub source_bands: Option<Vec<usize>>,
    /// Layout of the raster allocated when no destination is supplied.
    pub destination_type: Option<ImageType>,
    /// May be negative; the part falling off the destination is skipped.
    pub destination_offset: Point,
    /// Destination band per selected source band. `None` is `0..n`.
    pub destination_bands: Option<Vec<usize>>,
}

impl ReadParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_region(mut self, region: Rect) -> Self {
        self.source_region = Some(region);
        self
    }

    pub fn with_subsampling(mut self, subsampling: Subsampling) -> Self {
        self.subsampling = subsampling;
        self
    }

    pub fn with_source_bands(mut self, bands: &[usize]) -> Self {
        self.source_bands = Some(bands.to_vec());
        self
    }

    pub fn with_destination_type(mut self, image_type: ImageType) -> Self {
        self.destination_type = Some(image_type);
        self
    }

    pub fn with_destination_offset(mut self, offset: Point) -> Self {
        self.destination_offset = offset;
        self
    }

    pub fn with_destination_bands(mut self, bands: &[usize]) -> Self {
        self.destination_bands = Some(bands.to_vec());
        self
    }

    /// True when nothing differs from a plain full-image read.
    pub fn is_default(&self) -> bool {
        self.source_region.is_none()
            && self.subsampling == Subsampling::NONE
            && self.source_bands.is_none()
            && self.destination_type.is_none()
            && self.destination_offset == Point::ORIGIN
            && self.destination_bands.is_none()
    }
}
