use alloc::vec::Vec;

use enough::Stop;

use crate::codec;
use crate::error::QoiError;
use crate::image::QoiImage;
use crate::limits::Limits;
use crate::params::ReadParams;
use crate::pixel::{Channels, ColorSpace};
use crate::place;
use crate::progress::{Outcome, ProgressListener};
use crate::raster::{InterleavedRaster, WritableRaster};

/// Header fields of a QOI stream, read without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub channels: Channels,
    pub color_space: ColorSpace,
}

impl ImageInfo {
    pub fn from_bytes(data: &[u8]) -> Result<Self, QoiError> {
        let (width, height, channels, color_space) = codec::decode_header(data)?;
        Ok(Self {
            width,
            height,
            channels,
            color_space,
        })
    }
}

/// QOI bytes → canonical buffer → raster.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    params: Option<&'a ReadParams>,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            params: None,
            limits: None,
        }
    }

    pub fn with_params(mut self, params: &'a ReadParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode to the canonical buffer. Params are not consulted.
    pub fn decode(&self) -> Result<QoiImage, QoiError> {
        codec::decode_qoi(self.data, self.limits)
    }

    /// Decode to a raster.
    ///
    /// Default params place a raster over the decoded buffer without copying
    /// it. Otherwise a raster sized to the window is allocated and filled,
    /// with per-row progress and stop checks.
    pub fn decode_raster(
        &self,
        stop: impl Stop,
        listener: &mut dyn ProgressListener,
    ) -> Result<Outcome<InterleavedRaster<Vec<u8>>>, QoiError> {
        listener.image_started();
        let image = self.decode()?;
        let outcome = match self.params {
            Some(params) if !params.is_default() => {
                place::read_raster(&image, params, self.limits, &stop, listener)?
            }
            _ => Outcome::Complete(place::into_raster(image)),
        };
        if outcome.is_complete() {
            listener.image_complete();
        }
        Ok(outcome)
    }

    /// Decode into a caller-supplied raster.
    pub fn decode_into<R: WritableRaster + ?Sized>(
        &self,
        dest: &mut R,
        stop: impl Stop,
        listener: &mut dyn ProgressListener,
    ) -> Result<Outcome<()>, QoiError> {
        listener.image_started();
        let image = self.decode()?;
        let default_params = ReadParams::default();
        let params = self.params.unwrap_or(&default_params);
        let outcome = place::read_into(&image, params, dest, &stop, listener)?;
        if outcome.is_complete() {
            listener.image_complete();
        }
        Ok(outcome)
    }
}
