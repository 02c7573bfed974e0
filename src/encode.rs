#[cfg(feature = "qoi")]
use alloc::vec::Vec;

use enough::Stop;

use crate::error::QoiError;
use crate::image::QoiImage;
use crate::limits::Limits;
use crate::params::WriteParams;
use crate::pixel::ColorSpace;
use crate::progress::{Outcome, ProgressListener};
use crate::raster::Raster;
use crate::transcode;

/// Raster → canonical buffer (and optionally → QOI bytes).
///
/// Without params, or with params equal to the defaults, the whole raster is
/// extracted through the fast or generic path: four channels iff the raster
/// has alpha, no progress reports, no cancellation checks. Any other params
/// select the windowed path, which reads raw band values, reports progress
/// per row and polls the stop token per row.
#[derive(Clone, Debug)]
pub struct EncodeRequest<'a> {
    params: Option<&'a WriteParams>,
    limits: Option<&'a Limits>,
    color_space: ColorSpace,
}

impl Default for EncodeRequest<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> EncodeRequest<'a> {
    pub fn new() -> Self {
        Self {
            params: None,
            limits: None,
            color_space: ColorSpace::Srgb,
        }
    }

    pub fn with_params(mut self, params: &'a WriteParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Tag for the output buffer (default [`ColorSpace::Srgb`]).
    pub fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    /// Produce the canonical buffer.
    pub fn transcode<R: Raster + ?Sized>(
        &self,
        raster: &R,
        stop: impl Stop,
        listener: &mut dyn ProgressListener,
    ) -> Result<Outcome<QoiImage>, QoiError> {
        listener.image_started();
        let outcome = self.extract(raster, &stop, listener)?;
        if outcome.is_complete() {
            listener.image_complete();
        }
        Ok(outcome)
    }

    /// Produce the canonical buffer and compress it.
    ///
    /// An aborted transcode never reaches the codec.
    #[cfg(feature = "qoi")]
    pub fn encode<R: Raster + ?Sized>(
        &self,
        raster: &R,
        stop: impl Stop,
        listener: &mut dyn ProgressListener,
    ) -> Result<Outcome<Vec<u8>>, QoiError> {
        listener.image_started();
        let image = match self.extract(raster, &stop, listener)? {
            Outcome::Complete(image) => image,
            Outcome::Aborted(reason) => return Ok(Outcome::Aborted(reason)),
        };
        let encoded = crate::codec::encode_qoi(&image)?;
        listener.image_complete();
        Ok(Outcome::Complete(encoded))
    }

    fn extract<R: Raster + ?Sized>(
        &self,
        raster: &R,
        stop: &dyn Stop,
        listener: &mut dyn ProgressListener,
    ) -> Result<Outcome<QoiImage>, QoiError> {
        match self.params {
            Some(params) if !params.is_default() => transcode::window::transcode(
                raster,
                params,
                self.color_space,
                self.limits,
                stop,
                listener,
            ),
            _ => transcode::extract_full(raster, self.color_space, self.limits)
                .map(Outcome::Complete),
        }
    }
}
