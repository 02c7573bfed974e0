//! # zenqoi
//!
//! Transcoding between in-memory rasters and the canonical QOI pixel buffer.
//!
//! ## Encode side
//!
//! A [`Raster`] (packed 32-bit words, interleaved bytes, palette indices, or
//! any type implementing the trait) becomes a [`QoiImage`]: tightly packed
//! R, G, B\[, A\] bytes. Four storage layouts are extracted with dedicated
//! row loops (packed RGB/ARGB, packed BGR, 3-byte BGR, 4-byte ABGR);
//! everything else goes through the raster's color model one pixel at a
//! time. A [`WriteParams`] window adds region clipping, subsampling and band
//! reordering, with per-row progress and cooperative cancellation.
//!
//! ## Decode side
//!
//! A [`QoiImage`] is placed as an [`InterleavedRaster`] without copying:
//! the raster reads and writes the canonical bytes directly. A
//! [`ReadParams`] window copies part of the buffer into a destination
//! raster instead.
//!
//! ## Non-Goals
//!
//! - Color correction. Color spaces are tags; samples pass through as stored.
//! - Bit depths other than 8 per channel in the canonical buffer.
//! - Channel counts other than 3 and 4 in the canonical buffer.
//! - The compression itself, which is `rapid-qoi`'s job (`qoi` feature).
//!
//! ## Usage
//!
//! ```no_run
//! use zenqoi::{EncodeRequest, NoProgress, Outcome, PackedFormat, PackedRaster, Unstoppable};
//!
//! let words = vec![0xFFFF_0000u32; 16]; // 4x4 opaque red
//! let raster = PackedRaster::new(words, 4, 4, PackedFormat::Argb)?;
//!
//! let image = match EncodeRequest::new().transcode(&raster, Unstoppable, &mut NoProgress)? {
//!     Outcome::Complete(image) => image,
//!     Outcome::Aborted(_) => unreachable!("Unstoppable never stops"),
//! };
//! assert_eq!(image.pixels().len(), 64);
//!
//! let view = zenqoi::place(&image);
//! # Ok::<(), zenqoi::QoiError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod image;
mod limits;
mod log;
mod params;
mod pixel;
mod place;
mod progress;
mod raster;
mod transcode;

#[cfg(feature = "qoi")]
mod codec;
#[cfg(feature = "qoi")]
mod decode;
mod encode;

// Re-exports
#[cfg(feature = "qoi")]
pub use decode::{DecodeRequest, ImageInfo};
pub use encode::EncodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::QoiError;
pub use image::QoiImage;
pub use limits::Limits;
pub use params::{Point, ReadParams, Rect, Subsampling, WriteParams};
pub use pixel::{Channels, ColorSpace, ImageType, MAGIC, can_decode, can_encode};
pub use place::{
    color_model, display_color_space, into_raster, place, place_mut, read_into, read_raster,
};
pub use progress::{NoProgress, Outcome, ProgressListener};
#[cfg(feature = "rgb")]
pub use raster::RasterPixel;
pub use raster::{
    ColorModel, DisplayColorSpace, IndexedRaster, InterleavedRaster, Layout, PackedFormat,
    PackedRaster, Raster, Transparency, WritableRaster,
};
