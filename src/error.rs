use alloc::string::String;

/// Errors from raster transcoding, placement and the QOI codec boundary.
///
/// Cancellation is not an error: it is reported through
/// [`Outcome::Aborted`](crate::Outcome::Aborted).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QoiError {
    #[error("band {band} out of range for a raster with {bands} bands")]
    InvalidBand { band: usize, bands: usize },

    #[error("unsupported band count {0} (canonical buffers hold 3 or 4 channels)")]
    UnsupportedBandCount(usize),

    #[error("source selects {selected} bands but destination has {destination}")]
    BandCountMismatch { selected: usize, destination: usize },

    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("window clips to an empty region")]
    EmptyRegion,

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("codec error: {0}")]
    Codec(String),
}
