use crate::error::QoiError;

/// Resource limits for transcode and decode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the canonical buffer or destination raster.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check output dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), QoiError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(QoiError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(QoiError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(QoiError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), QoiError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(QoiError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }

    /// Dimension and memory checks for a `width x height x channels` byte buffer.
    pub(crate) fn check_buffer(
        &self,
        width: u32,
        height: u32,
        channels: usize,
    ) -> Result<(), QoiError> {
        self.check(width, height)?;
        let bytes = buffer_len(width, height, channels)?;
        self.check_memory(bytes)
    }
}

/// `width * height * channels` with overflow reported as an error.
pub(crate) fn buffer_len(width: u32, height: u32, channels: usize) -> Result<usize, QoiError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(channels))
        .ok_or(QoiError::DimensionsTooLarge { width, height })
}
