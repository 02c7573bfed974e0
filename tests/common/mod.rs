//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use zenqoi::*;

/// Lets `allowed` checks pass, then reports cancellation.
pub struct StopAfter {
    allowed: usize,
    calls: AtomicUsize,
}

impl StopAfter {
    pub fn new(allowed: usize) -> Self {
        Self {
            allowed,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Stop for StopAfter {
    fn check(&self) -> Result<(), StopReason> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.allowed {
            Err(StopReason::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Records every listener event.
#[derive(Default, Debug)]
pub struct Recorder {
    pub started: usize,
    pub progress: Vec<f32>,
    pub complete: usize,
    pub aborted: usize,
}

impl ProgressListener for Recorder {
    fn image_started(&mut self) {
        self.started += 1;
    }

    fn image_progress(&mut self, percent: f32) {
        self.progress.push(percent);
    }

    fn image_complete(&mut self) {
        self.complete += 1;
    }

    fn aborted(&mut self) {
        self.aborted += 1;
    }
}

/// Deterministic xorshift bytes.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// Deterministic xorshift words.
pub fn noise_words(len: usize, seed: u32) -> Vec<u32> {
    noise(len * 4, seed)
        .chunks_exact(4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

/// 0xAARRGGBB word encoding its own coordinates: R = x, G = y, B = x ^ y.
pub fn coord_word(x: u32, y: u32) -> u32 {
    0xFF00_0000 | (x << 16) | (y << 8) | (x ^ y)
}

/// ARGB raster whose pixels encode their coordinates.
pub fn coord_raster(width: u32, height: u32) -> PackedRaster {
    let words = (0..height)
        .flat_map(|y| (0..width).map(move |x| coord_word(x, y)))
        .collect();
    PackedRaster::new(words, width, height, PackedFormat::Argb).unwrap()
}

/// Forwards everything except the storage layout, forcing the generic path.
pub struct Opaque<'a, R: ?Sized>(pub &'a R);

impl<R: Raster + ?Sized> Raster for Opaque<'_, R> {
    fn width(&self) -> u32 {
        self.0.width()
    }
    fn height(&self) -> u32 {
        self.0.height()
    }
    fn num_bands(&self) -> usize {
        self.0.num_bands()
    }
    fn has_alpha(&self) -> bool {
        self.0.has_alpha()
    }
    fn sample(&self, x: u32, y: u32, band: usize) -> u32 {
        self.0.sample(x, y, band)
    }
    fn argb(&self, x: u32, y: u32) -> u32 {
        self.0.argb(x, y)
    }
}

/// Three 16-bit bands per pixel, each sample `base + x + y`.
pub struct Wide16 {
    pub width: u32,
    pub height: u32,
    pub base: u32,
}

impl Raster for Wide16 {
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }
    fn num_bands(&self) -> usize {
        3
    }
    fn bits_per_band(&self, _band: usize) -> u32 {
        16
    }
    fn has_alpha(&self) -> bool {
        false
    }
    fn sample(&self, x: u32, y: u32, band: usize) -> u32 {
        self.base + x + y + band as u32
    }
    fn argb(&self, x: u32, y: u32) -> u32 {
        let v = (self.sample(x, y, 0) >> 8) & 0xFF;
        0xFF00_0000 | (v << 16) | (v << 8) | v
    }
}

/// Run a transcode that cannot be cancelled and unwrap the buffer.
pub fn transcode_all<R: Raster + ?Sized>(request: &EncodeRequest<'_>, raster: &R) -> QoiImage {
    match request.transcode(raster, Unstoppable, &mut NoProgress).unwrap() {
        Outcome::Complete(image) => image,
        Outcome::Aborted(reason) => panic!("unexpected abort: {reason:?}"),
    }
}
