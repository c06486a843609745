//! Test utilities for integration tests.
//!
//! This module provides JPEG fixtures, raw pixel builders and a codec that
//! counts how often the service reaches it.

use std::sync::atomic::{AtomicUsize, Ordering};

use image::codecs::jpeg::JpegEncoder;
use image::{GrayImage, Luma, Rgb, RgbImage};

use jpeg_turbo::request::{DecodeRequest, EncodeRequest};
use jpeg_turbo::{
    Codec, Compressed, Decompressed, JpegCodec, JpegError, JpegService, PixelFormat,
    ServiceConfig,
};

// =============================================================================
// Test JPEG Creation
// =============================================================================

/// Side of the reference colour fixture.
pub const FIXTURE_SIZE: u32 = 560;

/// Create a test RGB JPEG image with a gradient pattern.
pub fn create_test_rgb_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let r = (x % 256) as u8;
        let g = (y % 256) as u8;
        let b = ((x + y) % 256) as u8;
        Rgb([r, g, b])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Create a test grayscale JPEG image.
pub fn create_test_gray_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let img = GrayImage::from_fn(width, height, |x, y| {
        let val = ((x + y) % 256) as u8;
        Luma([val])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&img).unwrap();
    buf
}

/// The 560x560 colour fixture.
pub fn fixture_jpeg() -> Vec<u8> {
    create_test_rgb_jpeg(FIXTURE_SIZE, FIXTURE_SIZE, 85)
}

/// Check if data is a complete JPEG stream (SOI at the start, EOI at the end).
pub fn is_valid_jpeg(data: &[u8]) -> bool {
    data.len() >= 4 && data[..2] == [0xFF, 0xD8] && data[data.len() - 2..] == [0xFF, 0xD9]
}

// =============================================================================
// Raw Pixels
// =============================================================================

/// Gradient pixels in `format`'s layout, rows padded to `stride` bytes.
pub fn create_pixels(width: u32, height: u32, format: PixelFormat, stride: usize) -> Vec<u8> {
    let bpp = format.bytes_per_pixel();
    let stride = stride.max(width as usize * bpp);
    let mut data = vec![0u8; stride * height as usize];

    for y in 0..height as usize {
        for x in 0..width as usize {
            let pixel = &mut data[y * stride + x * bpp..][..bpp];
            let rgb = [(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8];
            match format.rgb_offsets() {
                Some([r, g, b]) => {
                    pixel[r] = rgb[0];
                    pixel[g] = rgb[1];
                    pixel[b] = rgb[2];
                    if let Some(filler) = format.filler_offset() {
                        pixel[filler] = 0xFF;
                    }
                }
                None => pixel[0] = rgb[1],
            }
        }
    }

    data
}

/// Fill a tightly packed image with pseudo-random bytes.
///
/// Noise defeats entropy coding, so it is the worst realistic input for the
/// buffer bound. The same `seed` always yields the same pixels.
pub fn create_noise(width: u32, height: u32, format: PixelFormat, seed: u64) -> Vec<u8> {
    let len = width as usize * height as usize * format.bytes_per_pixel();
    // xorshift64; the state must never be zero
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

// =============================================================================
// Counting Codec
// =============================================================================

/// Wraps the default codec and counts every call that reaches it.
#[derive(Debug, Default)]
pub struct CountingCodec {
    inner: JpegCodec,
    encodes: AtomicUsize,
    decodes: AtomicUsize,
}

impl CountingCodec {
    pub fn encode_calls(&self) -> usize {
        self.encodes.load(Ordering::SeqCst)
    }

    pub fn decode_calls(&self) -> usize {
        self.decodes.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.encode_calls() + self.decode_calls()
    }
}

impl Codec for CountingCodec {
    fn encode(&self, request: EncodeRequest) -> Result<Compressed, JpegError> {
        self.encodes.fetch_add(1, Ordering::SeqCst);
        self.inner.encode(request)
    }

    fn decode(&self, request: DecodeRequest) -> Result<Decompressed, JpegError> {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        self.inner.decode(request)
    }
}

/// A service over a [`CountingCodec`] with default settings.
pub fn counting_service() -> JpegService<CountingCodec> {
    JpegService::with_codec(CountingCodec::default(), ServiceConfig::default())
}
