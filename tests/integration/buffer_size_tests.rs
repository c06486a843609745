//! Buffer size integration tests.
//!
//! Tests verify:
//! - Degenerate and overflowing geometry yields the sentinel
//! - Bounds are ordered by chroma density
//! - Omitting the mode equals passing the configured default
//! - Real encodes never exceed the bound
//! - Noise at full quality fits a destination of exactly the bound

use bytes::BytesMut;
use jpeg_turbo::{
    max_compressed_size, BufferSizeOptions, EncodeOptions, JpegService, PixelFormat,
    ServiceConfig, Subsampling, UNBOUNDED,
};

use super::test_utils::{create_noise, create_pixels};

// =============================================================================
// Sentinel
// =============================================================================

#[test]
fn test_zero_and_negative_geometry_is_unbounded() {
    let service = JpegService::new();
    for (width, height) in [(0, 0), (0, 10), (10, 0), (-1, 10), (10, -5), (i64::MIN, 1)] {
        for subsampling in Subsampling::ALL {
            let options = BufferSizeOptions::new(width, height).with_subsampling(subsampling);
            assert_eq!(service.buffer_size(&options), UNBOUNDED, "{}x{}", width, height);
        }
    }
}

#[test]
fn test_overflowing_geometry_is_unbounded() {
    let service = JpegService::new();
    for (width, height) in [(1 << 20, 1 << 20), (i64::MAX, 1), (1, i64::MAX), (65536, 65536)] {
        let options = BufferSizeOptions::new(width, height);
        assert_eq!(service.buffer_size(&options), UNBOUNDED, "{}x{}", width, height);
    }
}

// =============================================================================
// Ordering and Defaults
// =============================================================================

#[test]
fn test_monotonic_in_chroma_density() {
    for (width, height) in [(1, 1), (7, 3), (10, 10), (17, 33), (50, 50), (1000, 500)] {
        let s444 = max_compressed_size(width, height, Subsampling::S444);
        let s422 = max_compressed_size(width, height, Subsampling::S422);
        let s440 = max_compressed_size(width, height, Subsampling::S440);
        let s420 = max_compressed_size(width, height, Subsampling::S420);
        let gray = max_compressed_size(width, height, Subsampling::Gray);

        assert!(s444 >= s422 && s444 >= s440, "{}x{}", width, height);
        assert!(s422 >= s420 && s440 >= s420, "{}x{}", width, height);
        assert!(s420 >= gray, "{}x{}", width, height);
    }
}

#[test]
fn test_omitted_mode_equals_default() {
    let service = JpegService::new();
    let omitted = service.buffer_size(&BufferSizeOptions::new(321, 123));
    let explicit =
        service.buffer_size(&BufferSizeOptions::new(321, 123).with_subsampling(Subsampling::S420));
    assert_eq!(omitted, explicit);

    let service = JpegService::with_config(ServiceConfig {
        default_subsampling: Subsampling::S444,
        ..ServiceConfig::default()
    });
    assert_eq!(
        service.buffer_size(&BufferSizeOptions::new(321, 123)),
        max_compressed_size(321, 123, Subsampling::S444)
    );
}

#[test]
fn test_reference_values() {
    let size = max_compressed_size(1000, 500, Subsampling::S420);
    assert!(size > 100_000 && size < 4_000_000, "{}", size);

    assert_eq!(max_compressed_size(10, 10, Subsampling::S420), 2816);
    assert_eq!(max_compressed_size(50, 50, Subsampling::S444), 26624);
    assert_eq!(max_compressed_size(50, 50, Subsampling::S420), 14336);
    assert_eq!(max_compressed_size(50, 50, Subsampling::Gray), 10240);
}

// =============================================================================
// Bound Holds for Real Output
// =============================================================================

#[test]
fn test_encoded_size_within_bound() {
    let service = JpegService::new();

    for subsampling in Subsampling::ALL {
        for (width, height) in [(1i64, 1i64), (15, 9), (64, 48), (130, 70)] {
            let format = if subsampling.is_gray() {
                PixelFormat::Gray
            } else {
                PixelFormat::Rgb
            };
            let pixels = create_pixels(width as u32, height as u32, format, 0);
            let options = EncodeOptions::new(width, height, format)
                .with_subsampling(subsampling)
                .with_quality(100);

            let bound = service.buffer_size(&options.buffer_size_options());
            let compressed = service.compress_sync(pixels, None, &options).unwrap();
            assert!(
                compressed.size as u64 <= bound as u64,
                "{} {}x{}: {} > {}",
                subsampling,
                width,
                height,
                compressed.size,
                bound
            );
        }
    }
}

#[test]
fn test_noise_fits_destination_of_buffer_size() {
    let service = JpegService::new();
    let sizes = [(1, 1), (7, 9), (33, 17), (64, 64), (255, 129), (256, 256)];

    for subsampling in Subsampling::ALL {
        let format = if subsampling.is_gray() {
            PixelFormat::Gray
        } else {
            PixelFormat::Rgb
        };
        for (seed, (width, height)) in sizes.into_iter().enumerate() {
            let pixels = create_noise(width as u32, height as u32, format, seed as u64 + 1);
            let options = EncodeOptions::new(width, height, format)
                .with_subsampling(subsampling)
                .with_quality(100);

            let bound = service.buffer_size(&options.buffer_size_options());
            let destination = BytesMut::zeroed(bound as usize);
            let compressed = service
                .compress_sync(pixels, Some(destination), &options)
                .unwrap_or_else(|e| panic!("{} {}x{}: {}", subsampling, width, height, e));
            assert!(compressed.size <= bound as usize);
        }
    }
}
