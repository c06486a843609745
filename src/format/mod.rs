//! Format and subsampling registry.
//!
//! This module enumerates the pixel formats and chroma subsampling modes the
//! codec understands, together with their per-pixel and per-MCU costs. It is
//! pure lookup: read-only, process-wide and safe for unsynchronized
//! concurrent use.
//!
//! # Components
//!
//! - [`PixelFormat`]: channel order and count of raw pixel buffers
//! - [`Subsampling`]: chroma decimation scheme of an encoded stream
//! - [`swizzle`]: row packing and channel reordering between the two
//! - [`read_header`]: frame header probe for encoded streams

pub mod header;
pub mod pixel;
pub mod subsampling;
pub mod swizzle;

use serde::Deserialize;

use crate::error::JpegError;

pub use header::{read_header, JpegHeader};
pub use pixel::PixelFormat;
pub use subsampling::{Subsampling, BLOCK_SIZE};

/// A registry value as it arrives from a dynamic boundary: either the
/// numeric code or the case-insensitive name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RegistryCode {
    Code(i64),
    Name(String),
}

/// Bytes per pixel of `format`.
pub fn bytes_per_pixel(format: PixelFormat) -> usize {
    format.bytes_per_pixel()
}

/// Resolve a raw format code and return its bytes per pixel.
///
/// Fails with [`JpegError::InvalidArgument`] for codes outside the
/// enumeration.
pub fn bytes_per_pixel_for_code(code: i64) -> Result<usize, JpegError> {
    Ok(PixelFormat::from_code(code)?.bytes_per_pixel())
}

/// Horizontal and vertical chroma decimation factors of `subsampling`.
pub fn chroma_factors(subsampling: Subsampling) -> (usize, usize) {
    subsampling.chroma_factors()
}

/// Resolve a raw subsampling code and return its chroma factors.
pub fn chroma_factors_for_code(code: i64) -> Result<(usize, usize), JpegError> {
    Ok(Subsampling::from_code(code)?.chroma_factors())
}
