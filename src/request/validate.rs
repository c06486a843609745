//! Parameter validation.
//!
//! Every caller-supplied argument is checked here, before the codec is
//! involved. The output is a fully resolved request descriptor: defaults
//! applied, geometry converted to the codec's integer domain, and the
//! destination normalised to "caller buffer" or "allocate".

use bytes::{Bytes, BytesMut};

use crate::config::ServiceConfig;
use crate::error::JpegError;
use crate::format::{PixelFormat, Subsampling};
use crate::sizing::max_compressed_size;

use super::options::{BufferSizeOptions, DecodeOptions, EncodeOptions};

/// Lowest accepted JPEG quality.
pub const MIN_QUALITY: i64 = 0;

/// Highest accepted JPEG quality.
pub const MAX_QUALITY: i64 = 100;

// =============================================================================
// Request Descriptors
// =============================================================================

/// A validated compress request.
#[derive(Debug, Clone)]
pub struct EncodeRequest {
    /// Source pixels; may extend past `stride * height`
    pub source: Bytes,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub subsampling: Subsampling,
    pub quality: u8,
    /// Effective row stride in bytes
    pub stride: usize,
    /// Caller-owned output buffer; `None` asks the codec to allocate
    pub destination: Option<BytesMut>,
}

impl EncodeRequest {
    /// Bytes of source data the request reads.
    pub fn required_source_len(&self) -> usize {
        self.stride * self.height as usize
    }

    /// Worst-case encoded size for this request's geometry.
    pub fn max_compressed_size(&self) -> u32 {
        max_compressed_size(self.width as i64, self.height as i64, self.subsampling)
    }
}

/// A validated decompress request.
///
/// Geometry is not part of the request; the codec reads it from the stream.
#[derive(Debug, Clone)]
pub struct DecodeRequest {
    pub source: Bytes,
    /// Layout of the output pixels
    pub format: PixelFormat,
    /// Caller-owned output buffer; `None` asks the codec to allocate
    pub destination: Option<BytesMut>,
}

// =============================================================================
// Validation
// =============================================================================

/// Resolve the subsampling mode of a buffer-size lookup.
pub fn resolve_buffer_size(options: &BufferSizeOptions, defaults: &ServiceConfig) -> Subsampling {
    options.subsampling.unwrap_or(defaults.default_subsampling)
}

/// Validate a compress call.
///
/// # Errors
///
/// Returns [`JpegError::InvalidArgument`] if:
/// - `width` or `height` is negative or beyond `u32`
/// - `quality` lies outside 0-100
/// - `stride` is negative
/// - the geometry overflows byte-count arithmetic
/// - `source` is shorter than `stride * height`
///
/// The destination is not checked against the output size here; a buffer
/// that turns out too small is reported by the codec.
pub fn validate_encode(
    source: Bytes,
    destination: Option<BytesMut>,
    options: &EncodeOptions,
    defaults: &ServiceConfig,
) -> Result<EncodeRequest, JpegError> {
    let width = dimension("width", options.width)?;
    let height = dimension("height", options.height)?;
    let format = options.format;
    let subsampling = options.subsampling.unwrap_or(defaults.default_subsampling);

    let quality = match options.quality {
        Some(quality) if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) => {
            return Err(JpegError::invalid(format!(
                "Invalid quality: {} (must be between {} and {})",
                quality, MIN_QUALITY, MAX_QUALITY
            )));
        }
        Some(quality) => quality as u8,
        None => defaults.default_quality,
    };

    let min_stride = (width as usize)
        .checked_mul(format.bytes_per_pixel())
        .ok_or_else(|| JpegError::invalid("Image width overflows row size"))?;

    let stride = match options.stride {
        Some(stride) if stride < 0 => {
            return Err(JpegError::invalid(format!("Invalid stride: {}", stride)));
        }
        Some(stride) => usize::try_from(stride)
            .map_err(|_| JpegError::invalid(format!("Stride out of range: {}", stride)))?
            .max(min_stride),
        None => min_stride,
    };

    let required = stride
        .checked_mul(height as usize)
        .ok_or_else(|| JpegError::invalid("Image geometry overflows buffer size"))?;

    if source.len() < required {
        return Err(JpegError::invalid(format!(
            "Insufficient source data: need {} bytes ({} x {} stride), got {}",
            required,
            height,
            stride,
            source.len()
        )));
    }

    Ok(EncodeRequest {
        source,
        width,
        height,
        format,
        subsampling,
        quality,
        stride,
        destination: normalize_destination(destination),
    })
}

/// Validate a decompress call.
///
/// # Errors
///
/// Returns [`JpegError::InvalidArgument`] if `source` is empty.
pub fn validate_decode(
    source: Bytes,
    destination: Option<BytesMut>,
    options: &DecodeOptions,
    defaults: &ServiceConfig,
) -> Result<DecodeRequest, JpegError> {
    if source.is_empty() {
        return Err(JpegError::invalid("Invalid source buffer: empty"));
    }

    Ok(DecodeRequest {
        source,
        format: options.format.unwrap_or(defaults.default_decode_format),
        destination: normalize_destination(destination),
    })
}

fn dimension(name: &str, value: i64) -> Result<u32, JpegError> {
    if value < 0 {
        return Err(JpegError::invalid(format!("Invalid {}: {}", name, value)));
    }

    u32::try_from(value)
        .map_err(|_| JpegError::invalid(format!("{} out of range: {}", name, value)))
}

/// A zero-length destination means "allocate for me".
fn normalize_destination(destination: Option<BytesMut>) -> Option<BytesMut> {
    destination.filter(|buffer| !buffer.is_empty())
}

// =============================================================================
// Tests
// =============================================================================
