//! JPEG decoder adapter.
//!
//! The frame header is probed first so an undersized caller buffer is
//! rejected before any entropy decoding happens. The pixels are then decoded
//! with the `image` crate and swizzled into the requested layout.

use std::io::Cursor;

use bytes::BytesMut;
use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::debug;

use crate::error::JpegError;
use crate::format::swizzle::{unpack_luma, unpack_rgb};
use crate::format::{read_header, PixelFormat};
use crate::request::DecodeRequest;

use super::{finish_destination, Decompressed};

/// Decode a validated request.
///
/// # Errors
///
/// Returns an error if:
/// - the stream has no readable frame header
/// - the decoded pixels do not fit a caller-supplied destination
/// - the entropy-coded data is corrupt or truncated
pub fn decode(request: DecodeRequest) -> Result<Decompressed, JpegError> {
    let DecodeRequest {
        source,
        format,
        destination,
    } = request;

    let header = read_header(&source)?;
    let required = (header.width as usize)
        .checked_mul(header.height as usize)
        .and_then(|pixels| pixels.checked_mul(format.bytes_per_pixel()))
        .ok_or_else(|| {
            JpegError::codec(format!(
                "Image dimensions {}x{} overflow the output size",
                header.width, header.height
            ))
        })?;

    if let Some(buffer) = &destination {
        if buffer.len() < required {
            return Err(JpegError::DecodingOverflow {
                required,
                capacity: buffer.len(),
            });
        }
    }

    let image = ImageReader::with_format(Cursor::new(&source[..]), ImageFormat::Jpeg)
        .decode()
        .map_err(|e| JpegError::codec(format!("Failed to decode JPEG: {}", e)))?;

    if (image.width(), image.height()) != (header.width, header.height) {
        return Err(JpegError::codec(format!(
            "Decoded size {}x{} does not match frame header {}x{}",
            image.width(),
            image.height(),
            header.width,
            header.height
        )));
    }

    debug!(
        width = header.width,
        height = header.height,
        components = header.components,
        format = %format,
        "Decoded JPEG frame"
    );

    let mut buffer = destination.unwrap_or_else(|| BytesMut::zeroed(required));
    write_pixels(image, format, &mut buffer[..required]);

    Ok(Decompressed {
        data: finish_destination(buffer, required),
        width: header.width,
        height: header.height,
        size: required,
        format,
    })
}

fn write_pixels(image: DynamicImage, format: PixelFormat, out: &mut [u8]) {
    if image.color().has_color() {
        unpack_rgb(image.into_rgb8().as_raw(), format, out);
    } else {
        unpack_luma(image.into_luma8().as_raw(), format, out);
    }
}
