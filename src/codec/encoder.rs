//! JPEG encoder adapter.
//!
//! Packs the caller's strided rows into the layout the encoder expects and
//! runs `jpeg-encoder` with the requested quality and sampling factors.
//!
//! # Design Decisions
//!
//! - **Always repack**: rows are copied into a contiguous RGB (or luma)
//!   plane first. This removes stride padding and normalises the eleven
//!   caller layouts to the two the encoder needs.
//!
//! - **Grayscale sources need the grayscale mode**: single-channel pixels
//!   cannot be encoded under a mode that carries chroma planes; such
//!   requests fail with a codec error.
//!
//! - **Caller buffers are encoded in place**: output goes straight into the
//!   destination and encoding stops at the first byte that does not fit.
//!   Only callee-allocated output reserves the worst-case bound. A tight
//!   destination that holds the real encoded size succeeds.

use std::io::{self, Write};

use bytes::Bytes;
use jpeg_encoder::{ColorType, Encoder, SamplingFactor};
use tracing::debug;

use crate::error::JpegError;
use crate::format::swizzle::{pack_luma, pack_rgb};
use crate::format::Subsampling;
use crate::request::EncodeRequest;
use crate::sizing::is_unbounded;

use super::{finish_destination, Compressed};

/// Largest width or height a JPEG frame header can express.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Upper limit on the output capacity reserved up front.
///
/// Larger bounds fall back to letting the buffer grow.
pub const MAX_PREALLOCATION: usize = 64 * 1024 * 1024;

/// Sampling factor of the luma component for `subsampling`.
pub fn sampling_factor(subsampling: Subsampling) -> SamplingFactor {
    match subsampling {
        Subsampling::S444 | Subsampling::Gray => SamplingFactor::F_1_1,
        Subsampling::S422 => SamplingFactor::F_2_1,
        Subsampling::S420 => SamplingFactor::F_2_2,
        Subsampling::S440 => SamplingFactor::F_1_2,
    }
}

/// Encode a validated request.
///
/// # Errors
///
/// Returns an error if:
/// - either dimension is zero or exceeds [`MAX_DIMENSION`]
/// - grayscale pixels are paired with a chroma subsampling mode
/// - the encoder fails
/// - the output does not fit a caller-supplied destination
pub fn encode(request: EncodeRequest) -> Result<Compressed, JpegError> {
    let bound = request.max_compressed_size();

    let EncodeRequest {
        source,
        width,
        height,
        format,
        subsampling,
        quality,
        stride,
        destination,
    } = request;

    if width == 0 || height == 0 {
        return Err(JpegError::codec(format!(
            "Invalid image dimensions: {}x{}",
            width, height
        )));
    }

    let (frame_width, frame_height) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(JpegError::codec(format!(
                "Image dimensions {}x{} exceed the JPEG limit of {}",
                width, height, MAX_DIMENSION
            )));
        }
    };

    let (width, height) = (width as usize, height as usize);
    let (pixels, color_type) = match (subsampling.is_gray(), format.rgb_offsets()) {
        (true, _) => (
            pack_luma(&source, width, height, stride, format),
            ColorType::Luma,
        ),
        (false, Some(offsets)) => (
            pack_rgb(&source, width, height, stride, format.bytes_per_pixel(), offsets),
            ColorType::Rgb,
        ),
        (false, None) => {
            return Err(JpegError::codec(format!(
                "Cannot encode grayscale pixels with {} chroma subsampling",
                subsampling
            )));
        }
    };
    let frame = Frame {
        pixels: &pixels,
        width: frame_width,
        height: frame_height,
        color_type,
        quality,
        subsampling,
    };

    match destination {
        None => {
            let mut output = if is_unbounded(bound) || bound as usize > MAX_PREALLOCATION {
                debug!(bound, "Not pre-allocating encode output, buffer will grow");
                Vec::new()
            } else {
                Vec::with_capacity(bound as usize)
            };
            frame.encode_into(&mut output)?;

            let size = output.len();
            Ok(Compressed {
                data: Bytes::from(output),
                size,
            })
        }
        Some(mut buffer) => {
            let capacity = buffer.len();
            let mut writer = SliceWriter::new(&mut buffer[..]);
            let result = frame.encode_into(&mut writer);

            if let Some(required) = writer.overflow {
                return Err(JpegError::EncodingOverflow { required, capacity });
            }
            result?;

            let size = writer.written;
            Ok(Compressed {
                data: finish_destination(buffer, size),
                size,
            })
        }
    }
}

/// Packed pixels plus the encoder settings for one frame.
struct Frame<'a> {
    pixels: &'a [u8],
    width: u16,
    height: u16,
    color_type: ColorType,
    quality: u8,
    subsampling: Subsampling,
}

impl Frame<'_> {
    fn encode_into<W: Write>(&self, writer: W) -> Result<(), JpegError> {
        // libjpeg-style quality 0 behaves as 1
        let mut encoder = Encoder::new(writer, self.quality.max(1));
        if !self.subsampling.is_gray() {
            encoder.set_sampling_factor(sampling_factor(self.subsampling));
        }
        encoder
            .encode(self.pixels, self.width, self.height, self.color_type)
            .map_err(JpegError::codec)
    }
}

/// Writes into a caller buffer and fails at the first write past its end.
///
/// `overflow` records the length the failed write would have needed. The
/// encoder stops there, so it is a lower bound on the full encoded size.
struct SliceWriter<'a> {
    buffer: &'a mut [u8],
    written: usize,
    overflow: Option<usize>,
}

impl<'a> SliceWriter<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            written: 0,
            overflow: None,
        }
    }
}

impl Write for SliceWriter<'_> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let end = self.written + data.len();
        if end > self.buffer.len() {
            self.overflow = Some(end);
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "destination buffer is full",
            ));
        }

        self.buffer[self.written..end].copy_from_slice(data);
        self.written = end;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
