//! Codec adapter.
//!
//! The dispatch layer talks to the JPEG machinery only through the [`Codec`]
//! trait, so the entropy coder, DCT and colour conversion stay a black box.
//!
//! # Components
//!
//! - [`Codec`]: the encode/decode contract, implemented by anything that can
//!   be shared across worker threads
//! - [`JpegCodec`]: the default adapter, encoding with `jpeg-encoder` and
//!   decoding with the `image` crate
//! - [`Compressed`] / [`Decompressed`]: results handed back to callers
//!
//! # Buffer Ownership
//!
//! A request either carries a caller-owned destination or asks the codec to
//! allocate. Caller buffers are written in place and returned with their
//! length trimmed to the bytes written; they are never grown. Output that
//! does not fit is reported as an overflow error.

mod decoder;
mod encoder;

use bytes::{Bytes, BytesMut};

use crate::error::JpegError;
use crate::format::PixelFormat;
use crate::request::{DecodeRequest, EncodeRequest};

pub use decoder::decode;
pub use encoder::{encode, sampling_factor, MAX_DIMENSION, MAX_PREALLOCATION};

// =============================================================================
// Results
// =============================================================================

/// Output of a compress call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    /// The JPEG stream, exactly `size` bytes long
    pub data: Bytes,

    /// Number of bytes written
    pub size: usize,
}

/// Output of a decompress call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    /// Decoded pixels, exactly `size` bytes long
    pub data: Bytes,

    /// Width discovered from the stream
    pub width: u32,

    /// Height discovered from the stream
    pub height: u32,

    /// Number of bytes written
    pub size: usize,

    /// Layout of `data`
    pub format: PixelFormat,
}

impl Decompressed {
    /// Bytes per pixel of the output format.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }
}

// =============================================================================
// Codec Trait
// =============================================================================

/// Encode/decode primitive behind the dispatch layer.
///
/// Implementations must be stateless across calls, or at least must not let
/// one call observe another: the service invokes them concurrently from
/// worker threads.
pub trait Codec: Send + Sync + 'static {
    /// Encode the request's pixels.
    ///
    /// Fails with [`JpegError::EncodingOverflow`] if the output exceeds the
    /// destination, [`JpegError::Codec`] for any encoder failure.
    fn encode(&self, request: EncodeRequest) -> Result<Compressed, JpegError>;

    /// Decode the request's stream.
    ///
    /// Fails with [`JpegError::DecodingOverflow`] if the pixels exceed the
    /// destination, [`JpegError::Codec`] for malformed input.
    fn decode(&self, request: DecodeRequest) -> Result<Decompressed, JpegError>;
}

/// The default codec.
#[derive(Debug, Clone, Default)]
pub struct JpegCodec {}

impl JpegCodec {
    pub fn new() -> Self {
        Self {}
    }
}

impl Codec for JpegCodec {
    fn encode(&self, request: EncodeRequest) -> Result<Compressed, JpegError> {
        encoder::encode(request)
    }

    fn decode(&self, request: DecodeRequest) -> Result<Decompressed, JpegError> {
        decoder::decode(request)
    }
}

/// Trim a caller buffer to the `written` bytes at its front and freeze it.
///
/// Truncation keeps the allocation; nothing is copied or reallocated.
fn finish_destination(mut buffer: BytesMut, written: usize) -> Bytes {
    buffer.truncate(written);
    buffer.freeze()
}
