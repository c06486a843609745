//! # jpeg-turbo
//!
//! Validated JPEG compression and decompression of raw pixel buffers.
//!
//! This library sits in front of a JPEG codec and owns everything around it:
//! worst-case output sizing, argument validation and the blocking and
//! non-blocking call paths. The codec itself is a pluggable black box.
//!
//! ## Features
//!
//! - **Buffer sizing**: an upper bound on the encoded size for any geometry and
//!   chroma subsampling, computed without touching the codec
//! - **Eager validation**: every argument is checked before the codec runs,
//!   and argument errors are reported synchronously on every entry point
//! - **Dual dispatch**: identical results from the blocking and the
//!   tokio-backed entry points
//! - **Caller buffers**: output can be written into a caller-owned buffer that
//!   is never reallocated
//!
//! ## Architecture
//!
//! - [`mod@format`] - pixel formats, subsampling modes, header probing
//! - [`sizing`] - worst-case compressed size
//! - [`request`] - caller options and the parameter validator
//! - [`codec`] - codec trait and the default adapter
//! - [`dispatch`] - the service and its entry points
//! - [`config`] - service defaults and CLI types
//! - [`error`] - the uniform error channel
//!
//! ## Example
//!
//! ```rust,no_run
//! use jpeg_turbo::{BufferSizeOptions, EncodeOptions, JpegService, PixelFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), jpeg_turbo::JpegError> {
//!     let service = JpegService::new();
//!     let pixels = vec![0u8; 20 * 10 * 4];
//!
//!     let bound = service.buffer_size(&BufferSizeOptions::new(20, 10));
//!     let options = EncodeOptions::new(20, 10, PixelFormat::Bgra).with_quality(90);
//!
//!     let jpeg = service.compress(pixels, None, &options)?.await?;
//!     assert!(jpeg.size as u32 <= bound);
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod request;
pub mod sizing;

// Re-export commonly used types
pub use codec::{Codec, Compressed, Decompressed, JpegCodec};
pub use config::{Cli, Command, ServiceConfig};
pub use dispatch::{JpegService, Pending};
pub use error::{ErrorKind, JpegError};
pub use format::{read_header, JpegHeader, PixelFormat, Subsampling};
pub use request::{
    validate_decode, validate_encode, BufferSizeOptions, DecodeOptions, DecodeRequest,
    EncodeOptions, EncodeRequest,
};
pub use sizing::{max_compressed_size, UNBOUNDED};
