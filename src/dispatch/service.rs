//! The JPEG service: validate, then run the codec inline or on a worker.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           JpegService                            │
//! │                                                                  │
//! │  compress_sync ─┐                        ┌─▶ codec (this thread) │
//! │  compress ──────┼─▶ validate (caller) ───┼─▶ spawn_blocking ─▶ Pending
//! │  compress_with ─┘        │               └─▶ spawn_blocking ─▶ callback
//! │                          ▼                                       │
//! │                 Err(InvalidArgument)                             │
//! │                 returned immediately                             │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decompression follows the same three shapes.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use serde_json::Value;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::codec::{Codec, Compressed, Decompressed, JpegCodec};
use crate::config::ServiceConfig;
use crate::error::JpegError;
use crate::format::{read_header, JpegHeader};
use crate::request::{
    resolve_buffer_size, validate_decode, validate_encode, BufferSizeOptions, DecodeOptions,
    EncodeOptions,
};
use crate::sizing::max_compressed_size;

use super::pending::Pending;

/// Entry point for buffer sizing, compression and decompression.
///
/// The service holds no per-call state. Cloning it is cheap and clones share
/// the codec.
///
/// # Example
///
/// ```ignore
/// use jpeg_turbo::{EncodeOptions, JpegService, PixelFormat};
///
/// let service = JpegService::new();
/// let options = EncodeOptions::new(20, 10, PixelFormat::Bgra);
///
/// let jpeg = service.compress_sync(pixels.clone(), None, &options)?;
/// let same = service.compress(pixels, None, &options)?.await?;
/// assert_eq!(jpeg.data, same.data);
/// ```
#[derive(Debug)]
pub struct JpegService<C: Codec = JpegCodec> {
    codec: Arc<C>,
    config: ServiceConfig,
    runtime: Option<Handle>,
}

impl<C: Codec> Clone for JpegService<C> {
    fn clone(&self) -> Self {
        Self {
            codec: Arc::clone(&self.codec),
            config: self.config,
            runtime: self.runtime.clone(),
        }
    }
}

impl JpegService<JpegCodec> {
    /// Create a service with the default codec and defaults.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    /// Create a service with the default codec and custom defaults.
    pub fn with_config(config: ServiceConfig) -> Self {
        Self::with_codec(JpegCodec::new(), config)
    }
}

impl Default for JpegService<JpegCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> JpegService<C> {
    /// Create a service over a custom codec.
    pub fn with_codec(codec: C, config: ServiceConfig) -> Self {
        Self::with_shared_codec(Arc::new(codec), config)
    }

    /// Create a service over a codec shared with other components.
    pub fn with_shared_codec(codec: Arc<C>, config: ServiceConfig) -> Self {
        Self {
            codec,
            config,
            runtime: None,
        }
    }

    /// Run non-blocking calls on `handle` instead of the ambient runtime.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn codec(&self) -> &Arc<C> {
        &self.codec
    }

    // =========================================================================
    // Buffer Size
    // =========================================================================

    /// Worst-case compressed size for the geometry, or `u32::MAX` for
    /// geometry that cannot be encoded.
    pub fn buffer_size(&self, options: &BufferSizeOptions) -> u32 {
        let subsampling = resolve_buffer_size(options, &self.config);
        max_compressed_size(options.width, options.height, subsampling)
    }

    /// [`buffer_size`](Self::buffer_size) for options given as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`JpegError::InvalidArgument`] if the value is not a valid
    /// options object.
    pub fn buffer_size_value(&self, options: &Value) -> Result<u32, JpegError> {
        let options = BufferSizeOptions::from_value(options).inspect_err(log_rejection)?;
        Ok(self.buffer_size(&options))
    }

    // =========================================================================
    // Compress
    // =========================================================================

    /// Compress on the calling thread.
    ///
    /// A zero-length `destination` is the same as `None`: the codec
    /// allocates.
    ///
    /// # Destination Ownership
    ///
    /// `destination` is moved in. On success its memory backs the returned
    /// [`Compressed::data`]. On any error it is dropped with partially
    /// written contents. To retry after [`JpegError::EncodingOverflow`],
    /// allocate a new buffer of [`buffer_size`](Self::buffer_size) bytes.
    pub fn compress_sync(
        &self,
        source: impl Into<Bytes>,
        destination: Option<BytesMut>,
        options: &EncodeOptions,
    ) -> Result<Compressed, JpegError> {
        let request = validate_encode(source.into(), destination, options, &self.config)
            .inspect_err(log_rejection)?;
        self.codec.encode(request).inspect_err(log_codec_failure)
    }

    /// Compress on a blocking worker.
    ///
    /// Argument errors are returned here, before anything is scheduled.
    /// Codec errors arrive through the returned future. `destination` is
    /// owned as described for [`compress_sync`](Self::compress_sync).
    pub fn compress(
        &self,
        source: impl Into<Bytes>,
        destination: Option<BytesMut>,
        options: &EncodeOptions,
    ) -> Result<Pending<Compressed>, JpegError> {
        let request = validate_encode(source.into(), destination, options, &self.config)
            .inspect_err(log_rejection)?;
        let codec = Arc::clone(&self.codec);

        debug!(
            width = request.width,
            height = request.height,
            format = %request.format,
            subsampling = %request.subsampling,
            "Dispatching compress"
        );
        self.spawn(move || codec.encode(request).inspect_err(log_codec_failure))
    }

    /// Compress on a blocking worker and hand the outcome to `callback`.
    ///
    /// Argument errors are returned here and `callback` is never called.
    /// Otherwise `callback` runs exactly once on the worker, with a
    /// [`JpegError::Dispatch`] if the codec panicked.
    pub fn compress_with<F>(
        &self,
        source: impl Into<Bytes>,
        destination: Option<BytesMut>,
        options: &EncodeOptions,
        callback: F,
    ) -> Result<(), JpegError>
    where
        F: FnOnce(Result<Compressed, JpegError>) + Send + 'static,
    {
        let request = validate_encode(source.into(), destination, options, &self.config)
            .inspect_err(log_rejection)?;
        let codec = Arc::clone(&self.codec);

        debug!(
            width = request.width,
            height = request.height,
            "Dispatching compress with callback"
        );
        self.spawn_callback(move || codec.encode(request), callback)
    }

    // =========================================================================
    // Decompress
    // =========================================================================

    /// Decompress on the calling thread.
    ///
    /// `options` of `None` decodes to the default format.
    ///
    /// # Destination Ownership
    ///
    /// `destination` is moved in and dropped on any error, without being
    /// written. [`JpegError::DecodingOverflow`] reports the exact size to
    /// allocate for a retry.
    pub fn decompress_sync(
        &self,
        source: impl Into<Bytes>,
        destination: Option<BytesMut>,
        options: Option<&DecodeOptions>,
    ) -> Result<Decompressed, JpegError> {
        let options = options.copied().unwrap_or_default();
        let request = validate_decode(source.into(), destination, &options, &self.config)
            .inspect_err(log_rejection)?;
        self.codec.decode(request).inspect_err(log_codec_failure)
    }

    /// Decompress on a blocking worker.
    ///
    /// Argument errors are returned here, before anything is scheduled.
    /// `destination` is owned as described for
    /// [`decompress_sync`](Self::decompress_sync).
    pub fn decompress(
        &self,
        source: impl Into<Bytes>,
        destination: Option<BytesMut>,
        options: Option<&DecodeOptions>,
    ) -> Result<Pending<Decompressed>, JpegError> {
        let options = options.copied().unwrap_or_default();
        let request = validate_decode(source.into(), destination, &options, &self.config)
            .inspect_err(log_rejection)?;
        let codec = Arc::clone(&self.codec);

        debug!(
            bytes = request.source.len(),
            format = %request.format,
            "Dispatching decompress"
        );
        self.spawn(move || codec.decode(request).inspect_err(log_codec_failure))
    }

    /// Decompress on a blocking worker and hand the outcome to `callback`.
    ///
    /// Same delivery rules as [`compress_with`](Self::compress_with).
    pub fn decompress_with<F>(
        &self,
        source: impl Into<Bytes>,
        destination: Option<BytesMut>,
        options: Option<&DecodeOptions>,
        callback: F,
    ) -> Result<(), JpegError>
    where
        F: FnOnce(Result<Decompressed, JpegError>) + Send + 'static,
    {
        let options = options.copied().unwrap_or_default();
        let request = validate_decode(source.into(), destination, &options, &self.config)
            .inspect_err(log_rejection)?;
        let codec = Arc::clone(&self.codec);

        debug!(
            bytes = request.source.len(),
            "Dispatching decompress with callback"
        );
        self.spawn_callback(move || codec.decode(request), callback)
    }

    /// Read a JPEG's geometry and subsampling without decoding it.
    pub fn header(&self, source: &[u8]) -> Result<JpegHeader, JpegError> {
        if source.is_empty() {
            let err = JpegError::invalid("Invalid source buffer: empty");
            log_rejection(&err);
            return Err(err);
        }
        read_header(source)
    }

    // =========================================================================
    // Workers
    // =========================================================================

    fn handle(&self) -> Result<Handle, JpegError> {
        match &self.runtime {
            Some(handle) => Ok(handle.clone()),
            None => Handle::try_current().map_err(|e| {
                JpegError::Dispatch(format!("No async runtime available: {}", e))
            }),
        }
    }

    fn spawn<T, F>(&self, job: F) -> Result<Pending<T>, JpegError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, JpegError> + Send + 'static,
    {
        let handle = self.handle()?;
        Ok(Pending::new(handle.spawn_blocking(job)))
    }

    fn spawn_callback<T, F, K>(&self, job: F, callback: K) -> Result<(), JpegError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, JpegError> + Send + 'static,
        K: FnOnce(Result<T, JpegError>) + Send + 'static,
    {
        let handle = self.handle()?;
        handle.spawn_blocking(move || {
            let result = match catch_unwind(AssertUnwindSafe(job)) {
                Ok(result) => result,
                Err(_) => Err(JpegError::Dispatch("Codec worker panicked".to_string())),
            };
            if let Err(e) = &result {
                log_codec_failure(e);
            }
            callback(result);
        });
        Ok(())
    }
}

fn log_rejection(error: &JpegError) {
    debug!(error_type = ?error.kind(), "Rejected request: {}", error);
}

fn log_codec_failure(error: &JpegError) {
    warn!(error_type = ?error.kind(), "Codec call failed: {}", error);
}

// =============================================================================
// Tests
// =============================================================================
