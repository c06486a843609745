use thiserror::Error;

/// Errors produced by sizing, validation, dispatch and the codec.
///
/// Validation failures are always [`JpegError::InvalidArgument`] and are
/// raised before any codec call, even on the asynchronous entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JpegError {
    /// Malformed, missing, out-of-range or wrong-shape caller input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Encoded output does not fit the caller-supplied destination.
    ///
    /// Encoding stops at the first byte past `capacity`, so `required` is a
    /// lower bound. [`crate::max_compressed_size`] gives a size that fits.
    #[error("Insufficient output buffer: need at least {required} bytes, got {capacity}")]
    EncodingOverflow { required: usize, capacity: usize },

    /// Decoded pixels do not fit the caller-supplied destination
    #[error("Insufficient output buffer: decoded size is {required} bytes, got {capacity}")]
    DecodingOverflow { required: usize, capacity: usize },

    /// Internal encoder/decoder failure (corrupt stream, unsupported combination)
    #[error("Codec error: {reason}")]
    Codec { reason: String },

    /// The background worker could not be reached or did not complete
    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

/// Fieldless view of [`JpegError`], used to compare outcomes across entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    EncodingOverflow,
    DecodingOverflow,
    Codec,
    Dispatch,
}

impl JpegError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        JpegError::InvalidArgument(message.into())
    }

    pub(crate) fn codec(reason: impl ToString) -> Self {
        JpegError::Codec {
            reason: reason.to_string(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            JpegError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            JpegError::EncodingOverflow { .. } => ErrorKind::EncodingOverflow,
            JpegError::DecodingOverflow { .. } => ErrorKind::DecodingOverflow,
            JpegError::Codec { .. } => ErrorKind::Codec,
            JpegError::Dispatch(_) => ErrorKind::Dispatch,
        }
    }

    /// Whether the error was raised by the validator.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    /// Whether the destination buffer was too small.
    pub fn is_overflow(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::EncodingOverflow | ErrorKind::DecodingOverflow
        )
    }
}
