//! Request layer: caller options in, validated descriptors out.
//!
//! ```text
//! EncodeOptions / DecodeOptions  ──▶  validate_*  ──▶  EncodeRequest / DecodeRequest
//!         ▲                                                   │
//!    from_value (JSON)                                        ▼
//!                                                       dispatch → codec
//! ```
//!
//! Validation is pure and fast. It never touches the codec and it runs on
//! the caller's thread for both the blocking and the non-blocking entry
//! points.

mod options;
mod validate;

pub use options::{BufferSizeOptions, DecodeOptions, EncodeOptions};
pub use validate::{
    resolve_buffer_size, validate_decode, validate_encode, DecodeRequest, EncodeRequest,
    MAX_QUALITY, MIN_QUALITY,
};
