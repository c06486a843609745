//! Caller-facing option sets.
//!
//! Geometry, quality and stride are carried as `i64` so that negative and
//! out-of-range values reach the validator and are rejected there with a
//! precise message. Formats and modes are registry enums; at the dynamic
//! boundary ([`EncodeOptions::from_value`] and friends) they resolve from
//! either their numeric code or their name.

use serde::Deserialize;
use serde_json::Value;

use crate::error::JpegError;
use crate::format::{PixelFormat, Subsampling};

/// Options for [`crate::sizing::max_compressed_size`] lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BufferSizeOptions {
    pub width: i64,
    pub height: i64,
    #[serde(default)]
    pub subsampling: Option<Subsampling>,
}

impl BufferSizeOptions {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            subsampling: None,
        }
    }

    pub fn with_subsampling(mut self, subsampling: Subsampling) -> Self {
        self.subsampling = Some(subsampling);
        self
    }

    /// Parse options from a dynamic value.
    ///
    /// `null`, primitives, arrays, missing or non-integer `width`/`height`
    /// and unknown subsampling values are all rejected.
    pub fn from_value(value: &Value) -> Result<Self, JpegError> {
        parse_object(value)
    }
}

/// Options for a compress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EncodeOptions {
    pub width: i64,
    pub height: i64,
    /// Layout of the source pixels
    pub format: PixelFormat,
    #[serde(default)]
    pub subsampling: Option<Subsampling>,
    /// JPEG quality, 0-100
    #[serde(default)]
    pub quality: Option<i64>,
    /// Bytes between the starts of consecutive source rows
    #[serde(default)]
    pub stride: Option<i64>,
}

impl EncodeOptions {
    pub fn new(width: i64, height: i64, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            subsampling: None,
            quality: None,
            stride: None,
        }
    }

    pub fn with_subsampling(mut self, subsampling: Subsampling) -> Self {
        self.subsampling = Some(subsampling);
        self
    }

    pub fn with_quality(mut self, quality: i64) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_stride(mut self, stride: i64) -> Self {
        self.stride = Some(stride);
        self
    }

    /// Parse options from a dynamic value.
    pub fn from_value(value: &Value) -> Result<Self, JpegError> {
        parse_object(value)
    }

    /// The geometry part of these options, for buffer sizing.
    pub fn buffer_size_options(&self) -> BufferSizeOptions {
        BufferSizeOptions {
            width: self.width,
            height: self.height,
            subsampling: self.subsampling,
        }
    }
}

/// Options for a decompress call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DecodeOptions {
    /// Layout of the output pixels
    #[serde(default)]
    pub format: Option<PixelFormat>,
}

impl DecodeOptions {
    pub fn new(format: PixelFormat) -> Self {
        Self {
            format: Some(format),
        }
    }

    /// Parse options from a dynamic value.
    ///
    /// Decompression tolerates a missing options argument: `None` and `null`
    /// yield the defaults. Any other non-object is rejected.
    pub fn from_value(value: Option<&Value>) -> Result<Self, JpegError> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => parse_object(value),
        }
    }
}

fn parse_object<T>(value: &Value) -> Result<T, JpegError>
where
    T: for<'de> Deserialize<'de>,
{
    if !value.is_object() {
        return Err(JpegError::invalid("Options must be an object"));
    }

    T::deserialize(value).map_err(|e| JpegError::invalid(e.to_string()))
}
