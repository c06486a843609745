//! Pixel formats accepted as codec inputs and produced as codec outputs.
//!
//! Formats are identified by the same numeric codes the libjpeg-turbo
//! `TJPF_*` constants use, so raw codes coming from a dynamic boundary map
//! one-to-one. Anything outside the enumeration is rejected; nothing is ever
//! coerced to a default.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::JpegError;

use super::RegistryCode;

/// Channel order and count of an uncompressed pixel buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RegistryCode")]
pub enum PixelFormat {
    #[default]
    Rgb,
    Bgr,
    Rgbx,
    Bgrx,
    Xbgr,
    Xrgb,
    Gray,
    Rgba,
    Bgra,
    Abgr,
    Argb,
}

impl PixelFormat {
    /// Every format, in code order.
    pub const ALL: [PixelFormat; 11] = [
        PixelFormat::Rgb,
        PixelFormat::Bgr,
        PixelFormat::Rgbx,
        PixelFormat::Bgrx,
        PixelFormat::Xbgr,
        PixelFormat::Xrgb,
        PixelFormat::Gray,
        PixelFormat::Rgba,
        PixelFormat::Bgra,
        PixelFormat::Abgr,
        PixelFormat::Argb,
    ];

    /// Resolve a numeric format code.
    pub fn from_code(code: i64) -> Result<Self, JpegError> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| JpegError::invalid(format!("Invalid pixel format code: {}", code)))
    }

    /// Numeric code of this format.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Lower-case name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            PixelFormat::Rgb => "rgb",
            PixelFormat::Bgr => "bgr",
            PixelFormat::Rgbx => "rgbx",
            PixelFormat::Bgrx => "bgrx",
            PixelFormat::Xbgr => "xbgr",
            PixelFormat::Xrgb => "xrgb",
            PixelFormat::Gray => "gray",
            PixelFormat::Rgba => "rgba",
            PixelFormat::Bgra => "bgra",
            PixelFormat::Abgr => "abgr",
            PixelFormat::Argb => "argb",
        }
    }

    /// Bytes occupied by one pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb | PixelFormat::Bgr => 3,
            PixelFormat::Rgbx
            | PixelFormat::Bgrx
            | PixelFormat::Xbgr
            | PixelFormat::Xrgb
            | PixelFormat::Rgba
            | PixelFormat::Bgra
            | PixelFormat::Abgr
            | PixelFormat::Argb => 4,
        }
    }

    /// Byte offsets of the red, green and blue samples within a pixel.
    ///
    /// `None` for [`PixelFormat::Gray`].
    pub const fn rgb_offsets(self) -> Option<[usize; 3]> {
        match self {
            PixelFormat::Gray => None,
            PixelFormat::Rgb | PixelFormat::Rgbx | PixelFormat::Rgba => Some([0, 1, 2]),
            PixelFormat::Bgr | PixelFormat::Bgrx | PixelFormat::Bgra => Some([2, 1, 0]),
            PixelFormat::Xbgr | PixelFormat::Abgr => Some([3, 2, 1]),
            PixelFormat::Xrgb | PixelFormat::Argb => Some([1, 2, 3]),
        }
    }

    /// Byte offset of the padding or alpha sample, if the format has one.
    pub const fn filler_offset(self) -> Option<usize> {
        match self {
            PixelFormat::Rgbx | PixelFormat::Bgrx | PixelFormat::Rgba | PixelFormat::Bgra => {
                Some(3)
            }
            PixelFormat::Xbgr | PixelFormat::Xrgb | PixelFormat::Abgr | PixelFormat::Argb => {
                Some(0)
            }
            _ => None,
        }
    }

    /// Whether this is the single-channel grayscale format.
    pub const fn is_gray(self) -> bool {
        matches!(self, PixelFormat::Gray)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = JpegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.name() == lower)
            .ok_or_else(|| JpegError::invalid(format!("Invalid pixel format: {:?}", s)))
    }
}

impl TryFrom<i64> for PixelFormat {
    type Error = JpegError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl TryFrom<RegistryCode> for PixelFormat {
    type Error = JpegError;

    fn try_from(code: RegistryCode) -> Result<Self, Self::Error> {
        match code {
            RegistryCode::Code(code) => Self::from_code(code),
            RegistryCode::Name(name) => name.parse(),
        }
    }
}
