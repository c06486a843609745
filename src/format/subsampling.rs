//! Chroma subsampling modes.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::JpegError;

use super::RegistryCode;

/// Edge of a DCT block in samples.
pub const BLOCK_SIZE: usize = 8;

/// Chroma subsampling scheme used when encoding.
///
/// Codes follow libjpeg-turbo's `TJSAMP_*` numbering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RegistryCode")]
pub enum Subsampling {
    /// 4:4:4, no chroma decimation
    S444,
    /// 4:2:2, chroma halved horizontally
    S422,
    /// 4:2:0, chroma halved in both directions
    #[default]
    S420,
    /// Luma only
    Gray,
    /// 4:4:0, chroma halved vertically
    S440,
}

impl Subsampling {
    /// Every mode, in code order.
    pub const ALL: [Subsampling; 5] = [
        Subsampling::S444,
        Subsampling::S422,
        Subsampling::S420,
        Subsampling::Gray,
        Subsampling::S440,
    ];

    /// Resolve a numeric subsampling code.
    pub fn from_code(code: i64) -> Result<Self, JpegError> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| JpegError::invalid(format!("Invalid subsampling code: {}", code)))
    }

    /// Numeric code of this mode.
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Subsampling::S444 => "444",
            Subsampling::S422 => "422",
            Subsampling::S420 => "420",
            Subsampling::Gray => "gray",
            Subsampling::S440 => "440",
        }
    }

    /// Horizontal and vertical chroma decimation factors.
    ///
    /// Grayscale is the degenerate 1x1 luma-only case.
    pub const fn chroma_factors(self) -> (usize, usize) {
        match self {
            Subsampling::S444 | Subsampling::Gray => (1, 1),
            Subsampling::S422 => (2, 1),
            Subsampling::S420 => (2, 2),
            Subsampling::S440 => (1, 2),
        }
    }

    /// Width and height of one minimum coded unit in pixels.
    pub const fn mcu_size(self) -> (usize, usize) {
        let (h, v) = self.chroma_factors();
        (BLOCK_SIZE * h, BLOCK_SIZE * v)
    }

    /// Whether the mode encodes a single luma plane.
    pub const fn is_gray(self) -> bool {
        matches!(self, Subsampling::Gray)
    }

    /// Identify the mode from per-component sampling factors of a frame header.
    ///
    /// `factors` holds the `(h, v)` pair of each component, luma first.
    pub fn from_sampling_factors(factors: &[(u8, u8)]) -> Option<Self> {
        match factors {
            [_] => Some(Subsampling::Gray),
            [(yh, yv), (1, 1), (1, 1)] => {
                Self::ALL
                    .into_iter()
                    .filter(|mode| !mode.is_gray())
                    .find(|mode| mode.chroma_factors() == (*yh as usize, *yv as usize))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Subsampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subsampling {
    type Err = JpegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let stripped = lower.replace(':', "");
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == stripped)
            .ok_or_else(|| JpegError::invalid(format!("Invalid subsampling: {:?}", s)))
    }
}

impl TryFrom<i64> for Subsampling {
    type Error = JpegError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl TryFrom<RegistryCode> for Subsampling {
    type Error = JpegError;

    fn try_from(code: RegistryCode) -> Result<Self, Self::Error> {
        match code {
            RegistryCode::Code(code) => Self::from_code(code),
            RegistryCode::Name(name) => name.parse(),
        }
    }
}
