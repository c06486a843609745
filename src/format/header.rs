//! JPEG header probing.
//!
//! Reads the frame header (SOFn segment) of a JPEG stream without decoding
//! any entropy-coded data. The decoder uses this to learn the output
//! geometry, and therefore the required destination size, before it commits
//! to a full decode.
//!
//! # Stream Layout
//!
//! A JPEG stream is SOI (FFD8) followed by marker segments. Each segment is
//! `FF xx` plus a 2-byte big-endian length that includes the length field
//! itself. The frame header carries:
//!
//! ```text
//! precision(1) height(2) width(2) components(1) { id(1) HV(1) Tq(1) } * components
//! ```

use crate::error::JpegError;

use super::Subsampling;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Start Of Scan marker
pub const SOS: [u8; 2] = [0xFF, 0xDA];

/// Define Huffman Table marker
const DHT: u8 = 0xC4;

/// Define Arithmetic Coding marker
const DAC: u8 = 0xCC;

/// Reserved JPG extension marker
const JPG: u8 = 0xC8;

// =============================================================================
// Header
// =============================================================================

/// Geometry and sampling information read from a frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegHeader {
    pub width: u32,
    pub height: u32,
    /// Number of colour components (1 for grayscale, 3 for YCbCr)
    pub components: u8,
    /// Subsampling mode, if the sampling factors match a registered one
    pub subsampling: Option<Subsampling>,
}

impl JpegHeader {
    /// Number of pixels in the image.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Whether a marker byte introduces a frame header.
fn is_sof(marker: u8) -> bool {
    (0xC0..=0xCF).contains(&marker) && marker != DHT && marker != JPG && marker != DAC
}

/// Whether a marker stands alone (no length field follows).
fn is_standalone(marker: u8) -> bool {
    matches!(marker, 0x01 | 0xD0..=0xD9)
}

/// Read the frame header of a JPEG stream.
///
/// # Errors
///
/// Returns [`JpegError::Codec`] if the data does not start with SOI, is
/// truncated, or reaches the first scan without a frame header.
pub fn read_header(data: &[u8]) -> Result<JpegHeader, JpegError> {
    if data.len() < 4 || data[0..2] != SOI {
        return Err(JpegError::codec("Not a JPEG stream: missing SOI marker"));
    }

    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            return Err(JpegError::codec(format!(
                "Corrupt JPEG stream: expected marker at offset {}",
                pos
            )));
        }

        let marker = data[pos + 1];

        // Fill bytes
        if marker == 0xFF {
            pos += 1;
            continue;
        }

        if is_standalone(marker) {
            if [0xFF, marker] == EOI {
                break;
            }
            pos += 2;
            continue;
        }

        if [0xFF, marker] == SOS {
            break;
        }

        let length = segment_length(data, pos)?;
        let body = pos + 4;

        if is_sof(marker) {
            return parse_frame(&data[body..pos + 2 + length]);
        }

        pos += 2 + length;
    }

    Err(JpegError::codec("Corrupt JPEG stream: no frame header found"))
}

fn segment_length(data: &[u8], pos: usize) -> Result<usize, JpegError> {
    if pos + 3 >= data.len() {
        return Err(JpegError::codec("Corrupt JPEG stream: truncated segment"));
    }

    let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
    if length < 2 || pos + 2 + length > data.len() {
        return Err(JpegError::codec(format!(
            "Corrupt JPEG stream: segment length {} at offset {} exceeds stream",
            length, pos
        )));
    }

    Ok(length)
}

fn parse_frame(body: &[u8]) -> Result<JpegHeader, JpegError> {
    if body.len() < 6 {
        return Err(JpegError::codec("Corrupt JPEG stream: frame header too short"));
    }

    let height = u16::from_be_bytes([body[1], body[2]]) as u32;
    let width = u16::from_be_bytes([body[3], body[4]]) as u32;
    let components = body[5];

    let specs = &body[6..];
    if components == 0 || specs.len() < components as usize * 3 {
        return Err(JpegError::codec(format!(
            "Corrupt JPEG stream: frame header declares {} components",
            components
        )));
    }

    let factors: Vec<(u8, u8)> = specs
        .chunks_exact(3)
        .take(components as usize)
        .map(|spec| (spec[1] >> 4, spec[1] & 0x0F))
        .collect();

    Ok(JpegHeader {
        width,
        height,
        components,
        subsampling: Subsampling::from_sampling_factors(&factors),
    })
}

// =============================================================================
// Tests
// =============================================================================
