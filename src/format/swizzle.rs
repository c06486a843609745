//! Conversions between caller pixel layouts and the planes the codec works on.
//!
//! The encoder consumes tightly packed RGB or luma rows; the decoder produces
//! them. These helpers strip row padding, reorder channels and fill the
//! padding/alpha byte of four-channel formats.

use super::PixelFormat;

/// Value written to the padding or alpha byte of decoded pixels.
pub const FILLER: u8 = 0xFF;

/// Pack strided source rows into contiguous RGB triplets.
///
/// `offsets` are the red, green and blue byte positions within a pixel, as
/// returned by [`PixelFormat::rgb_offsets`]. `source` must hold at least
/// `stride * (height - 1) + width * bpp` bytes.
pub fn pack_rgb(
    source: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    bpp: usize,
    offsets: [usize; 3],
) -> Vec<u8> {
    let [r, g, b] = offsets;
    let mut packed = Vec::with_capacity(width * height * 3);

    for row in source.chunks(stride.max(1)).take(height) {
        for pixel in row[..width * bpp].chunks_exact(bpp) {
            packed.extend_from_slice(&[pixel[r], pixel[g], pixel[b]]);
        }
    }

    packed
}

/// Pack strided source rows into a contiguous luma plane.
///
/// Grayscale sources are copied as-is; colour sources are converted with the
/// JFIF weights in 16-bit fixed point.
pub fn pack_luma(
    source: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
) -> Vec<u8> {
    let bpp = format.bytes_per_pixel();
    let mut packed = Vec::with_capacity(width * height);

    for row in source.chunks(stride.max(1)).take(height) {
        let row = &row[..width * bpp];
        match format.rgb_offsets() {
            None => packed.extend_from_slice(row),
            Some([r, g, b]) => {
                packed.extend(
                    row.chunks_exact(bpp)
                        .map(|pixel| luma(pixel[r], pixel[g], pixel[b])),
                );
            }
        }
    }

    packed
}

/// Expand contiguous RGB triplets into `out` using `format`'s layout.
///
/// `out` must hold `rgb.len() / 3 * bpp` bytes.
pub fn unpack_rgb(rgb: &[u8], format: PixelFormat, out: &mut [u8]) {
    let bpp = format.bytes_per_pixel();
    match format.rgb_offsets() {
        None => {
            for (dst, src) in out.iter_mut().zip(rgb.chunks_exact(3)) {
                *dst = luma(src[0], src[1], src[2]);
            }
        }
        Some([r, g, b]) => {
            let filler = format.filler_offset();
            for (dst, src) in out.chunks_exact_mut(bpp).zip(rgb.chunks_exact(3)) {
                dst[r] = src[0];
                dst[g] = src[1];
                dst[b] = src[2];
                if let Some(offset) = filler {
                    dst[offset] = FILLER;
                }
            }
        }
    }
}

/// Expand a contiguous luma plane into `out` using `format`'s layout.
pub fn unpack_luma(gray: &[u8], format: PixelFormat, out: &mut [u8]) {
    let bpp = format.bytes_per_pixel();
    if format.is_gray() {
        out[..gray.len()].copy_from_slice(gray);
        return;
    }

    let filler = format.filler_offset();
    for (dst, &y) in out.chunks_exact_mut(bpp).zip(gray) {
        dst.fill(y);
        if let Some(offset) = filler {
            dst[offset] = FILLER;
        }
    }
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    // 0.299, 0.587, 0.114 scaled by 2^16
    let y = 19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + 32768;
    (y >> 16) as u8
}
