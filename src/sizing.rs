//! Worst-case compressed size calculation.
//!
//! Callers use [`max_compressed_size`] to pre-allocate an output buffer
//! without paying for a real encode. The bound follows the same reasoning as
//! libjpeg-turbo's `tjBufSize`: at most two bytes per coded sample plus a
//! fixed allowance for headers and markers.
//!
//! # Sentinel
//!
//! Degenerate geometry (zero or negative dimensions) and geometry whose
//! bound does not fit in 32 bits yield [`UNBOUNDED`]. Treat it as "cannot
//! bound this, grow the buffer dynamically", never as a byte count.

use crate::format::Subsampling;

/// Returned when no usable bound exists.
pub const UNBOUNDED: u32 = u32::MAX;

/// Fixed allowance for SOI/APPn/DQT/DHT/SOF/SOS/EOI segments.
pub const HEADER_OVERHEAD: u64 = 2048;

/// Edge of the MCU-equivalent block the bound is computed on.
///
/// 16x16 is the largest MCU of any registered mode, so padding never makes a
/// denser mode look cheaper than a sparser one.
pub const BOUND_BLOCK: u64 = 16;

/// Worst-case bytes per coded sample.
const BYTES_PER_SAMPLE: u64 = 2;

/// Worst-case coded bytes for one MCU-equivalent block under `subsampling`.
pub const fn bytes_per_block(subsampling: Subsampling) -> u64 {
    let luma = BOUND_BLOCK * BOUND_BLOCK;
    let chroma = if subsampling.is_gray() {
        0
    } else {
        let (h, v) = subsampling.chroma_factors();
        2 * luma / (h as u64 * v as u64)
    };
    (luma + chroma) * BYTES_PER_SAMPLE
}

/// Maximum size a conforming encode of a `width` x `height` image can take.
///
/// Never invokes the codec and never allocates.
pub fn max_compressed_size(width: i64, height: i64, subsampling: Subsampling) -> u32 {
    if width < 1 || height < 1 {
        return UNBOUNDED;
    }

    let blocks_x = (width as u64).div_ceil(BOUND_BLOCK);
    let blocks_y = (height as u64).div_ceil(BOUND_BLOCK);

    blocks_x
        .checked_mul(blocks_y)
        .and_then(|blocks| blocks.checked_mul(bytes_per_block(subsampling)))
        .and_then(|bytes| bytes.checked_add(HEADER_OVERHEAD))
        .and_then(|bytes| u32::try_from(bytes).ok())
        .unwrap_or(UNBOUNDED)
}

/// Whether `size` is the [`UNBOUNDED`] sentinel.
pub fn is_unbounded(size: u32) -> bool {
    size == UNBOUNDED
}
