//! Configuration for the JPEG service and the command-line tool.
//!
//! This module provides:
//! - [`ServiceConfig`]: defaults applied by the validator when a caller omits
//!   an option
//! - [`Cli`]: command-line arguments via clap, with environment variable
//!   fallbacks for the service defaults
//!
//! # Environment Variables
//!
//! - `JPEG_TURBO_QUALITY` - Default JPEG quality (default: 75)
//! - `JPEG_TURBO_SUBSAMPLING` - Default chroma subsampling (default: 420)
//! - `JPEG_TURBO_FORMAT` - Default decode output format (default: rgb)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::format::{PixelFormat, Subsampling};

// =============================================================================
// Default Values
// =============================================================================

/// Default JPEG quality when a compress call omits it.
pub const DEFAULT_QUALITY: u8 = 75;

/// Default chroma subsampling when a call omits it.
pub const DEFAULT_SUBSAMPLING: Subsampling = Subsampling::S420;

/// Default output format for decompression.
pub const DEFAULT_DECODE_FORMAT: PixelFormat = PixelFormat::Rgb;

// =============================================================================
// Service Configuration
// =============================================================================

/// Defaults the validator applies to omitted options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub default_quality: u8,
    pub default_subsampling: Subsampling,
    pub default_decode_format: PixelFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_quality: DEFAULT_QUALITY,
            default_subsampling: DEFAULT_SUBSAMPLING,
            default_decode_format: DEFAULT_DECODE_FORMAT,
        }
    }
}

impl ServiceConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_quality > 100 {
            return Err("default_quality must be between 0 and 100".to_string());
        }

        Ok(())
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// jpeg-turbo - validated JPEG compression and decompression of raw buffers.
#[derive(Parser, Debug, Clone)]
#[command(name = "jpeg-turbo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Default JPEG quality for compress calls that omit --quality.
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_QUALITY,
        env = "JPEG_TURBO_QUALITY"
    )]
    pub default_quality: u8,

    /// Default chroma subsampling (444, 422, 420, 440, gray).
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_SUBSAMPLING,
        env = "JPEG_TURBO_SUBSAMPLING"
    )]
    pub default_subsampling: Subsampling,

    /// Default decode output format.
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_DECODE_FORMAT,
        env = "JPEG_TURBO_FORMAT"
    )]
    pub default_format: PixelFormat,
}

impl Cli {
    /// Service defaults selected on the command line.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            default_quality: self.default_quality,
            default_subsampling: self.default_subsampling,
            default_decode_format: self.default_format,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the worst-case compressed size for an image geometry.
    BufferSize(BufferSizeArgs),

    /// Compress a raw pixel file into a JPEG.
    Compress(CompressArgs),

    /// Decompress a JPEG into a raw pixel file.
    Decompress(DecompressArgs),

    /// Print the geometry and subsampling of a JPEG without decoding it.
    Header(HeaderArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BufferSizeArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub width: i64,

    #[arg(long, allow_negative_numbers = true)]
    pub height: i64,

    #[arg(long)]
    pub subsampling: Option<Subsampling>,
}

#[derive(Args, Debug, Clone)]
pub struct CompressArgs {
    /// Raw pixel input file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// JPEG output file.
    #[arg(short, long)]
    pub output: PathBuf,

    #[arg(long, allow_negative_numbers = true)]
    pub width: i64,

    #[arg(long, allow_negative_numbers = true)]
    pub height: i64,

    /// Layout of the input pixels (rgb, bgr, rgbx, ..., gray).
    #[arg(long)]
    pub format: PixelFormat,

    #[arg(long)]
    pub subsampling: Option<Subsampling>,

    #[arg(long, allow_negative_numbers = true)]
    pub quality: Option<i64>,

    /// Row stride of the input in bytes.
    #[arg(long, allow_negative_numbers = true)]
    pub stride: Option<i64>,

    /// Pre-allocate an output buffer of this many bytes instead of letting
    /// the codec allocate.
    #[arg(long)]
    pub buffer: Option<usize>,

    /// Use the blocking entry point.
    #[arg(long, default_value_t = false)]
    pub sync: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DecompressArgs {
    /// JPEG input file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Raw pixel output file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Layout of the output pixels.
    #[arg(long)]
    pub format: Option<PixelFormat>,

    /// Pre-allocate an output buffer of this many bytes.
    #[arg(long)]
    pub buffer: Option<usize>,

    /// Use the blocking entry point.
    #[arg(long, default_value_t = false)]
    pub sync: bool,
}

#[derive(Args, Debug, Clone)]
pub struct HeaderArgs {
    /// JPEG input file.
    #[arg(short, long)]
    pub input: PathBuf,
}

// =============================================================================
// Tests
// =============================================================================
