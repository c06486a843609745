//! jpeg-turbo - command-line front end for the JPEG service.
//!
//! Every subcommand prints a JSON summary on stdout. Logs go to stderr.

use std::path::Path;
use std::process::ExitCode;

use bytes::BytesMut;
use clap::Parser;
use serde_json::{json, Value};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jpeg_turbo::{
    config::{BufferSizeArgs, CompressArgs, DecompressArgs, HeaderArgs},
    BufferSizeOptions, Cli, Command, DecodeOptions, EncodeOptions, JpegService,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.service_config();
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let service = JpegService::with_config(config);
    let result = match cli.command {
        Command::BufferSize(args) => Ok(run_buffer_size(&service, args)),
        Command::Compress(args) => run_compress(&service, args).await,
        Command::Decompress(args) => run_decompress(&service, args).await,
        Command::Header(args) => run_header(&service, args).await,
    };

    match result {
        Ok(summary) => {
            println!("{:#}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "jpeg_turbo=debug"
    } else {
        "jpeg_turbo=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Buffer Size Command
// =============================================================================

fn run_buffer_size(service: &JpegService, args: BufferSizeArgs) -> Value {
    let mut options = BufferSizeOptions::new(args.width, args.height);
    options.subsampling = args.subsampling;

    let size = service.buffer_size(&options);
    json!({
        "width": args.width,
        "height": args.height,
        "subsampling": options
            .subsampling
            .unwrap_or(service.config().default_subsampling)
            .name(),
        "size": size,
        "unbounded": jpeg_turbo::sizing::is_unbounded(size),
    })
}

// =============================================================================
// Compress Command
// =============================================================================

async fn run_compress(service: &JpegService, args: CompressArgs) -> Result<Value, String> {
    let source = read_input(&args.input).await?;
    let options = EncodeOptions {
        width: args.width,
        height: args.height,
        format: args.format,
        subsampling: args.subsampling,
        quality: args.quality,
        stride: args.stride,
    };
    let destination = args.buffer.map(BytesMut::zeroed);

    let compressed = if args.sync {
        service.compress_sync(source, destination, &options)
    } else {
        match service.compress(source, destination, &options) {
            Ok(pending) => pending.await,
            Err(e) => Err(e),
        }
    }
    .map_err(|e| e.to_string())?;

    write_output(&args.output, &compressed.data).await?;
    debug!(size = compressed.size, "Wrote {}", args.output.display());

    Ok(json!({
        "output": args.output.display().to_string(),
        "size": compressed.size,
        "width": args.width,
        "height": args.height,
        "format": args.format.name(),
        "subsampling": args
            .subsampling
            .unwrap_or(service.config().default_subsampling)
            .name(),
        "quality": args.quality.unwrap_or(service.config().default_quality as i64),
    }))
}

// =============================================================================
// Decompress Command
// =============================================================================

async fn run_decompress(service: &JpegService, args: DecompressArgs) -> Result<Value, String> {
    let source = read_input(&args.input).await?;
    let options = DecodeOptions {
        format: args.format,
    };
    let destination = args.buffer.map(BytesMut::zeroed);

    let decompressed = if args.sync {
        service.decompress_sync(source, destination, Some(&options))
    } else {
        match service.decompress(source, destination, Some(&options)) {
            Ok(pending) => pending.await,
            Err(e) => Err(e),
        }
    }
    .map_err(|e| e.to_string())?;

    write_output(&args.output, &decompressed.data).await?;
    debug!(size = decompressed.size, "Wrote {}", args.output.display());

    Ok(json!({
        "output": args.output.display().to_string(),
        "size": decompressed.size,
        "width": decompressed.width,
        "height": decompressed.height,
        "format": decompressed.format.name(),
        "bytes_per_pixel": decompressed.bytes_per_pixel(),
    }))
}

// =============================================================================
// Header Command
// =============================================================================

async fn run_header(service: &JpegService, args: HeaderArgs) -> Result<Value, String> {
    let source = read_input(&args.input).await?;
    let header = service.header(&source).map_err(|e| e.to_string())?;

    Ok(json!({
        "width": header.width,
        "height": header.height,
        "components": header.components,
        "subsampling": header.subsampling.map(|s| s.name()),
        "max_compressed_size": header
            .subsampling
            .map(|s| jpeg_turbo::max_compressed_size(header.width as i64, header.height as i64, s)),
    }))
}

async fn read_input(path: &Path) -> Result<Vec<u8>, String> {
    tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

async fn write_output(path: &Path, data: &[u8]) -> Result<(), String> {
    tokio::fs::write(path, data)
        .await
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}
