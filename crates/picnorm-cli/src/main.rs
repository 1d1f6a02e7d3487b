use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use picnorm_core::decode::decode_source;
use picnorm_core::{CompressorConfig, Pipeline, PipelineResult};

/// Which pipeline entry point to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Protocol {
    /// Decode first, then shrink into the bounding box and rotate
    Pixels,
    /// Rotate the decoded source without scaling, and report timing
    Stream,
}

#[derive(Parser)]
#[command(name = "picnorm")]
#[command(about = "Normalize a photo: fix orientation, shrink, re-encode as JPEG")]
#[command(version)]
struct Cli {
    /// Image to compress (JPEG or PNG)
    input: PathBuf,

    /// Destination JPEG, replaced atomically
    #[arg(short, long)]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = Protocol::Stream)]
    protocol: Protocol,

    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bounding box width
    #[arg(long)]
    max_width: Option<u32>,

    /// Bounding box height
    #[arg(long)]
    max_height: Option<u32>,

    /// Output JPEG quality (1-100)
    #[arg(long)]
    quality: Option<u8>,
}

impl Cli {
    fn compressor_config(&self) -> Result<CompressorConfig> {
        let mut config = match &self.config {
            Some(path) => CompressorConfig::load(path)?,
            None => CompressorConfig::default(),
        };
        if let Some(width) = self.max_width {
            config.bounds.max_width = width;
        }
        if let Some(height) = self.max_height {
            config.bounds.max_height = height;
        }
        if let Some(quality) = self.quality {
            config.output_quality = quality;
        }
        config.validate().context("invalid settings")?;
        Ok(config)
    }
}

fn run_pixels(pipeline: &Pipeline, cli: &Cli) -> PipelineResult {
    // The decoded pixels keep the original bytes for orientation lookup
    match decode_source(&cli.input) {
        Ok(image) => PipelineResult {
            success: pipeline.compress_pixels(&image, &cli.output),
            elapsed_ms: 0,
        },
        Err(e) => {
            log::warn!("Cannot decode {}: {}", cli.input.display(), e);
            PipelineResult::failed(0)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let pipeline = Pipeline::new(cli.compressor_config()?);
    log::debug!("Running {:?} protocol with {:?}", cli.protocol, pipeline.config());

    let result = tokio::task::spawn_blocking(move || match cli.protocol {
        Protocol::Pixels => run_pixels(&pipeline, &cli),
        Protocol::Stream => pipeline.compress_source(&cli.input, &cli.output),
    })
    .await
    .context("compression task failed")?;

    if result.success {
        println!("ok {}ms", result.elapsed_ms);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("failed");
        Ok(ExitCode::FAILURE)
    }
}
