//! Compressor configuration.
//!
//! Every tunable of the pipeline lives in [`CompressorConfig`]. Defaults
//! reproduce the stock behaviour: a 612x816 bounding box, quality 99
//! output, quality 100 orientation probes and bilinear resampling.
//!
//! Configuration can be read from TOML; missing keys fall back to their
//! defaults:
//!
//! ```toml
//! output_quality = 90
//! filter = "lanczos3"
//!
//! [bounds]
//! max_width = 1024
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::encode::{OUTPUT_QUALITY, PROBE_QUALITY};
use crate::transform::BoundingBox;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Bounding box must be non-zero, got {width}x{height}")]
    InvalidBounds { width: u32, height: u32 },

    #[error("{name} must be within 1-100, got {value}")]
    InvalidQuality { name: &'static str, value: u8 },
}

/// Pipeline settings shared read-only by every invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorConfig {
    /// Box the decoded-pixels path shrinks into.
    pub bounds: BoundingBox,
    /// JPEG quality of the written output.
    pub output_quality: u8,
    /// JPEG quality of the throwaway orientation probe.
    pub probe_quality: u8,
    /// Resampling filter.
    pub filter: FilterType,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            bounds: BoundingBox::default(),
            output_quality: OUTPUT_QUALITY,
            probe_quality: PROBE_QUALITY,
            filter: FilterType::default(),
        }
    }
}

impl CompressorConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bounds.max_width == 0 || self.bounds.max_height == 0 {
            return Err(ConfigError::InvalidBounds {
                width: self.bounds.max_width,
                height: self.bounds.max_height,
            });
        }
        for (name, value) in [
            ("output_quality", self.output_quality),
            ("probe_quality", self.probe_quality),
        ] {
            if !(1..=100).contains(&value) {
                return Err(ConfigError::InvalidQuality { name, value });
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: CompressorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
