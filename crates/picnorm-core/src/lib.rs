//! picnorm core - photo normalization library
//!
//! Turns a photo into a display-ready JPEG: reads the EXIF orientation,
//! shrinks the image into a bounding box, rotates it upright and writes a
//! high-quality JPEG atomically.
//!
//! Two entry points live on [`Pipeline`]:
//! - [`Pipeline::compress_pixels`] for already-decoded pixels
//! - [`Pipeline::compress_source`] for encoded sources, reporting elapsed time
//!
//! [`ImageCompressor`] runs either on Tokio's blocking pool and reads the
//! result back.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod service;
pub mod transform;

#[cfg(test)]
mod test_helpers;

pub use config::{CompressorConfig, ConfigError};
pub use decode::{ContentSource, DecodeError, FilterType, MemorySource, RawImage, Rotation};
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineResult, RunSummary};
pub use service::{CompressionTask, ImageCompressor, ImageSelection, PickOutcome, ServiceError};
pub use transform::{plan_dimensions, BoundingBox, ScalePlan};
