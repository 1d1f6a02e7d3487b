//! Pipeline orchestration.
//!
//! Two entry points share the same building blocks but not the same
//! guarantees:
//!
//! - [`Pipeline::compress_pixels`] starts from decoded pixels. It plans a
//!   bounding-box size, scales, and rotates the scaled buffer when the
//!   image needs rotating. When no rotation is needed the ORIGINAL,
//!   unscaled buffer is encoded. No timing is reported.
//! - [`Pipeline::compress_source`] starts from an encoded source. It
//!   decodes, rotates using the source's own metadata, and never scales.
//!   Elapsed time is measured, including on failure.
//!
//! Each stage runs to completion before the next; failures are logged and
//! reported as a failed run without the underlying error.

use std::path::Path;
use std::time::Instant;

use crate::config::CompressorConfig;
use crate::decode::{
    decode_source, resolve_rotation, rotation_from_source, ContentSource, RawImage, Rotation,
};
use crate::encode::encode_to_path;
use crate::error::PipelineError;
use crate::transform::{plan_dimensions, rotate, scale};

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineResult {
    pub success: bool,
    pub elapsed_ms: u64,
}

impl PipelineResult {
    pub fn succeeded(elapsed_ms: u64) -> Self {
        Self {
            success: true,
            elapsed_ms,
        }
    }

    pub fn failed(elapsed_ms: u64) -> Self {
        Self {
            success: false,
            elapsed_ms,
        }
    }
}

impl From<PipelineResult> for (bool, u64) {
    fn from(result: PipelineResult) -> Self {
        (result.success, result.elapsed_ms)
    }
}

/// Details of a successful run, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rotation: Rotation,
    pub source_dimensions: (u32, u32),
    pub output_dimensions: (u32, u32),
    pub bytes_written: usize,
}

/// Sequences orientation, planning, transforms and output for one image.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: CompressorConfig,
}

impl Pipeline {
    pub fn new(config: CompressorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    /// Compress decoded pixels into `dest`.
    ///
    /// Returns `true` once `dest` holds the complete JPEG.
    pub fn compress_pixels(&self, image: &RawImage, dest: &Path) -> bool {
        match self.run_pixels(image, dest) {
            Ok(summary) => {
                log::info!(
                    "Compressed {}x{} pixels -> {}x{} ({} bytes, rotation {}) into {}",
                    summary.source_dimensions.0,
                    summary.source_dimensions.1,
                    summary.output_dimensions.0,
                    summary.output_dimensions.1,
                    summary.bytes_written,
                    summary.rotation.degrees(),
                    dest.display()
                );
                true
            }
            Err(e) => {
                log::warn!("Compression of decoded pixels failed: {}", e);
                false
            }
        }
    }

    /// Fallible form of [`Pipeline::compress_pixels`].
    pub fn run_pixels(&self, image: &RawImage, dest: &Path) -> Result<RunSummary, PipelineError> {
        let rotation = resolve_rotation(image, self.config.probe_quality);
        let plan = plan_dimensions(image.width(), image.height(), self.config.bounds);
        let (planned_width, planned_height) = rotation.rotated_dimensions(plan.width, plan.height);
        log::debug!(
            "Pixels {}x{}: rotation {}, planned output {}x{}",
            image.width(),
            image.height(),
            rotation.degrees(),
            planned_width,
            planned_height
        );

        // Only a rotated image is written at the planned size. An upright
        // image is written from the original buffer, so its scaled copy
        // would be discarded and is never computed.
        let final_image = if rotation.is_none() {
            image.clone()
        } else {
            let scaled = scale(image, plan, self.config.filter)?;
            rotate(&scaled, rotation)?
        };

        let bytes_written = encode_to_path(&final_image, dest, self.config.output_quality)?;

        Ok(RunSummary {
            rotation,
            source_dimensions: image.dimensions(),
            output_dimensions: final_image.dimensions(),
            bytes_written,
        })
    }

    /// Decode `source`, correct its orientation and write it to `dest`.
    ///
    /// The elapsed time covers everything up to completion or failure.
    pub fn compress_source(&self, source: &dyn ContentSource, dest: &Path) -> PipelineResult {
        let started = Instant::now();
        let outcome = self.run_source(source, dest);
        // Rounded up; a finished run never reports 0
        let elapsed_ms = (started.elapsed().as_micros().div_ceil(1000) as u64).max(1);

        match outcome {
            Ok(summary) => {
                log::info!(
                    "Compressed {} ({}x{} -> {}x{}, {} bytes) into {} in {}ms",
                    source.describe(),
                    summary.source_dimensions.0,
                    summary.source_dimensions.1,
                    summary.output_dimensions.0,
                    summary.output_dimensions.1,
                    summary.bytes_written,
                    dest.display(),
                    elapsed_ms
                );
                PipelineResult::succeeded(elapsed_ms)
            }
            Err(e) => {
                log::warn!(
                    "Compression of {} failed after {}ms: {}",
                    source.describe(),
                    elapsed_ms,
                    e
                );
                PipelineResult::failed(elapsed_ms)
            }
        }
    }

    /// Fallible form of [`Pipeline::compress_source`].
    pub fn run_source(
        &self,
        source: &dyn ContentSource,
        dest: &Path,
    ) -> Result<RunSummary, PipelineError> {
        let decode_start = Instant::now();
        let image = decode_source(source)?;
        log::debug!(
            "Decoded {} as {}x{} in {}ms",
            source.describe(),
            image.width(),
            image.height(),
            decode_start.elapsed().as_millis()
        );

        // Re-open the original for its metadata
        let rotation = rotation_from_source(Some(source));
        let final_image = rotate(&image, rotation)?;

        let bytes_written = encode_to_path(&final_image, dest, self.config.output_quality)?;

        Ok(RunSummary {
            rotation,
            source_dimensions: image.dimensions(),
            output_dimensions: final_image.dimensions(),
            bytes_written,
        })
    }
}
