//! Image selection service.
//!
//! Wraps a [`Pipeline`] for callers that receive images from a picker or a
//! camera. Each submitted selection gets a fresh `compressed_image*.jpg` in
//! the output directory, is compressed on the blocking thread pool, and
//! resolves to the decoded compressed image.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::{CompressorConfig, ConfigError};
use crate::decode::{decode_source, ContentSource, RawImage};
use crate::pipeline::Pipeline;

const OUTPUT_PREFIX: &str = "compressed_image";
const OUTPUT_SUFFIX: &str = ".jpg";

/// Errors raised while setting up the service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Output directory {} does not exist", .0.display())]
    MissingOutputDir(PathBuf),
}

/// What the user handed over.
pub enum ImageSelection {
    /// Decoded pixels straight from a capture.
    Captured(RawImage),
    /// An encoded image picked from storage.
    Picked(Box<dyn ContentSource>),
    /// The picker was dismissed.
    Cancelled,
}

impl std::fmt::Debug for ImageSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSelection::Captured(image) => f
                .debug_tuple("Captured")
                .field(&image.dimensions())
                .finish(),
            ImageSelection::Picked(source) => {
                f.debug_tuple("Picked").field(&source.describe()).finish()
            }
            ImageSelection::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// Result delivered for one selection.
#[derive(Debug, Clone, Default)]
pub struct PickOutcome {
    /// The compressed image, decoded back from disk.
    pub image: Option<RawImage>,
    /// Where the compressed image was written.
    pub output: Option<PathBuf>,
    /// Time spent compressing. Always 0 for captured pixels.
    pub elapsed_ms: u64,
}

impl PickOutcome {
    pub fn is_success(&self) -> bool {
        self.image.is_some()
    }

    fn failed(elapsed_ms: u64) -> Self {
        Self {
            elapsed_ms,
            ..Self::default()
        }
    }
}

/// Handle to an in-flight compression.
#[derive(Debug)]
pub struct CompressionTask {
    handle: JoinHandle<PickOutcome>,
}

impl CompressionTask {
    /// Wait for the compression to finish.
    ///
    /// A panic inside the pipeline is propagated to the caller.
    pub async fn outcome(self) -> PickOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                log::warn!("Compression task did not complete: {}", e);
                PickOutcome::default()
            }
        }
    }
}

/// Compresses selected images into an output directory.
#[derive(Debug, Clone)]
pub struct ImageCompressor {
    pipeline: Arc<Pipeline>,
    output_dir: PathBuf,
}

impl ImageCompressor {
    pub fn new(
        config: CompressorConfig,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, ServiceError> {
        config.validate()?;
        let output_dir = output_dir.into();
        if !output_dir.is_dir() {
            return Err(ServiceError::MissingOutputDir(output_dir));
        }
        Ok(Self {
            pipeline: Arc::new(Pipeline::new(config)),
            output_dir,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Start compressing `selection` on the blocking pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, selection: ImageSelection) -> CompressionTask {
        let pipeline = Arc::clone(&self.pipeline);
        let output_dir = self.output_dir.clone();

        let handle = tokio::task::spawn_blocking(move || {
            compress_blocking(&pipeline, &output_dir, selection)
        });
        CompressionTask { handle }
    }
}

/// Run one selection to completion on the current thread.
pub fn compress_blocking(
    pipeline: &Pipeline,
    output_dir: &Path,
    selection: ImageSelection,
) -> PickOutcome {
    if matches!(selection, ImageSelection::Cancelled) {
        log::debug!("Selection cancelled");
        return PickOutcome::default();
    }

    let output = match create_output_file(output_dir) {
        Ok(path) => path,
        Err(e) => {
            log::warn!(
                "Cannot create output file in {}: {}",
                output_dir.display(),
                e
            );
            return PickOutcome::default();
        }
    };

    let (success, elapsed_ms) = match selection {
        ImageSelection::Captured(image) => (pipeline.compress_pixels(&image, &output), 0),
        ImageSelection::Picked(source) => pipeline.compress_source(&*source, &output).into(),
        ImageSelection::Cancelled => (false, 0),
    };

    if !success {
        discard(&output);
        return PickOutcome::failed(elapsed_ms);
    }

    match decode_source(&output) {
        Ok(image) => PickOutcome {
            image: Some(image),
            output: Some(output),
            elapsed_ms,
        },
        Err(e) => {
            log::warn!("Cannot read back {}: {}", output.display(), e);
            discard(&output);
            PickOutcome::failed(elapsed_ms)
        }
    }
}

/// Create a new, uniquely named, empty output file that outlives this call.
fn create_output_file(dir: &Path) -> std::io::Result<PathBuf> {
    tempfile::Builder::new()
        .prefix(OUTPUT_PREFIX)
        .suffix(OUTPUT_SUFFIX)
        .tempfile_in(dir)?
        .into_temp_path()
        .keep()
        .map_err(|e| e.error)
}

fn discard(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        log::debug!("Cannot remove {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::MemorySource;
    use crate::encode::encode_image;
    use crate::test_helpers::{gradient_image, jpeg_with_orientation};

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CompressorConfig::default();
        config.output_quality = 0;

        let result = ImageCompressor::new(config, dir.path());
        assert!(matches!(result, Err(ServiceError::Config(_))));
    }

    #[test]
    fn test_new_rejects_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = ImageCompressor::new(CompressorConfig::default(), dir.path().join("nope"));
        assert!(matches!(result, Err(ServiceError::MissingOutputDir(_))));
    }

    #[tokio::test]
    async fn test_captured_image_is_rotated_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let compressor = ImageCompressor::new(CompressorConfig::default(), dir.path()).unwrap();
        let img = gradient_image(300, 400);
        let tagged = jpeg_with_orientation(&img, 6);

        let outcome = compressor
            .submit(ImageSelection::Captured(img.with_source(tagged)))
            .outcome()
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.elapsed_ms, 0);
        assert_eq!(outcome.image.unwrap().dimensions(), (400, 300));

        let output = outcome.output.unwrap();
        let name = output.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("compressed_image"));
        assert!(name.ends_with(".jpg"));
        assert!(output.starts_with(dir.path()));
    }

    #[tokio::test]
    async fn test_picked_source_is_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let compressor = ImageCompressor::new(CompressorConfig::default(), dir.path()).unwrap();
        let bytes = encode_image(&gradient_image(120, 80), 90).unwrap();
        let source = MemorySource::new("picked", bytes);

        let outcome = compressor
            .submit(ImageSelection::Picked(Box::new(source)))
            .outcome()
            .await;

        assert_eq!(outcome.image.unwrap().dimensions(), (120, 80));
        assert!(outcome.output.unwrap().exists());
    }

    #[tokio::test]
    async fn test_failed_pick_removes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let compressor = ImageCompressor::new(CompressorConfig::default(), dir.path()).unwrap();
        let source = MemorySource::new("junk", vec![0u8; 16]);

        let outcome = compressor
            .submit(ImageSelection::Picked(Box::new(source)))
            .outcome()
            .await;

        assert!(!outcome.is_success());
        assert!(outcome.output.is_none());
        assert!(file_names(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_selection_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let compressor = ImageCompressor::new(CompressorConfig::default(), dir.path()).unwrap();

        let outcome = compressor.submit(ImageSelection::Cancelled).outcome().await;

        assert!(outcome.image.is_none());
        assert!(file_names(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_tasks_get_separate_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let compressor = ImageCompressor::new(CompressorConfig::default(), dir.path()).unwrap();

        let first = compressor.submit(ImageSelection::Captured(gradient_image(64, 48)));
        let second = compressor.submit(ImageSelection::Captured(gradient_image(32, 16)));

        let (a, b) = tokio::join!(first.outcome(), second.outcome());

        assert_eq!(a.image.unwrap().dimensions(), (64, 48));
        assert_eq!(b.image.unwrap().dimensions(), (32, 16));
        assert_ne!(a.output, b.output);
        assert_eq!(file_names(dir.path()).len(), 2);
    }

    #[test]
    fn test_compress_blocking_without_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = compress_blocking(
            &Pipeline::default(),
            dir.path(),
            ImageSelection::Captured(gradient_image(10, 10)),
        );
        assert!(outcome.is_success());
    }

    #[test]
    fn test_selection_debug() {
        let picked = ImageSelection::Picked(Box::new(MemorySource::new("a.jpg", vec![1u8])));
        assert!(format!("{:?}", picked).contains("Picked"));
        assert_eq!(format!("{:?}", ImageSelection::Cancelled), "Cancelled");
    }
}
