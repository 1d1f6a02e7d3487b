//! Atomic file output.
//!
//! Bytes go to a temporary file next to the destination, are synced, and
//! the temporary file is then renamed over the destination. Readers see
//! either the previous content (or no file) or the complete new content.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::encode_image;
use crate::decode::RawImage;
use crate::error::PipelineError;

/// Errors that can occur while committing output bytes.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The temporary file could not be created in the target directory.
    #[error("Cannot create temporary file in {}: {source}", dir.display())]
    CreateTemp { dir: PathBuf, source: io::Error },

    /// Writing or syncing the temporary file failed.
    #[error("Cannot write output data: {0}")]
    Write(#[source] io::Error),

    /// Renaming the finished file over the destination failed.
    #[error("Cannot replace {}: {source}", path.display())]
    Persist { path: PathBuf, source: io::Error },
}

/// Directory the temporary file is created in: the destination's parent.
fn staging_dir(dest: &Path) -> &Path {
    match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Replace the content of `dest` with `bytes`, atomically.
///
/// On failure the temporary file is removed and `dest` is left as it was.
pub fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let dir = staging_dir(dest);

    let mut staged = tempfile::Builder::new()
        .prefix(".picnorm-")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(|source| WriteError::CreateTemp {
            dir: dir.to_path_buf(),
            source,
        })?;

    staged.write_all(bytes).map_err(WriteError::Write)?;
    staged.flush().map_err(WriteError::Write)?;
    staged.as_file().sync_all().map_err(WriteError::Write)?;

    staged.persist(dest).map_err(|e| WriteError::Persist {
        path: dest.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Encode `image` as JPEG at `quality` and commit it to `dest`.
///
/// Returns the number of bytes written.
pub fn encode_to_path(image: &RawImage, dest: &Path, quality: u8) -> Result<usize, PipelineError> {
    let bytes = encode_image(image, quality)?;
    write_atomic(dest, &bytes)?;
    Ok(bytes.len())
}
