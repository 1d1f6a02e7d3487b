//! Pipeline error taxonomy.
//!
//! Orientation metadata failures have no variant: they resolve to an
//! upright image inside the resolver and never abort a run.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::{EncodeError, WriteError};

/// Any failure that stops a pipeline run.
///
/// These never cross the public `compress_*` boundary; they are logged
/// and reported as a failed run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input could not be read or interpreted as an image.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The final buffer could not be encoded.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// The destination could not be created or written.
    #[error("write failed: {0}")]
    Write(#[from] WriteError),
}
