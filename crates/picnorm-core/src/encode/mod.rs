//! Image encoding and output.
//!
//! This module provides functionality for:
//! - Encoding RGB buffers to JPEG with a fixed quality
//! - Committing encoded bytes to a destination path atomically
//!
//! # Examples
//!
//! ```ignore
//! use picnorm_core::encode::{encode_to_path, OUTPUT_QUALITY};
//!
//! let written = encode_to_path(&image, Path::new("out.jpg"), OUTPUT_QUALITY)?;
//! println!("Wrote {} bytes", written);
//! ```

mod jpeg;
mod writer;

pub use jpeg::{encode_image, encode_jpeg, EncodeError, OUTPUT_QUALITY, PROBE_QUALITY};
pub use writer::{encode_to_path, write_atomic, WriteError};
