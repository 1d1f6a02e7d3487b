//! Image decoding and orientation metadata.
//!
//! This module provides functionality for:
//! - Opening content sources (files, in-memory bytes)
//! - Decoding JPEG and PNG into RGB pixel buffers
//! - Resolving the EXIF orientation of the original bytes
//!
//! Decoding never applies orientation. Rotation is a separate pipeline
//! step so each entry point can decide when, and on which buffer, it runs.
//!
//! # Examples
//!
//! ```ignore
//! use picnorm_core::decode::{decode_bytes, resolve_rotation};
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let image = decode_bytes(&bytes)?;
//! let rotation = resolve_rotation(&image, 100);
//! println!("{}x{} needs {} degrees", image.width(), image.height(), rotation.degrees());
//! ```

mod orientation;
mod source;
mod types;

pub use orientation::{probe_rotation, resolve_rotation, rotation_from_bytes, rotation_from_source};
pub use source::{decode_bytes, decode_source, read_source, ContentSource, MemorySource};
pub use types::{DecodeError, FilterType, RawImage, Rotation};
