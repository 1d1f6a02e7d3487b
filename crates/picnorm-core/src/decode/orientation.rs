//! EXIF orientation resolution.
//!
//! Metadata problems are never fatal here: a missing source, an unreadable
//! stream or a file without an orientation tag all resolve to
//! [`Rotation::None`].

use std::io::Cursor;

use exif::{In, Reader, Tag};

use super::{read_source, ContentSource, RawImage, Rotation};
use crate::encode::encode_jpeg;

/// Extract the rotation implied by the EXIF orientation tag in `bytes`.
pub fn rotation_from_bytes(bytes: &[u8]) -> Rotation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Rotation::from_exif)
            .unwrap_or_default(),
        Err(e) => {
            log::debug!("No readable EXIF orientation: {}", e);
            Rotation::None
        }
    }
}

/// Read the rotation from the original encoded source.
///
/// This is the accurate path: the source is re-opened and its own
/// metadata inspected.
pub fn rotation_from_source(source: Option<&dyn ContentSource>) -> Rotation {
    let Some(source) = source else {
        return Rotation::None;
    };

    match read_source(source) {
        Ok(bytes) => rotation_from_bytes(&bytes),
        Err(e) => {
            log::debug!("Orientation read failed, assuming upright: {}", e);
            Rotation::None
        }
    }
}

/// Probe the orientation of already-decoded pixels by re-encoding them.
///
/// Decoded pixels carry no metadata of their own, so the buffer is encoded
/// to a throwaway JPEG at `quality` and that is inspected instead. The
/// probe bytes are discarded afterwards.
pub fn probe_rotation(image: &RawImage, quality: u8) -> Rotation {
    match encode_jpeg(image.pixels(), image.width(), image.height(), quality) {
        Ok(probe) => rotation_from_bytes(&probe),
        Err(e) => {
            log::debug!("Orientation probe encode failed, assuming upright: {}", e);
            Rotation::None
        }
    }
}

/// Resolve the rotation for a decoded image.
///
/// Uses the attached original bytes when available and only falls back to
/// the lossy re-encode probe when there are none.
pub fn resolve_rotation(image: &RawImage, probe_quality: u8) -> Rotation {
    match image.source() {
        Some(bytes) => rotation_from_bytes(bytes),
        None => probe_rotation(image, probe_quality),
    }
}
