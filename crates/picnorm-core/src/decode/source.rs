//! Content sources and decoding of encoded images into [`RawImage`]s.

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;

use image::ImageReader;

use super::{DecodeError, RawImage};

/// A location that can be opened for reading, possibly more than once.
///
/// The pipeline opens a source once to decode pixels and again to read
/// orientation metadata, so implementations must hand out a fresh reader
/// positioned at the start on every call.
pub trait ContentSource: Send + Sync {
    /// Open a new reader over the encoded image bytes.
    fn open(&self) -> io::Result<Box<dyn Read + Send + '_>>;

    /// Human-readable description used in log lines.
    fn describe(&self) -> String;
}

impl ContentSource for PathBuf {
    fn open(&self) -> io::Result<Box<dyn Read + Send + '_>> {
        Ok(Box::new(BufReader::new(File::open(self)?)))
    }

    fn describe(&self) -> String {
        self.display().to_string()
    }
}

/// Encoded image bytes held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    bytes: Arc<[u8]>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl ContentSource for MemorySource {
    fn open(&self) -> io::Result<Box<dyn Read + Send + '_>> {
        Ok(Box::new(Cursor::new(&self.bytes[..])))
    }

    fn describe(&self) -> String {
        format!("memory:{} ({} bytes)", self.name, self.bytes.len())
    }
}

/// Read a source fully into memory.
pub fn read_source(source: &dyn ContentSource) -> Result<Vec<u8>, DecodeError> {
    let mut reader = source
        .open()
        .map_err(|e| DecodeError::IoError(format!("{}: {}", source.describe(), e)))?;
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| DecodeError::IoError(format!("{}: {}", source.describe(), e)))?;
    Ok(bytes)
}

/// Decode an encoded image (any enabled format) into RGB pixels.
///
/// Orientation metadata is NOT applied; the encoded bytes are attached to
/// the returned image so it can be resolved later.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be guessed and
/// `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_bytes(bytes: &[u8]) -> Result<RawImage, DecodeError> {
    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb = img.into_rgb8();
    Ok(RawImage::from_rgb_image(rgb)?.with_source(bytes.to_vec()))
}

/// Open `source` and decode it.
pub fn decode_source(source: &dyn ContentSource) -> Result<RawImage, DecodeError> {
    let bytes = read_source(source)?;
    decode_bytes(&bytes)
}
