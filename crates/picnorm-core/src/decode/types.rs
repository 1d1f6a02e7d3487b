//! Core types for image decoding.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// I/O error while reading the source.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Pixel data length does not match the declared dimensions.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    PixelBufferMismatch { expected: usize, actual: usize },

    /// Width or height is zero.
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// Filter type for resampling.
///
/// Only smoothing filters are offered; scaling photos with nearest
/// neighbour produces visible aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Catmull-Rom cubic interpolation.
    CatmullRom,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::CatmullRom => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Clockwise rotation needed to display an image upright.
///
/// Only the four right-angle rotations are modelled. Mirrored EXIF
/// orientations carry no rotation and resolve to [`Rotation::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// No rotation needed.
    #[default]
    None,
    /// Rotate 90 degrees clockwise.
    Cw90,
    /// Rotate 180 degrees.
    Cw180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Cw270,
}

impl Rotation {
    /// Map an EXIF orientation tag value (1-8) to a rotation.
    ///
    /// Values 6, 3 and 8 are the pure rotations; everything else,
    /// including out-of-range values, is treated as upright.
    pub fn from_exif(value: u32) -> Self {
        match value {
            6 => Rotation::Cw90,
            3 => Rotation::Cw180,
            8 => Rotation::Cw270,
            _ => Rotation::None,
        }
    }

    /// Clockwise angle in degrees: one of 0, 90, 180, 270.
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Rotation::None
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Cw90 | Rotation::Cw270)
    }

    /// Dimensions of a `width` x `height` image after this rotation.
    pub fn rotated_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// An immutable RGB8 image, 3 bytes per pixel in row-major order.
///
/// Pixel data is shared, so clones are cheap and never alias a mutable
/// buffer. The optional `source` holds the encoded bytes the image was
/// decoded from; it is only consulted for metadata.
#[derive(Debug, Clone)]
pub struct RawImage {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
    source: Option<Arc<[u8]>>,
}

impl RawImage {
    /// Create an image from RGB pixel data.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::EmptyImage` for a zero dimension and
    /// `DecodeError::PixelBufferMismatch` when `pixels` is not exactly
    /// `width * height * 3` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::EmptyImage { width, height });
        }
        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(DecodeError::PixelBufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
            source: None,
        })
    }

    /// Create a RawImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, DecodeError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Attach the encoded bytes this image was decoded from.
    pub fn with_source(mut self, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.source = Some(bytes.into());
        self
    }

    /// Drop any attached source bytes.
    pub fn without_source(mut self) -> Self {
        self.source = None;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Encoded bytes of the original image, if known.
    pub fn source(&self) -> Option<&[u8]> {
        self.source.as_deref()
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.to_vec())
    }

    /// True if both images share the same pixel allocation.
    pub fn shares_pixels_with(&self, other: &RawImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}
