//! Resampling to a planned size.
//!
//! All functions return new `RawImage` instances without modifying the input.

use super::ScalePlan;
use crate::decode::{DecodeError, FilterType, RawImage};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::EmptyImage` for a zero target dimension.
pub fn resize(
    image: &RawImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RawImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    // Fast path: if dimensions match, share the pixels
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    RawImage::from_rgb_image(resized)
}

/// Resample `image` to the size in `plan`.
///
/// The result never carries the source bytes of the input: they describe
/// the original, not the resampled pixels.
pub fn scale(image: &RawImage, plan: ScalePlan, filter: FilterType) -> Result<RawImage, DecodeError> {
    resize(image, plan.width, plan.height, filter).map(RawImage::without_source)
}
