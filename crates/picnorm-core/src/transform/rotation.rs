//! Right-angle rotation about the image centre.
//!
//! Quarter turns map every destination pixel to exactly one source pixel,
//! so no interpolation is involved and the result is lossless.

use crate::decode::{DecodeError, RawImage, Rotation};

/// Rotate `image` clockwise by `rotation`.
///
/// 90 and 270 degree turns swap width and height. `Rotation::None` returns
/// a clone sharing the input's pixels. The input is never modified and the
/// result carries no source bytes for the turned pixels.
pub fn rotate(image: &RawImage, rotation: Rotation) -> Result<RawImage, DecodeError> {
    if rotation.is_none() {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let rotated = match rotation {
        Rotation::Cw90 => image::imageops::rotate90(&rgb_image),
        Rotation::Cw180 => image::imageops::rotate180(&rgb_image),
        Rotation::Cw270 => image::imageops::rotate270(&rgb_image),
        Rotation::None => rgb_image,
    };

    RawImage::from_rgb_image(rotated)
}
