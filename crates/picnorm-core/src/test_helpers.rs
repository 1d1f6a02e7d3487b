//! Shared fixtures for unit tests.

use crate::decode::RawImage;
use crate::encode::encode_jpeg;

/// A `width` x `height` RGB gradient.
pub fn gradient_image(width: u32, height: u32) -> RawImage {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push(((x * 255) / width.max(1)) as u8);
            pixels.push(((y * 255) / height.max(1)) as u8);
            pixels.push(128);
        }
    }
    RawImage::new(width, height, pixels).expect("valid gradient")
}

/// Encode `image` as JPEG and splice in an EXIF APP1 segment holding a
/// single orientation tag.
pub fn jpeg_with_orientation(image: &RawImage, orientation: u16) -> Vec<u8> {
    let jpeg = encode_jpeg(image.pixels(), image.width(), image.height(), 90)
        .expect("fixture encodes");

    let [lo, hi] = orientation.to_le_bytes();
    let mut payload = Vec::new();
    payload.extend_from_slice(b"Exif\0\0");
    // Little-endian TIFF header, first IFD at offset 8
    payload.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00]);
    // One entry: Orientation (0x0112), SHORT, count 1
    payload.extend_from_slice(&[0x01, 0x00]);
    payload.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00]);
    payload.extend_from_slice(&[lo, hi, 0x00, 0x00]);
    // No next IFD
    payload.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    let segment_len = (payload.len() + 2) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}
