//! Bounding-box dimension planning.
//!
//! Pure calculation, no pixels involved.

use serde::{Deserialize, Serialize};

/// Default maximum output width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 612;
/// Default maximum output height in pixels.
pub const DEFAULT_MAX_HEIGHT: u32 = 816;

/// Box an image is shrunk into. Images are never enlarged to fill it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl BoundingBox {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// True if a `width` x `height` image fits without scaling.
    pub fn contains(&self, width: u32, height: u32) -> bool {
        width <= self.max_width && height <= self.max_height
    }
}

/// Target dimensions for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalePlan {
    pub width: u32,
    pub height: u32,
}

/// Plan the output size for a `width` x `height` source.
///
/// A source inside the box on both axes is kept as is. Otherwise one
/// uniform factor is chosen so the result fits the box: the height bound
/// when the source is proportionally taller than the box, the width bound
/// when it is wider or equal. Both results are floored and clamped to at
/// least one pixel.
///
/// # Example
///
/// ```ignore
/// use picnorm_core::transform::{plan_dimensions, BoundingBox};
///
/// let plan = plan_dimensions(1200, 900, BoundingBox::default());
/// assert_eq!((plan.width, plan.height), (612, 459));
/// ```
pub fn plan_dimensions(width: u32, height: u32, bounds: BoundingBox) -> ScalePlan {
    if bounds.contains(width, height) || width == 0 || height == 0 {
        return ScalePlan { width, height };
    }

    let (w, h) = (width as u64, height as u64);
    let (max_w, max_h) = (bounds.max_width as u64, bounds.max_height as u64);

    // w / h < max_w / max_h, cross-multiplied to stay exact
    let taller_than_box = w * max_h < max_w * h;

    // Scale factor as an exact fraction; floor(dim * num / den)
    let (num, den) = if taller_than_box { (max_h, h) } else { (max_w, w) };

    ScalePlan {
        width: ((w * num / den) as u32).max(1),
        height: ((h * num / den) as u32).max(1),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: sources inside the box are never touched.
        #[test]
        fn prop_within_bounds_is_identity(
            width in 1u32..=DEFAULT_MAX_WIDTH,
            height in 1u32..=DEFAULT_MAX_HEIGHT,
        ) {
            let plan = plan_dimensions(width, height, BoundingBox::default());
            prop_assert_eq!(plan, ScalePlan { width, height });
        }

        /// Property: oversized sources fit and keep their aspect ratio.
        #[test]
        fn prop_oversized_fits_and_keeps_aspect(
            width in 1u32..=20_000,
            height in 1u32..=20_000,
        ) {
            let bounds = BoundingBox::default();
            prop_assume!(!bounds.contains(width, height));

            let plan = plan_dimensions(width, height, bounds);
            prop_assert!(plan.width >= 1 && plan.height >= 1);
            prop_assert!(plan.width <= bounds.max_width, "{:?}", plan);
            prop_assert!(plan.height <= bounds.max_height, "{:?}", plan);

            // One side lands on its bound exactly; the other is within a
            // pixel of the true proportional size unless clamped to one.
            let expected_h = plan.width as f64 * height as f64 / width as f64;
            let expected_w = plan.height as f64 * width as f64 / height as f64;
            prop_assert!(
                plan.width == bounds.max_width || plan.height == bounds.max_height,
                "no side on the bound: {:?}", plan
            );
            prop_assert!(
                (plan.height as f64 - expected_h).abs() < 1.0
                    || (plan.width as f64 - expected_w).abs() < 1.0
                    || plan.width == 1
                    || plan.height == 1,
                "aspect drift: {}x{} -> {:?}", width, height, plan
            );
        }

        /// Property: the result is never larger than the source.
        #[test]
        fn prop_never_upscales(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            max_w in 1u32..=2_000,
            max_h in 1u32..=2_000,
        ) {
            let plan = plan_dimensions(width, height, BoundingBox::new(max_w, max_h));
            prop_assert!(plan.width <= width);
            prop_assert!(plan.height <= height);
        }
    }
}
