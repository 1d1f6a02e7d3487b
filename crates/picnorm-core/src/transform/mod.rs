//! Geometric transforms: dimension planning, resampling and rotation.
//!
//! # Coordinate System
//!
//! - Rotations are clockwise quarter turns about the image centre
//! - Origin is the top-left corner
//! - Scaling only ever shrinks, uniformly on both axes

mod plan;
mod resize;
mod rotation;

pub use plan::{plan_dimensions, BoundingBox, ScalePlan, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
pub use resize::{resize, scale};
pub use rotation::rotate;
