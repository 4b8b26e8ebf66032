//! Pixel-space conversion for the rendering adapter.
//!
//! The algorithms only ever see the abstract [0,100]x[0,100] coordinate
//! space. A front end working in canvas pixels uses [`CanvasMapping`] to
//! translate a click's pixel offset into a [`Point`] and to place returned
//! artifacts back onto the canvas. Rendering itself stays on the adapter's
//! side.

use crate::error::{ModelError, ModelResult};
use crate::Point;

/// Upper bound of the coordinate space on both axes.
pub const COORDINATE_MAX: f64 = 100.0;

/// Linear mapping between a canvas bounding box and the coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    width: f64,
    height: f64,
}

impl CanvasMapping {
    pub fn new(width: f64, height: f64) -> ModelResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ModelError::invalid(
                "width",
                format!("must be positive and finite, got {}", width),
            ));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(ModelError::invalid(
                "height",
                format!("must be positive and finite, got {}", height),
            ));
        }
        Ok(CanvasMapping { width, height })
    }

    /// An unlabeled point from a pixel offset within the canvas.
    pub fn point_from_pixels(&self, px: f64, py: f64) -> Point {
        Point::new(
            px / self.width * COORDINATE_MAX,
            py / self.height * COORDINATE_MAX,
        )
    }

    /// A labeled point from a pixel offset, for classification input.
    pub fn labeled_point_from_pixels(&self, px: f64, py: f64, label: usize) -> Point {
        let p = self.point_from_pixels(px, py);
        Point::labeled(p.x, p.y, label)
    }

    /// Maps a coordinate-space position back to canvas pixels.
    pub fn to_pixels(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x / COORDINATE_MAX * self.width,
            y / COORDINATE_MAX * self.height,
        )
    }
}
