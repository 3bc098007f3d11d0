use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point in normalized image coordinates.
///
/// Origin is the top-left corner and `y` grows downward, so a larger `y`
/// means closer to the floor. Both components always lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a position, clamping each component into `[0, 1]`.
    ///
    /// Returns `None` for non-finite input.
    pub fn new(x: f32, y: f32) -> Option<Self> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        })
    }

    /// Scale into pixel space for a frame of the given size.
    #[inline]
    pub fn to_pixels(&self, width: f32, height: f32) -> Vector2<f32> {
        Vector2::new(self.x * width, self.y * height)
    }

    /// Euclidean distance in pixels between two positions.
    pub fn pixel_distance(&self, other: &Position, width: f32, height: f32) -> f32 {
        (self.to_pixels(width, height) - other.to_pixels(width, height)).norm()
    }
}
