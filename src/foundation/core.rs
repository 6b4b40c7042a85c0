use crate::foundation::math::clamp_percent;

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Center-anchored position in percent of the container (0..=100 on both axes).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const CENTER: Self = Self { x: 50.0, y: 50.0 };

    /// Build a position, clamping both axes into `[0, 100]`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_percent(x),
            y: clamp_percent(y),
        }
    }

    pub fn clamped(self) -> Self {
        Self::new(self.x, self.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Map onto a pixel area of `size`, origin at its top-left corner.
    pub fn to_point(self, size: Size) -> Point {
        Point::new(self.x / 100.0 * size.width, self.y / 100.0 * size.height)
    }

    /// Offset of this position from the center of a `size` area, in pixels.
    pub fn center_offset(self, size: Size) -> Vec2 {
        Vec2::new(
            (self.x - 50.0) / 100.0 * size.width,
            (self.y - 50.0) / 100.0 * size.height,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
