use crate::{
    foundation::{core::Position, math::normalize_degrees},
    layer::kind::{LayerBounds, LayerKind},
};

/// Arrow-control direction. Up/down act on `y`, left/right on `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl std::str::FromStr for Direction {
    type Err = crate::foundation::error::DrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(crate::foundation::error::DrapeError::validation(format!(
                "unknown direction '{s}'"
            ))),
        }
    }
}

/// Position, scale and rotation of one overlay.
///
/// Every constructor and mutation keeps the invariants: position in `[0, 100]`, scale inside
/// the kind's bounds, rotation in `[0, 360)`. Mutations return a new value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerTransform {
    pub position: Position,
    /// Percent; 100 is natural size.
    pub scale: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
}

impl LayerTransform {
    pub fn defaults_for(kind: LayerKind) -> Self {
        let b = kind.bounds();
        Self {
            position: b.default_position,
            scale: b.default_scale,
            rotation: 0.0,
        }
    }

    pub fn moved(self, direction: Direction, step: f64) -> Self {
        let (dx, dy) = match direction {
            Direction::Up => (0.0, -step),
            Direction::Down => (0.0, step),
            Direction::Left => (-step, 0.0),
            Direction::Right => (step, 0.0),
        };
        Self {
            position: self.position.offset(dx, dy),
            ..self
        }
    }

    pub fn with_position(self, x: f64, y: f64) -> Self {
        Self {
            position: Position::new(x, y),
            ..self
        }
    }

    pub fn scaled(self, increase: bool, step: f64, bounds: &LayerBounds) -> Self {
        let delta = if increase { step } else { -step };
        Self {
            scale: bounds.clamp_scale(self.scale + delta),
            ..self
        }
    }

    pub fn rotated(self, clockwise: bool, step_deg: f64) -> Self {
        let delta = if clockwise { step_deg } else { -step_deg };
        self.with_rotation(self.rotation + delta)
    }

    pub fn with_rotation(self, degrees: f64) -> Self {
        Self {
            rotation: normalize_degrees(degrees),
            ..self
        }
    }

    /// Re-apply every invariant, e.g. after deserializing a transform from outside.
    pub fn normalized(self, bounds: &LayerBounds) -> Self {
        Self {
            position: self.position.clamped(),
            scale: bounds.clamp_scale(self.scale),
            rotation: normalize_degrees(self.rotation),
        }
    }

    pub fn rotation_rad(&self) -> f64 {
        self.rotation.to_radians()
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale / 100.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/transform.rs"]
mod tests;
