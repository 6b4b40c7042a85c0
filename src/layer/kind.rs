use crate::foundation::core::Position;

/// The overlay a layer represents. Each kind carries its own bounds and stacking slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Product garment drawn over a camera frame in virtual try-on.
    Garment,
    /// Background-removed user photo.
    Image,
    Logo,
    Text,
}

/// Per-kind defaults and limits. Scale floors differ on purpose (logo goes smaller).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerBounds {
    pub default_position: Position,
    pub default_scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub z_index: i32,
}

impl LayerBounds {
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.default_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }
}

impl LayerKind {
    pub const ALL: [LayerKind; 4] = [
        LayerKind::Garment,
        LayerKind::Image,
        LayerKind::Logo,
        LayerKind::Text,
    ];

    /// Layers owned by the customization tool, bottom to top.
    pub const CUSTOMIZATION: [LayerKind; 3] = [LayerKind::Image, LayerKind::Logo, LayerKind::Text];

    pub fn bounds(self) -> LayerBounds {
        match self {
            LayerKind::Garment => LayerBounds {
                default_position: Position::CENTER,
                default_scale: 100.0,
                min_scale: 50.0,
                max_scale: 200.0,
                z_index: 10,
            },
            LayerKind::Image => LayerBounds {
                default_position: Position::new(50.0, 25.0),
                default_scale: 100.0,
                min_scale: 50.0,
                max_scale: 200.0,
                z_index: 20,
            },
            LayerKind::Logo => LayerBounds {
                default_position: Position::new(50.0, 40.0),
                default_scale: 100.0,
                min_scale: 30.0,
                max_scale: 200.0,
                z_index: 30,
            },
            LayerKind::Text => LayerBounds {
                default_position: Position::CENTER,
                default_scale: 100.0,
                min_scale: 50.0,
                max_scale: 200.0,
                z_index: 40,
            },
        }
    }

    pub fn z_index(self) -> i32 {
        self.bounds().z_index
    }

    pub fn is_text(self) -> bool {
        matches!(self, LayerKind::Text)
    }

    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Garment => "garment",
            LayerKind::Image => "image",
            LayerKind::Logo => "logo",
            LayerKind::Text => "text",
        }
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for LayerKind {
    type Err = crate::foundation::error::DrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                crate::foundation::error::DrapeError::validation(format!(
                    "unknown layer kind '{s}'"
                ))
            })
    }
}
