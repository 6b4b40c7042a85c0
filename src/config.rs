//! Tunable constants for step controls, compositing and background removal.

use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{DrapeError, DrapeResult};

/// Session configuration.
///
/// Every field has a documented default; a JSON file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DrapeConfig {
    /// Percent moved per arrow press.
    pub move_step: f64,
    /// Scale percent added or removed per zoom press.
    pub scale_step: f64,
    /// Degrees rotated per rotate press.
    pub rotate_step_deg: f64,
    /// Opacity of every overlay in a flattened snapshot.
    pub overlay_opacity: f32,
    /// Mask values strictly above this cutoff keep their pixel.
    pub mask_threshold: f32,
    /// Images larger than this on their long side are downscaled before segmentation.
    pub max_segment_dim: u32,
}

impl Default for DrapeConfig {
    fn default() -> Self {
        Self {
            move_step: 5.0,
            scale_step: 10.0,
            rotate_step_deg: 15.0,
            overlay_opacity: 0.85,
            mask_threshold: 0.15,
            max_segment_dim: 1024,
        }
    }
}

impl DrapeConfig {
    pub fn validate(&self) -> DrapeResult<()> {
        for (name, v) in [
            ("move_step", self.move_step),
            ("scale_step", self.scale_step),
            ("rotate_step_deg", self.rotate_step_deg),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(DrapeError::validation(format!(
                    "{name} must be a positive number, got {v}"
                )));
            }
        }
        if !(self.overlay_opacity > 0.0 && self.overlay_opacity <= 1.0) {
            return Err(DrapeError::validation(format!(
                "overlay_opacity must be in (0, 1], got {}",
                self.overlay_opacity
            )));
        }
        if !(self.mask_threshold >= 0.0 && self.mask_threshold < 1.0) {
            return Err(DrapeError::validation(format!(
                "mask_threshold must be in [0, 1), got {}",
                self.mask_threshold
            )));
        }
        if self.max_segment_dim == 0 {
            return Err(DrapeError::validation("max_segment_dim must be > 0"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> DrapeResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> DrapeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
