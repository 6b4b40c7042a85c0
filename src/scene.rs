//! Scene files: a base image plus layer sources and transforms, as read by the CLI.
//!
//! Relative paths are resolved against the scene file's directory.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::decode::{PreparedImage, load_image_file},
    config::DrapeConfig,
    foundation::{
        core::{Position, Size},
        error::{DrapeError, DrapeResult},
    },
    layer::{
        content::{LayerContent, TextContent},
        kind::LayerKind,
        store::LayerStore,
        transform::LayerTransform,
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Garment photo (customization) or camera frame (try-on).
    pub base: PathBuf,
    /// Preview area size; defaults to the base image size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<SceneSize>,
    pub layers: Vec<SceneLayer>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSize {
    pub width: f64,
    pub height: f64,
}

/// One layer. Omitted transform fields take the kind's defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneLayer {
    pub kind: LayerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

/// A scene with its images decoded and its layers in a store.
#[derive(Clone, Debug)]
pub struct LoadedScene {
    pub base: PreparedImage,
    pub store: LayerStore,
    pub container: Size,
}

impl Scene {
    pub fn from_json_str(s: &str) -> DrapeResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load_file(path: &Path) -> DrapeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Decode every referenced image and build the layer store.
    #[tracing::instrument(skip(self, config), fields(layers = self.layers.len()))]
    pub fn resolve(&self, root: &Path, config: &DrapeConfig) -> DrapeResult<LoadedScene> {
        let base = load_image_file(&root.join(&self.base))?;
        let kinds: Vec<LayerKind> = self.layers.iter().map(|l| l.kind).collect();
        let mut store = LayerStore::new(&kinds, config)?;

        for layer in &self.layers {
            let content = layer.content(root)?;
            store.set_content(layer.kind, content)?;
            store.set_transform(layer.kind, layer.transform())?;
        }

        let container = match self.container {
            Some(SceneSize { width, height }) => {
                if !(width > 0.0 && height > 0.0) {
                    return Err(DrapeError::validation("scene container must have area"));
                }
                Size::new(width, height)
            }
            None => Size::new(f64::from(base.width), f64::from(base.height)),
        };
        Ok(LoadedScene {
            base,
            store,
            container,
        })
    }
}

impl SceneLayer {
    fn content(&self, root: &Path) -> DrapeResult<LayerContent> {
        match (&self.image, &self.text) {
            (Some(_), Some(_)) => Err(DrapeError::validation(format!(
                "layer '{}' has both an image and text",
                self.kind
            ))),
            (Some(path), None) => Ok(LayerContent::Image(load_image_file(&root.join(path))?)),
            (None, Some(text)) => Ok(LayerContent::Text(TextContent::new(
                text.text.clone(),
                text.font_family.clone(),
                &text.color,
            )?)),
            (None, None) => Ok(LayerContent::Empty),
        }
    }

    fn transform(&self) -> LayerTransform {
        let d = LayerTransform::defaults_for(self.kind);
        LayerTransform {
            position: self.position.unwrap_or(d.position),
            scale: self.scale.unwrap_or(d.scale),
            rotation: self.rotation.unwrap_or(d.rotation),
        }
    }
}

/// Directory scene paths are relative to.
pub fn scene_root(scene_path: &Path) -> &Path {
    scene_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

#[cfg(test)]
#[path = "../tests/unit/scene.rs"]
mod tests;
