use crate::{
    assets::color::HexColor,
    config::DrapeConfig,
    foundation::error::{DrapeError, DrapeResult},
    interaction::drag::DragState,
    layer::{
        content::{LayerContent, TextContent, validate_font_family},
        kind::{LayerBounds, LayerKind},
        transform::{Direction, LayerTransform},
    },
};

/// One overlay: its transform, content and drag flag.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    transform: LayerTransform,
    content: LayerContent,
    drag: DragState,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            transform: LayerTransform::defaults_for(kind),
            content: LayerContent::Empty,
            drag: DragState::Idle,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn bounds(&self) -> LayerBounds {
        self.kind.bounds()
    }

    pub fn transform(&self) -> &LayerTransform {
        &self.transform
    }

    pub fn content(&self) -> &LayerContent {
        &self.content
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn snapshot(&self) -> LayerSnapshot {
        LayerSnapshot {
            kind: self.kind,
            transform: self.transform,
            content: self.content.clone(),
        }
    }
}

/// Serializable copy of one layer, used by cart selections and scene files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerSnapshot {
    pub kind: LayerKind,
    pub transform: LayerTransform,
    pub content: LayerContent,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Steps {
    move_pct: f64,
    scale_pct: f64,
    rotate_deg: f64,
}

/// Owns transform and content for a fixed set of layers, kept in z-order.
///
/// Every mutation touches exactly one layer.
#[derive(Clone, Debug)]
pub struct LayerStore {
    layers: Vec<Layer>,
    steps: Steps,
}

impl LayerStore {
    pub fn new(kinds: &[LayerKind], config: &DrapeConfig) -> DrapeResult<Self> {
        config.validate()?;
        let mut layers: Vec<Layer> = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            if layers.iter().any(|l| l.kind == kind) {
                return Err(DrapeError::validation(format!(
                    "layer '{kind}' listed more than once"
                )));
            }
            layers.push(Layer::new(kind));
        }
        layers.sort_by_key(|l| l.kind.z_index());
        Ok(Self {
            layers,
            steps: Steps {
                move_pct: config.move_step,
                scale_pct: config.scale_step,
                rotate_deg: config.rotate_step_deg,
            },
        })
    }

    /// Image, logo and text layers of the customization tool.
    pub fn customization(config: &DrapeConfig) -> DrapeResult<Self> {
        Self::new(&LayerKind::CUSTOMIZATION, config)
    }

    /// Single garment layer of the try-on view.
    pub fn try_on(config: &DrapeConfig) -> DrapeResult<Self> {
        Self::new(&[LayerKind::Garment], config)
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> impl DoubleEndedIterator<Item = &Layer> + '_ {
        self.layers.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = LayerKind> + '_ {
        self.layers.iter().map(|l| l.kind)
    }

    pub fn get(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn layer(&self, kind: LayerKind) -> DrapeResult<&Layer> {
        self.get(kind).ok_or_else(|| missing(kind))
    }

    pub fn transform(&self, kind: LayerKind) -> DrapeResult<LayerTransform> {
        Ok(self.layer(kind)?.transform)
    }

    fn layer_mut(&mut self, kind: LayerKind) -> DrapeResult<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|l| l.kind == kind)
            .ok_or_else(|| missing(kind))
    }

    fn update(
        &mut self,
        kind: LayerKind,
        f: impl FnOnce(LayerTransform, &LayerBounds) -> LayerTransform,
    ) -> DrapeResult<LayerTransform> {
        let layer = self.layer_mut(kind)?;
        let bounds = layer.kind.bounds();
        layer.transform = f(layer.transform, &bounds);
        tracing::debug!(layer = %kind, transform = ?layer.transform, "layer transform updated");
        Ok(layer.transform)
    }

    /// Step the layer one unit in `direction`; stops at the container edge.
    pub fn move_layer(
        &mut self,
        kind: LayerKind,
        direction: Direction,
    ) -> DrapeResult<LayerTransform> {
        let step = self.steps.move_pct;
        self.update(kind, |t, _| t.moved(direction, step))
    }

    /// Absolute placement used by free drag; both axes are clamped.
    pub fn set_position(&mut self, kind: LayerKind, x: f64, y: f64) -> DrapeResult<LayerTransform> {
        self.update(kind, |t, _| t.with_position(x, y))
    }

    pub fn adjust_scale(&mut self, kind: LayerKind, increase: bool) -> DrapeResult<LayerTransform> {
        let step = self.steps.scale_pct;
        self.update(kind, |t, b| t.scaled(increase, step, b))
    }

    pub fn rotate(&mut self, kind: LayerKind, clockwise: bool) -> DrapeResult<LayerTransform> {
        let step = self.steps.rotate_deg;
        self.update(kind, |t, _| t.rotated(clockwise, step))
    }

    /// Continuous rotation (slider). Any finite angle is accepted and normalized.
    pub fn set_rotation(&mut self, kind: LayerKind, degrees: f64) -> DrapeResult<LayerTransform> {
        self.update(kind, |t, _| t.with_rotation(degrees))
    }

    /// Replace a whole transform, re-applying the invariants.
    pub fn set_transform(
        &mut self,
        kind: LayerKind,
        transform: LayerTransform,
    ) -> DrapeResult<LayerTransform> {
        self.update(kind, |_, b| transform.normalized(b))
    }

    /// Replace content; the transform is untouched.
    pub fn set_content(&mut self, kind: LayerKind, content: LayerContent) -> DrapeResult<()> {
        let compatible = match &content {
            LayerContent::Empty => true,
            LayerContent::Text(_) => kind.is_text(),
            LayerContent::Image(_) => !kind.is_text(),
        };
        if !compatible {
            return Err(DrapeError::validation(format!(
                "layer '{kind}' cannot hold this kind of content"
            )));
        }
        self.layer_mut(kind)?.content = content;
        tracing::debug!(layer = %kind, "layer content replaced");
        Ok(())
    }

    /// Restore the documented defaults and clear content.
    pub fn reset(&mut self, kind: LayerKind) -> DrapeResult<()> {
        let layer = self.layer_mut(kind)?;
        *layer = Layer::new(kind);
        tracing::debug!(layer = %kind, "layer reset");
        Ok(())
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> DrapeResult<()> {
        let text = text.into();
        self.edit_text(|t| t.text = text)
    }

    pub fn set_font_family(&mut self, family: &str) -> DrapeResult<()> {
        let family = validate_font_family(family)?;
        self.edit_text(|t| t.font_family = family)
    }

    pub fn set_color(&mut self, color: &str) -> DrapeResult<()> {
        let hex = HexColor::parse(color)?.to_hex();
        self.edit_text(|t| t.color = hex)
    }

    fn edit_text(&mut self, f: impl FnOnce(&mut TextContent)) -> DrapeResult<()> {
        let layer = self.layer_mut(LayerKind::Text)?;
        let mut text = match std::mem::take(&mut layer.content) {
            LayerContent::Text(t) => t,
            _ => TextContent::default(),
        };
        f(&mut text);
        layer.content = LayerContent::Text(text);
        Ok(())
    }

    pub fn snapshot(&self) -> Vec<LayerSnapshot> {
        self.layers.iter().map(Layer::snapshot).collect()
    }

    /// Kind currently being dragged, if any.
    pub fn dragging(&self) -> Option<LayerKind> {
        self.layers
            .iter()
            .find(|l| l.drag == DragState::Dragging)
            .map(|l| l.kind)
    }

    /// Make `kind` the only dragging layer.
    pub(crate) fn begin_drag(&mut self, kind: LayerKind) -> DrapeResult<()> {
        self.layer(kind)?;
        for layer in &mut self.layers {
            layer.drag = if layer.kind == kind {
                DragState::Dragging
            } else {
                DragState::Idle
            };
        }
        Ok(())
    }

    pub(crate) fn end_drag(&mut self, kind: LayerKind) -> DrapeResult<()> {
        self.layer_mut(kind)?.drag = DragState::Idle;
        Ok(())
    }

    pub(crate) fn end_all_drags(&mut self) {
        for layer in &mut self.layers {
            layer.drag = DragState::Idle;
        }
    }
}

fn missing(kind: LayerKind) -> DrapeError {
    DrapeError::validation(format!("layer '{kind}' is not part of this view"))
}

#[cfg(test)]
#[path = "../../tests/unit/layer/store.rs"]
mod tests;
