use crate::layer::{kind::LayerKind, store::LayerStore};

/// Hover state of the preview. At most one layer shows the drag affordance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
    hovered: Option<LayerKind>,
}

impl Highlight {
    pub fn pointer_enter(&mut self, kind: LayerKind) {
        self.hovered = Some(kind);
    }

    pub fn clear(&mut self) {
        self.hovered = None;
    }

    /// The dragging layer wins over the hovered one.
    pub fn highlighted(&self, store: &LayerStore) -> Option<LayerKind> {
        store.dragging().or(self.hovered)
    }
}
