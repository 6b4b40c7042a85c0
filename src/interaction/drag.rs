use crate::{
    foundation::{
        core::{Point, Position, Rect},
        error::DrapeResult,
    },
    layer::{kind::LayerKind, store::LayerStore, transform::LayerTransform},
};

/// Per-layer drag flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// A pointer event in viewport (client) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    default_prevented: bool,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            default_prevented: false,
        }
    }

    pub fn client(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }

    /// Suppress the host's native drag behavior for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Pointer position as percent of `container`, clamped to `[0, 100]`.
///
/// `None` when the container has no area.
pub fn pointer_to_percent(client: Point, container: Rect) -> Option<Position> {
    let (w, h) = (container.width(), container.height());
    if !(w > 0.0 && h > 0.0) {
        return None;
    }
    Some(Position::new(
        (client.x - container.x0) / w * 100.0,
        (client.y - container.y0) / h * 100.0,
    ))
}

/// Turns pointer down/move/up into position updates, one layer at a time.
///
/// The container is the preview area's bounding box in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragController {
    container: Rect,
}

impl DragController {
    pub fn new(container: Rect) -> Self {
        Self { container }
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    /// The preview was laid out again (resize, scroll).
    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    /// Make `kind` the active target. The layer does not move until the next `drag_move`.
    pub fn drag_start(
        &self,
        store: &mut LayerStore,
        kind: LayerKind,
        event: &mut PointerEvent,
    ) -> DrapeResult<()> {
        event.prevent_default();
        store.begin_drag(kind)?;
        tracing::debug!(layer = %kind, "drag started");
        Ok(())
    }

    /// Follow the pointer. Returns `None` when `kind` is not being dragged.
    pub fn drag_move(
        &self,
        store: &mut LayerStore,
        kind: LayerKind,
        event: &PointerEvent,
    ) -> DrapeResult<Option<LayerTransform>> {
        if store.dragging() != Some(kind) {
            return Ok(None);
        }
        let Some(p) = pointer_to_percent(event.client(), self.container) else {
            return Ok(None);
        };
        store.set_position(kind, p.x, p.y).map(Some)
    }

    pub fn drag_end(&self, store: &mut LayerStore, kind: LayerKind) -> DrapeResult<()> {
        store.end_drag(kind)?;
        tracing::debug!(layer = %kind, "drag ended");
        Ok(())
    }
}

/// Clear every drag flag, wherever the pointer was released.
pub fn global_pointer_up(store: &mut LayerStore) {
    if let Some(kind) = store.dragging() {
        tracing::debug!(layer = %kind, "drag released by global pointer-up");
    }
    store.end_all_drags();
}

/// Viewport-wide pointer-up registration, scoped to one preview view.
///
/// Created when the view mounts and dropped on teardown; while it lives, every pointer-up
/// reported to it releases any drag.
#[derive(Debug)]
pub struct PointerUpListener {
    fired: u64,
}

impl PointerUpListener {
    pub fn register() -> Self {
        tracing::trace!("pointer-up listener registered");
        Self { fired: 0 }
    }

    pub fn on_pointer_up(&mut self, store: &mut LayerStore) {
        self.fired += 1;
        global_pointer_up(store);
    }
}

impl Drop for PointerUpListener {
    fn drop(&mut self) {
        tracing::trace!(fired = self.fired, "pointer-up listener removed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/drag.rs"]
mod tests;
