use crate::{
    foundation::{
        core::{Point, Rect},
        error::DrapeResult,
    },
    interaction::{
        drag::{DragController, PointerEvent, PointerUpListener},
        highlight::Highlight,
    },
    layer::{
        kind::LayerKind,
        store::LayerStore,
        transform::{Direction, LayerTransform},
    },
    render::layout::PreviewLayout,
};

/// One press of a step control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    Move { direction: Direction },
    Scale { increase: bool },
    Rotate { clockwise: bool },
}

/// Routes raw preview input to the layer under the pointer.
///
/// Owns the drag controller, the hover highlight and the viewport pointer-up listener; the
/// listener lives exactly as long as this value.
#[derive(Debug)]
pub struct PreviewInteraction {
    drag: DragController,
    highlight: Highlight,
    pointer_up: PointerUpListener,
}

impl PreviewInteraction {
    pub fn new(container: Rect) -> Self {
        Self {
            drag: DragController::new(container),
            highlight: Highlight::default(),
            pointer_up: PointerUpListener::register(),
        }
    }

    pub fn container(&self) -> Rect {
        self.drag.container()
    }

    pub fn set_container(&mut self, container: Rect) {
        self.drag.set_container(container);
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn layout(&self, store: &LayerStore) -> PreviewLayout {
        PreviewLayout::compute(store, self.container().size())
    }

    fn local(&self, event: &PointerEvent) -> Point {
        let c = self.container();
        Point::new(event.client_x - c.x0, event.client_y - c.y0)
    }

    /// Start dragging the topmost layer under the pointer, if any.
    pub fn pointer_down(
        &mut self,
        store: &mut LayerStore,
        event: &mut PointerEvent,
    ) -> DrapeResult<Option<LayerKind>> {
        let Some(kind) = self.layout(store).hit_test(self.local(event)) else {
            return Ok(None);
        };
        self.drag.drag_start(store, kind, event)?;
        Ok(Some(kind))
    }

    /// Move the dragged layer, or update the hover when nothing is dragged.
    pub fn pointer_move(
        &mut self,
        store: &mut LayerStore,
        event: &PointerEvent,
    ) -> DrapeResult<Option<LayerTransform>> {
        if let Some(kind) = store.dragging() {
            return self.drag.drag_move(store, kind, event);
        }
        match self.layout(store).hit_test(self.local(event)) {
            Some(kind) => self.highlight.pointer_enter(kind),
            None => self.highlight.clear(),
        }
        Ok(None)
    }

    /// Pointer released anywhere in the viewport.
    pub fn pointer_up(&mut self, store: &mut LayerStore) {
        self.pointer_up.on_pointer_up(store);
    }

    pub fn pointer_leave(&mut self) {
        self.highlight.clear();
    }

    pub fn highlighted(&self, store: &LayerStore) -> Option<LayerKind> {
        self.highlight.highlighted(store)
    }

    pub fn step(
        &self,
        store: &mut LayerStore,
        kind: LayerKind,
        action: StepAction,
    ) -> DrapeResult<LayerTransform> {
        match action {
            StepAction::Move { direction } => store.move_layer(kind, direction),
            StepAction::Scale { increase } => store.adjust_scale(kind, increase),
            StepAction::Rotate { clockwise } => store.rotate(kind, clockwise),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
