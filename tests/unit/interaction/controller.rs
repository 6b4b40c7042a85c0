use std::sync::Arc;

use super::*;
use crate::{
    assets::decode::PreparedImage, config::DrapeConfig, foundation::core::Position,
    layer::content::LayerContent,
};

fn pixel() -> LayerContent {
    LayerContent::Image(PreparedImage {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![0, 0, 0, 255]),
    })
}

// Image box spans (100..300, 0..200), logo box (100..300, 60..260) in a 400x400 preview.
fn setup() -> (LayerStore, PreviewInteraction) {
    let mut s = LayerStore::customization(&DrapeConfig::default()).unwrap();
    s.set_content(LayerKind::Image, pixel()).unwrap();
    s.set_content(LayerKind::Logo, pixel()).unwrap();
    (s, PreviewInteraction::new(Rect::new(0.0, 0.0, 400.0, 400.0)))
}

#[test]
fn pointer_down_picks_topmost_layer() {
    let (mut s, mut ui) = setup();

    let mut ev = PointerEvent::new(200.0, 100.0);
    assert_eq!(ui.pointer_down(&mut s, &mut ev).unwrap(), Some(LayerKind::Logo));
    assert!(ev.default_prevented());
    ui.pointer_up(&mut s);

    let mut ev = PointerEvent::new(200.0, 30.0);
    assert_eq!(ui.pointer_down(&mut s, &mut ev).unwrap(), Some(LayerKind::Image));
    ui.pointer_up(&mut s);

    let mut ev = PointerEvent::new(10.0, 390.0);
    assert_eq!(ui.pointer_down(&mut s, &mut ev).unwrap(), None);
    assert!(!ev.default_prevented());
    assert_eq!(s.dragging(), None);
}

#[test]
fn moves_go_to_the_dragged_layer_until_release() {
    let (mut s, mut ui) = setup();
    ui.pointer_down(&mut s, &mut PointerEvent::new(200.0, 30.0))
        .unwrap();

    let t = ui
        .pointer_move(&mut s, &PointerEvent::new(300.0, 200.0))
        .unwrap()
        .unwrap();
    assert_eq!(t.position, Position { x: 75.0, y: 50.0 });
    assert_eq!(ui.highlighted(&s), Some(LayerKind::Image));

    ui.pointer_up(&mut s);
    assert_eq!(s.dragging(), None);
    assert_eq!(
        ui.pointer_move(&mut s, &PointerEvent::new(0.0, 0.0)).unwrap(),
        None
    );
    assert_eq!(s.transform(LayerKind::Image).unwrap().position.x, 75.0);
}

#[test]
fn hover_tracks_the_layer_under_the_pointer() {
    let (mut s, mut ui) = setup();
    ui.pointer_move(&mut s, &PointerEvent::new(200.0, 250.0)).unwrap();
    assert_eq!(ui.highlighted(&s), Some(LayerKind::Logo));
    ui.pointer_move(&mut s, &PointerEvent::new(5.0, 5.0)).unwrap();
    assert_eq!(ui.highlighted(&s), None);
}

#[test]
fn offset_container_uses_local_coordinates() {
    let (mut s, mut ui) = setup();
    ui.set_container(Rect::new(50.0, 50.0, 450.0, 450.0));
    let mut ev = PointerEvent::new(250.0, 80.0);
    assert_eq!(ui.pointer_down(&mut s, &mut ev).unwrap(), Some(LayerKind::Image));
}

#[test]
fn step_actions_use_configured_steps() {
    let (mut s, ui) = setup();
    for _ in 0..3 {
        ui.step(
            &mut s,
            LayerKind::Image,
            StepAction::Move {
                direction: Direction::Right,
            },
        )
        .unwrap();
    }
    let t = ui
        .step(&mut s, LayerKind::Image, StepAction::Rotate { clockwise: false })
        .unwrap();
    assert_eq!(t.position.x, 65.0);
    assert_eq!(t.rotation, 345.0);

    let t = ui
        .step(&mut s, LayerKind::Logo, StepAction::Scale { increase: false })
        .unwrap();
    assert_eq!(t.scale, 90.0);
}
