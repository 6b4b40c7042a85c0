use super::*;
use crate::{config::DrapeConfig, foundation::core::Position};

fn store() -> LayerStore {
    LayerStore::customization(&DrapeConfig::default()).unwrap()
}

fn controller() -> DragController {
    // 200x100 preview whose top-left corner sits at (10, 20) in the viewport.
    DragController::new(Rect::new(10.0, 20.0, 210.0, 120.0))
}

#[test]
fn percent_is_relative_to_container_and_clamped() {
    let rect = Rect::new(10.0, 20.0, 210.0, 120.0);
    assert_eq!(
        pointer_to_percent(Point::new(110.0, 45.0), rect),
        Some(Position { x: 50.0, y: 25.0 })
    );
    assert_eq!(
        pointer_to_percent(Point::new(-500.0, 900.0), rect),
        Some(Position { x: 0.0, y: 100.0 })
    );
    assert_eq!(pointer_to_percent(Point::new(1.0, 1.0), Rect::ZERO), None);
}

#[test]
fn drag_start_prevents_default_without_moving() {
    let mut s = store();
    let before = s.transform(LayerKind::Logo).unwrap();
    let mut ev = PointerEvent::new(10.0, 20.0);

    controller().drag_start(&mut s, LayerKind::Logo, &mut ev).unwrap();

    assert!(ev.default_prevented());
    assert_eq!(s.dragging(), Some(LayerKind::Logo));
    assert_eq!(s.transform(LayerKind::Logo).unwrap(), before);
}

#[test]
fn move_without_start_is_ignored() {
    let mut s = store();
    let before = s.transform(LayerKind::Image).unwrap();
    let moved = controller()
        .drag_move(&mut s, LayerKind::Image, &PointerEvent::new(60.0, 60.0))
        .unwrap();
    assert_eq!(moved, None);
    assert_eq!(s.transform(LayerKind::Image).unwrap(), before);
}

#[test]
fn drag_follows_pointer_and_clamps_outside_container() {
    let mut s = store();
    let c = controller();
    c.drag_start(&mut s, LayerKind::Image, &mut PointerEvent::new(0.0, 0.0))
        .unwrap();

    let t = c
        .drag_move(&mut s, LayerKind::Image, &PointerEvent::new(160.0, 95.0))
        .unwrap()
        .unwrap();
    assert_eq!(t.position, Position { x: 75.0, y: 75.0 });

    let t = c
        .drag_move(&mut s, LayerKind::Image, &PointerEvent::new(-40.0, 400.0))
        .unwrap()
        .unwrap();
    assert_eq!(t.position, Position { x: 0.0, y: 100.0 });
}

#[test]
fn starting_a_second_drag_freezes_the_first_layer() {
    let mut s = store();
    let c = controller();
    c.drag_start(&mut s, LayerKind::Logo, &mut PointerEvent::new(0.0, 0.0))
        .unwrap();
    c.drag_move(&mut s, LayerKind::Logo, &PointerEvent::new(60.0, 70.0))
        .unwrap();
    let logo = s.transform(LayerKind::Logo).unwrap();

    c.drag_start(&mut s, LayerKind::Image, &mut PointerEvent::new(0.0, 0.0))
        .unwrap();
    let ev = PointerEvent::new(190.0, 110.0);
    assert_eq!(c.drag_move(&mut s, LayerKind::Logo, &ev).unwrap(), None);
    assert!(c.drag_move(&mut s, LayerKind::Image, &ev).unwrap().is_some());

    assert_eq!(s.transform(LayerKind::Logo).unwrap(), logo);
    assert_eq!(
        s.transform(LayerKind::Image).unwrap().position,
        Position { x: 90.0, y: 90.0 }
    );

    c.drag_end(&mut s, LayerKind::Image).unwrap();
    assert_eq!(c.drag_move(&mut s, LayerKind::Image, &ev).unwrap(), None);
}

#[test]
fn global_pointer_up_releases_any_drag() {
    let mut s = store();
    controller()
        .drag_start(&mut s, LayerKind::Text, &mut PointerEvent::new(0.0, 0.0))
        .unwrap();

    let mut listener = PointerUpListener::register();
    listener.on_pointer_up(&mut s);

    assert_eq!(s.dragging(), None);
    assert!(s.layers().all(|l| l.drag_state() == DragState::Idle));
}
