use std::sync::Arc;

use super::*;
use crate::{assets::decode::PreparedImage, foundation::core::Position};

fn store() -> LayerStore {
    LayerStore::customization(&DrapeConfig::default()).unwrap()
}

fn tiny_image() -> LayerContent {
    LayerContent::Image(PreparedImage {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![255, 0, 0, 255]),
    })
}

#[test]
fn customization_store_is_z_ordered() {
    let kinds: Vec<_> = store().kinds().collect();
    assert_eq!(kinds, vec![LayerKind::Image, LayerKind::Logo, LayerKind::Text]);
}

#[test]
fn duplicate_kinds_are_rejected() {
    let err = LayerStore::new(&[LayerKind::Logo, LayerKind::Logo], &DrapeConfig::default());
    assert!(err.is_err());
}

#[test]
fn unknown_layer_is_a_validation_error() {
    let mut s = store();
    let err = s.move_layer(LayerKind::Garment, Direction::Up).unwrap_err();
    assert!(matches!(err, DrapeError::Validation(_)));
}

#[test]
fn repeated_moves_stay_clamped() {
    let mut s = store();
    for _ in 0..40 {
        let t = s.move_layer(LayerKind::Logo, Direction::Right).unwrap();
        assert!((0.0..=100.0).contains(&t.position.x));
    }
    assert_eq!(s.transform(LayerKind::Logo).unwrap().position.x, 100.0);
}

#[test]
fn mutating_one_layer_leaves_the_others_alone() {
    let mut s = store();
    let before_logo = s.layer(LayerKind::Logo).unwrap().clone();
    let before_text = s.layer(LayerKind::Text).unwrap().clone();

    s.move_layer(LayerKind::Image, Direction::Down).unwrap();
    s.adjust_scale(LayerKind::Image, true).unwrap();
    s.rotate(LayerKind::Image, true).unwrap();
    s.set_content(LayerKind::Image, tiny_image()).unwrap();

    assert_eq!(s.layer(LayerKind::Logo).unwrap(), &before_logo);
    assert_eq!(s.layer(LayerKind::Text).unwrap(), &before_text);
}

#[test]
fn set_position_clamps_drag_coordinates() {
    let mut s = store();
    let t = s.set_position(LayerKind::Text, -12.0, 180.0).unwrap();
    assert_eq!(t.position, Position::new(0.0, 100.0));
}

#[test]
fn set_content_keeps_transform_and_checks_kind() {
    let mut s = store();
    s.move_layer(LayerKind::Image, Direction::Left).unwrap();
    let before = s.transform(LayerKind::Image).unwrap();
    s.set_content(LayerKind::Image, tiny_image()).unwrap();
    assert_eq!(s.transform(LayerKind::Image).unwrap(), before);
    assert!(s.layer(LayerKind::Image).unwrap().has_content());

    assert!(s.set_content(LayerKind::Text, tiny_image()).is_err());
    assert!(
        s.set_content(LayerKind::Logo, LayerContent::Text(TextContent::default()))
            .is_err()
    );
}

#[test]
fn reset_restores_defaults_and_clears_content() {
    let mut s = store();
    s.set_content(LayerKind::Logo, tiny_image()).unwrap();
    s.move_layer(LayerKind::Logo, Direction::Up).unwrap();
    s.adjust_scale(LayerKind::Logo, false).unwrap();
    s.rotate(LayerKind::Logo, false).unwrap();

    s.reset(LayerKind::Logo).unwrap();
    let logo = s.layer(LayerKind::Logo).unwrap();
    assert_eq!(logo.transform(), &LayerTransform::defaults_for(LayerKind::Logo));
    assert_eq!(logo.content(), &LayerContent::Empty);
    assert!(!logo.has_content());
}

#[test]
fn text_styling_edits_only_the_text_layer() {
    let mut s = store();
    s.set_font_family("Georgia").unwrap();
    s.set_color("#ff0000").unwrap();
    assert!(!s.layer(LayerKind::Text).unwrap().has_content());

    s.set_text("Hello").unwrap();
    let text = s.layer(LayerKind::Text).unwrap().content().as_text().unwrap();
    assert_eq!(text.text, "Hello");
    assert_eq!(text.font_family, "Georgia");
    assert_eq!(text.color, "#ff0000");

    assert!(s.set_color("red").is_err());
    assert!(s.set_font_family("  ").is_err());
}

#[test]
fn drag_flags_are_exclusive() {
    let mut s = store();
    s.begin_drag(LayerKind::Image).unwrap();
    s.begin_drag(LayerKind::Text).unwrap();
    assert_eq!(s.dragging(), Some(LayerKind::Text));
    assert_eq!(
        s.layer(LayerKind::Image).unwrap().drag_state(),
        DragState::Idle
    );
    s.end_all_drags();
    assert_eq!(s.dragging(), None);
}

#[test]
fn snapshot_serializes_image_content_as_data_uri() {
    let mut s = store();
    s.set_content(LayerKind::Image, tiny_image()).unwrap();
    let json = serde_json::to_value(s.snapshot()).unwrap();
    let uri = json[0]["content"]["value"].as_str().unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
    assert_eq!(json[1]["content"]["type"], "empty");

    let back: Vec<LayerSnapshot> = serde_json::from_value(json).unwrap();
    assert_eq!(back, s.snapshot());
}
