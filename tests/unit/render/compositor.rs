use std::sync::Arc;

use super::*;
use crate::layer::kind::LayerKind;

fn solid(w: u32, h: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(px.repeat((w * h) as usize)),
    }
}

fn compositor() -> Compositor {
    Compositor::with_text_rasterizer(
        &DrapeConfig::default(),
        TextRasterizer::with_fontdb(Arc::new(usvg::fontdb::Database::new())),
    )
}

fn store_with(kind: LayerKind, overlay: PreparedImage) -> LayerStore {
    let mut s = LayerStore::customization(&DrapeConfig::default()).unwrap();
    s.set_content(kind, LayerContent::Image(overlay)).unwrap();
    s
}

fn near(actual: [u8; 4], expected: [u8; 4]) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| (i16::from(*a) - i16::from(*e)).abs() <= 3)
}

const BLUE: [u8; 4] = [0, 0, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
// Red at 0.85 over opaque blue.
const RED_OVER_BLUE: [u8; 4] = [217, 0, 38, 255];

#[test]
fn base_only_is_copied_verbatim() {
    let base = solid(8, 6, BLUE);
    let s = LayerStore::customization(&DrapeConfig::default()).unwrap();
    let snap = compositor().flatten(&base, s.layers()).unwrap();
    assert_eq!((snap.width(), snap.height()), (8, 6));
    assert!(snap.premul_bytes().chunks_exact(4).all(|px| near(
        [px[0], px[1], px[2], px[3]],
        BLUE
    )));
}

#[test]
fn overlay_is_centered_on_its_offset_with_fixed_opacity() {
    let base = solid(100, 100, BLUE);
    let mut s = store_with(LayerKind::Image, solid(10, 10, RED));
    s.set_position(LayerKind::Image, 65.0, 25.0).unwrap();

    let snap = compositor().flatten(&base, s.layers()).unwrap();
    assert!(near(snap.pixel(65, 25).unwrap(), RED_OVER_BLUE), "{:?}", snap.pixel(65, 25));
    assert!(near(snap.pixel(61, 21).unwrap(), RED_OVER_BLUE));
    assert!(near(snap.pixel(75, 25).unwrap(), BLUE));
    assert!(near(snap.pixel(50, 50).unwrap(), BLUE));
}

#[test]
fn scale_and_rotation_apply_about_the_overlay_center() {
    let base = solid(100, 100, BLUE);
    let mut s = store_with(LayerKind::Logo, solid(20, 4, RED));
    s.set_position(LayerKind::Logo, 50.0, 50.0).unwrap();
    s.set_rotation(LayerKind::Logo, 90.0).unwrap();

    let snap = compositor().flatten(&base, s.layers()).unwrap();
    // Rotated 90 degrees: the 20px side now runs vertically.
    assert!(near(snap.pixel(50, 42).unwrap(), RED_OVER_BLUE));
    assert!(near(snap.pixel(42, 50).unwrap(), BLUE));

    s.set_rotation(LayerKind::Logo, 0.0).unwrap();
    for _ in 0..10 {
        s.adjust_scale(LayerKind::Logo, true).unwrap();
    }
    let snap = compositor().flatten(&base, s.layers()).unwrap();
    // Scale 200: 40px wide, so x = 32 is covered.
    assert!(near(snap.pixel(32, 50).unwrap(), RED_OVER_BLUE));
    // 8px tall band covers rows 46..54.
    assert!(near(snap.pixel(50, 46).unwrap(), RED_OVER_BLUE));
    assert!(near(snap.pixel(50, 45).unwrap(), BLUE));
}

#[test]
fn layer_transforms_do_not_compound() {
    let base = solid(100, 100, BLUE);
    let mut s = store_with(LayerKind::Image, solid(10, 10, RED));
    s.set_content(LayerKind::Logo, LayerContent::Image(solid(10, 10, [0, 255, 0, 255])))
        .unwrap();
    s.set_position(LayerKind::Image, 20.0, 20.0).unwrap();
    s.set_rotation(LayerKind::Image, 45.0).unwrap();
    s.set_position(LayerKind::Logo, 80.0, 80.0).unwrap();

    let snap = compositor().flatten(&base, s.layers()).unwrap();
    assert!(near(snap.pixel(80, 80).unwrap(), [0, 217, 38, 255]));
    assert!(near(snap.pixel(20, 20).unwrap(), RED_OVER_BLUE));
}

#[test]
fn empty_layers_are_skipped() {
    let base = solid(10, 10, BLUE);
    let mut s = LayerStore::customization(&DrapeConfig::default()).unwrap();
    s.set_text("   ").unwrap();
    let snap = compositor().flatten(&base, s.layers()).unwrap();
    assert!(near(snap.pixel(5, 5).unwrap(), BLUE));
}

#[test]
fn preview_fits_base_and_draws_layers_opaque() {
    let base = solid(50, 50, BLUE);
    let s = store_with(LayerKind::Image, solid(10, 10, RED));
    let snap = compositor()
        .render_preview(&base, &s, Size::new(100.0, 100.0))
        .unwrap();
    assert_eq!((snap.width(), snap.height()), (100, 100));
    // Image box: 50x50 centered at (50, 25).
    assert!(near(snap.pixel(50, 25).unwrap(), RED));
    assert!(near(snap.pixel(50, 80).unwrap(), BLUE));
}

#[test]
fn zero_sized_base_is_a_render_error() {
    let base = solid(0, 0, BLUE);
    let s = LayerStore::customization(&DrapeConfig::default()).unwrap();
    let err = compositor().flatten(&base, s.layers()).unwrap_err();
    assert!(matches!(err, crate::foundation::error::DrapeError::Render(_)));
}
