use super::*;

#[test]
fn clamp_percent_bounds() {
    assert_eq!(clamp_percent(-0.5), 0.0);
    assert_eq!(clamp_percent(42.0), 42.0);
    assert_eq!(clamp_percent(250.0), 100.0);
    assert_eq!(clamp_percent(f64::NAN), 0.0);
}

#[test]
fn normalize_degrees_wraps_both_directions() {
    assert_eq!(normalize_degrees(0.0), 0.0);
    assert_eq!(normalize_degrees(360.0), 0.0);
    assert_eq!(normalize_degrees(-15.0), 345.0);
    assert_eq!(normalize_degrees(735.0), 15.0);
    assert_eq!(normalize_degrees(-720.0), 0.0);
    assert_eq!(normalize_degrees(f64::INFINITY), 0.0);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_then_unpremultiply_keeps_opaque_and_clears_transparent() {
    let mut px = vec![100u8, 50, 200, 255, 10, 20, 30, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![100, 50, 200, 255, 0, 0, 0, 0]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![100, 50, 200, 255, 0, 0, 0, 0]);
}

#[test]
fn unpremultiply_half_alpha_recovers_channel() {
    let mut px = vec![64u8, 0, 128, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![128, 0, 255, 128]);
}
