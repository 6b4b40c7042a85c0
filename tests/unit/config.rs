use super::*;

#[test]
fn defaults_match_documented_constants() {
    let cfg = DrapeConfig::default();
    assert_eq!(cfg.move_step, 5.0);
    assert_eq!(cfg.scale_step, 10.0);
    assert_eq!(cfg.rotate_step_deg, 15.0);
    assert_eq!(cfg.overlay_opacity, 0.85);
    assert_eq!(cfg.mask_threshold, 0.15);
    assert_eq!(cfg.max_segment_dim, 1024);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg = DrapeConfig::from_json_str(r#"{ "move_step": 2.5 }"#).unwrap();
    assert_eq!(cfg.move_step, 2.5);
    assert_eq!(cfg.scale_step, 10.0);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = DrapeConfig::from_json_str(r#"{ "moveStep": 2 }"#).unwrap_err();
    assert!(matches!(err, DrapeError::Serde(_)));
}

#[test]
fn validate_rejects_out_of_range_values() {
    for json in [
        r#"{ "move_step": 0 }"#,
        r#"{ "rotate_step_deg": -15 }"#,
        r#"{ "overlay_opacity": 0 }"#,
        r#"{ "overlay_opacity": 1.5 }"#,
        r#"{ "mask_threshold": 1.0 }"#,
        r#"{ "max_segment_dim": 0 }"#,
    ] {
        let err = DrapeConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, DrapeError::Validation(_)), "{json}");
    }
}
