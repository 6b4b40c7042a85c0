use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DrapeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(DrapeError::decode("x").to_string().contains("decode error:"));
    assert!(
        DrapeError::segmentation("x")
            .to_string()
            .contains("segmentation error:")
    );
    assert!(DrapeError::camera("x").to_string().contains("camera error:"));
    assert!(DrapeError::busy("x").to_string().contains("busy:"));
    assert!(DrapeError::render("x").to_string().contains("render error:"));
    assert!(
        DrapeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DrapeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: DrapeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, DrapeError::Serde(_)));
}
