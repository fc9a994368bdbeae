use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MorphError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MorphError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        MorphError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(MorphError::render("x").to_string().contains("render error:"));
    assert_eq!(MorphError::Disposed.to_string(), "scene has been disposed");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MorphError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: MorphError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, MorphError::Serde(_)));
    assert!(err.to_string().starts_with("serialization error:"));
}
