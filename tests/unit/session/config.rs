use super::*;

#[test]
fn defaults_are_valid() {
    SceneConfig::default().validate().unwrap();
}

#[test]
fn empty_json_yields_defaults() {
    let cfg = SceneConfig::from_json_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, SceneConfig::default());
}

#[test]
fn nested_overrides_keep_sibling_defaults() {
    let json = r#"{
        "viewport": { "scale": 2.0 },
        "morph": { "hover_radius": 10 },
        "timing": { "morph_ms": 900, "ease": "out_cubic" }
    }"#;
    let cfg = SceneConfig::from_json_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.viewport.scale, 2.0);
    assert_eq!(cfg.viewport.width, 960.0);
    assert_eq!(cfg.morph.hover_radius, 10.0);
    assert_eq!(cfg.morph.marker_radius, 5.0);
    assert_eq!(cfg.timing.morph_ms, 900.0);
    assert_eq!(cfg.timing.zoom_ms, 1200.0);
}

#[test]
fn invalid_values_are_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.timing.border_ms = -1.0;
    assert!(matches!(cfg.validate(), Err(MorphError::Validation(_))));

    let mut cfg = SceneConfig::default();
    cfg.geometry.vertex_tolerance = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.viewport.scale = 0.0;
    assert!(cfg.validate().is_err());

    assert!(matches!(
        SceneConfig::from_json_reader("{ not json".as_bytes()),
        Err(MorphError::Serde(_))
    ));
}
