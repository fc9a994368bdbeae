use super::*;

#[test]
fn default_viewport_has_positive_plot_area() {
    let vp = Viewport::default();
    vp.validate().unwrap();
    assert_eq!(vp.inner_width(), 850.0);
    assert_eq!(vp.inner_height(), 500.0);
    assert_eq!(vp.plot_rect(), Rect::new(0.0, 0.0, 850.0, 500.0));
}

#[test]
fn margins_larger_than_viewport_are_rejected() {
    let vp = Viewport {
        width: 100.0,
        ..Viewport::default()
    };
    assert!(vp.validate().is_err());

    let vp = Viewport {
        scale: 0.0,
        ..Viewport::default()
    };
    assert!(vp.validate().is_err());
}

#[test]
fn physical_size_follows_scale() {
    let vp = Viewport {
        scale: 1.5,
        ..Viewport::default()
    };
    assert_eq!(vp.physical_size(), (1440, 900));
    assert_eq!(vp.surface_transform(), Affine::scale(1.5));
}

#[test]
fn rgb_hex_is_lowercase() {
    assert_eq!(Rgb8::new(255, 51, 102).to_hex(), "#ff3366");
}
