use super::*;
use crate::{data::outcome::Outcome, testkit::Fixture};

#[test]
fn x_ticks_cover_domain_every_ten() {
    let ticks = x_ticks();
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[0], -50.0);
    assert_eq!(ticks[5], 0.0);
    assert_eq!(ticks[10], 50.0);
}

#[test]
fn tick_labels_use_step_precision() {
    assert_eq!(tick_label(-50.0, 10.0), "-50");
    assert_eq!(tick_label(4.2000000000000002, 0.2), "4.2");
    assert_eq!(tick_label(0.05, 0.05), "0.05");
    assert_eq!(tick_label(-1e-15, 0.5), "0.0");
}

#[test]
fn regions_split_at_the_boundary() {
    let fx = Fixture::new();
    let scales = fx.scales(1.0);
    let filtered = fx.filtered(Outcome::Consumption);
    let ctx = fx.ctx(&scales, &filtered, Outcome::Consumption, 1.0, 0.0);
    let specs = background_specs(&ctx, 1.0);
    assert_eq!(specs.len(), 2);
    let half = fx.viewport.inner_width() / 2.0;
    let Primitive::Rect(outside) = &specs[0].primitive else {
        panic!("region must be a rect");
    };
    let Primitive::Rect(inside) = &specs[1].primitive else {
        panic!("region must be a rect");
    };
    assert_eq!(outside.x1, half);
    assert_eq!(inside.x0, half);
    assert_eq!(inside.x1, fx.viewport.inner_width());
}

#[test]
fn guide_follows_the_hint() {
    let fx = Fixture::new();
    let scales = fx.scales(1.0);
    let filtered = fx.filtered(Outcome::Consumption);
    let mut ctx = fx.ctx(&scales, &filtered, Outcome::Consumption, 1.0, 0.0);
    let has_guide = |specs: &[ElementSpec]| {
        specs
            .iter()
            .any(|s| s.key == ElementKey::named("threshold-guide"))
    };
    assert!(!has_guide(&axis_specs(&ctx, 1.0)));
    ctx.show_guides = true;
    assert!(has_guide(&axis_specs(&ctx, 1.0)));
}

#[test]
fn backdrop_opacity_is_applied_to_every_layer() {
    let fx = Fixture::new();
    let scales = fx.scales(0.0);
    let filtered = fx.filtered(Outcome::Stunting);
    let ctx = fx.ctx(&scales, &filtered, Outcome::Stunting, 0.2, 0.0);
    let mut scene = SceneGraph::new(fx.viewport);
    render(&mut scene, &ctx, 0.2);
    for layer in [Layer::Background, Layer::Axes, Layer::Labels] {
        assert!(!scene.elements(layer).is_empty());
        for el in scene.elements(layer) {
            assert_eq!(el.baseline().opacity, 0.2);
        }
    }
    let title = scene
        .element(Layer::Labels, &ElementKey::named("y-axis-title"))
        .unwrap();
    let Primitive::Label { text, .. } = title.primitive() else {
        panic!("title must be a label");
    };
    assert_eq!(text, Outcome::Stunting.axis_label());
}
