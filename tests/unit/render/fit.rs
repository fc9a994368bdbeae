use super::*;
use crate::testkit::Fixture;

#[test]
fn ols_recovers_an_exact_line() {
    let pts = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)];
    let f = ols(&pts).unwrap();
    assert!((f.slope - 2.0).abs() < 1e-12);
    assert!((f.intercept - 1.0).abs() < 1e-12);
    assert_eq!((f.x_min, f.x_max, f.n), (0.0, 3.0, 4));
    assert!((f.at(10.0) - 21.0).abs() < 1e-9);
}

#[test]
fn ols_rejects_degenerate_inputs() {
    assert!(ols(&[]).is_none());
    assert!(ols(&[(1.0, 2.0)]).is_none());
    assert!(ols(&[(1.0, 2.0), (1.0, 5.0)]).is_none());
}

#[test]
fn sides_are_fit_separately() {
    let fx = Fixture::new();
    let pts = fx.filtered(Outcome::Consumption);
    let fits = fit_sides(&pts, Outcome::Consumption);
    let out = fits.outside.unwrap();
    let inn = fits.inside.unwrap();
    assert!(out.x_max <= 0.0);
    assert!(inn.x_min >= 0.0);
    assert_eq!(out.n + inn.n, pts.len());
}

#[test]
fn group_means_split_by_treatment() {
    let fx = Fixture::new();
    let pts = fx.filtered(Outcome::Roads);
    let (out, inn) = group_means(&pts, Outcome::Roads);
    // Outside: 10, 30, 15; inside: 0 (real), 20, 5.
    assert!((out.unwrap() - 55.0 / 3.0).abs() < 1e-9);
    assert!((inn.unwrap() - 25.0 / 3.0).abs() < 1e-9);
}

#[test]
fn annotations_are_keyed_to_phase() {
    assert!(annotations(ScatterPhase::Dots).is_empty());
    assert!(annotations(ScatterPhase::OlsFit).is_empty());
    assert_eq!(annotations(ScatterPhase::NaiveEffect), &[Annotation::NaiveGap]);
    assert_eq!(
        annotations(ScatterPhase::ControlledEffect),
        &[Annotation::ControlledGap]
    );
}

#[test]
fn layers_follow_phase_changes_with_fades() {
    let fx = Fixture::new();
    let scales = fx.scales(1.0);
    let pts = fx.filtered(Outcome::Consumption);
    let mut scene = SceneGraph::new(fx.viewport);

    let mut ctx = fx.ctx(&scales, &pts, Outcome::Consumption, 1.0, 0.0);
    render(&mut scene, &ctx);
    assert!(scene.elements(Layer::FitLines).is_empty());

    ctx.phase = ScatterPhase::OlsFit;
    let (lines, effects) = render(&mut scene, &ctx);
    assert_eq!(lines.entered, 2);
    assert_eq!(effects.entered, 0);

    ctx.phase = ScatterPhase::NaiveEffect;
    ctx.now_ms = 1000.0;
    let (lines, effects) = render(&mut scene, &ctx);
    assert_eq!(lines.updated, 2);
    assert!(effects.entered >= 4);
    let label = scene
        .element(Layer::Effects, &ElementKey::named("naive-label"))
        .unwrap();
    let Primitive::Label { text, .. } = label.primitive() else {
        panic!("label expected");
    };
    assert!(text.starts_with("Naive gap: -"), "{text}");

    ctx.phase = ScatterPhase::ControlledEffect;
    ctx.now_ms = 2000.0;
    render(&mut scene, &ctx);
    let naive = scene
        .element(Layer::Effects, &ElementKey::named("naive-gap"))
        .unwrap();
    assert!(naive.is_exiting());
    assert!(
        scene
            .element(Layer::Effects, &ElementKey::named("rd-gap"))
            .is_some()
    );

    scene.advance(2000.0 + fx.cfg.transition_ms);
    assert!(
        scene
            .element(Layer::Effects, &ElementKey::named("naive-gap"))
            .is_none()
    );
}

#[test]
fn fit_endpoints_meet_the_boundary() {
    let fx = Fixture::new();
    let scales = fx.scales(1.0);
    let pts = fx.filtered(Outcome::Consumption);
    let mut ctx = fx.ctx(&scales, &pts, Outcome::Consumption, 1.0, 0.0);
    ctx.phase = ScatterPhase::OlsFit;
    let fits = fit_sides(&pts, Outcome::Consumption);
    let specs = fit_specs(&ctx, &fits);
    let half = fx.viewport.inner_width() / 2.0;
    assert_eq!(specs[0].attrs.pos2.x, half);
    assert_eq!(specs[1].attrs.pos.x, half);
    let plot = fx.viewport.plot_rect();
    for s in &specs {
        for p in [s.attrs.pos, s.attrs.pos2] {
            assert!(p.x >= plot.x0 && p.x <= plot.x1 && p.y >= plot.y0 && p.y <= plot.y1);
        }
    }
}
