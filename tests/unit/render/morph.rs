use super::*;
use crate::{data::outcome::Outcome, testkit::Fixture};

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn center_is_continuous_at_both_ends() {
    let bounds = Rect::new(0.0, 0.0, 850.0, 500.0);
    let map = Point::new(120.0, 300.0);
    let scatter = Point::new(600.0, 40.0);
    assert!(close(morph_center(map, scatter, 0.0, bounds), map));
    assert!(close(morph_center(map, scatter, 1.0, bounds), scatter));
    assert!(close(
        morph_center(map, scatter, 0.5, bounds),
        Point::new(360.0, 170.0)
    ));
}

#[test]
fn center_is_clamped_when_the_blend_leaves_the_plot() {
    let bounds = Rect::new(0.0, 0.0, 850.0, 500.0);
    let map = Point::new(-400.0, 900.0);
    let scatter = Point::new(1200.0, -300.0);
    for i in 0..=20 {
        let c = morph_center(map, scatter, f64::from(i) / 20.0, bounds);
        assert!((0.0..=850.0).contains(&c.x), "{c:?}");
        assert!((0.0..=500.0).contains(&c.y), "{c:?}");
    }
}

#[test]
fn polygon_is_untouched_at_zero_and_round_at_one() {
    let centroid = Point::new(10.0, 10.0);
    let square = [
        Point::new(0.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(20.0, 20.0),
        Point::new(0.0, 20.0),
    ];
    let same = morph_polygon(&square, centroid, centroid, 0.0, 5.0);
    for (a, b) in same.iter().zip(square.iter()) {
        assert!(close(*a, *b));
    }

    let center = Point::new(100.0, 50.0);
    let round = morph_polygon(&square, centroid, center, 1.0, 5.0);
    for (v, orig) in round.iter().zip(square.iter()) {
        assert!(((*v - center).hypot() - 5.0).abs() < 1e-9);
        let a0 = (*orig - centroid).atan2();
        let a1 = (*v - center).atan2();
        assert!((a0 - a1).abs() < 1e-9, "angles must be preserved");
    }
}

#[test]
fn polygon_shrinks_in_between() {
    let centroid = Point::ZERO;
    let far = [Point::new(100.0, 0.0)];
    let half = morph_polygon(&far, centroid, centroid, 0.5, 4.0);
    // r * 0.5 blended halfway toward 4.
    assert!((half[0].x - 27.0).abs() < 1e-9);
}

#[test]
fn render_keeps_markers_inside_plot_and_fades_them() {
    let fx = Fixture::new();
    let filtered = fx.filtered(Outcome::Stunting);
    let plot = fx.viewport.plot_rect();
    for (zoom, morph_t, fade) in [(0.0, 0.1, 0.0), (0.5, 0.6, 0.2), (1.0, 0.95, 1.0)] {
        let scales = fx.scales(zoom);
        let ctx = fx.ctx(&scales, &filtered, Outcome::Stunting, 0.7, 0.0);
        let mut scene = SceneGraph::new(fx.viewport);
        let stats = render(&mut scene, &ctx, morph_t, fade);
        assert_eq!(stats.skipped, 0);

        let markers = scene.elements(Layer::Markers);
        assert_eq!(markers.len(), filtered.len());
        for m in markers {
            let a = m.baseline();
            assert!(plot.contains(a.pos) || a.pos.x == plot.x1 || a.pos.y == plot.y1);
            assert!((a.opacity - fx.cfg.marker_opacity * fade).abs() < 1e-12);
        }
        assert_eq!(scene.elements(Layer::Districts).len(), filtered.len());
    }
}

#[test]
fn marker_lands_on_scatter_position_at_full_morph() {
    let fx = Fixture::new();
    let filtered = fx.filtered(Outcome::Stunting);
    let scales = fx.scales(1.0);
    let ctx = fx.ctx(&scales, &filtered, Outcome::Stunting, 0.99, 0.0);
    let mut scene = SceneGraph::new(fx.viewport);
    render(&mut scene, &ctx, 1.0, 1.0);

    let p7 = filtered.iter().find(|p| p.id == 7).unwrap();
    let want = scales
        .scatter_position(&fx.viewport, p7, Outcome::Stunting)
        .unwrap();
    let el = scene.element(Layer::Markers, &ElementKey::District(7)).unwrap();
    assert!(close(el.baseline().pos, want));
}
