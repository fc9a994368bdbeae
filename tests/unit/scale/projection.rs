use super::*;

fn bounds(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> GeoBounds {
    GeoBounds {
        min: LonLat::new(lon0, lat0),
        max: LonLat::new(lon1, lat1),
    }
}

#[test]
fn fitted_bounds_land_inside_frame() {
    let frame = Rect::new(0.0, 0.0, 800.0, 500.0);
    let p = Projection::fit(bounds(-75.0, -16.0, -70.0, -12.0), frame, 10.0).unwrap();
    for (lon, lat) in [(-75.0, -16.0), (-70.0, -12.0), (-72.5, -14.0)] {
        let pt = p.project(LonLat::new(lon, lat)).unwrap();
        assert!(pt.x >= 9.999 && pt.x <= 790.001, "{pt:?}");
        assert!(pt.y >= 9.999 && pt.y <= 490.001, "{pt:?}");
    }
    let north = p.project(LonLat::new(-72.5, -12.0)).unwrap();
    let south = p.project(LonLat::new(-72.5, -16.0)).unwrap();
    assert!(north.y < south.y);
}

#[test]
fn polar_and_non_finite_inputs_do_not_project() {
    let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
    let p = Projection::fit(bounds(0.0, 0.0, 1.0, 1.0), frame, 0.0).unwrap();
    assert!(p.project(LonLat::new(0.0, 89.0)).is_none());
    assert!(p.project(LonLat::new(f64::NAN, 0.0)).is_none());
}

#[test]
fn point_bounds_cannot_be_fitted() {
    let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(Projection::fit(bounds(1.0, 1.0, 1.0, 1.0), frame, 0.0).is_none());
}

#[test]
fn blend_endpoints_reproduce_inputs() {
    let frame = Rect::new(0.0, 0.0, 800.0, 500.0);
    let wide = Projection::fit(bounds(-82.0, -19.0, -68.0, 0.0), frame, 0.0).unwrap();
    let tight = Projection::fit(bounds(-73.5, -15.0, -71.0, -13.0), frame, 0.0).unwrap();
    let a = Projection::blend(&wide, &tight, 0.0);
    let b = Projection::blend(&wide, &tight, 1.0);
    assert!((a.scale - wide.scale).abs() < 1e-6 * wide.scale);
    assert!((b.scale - tight.scale).abs() < 1e-6 * tight.scale);
    assert!((b.center.0 - tight.center.0).abs() < 1e-12);
    assert!((b.center.1 - tight.center.1).abs() < 1e-12);
    let mid = Projection::blend(&wide, &tight, 0.5);
    assert!(mid.scale > wide.scale && mid.scale < tight.scale);
}
