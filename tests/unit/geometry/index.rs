use super::*;
use crate::data::district::DistrictRecord;
use crate::data::outcome::OutcomeValues;

fn district(id: DistrictId, mita: bool, ring: &[(f64, f64)]) -> DistrictRecord {
    DistrictRecord {
        id,
        mita,
        polygon: ring.iter().map(|&(x, y)| LonLat::new(x, y)).collect(),
        distance: Some(1.0),
        outcomes: OutcomeValues::default(),
    }
}

#[test]
fn centroid_of_square_and_triangle() {
    let sq = [
        LonLat::new(0.0, 0.0),
        LonLat::new(2.0, 0.0),
        LonLat::new(2.0, 2.0),
        LonLat::new(0.0, 2.0),
    ];
    assert_eq!(compute_centroid(&sq), LonLat::new(1.0, 1.0));

    let tri = [
        LonLat::new(0.0, 0.0),
        LonLat::new(3.0, 0.0),
        LonLat::new(0.0, 3.0),
        LonLat::new(0.0, 0.0),
    ];
    let c = compute_centroid(&tri);
    assert!((c.lon - 1.0).abs() < 1e-12 && (c.lat - 1.0).abs() < 1e-12);
}

#[test]
fn degenerate_ring_uses_vertex_mean() {
    let line = [
        LonLat::new(0.0, 0.0),
        LonLat::new(1.0, 1.0),
        LonLat::new(2.0, 2.0),
    ];
    assert_eq!(compute_centroid(&line), LonLat::new(1.0, 1.0));
}

#[test]
fn two_shared_vertices_mark_both_sides() {
    // A (mita) and B (control) share the edge x=1 exactly; C (control) touches A at one corner.
    let table = DistrictTable::from_records(vec![
        district(1, true, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        district(2, false, &[(1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0)]),
        district(3, false, &[(1.0, 1.0), (2.0, 1.5), (1.5, 2.0)]),
        district(4, false, &[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0)]),
    ])
    .unwrap();
    let set = compute_boundary_set(table.districts(), DEFAULT_VERTEX_TOLERANCE);
    assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn near_vertices_within_tolerance_match() {
    let a = [
        LonLat::new(0.0, 0.0),
        LonLat::new(1.0, 0.0),
        LonLat::new(1.0, 1.0),
    ];
    let b = [
        LonLat::new(1.0004, 0.0003),
        LonLat::new(0.9996, 1.0002),
        LonLat::new(2.0, 0.5),
    ];
    assert!(shares_edge(&a, &b, DEFAULT_VERTEX_TOLERANCE));
    assert!(!shares_edge(&a, &b, 0.0001));
}

#[test]
fn same_side_neighbors_are_not_boundary() {
    let table = DistrictTable::from_records(vec![
        district(1, true, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        district(2, true, &[(1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0)]),
    ])
    .unwrap();
    let index = GeometryIndex::build(&table, DEFAULT_VERTEX_TOLERANCE);
    assert!(index.boundary().is_empty());
    let b = index.full_bounds().unwrap();
    assert_eq!(b.min, LonLat::new(0.0, 0.0));
    assert_eq!(b.max, LonLat::new(2.0, 1.0));
}

#[test]
fn boundary_set_is_symmetric() {
    let table = DistrictTable::from_records(vec![
        district(10, true, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        district(11, false, &[(1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0)]),
        district(12, false, &[(0.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]),
        district(13, true, &[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]),
    ])
    .unwrap();
    let set = compute_boundary_set(table.districts(), DEFAULT_VERTEX_TOLERANCE);
    for d in table.districts() {
        if !set.contains(&d.id) {
            continue;
        }
        let has_opposite_partner = table.districts().iter().any(|o| {
            o.mita != d.mita
                && set.contains(&o.id)
                && shares_edge(&d.polygon, &o.polygon, DEFAULT_VERTEX_TOLERANCE)
        });
        assert!(has_opposite_partner, "district {} has no partner", d.id);
    }
    assert_eq!(set.len(), 4);
}
