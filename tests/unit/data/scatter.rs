use super::*;
use crate::data::district::{DistrictRecord, LonLat};

fn record(id: DistrictId, mita: bool, distance: Option<f64>, outcomes: OutcomeValues) -> DistrictRecord {
    DistrictRecord {
        id,
        mita,
        polygon: vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(0.0, 1.0),
        ],
        distance,
        outcomes,
    }
}

fn stunting(v: f64) -> OutcomeValues {
    OutcomeValues {
        stunting: Some(v),
        ..OutcomeValues::default()
    }
}

#[test]
fn inside_district_plots_right_of_boundary_in_percent() {
    let table = DistrictTable::from_records(vec![record(7, true, Some(25.0), stunting(0.12))])
        .unwrap();
    let all = derive_all(&table);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].scatter_x, 25.0);
    assert!((all[0].scatter_y(Outcome::Stunting).unwrap() - 12.0).abs() < 1e-9);
}

#[test]
fn outside_district_plots_left_of_boundary() {
    let table = DistrictTable::from_records(vec![record(9, false, Some(40.0), stunting(0.3))])
        .unwrap();
    assert_eq!(derive_all(&table)[0].scatter_x, -40.0);
}

#[test]
fn sign_follows_treatment_flag_for_any_input_sign() {
    for d in [-30.0, -0.5, 0.0, 0.5, 30.0] {
        assert!(signed_distance(d, true) >= 0.0);
        assert!(signed_distance(d, false) <= 0.0);
    }
}

#[test]
fn districts_without_distance_or_outcomes_are_skipped() {
    let table = DistrictTable::from_records(vec![
        record(1, true, None, stunting(0.2)),
        record(2, true, Some(5.0), stunting(0.0)),
        record(3, false, Some(5.0), stunting(0.2)),
    ])
    .unwrap();
    let all = derive_all(&table);
    assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);
}

#[test]
fn filtered_set_is_a_subset_of_full_set() {
    let both = OutcomeValues {
        stunting: Some(0.2),
        roads: Some(0.0),
        ..OutcomeValues::default()
    };
    let roads_only = OutcomeValues {
        roads: Some(12.0),
        ..OutcomeValues::default()
    };
    let table = DistrictTable::from_records(vec![
        record(1, true, Some(5.0), both),
        record(2, false, Some(8.0), roads_only),
    ])
    .unwrap();
    let all = derive_all(&table);
    assert_eq!(all.len(), 2);
    let st = filter_for(&all, Outcome::Stunting);
    assert_eq!(st.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(filter_for(&all, Outcome::Roads).len(), 2);
    assert_eq!(outcome_extent(&all, Outcome::Roads), Some((0.0, 12.0)));
    assert_eq!(outcome_extent(&all, Outcome::Consumption), None);
}
