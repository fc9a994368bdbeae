use super::*;

fn square(id: DistrictId, x0: f64, y0: f64) -> DistrictRecord {
    DistrictRecord {
        id,
        mita: true,
        polygon: vec![
            LonLat::new(x0, y0),
            LonLat::new(x0 + 1.0, y0),
            LonLat::new(x0 + 1.0, y0 + 1.0),
            LonLat::new(x0, y0 + 1.0),
            LonLat::new(x0, y0),
        ],
        distance: Some(10.0),
        outcomes: OutcomeValues::default(),
    }
}

#[test]
fn table_rejects_duplicate_ids() {
    let err = DistrictTable::from_records(vec![square(1, 0.0, 0.0), square(1, 2.0, 0.0)])
        .unwrap_err();
    assert!(err.to_string().contains("duplicate district id 1"));
}

#[test]
fn closed_ring_with_two_vertices_is_rejected() {
    let mut rec = square(3, 0.0, 0.0);
    rec.polygon = vec![
        LonLat::new(0.0, 0.0),
        LonLat::new(1.0, 0.0),
        LonLat::new(0.0, 0.0),
    ];
    assert!(DistrictTable::from_records(vec![rec]).is_err());
}

#[test]
fn centroid_is_derived_on_load() {
    let table = DistrictTable::from_records(vec![square(4, 2.0, -3.0)]).unwrap();
    let d = table.get(4).unwrap();
    assert!((d.centroid.lon - 2.5).abs() < 1e-12);
    assert!((d.centroid.lat + 2.5).abs() < 1e-12);
    assert_eq!(d.ring().len(), 4);
}

#[test]
fn json_rows_parse_lon_lat_pairs() {
    let json = r#"[
        {"id": 7, "mita": true, "polygon": [[-72.0,-14.0],[-71.9,-14.0],[-71.9,-13.9]],
         "distance": 25.0, "outcomes": {"stunting": 0.12}},
        {"id": 9, "mita": false, "polygon": [[-72.2,-14.0],[-72.1,-14.0],[-72.1,-13.9]]}
    ]"#;
    let table = DistrictTable::from_json_str(json).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(7).unwrap().outcomes.stunting, Some(0.12));
    assert_eq!(table.get(9).unwrap().distance, None);
    assert_eq!(table.get(9).unwrap().polygon[0], LonLat::new(-72.2, -14.0));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = DistrictTable::from_json_str("{").unwrap_err();
    assert!(matches!(err, MorphError::Serde(_)));
}

#[test]
fn lookup_by_id_ignores_load_order() {
    let table = DistrictTable::from_records(vec![
        square(9, 0.0, 0.0),
        square(2, 2.0, 0.0),
        square(5, 4.0, 0.0),
    ])
    .unwrap();
    let ids: Vec<_> = table.districts().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![9, 2, 5]);
    for id in ids {
        assert_eq!(table.get(id).unwrap().id, id);
    }
    assert!((table.get(2).unwrap().centroid.lon - 2.5).abs() < 1e-12);
    assert!(table.get(3).is_none());
}
