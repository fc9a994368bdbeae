use super::*;

#[test]
fn zero_policy_differs_by_outcome() {
    assert!(!Outcome::Stunting.accepts(Some(0.0)));
    assert!(!Outcome::Consumption.accepts(Some(0.0)));
    assert!(Outcome::Roads.accepts(Some(0.0)));

    assert!(Outcome::Stunting.accepts(Some(0.12)));
    assert!(!Outcome::Roads.accepts(None));
    assert!(!Outcome::Roads.accepts(Some(f64::NAN)));
    assert!(!Outcome::Roads.accepts(Some(-1.0)));
}

#[test]
fn plotted_values_drop_missing_and_scale_stunting() {
    let raw = OutcomeValues {
        consumption: Some(0.0),
        stunting: Some(0.12),
        roads: Some(0.0),
    };
    let plotted = raw.to_plotted();
    assert_eq!(plotted.consumption, None);
    assert!((plotted.stunting.unwrap() - 12.0).abs() < 1e-9);
    assert_eq!(plotted.roads, Some(0.0));
    assert!(plotted.any());
    assert!(!OutcomeValues::default().to_plotted().any());
}

#[test]
fn formatting_matches_outcome_units() {
    assert_eq!(Outcome::Stunting.format_value(12.0), "12.0%");
    assert_eq!(Outcome::Consumption.format_value(5.4321), "5.43");
    assert_eq!(Outcome::Roads.format_value(31.26), "31.3");
}

#[test]
fn serde_uses_snake_case_tags() {
    let o: Outcome = serde_json::from_str("\"stunting\"").unwrap();
    assert_eq!(o, Outcome::Stunting);
    assert_eq!(serde_json::to_string(&Outcome::Roads).unwrap(), "\"roads\"");
}
