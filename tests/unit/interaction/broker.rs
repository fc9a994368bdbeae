use super::*;
use crate::testkit::table;

#[test]
fn payload_carries_record_and_active_value() {
    let t = table();
    let p = TooltipPayload::from_district(t.get(7).unwrap(), Outcome::Stunting);
    assert_eq!(p.id, 7);
    assert!(p.mita);
    assert_eq!(p.treatment_label, "Inside mita");
    assert_eq!(p.distance, Some(25.0));
    assert!((p.value.unwrap() - 12.0).abs() < 1e-9);
    assert_eq!(p.formatted_value, "12.0%");
}

#[test]
fn missing_value_is_reported_not_failed() {
    let t = table();
    let p = TooltipPayload::from_district(t.get(9).unwrap(), Outcome::Stunting);
    assert_eq!(p.treatment_label, "Outside mita");
    assert_eq!(p.value, None);
    assert_eq!(p.formatted_value, "n/a");

    // Zero roads is a real measurement.
    let p = TooltipPayload::from_district(t.get(2).unwrap(), Outcome::Roads);
    assert_eq!(p.value, Some(0.0));
    assert_eq!(p.formatted_value, "0.0");
}

#[test]
fn leave_publishes_an_empty_event() {
    let t = table();
    let mut broker = InteractionBroker::new();
    let ev = broker
        .hover(t.get(7).unwrap(), Outcome::Stunting, Point::new(120.0, 80.0))
        .clone();
    assert_eq!(ev.pointer, Some(Point::new(120.0, 80.0)));
    assert_eq!(ev.payload.as_ref().map(|p| p.id), Some(7));

    let ev = broker.leave();
    assert!(ev.is_empty());
    assert_eq!(ev.pointer, None);
}

#[test]
fn poll_drains_once() {
    let t = table();
    let mut broker = InteractionBroker::new();
    assert!(broker.poll().is_none());
    broker.hover(t.get(1).unwrap(), Outcome::Consumption, Point::ZERO);
    broker.hover(t.get(2).unwrap(), Outcome::Consumption, Point::ZERO);
    let ev = broker.poll().unwrap();
    assert_eq!(ev.payload.unwrap().id, 2);
    assert!(broker.poll().is_none());
    assert_eq!(broker.current().payload.as_ref().map(|p| p.id), Some(2));
}
