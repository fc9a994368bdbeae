use super::*;

#[test]
fn tween_reaches_target_and_reports_done() {
    let tw = Tween {
        from: 0.0,
        to: 10.0,
        start_ms: 100.0,
        duration_ms: 200.0,
        ease: Ease::Linear,
    };
    assert_eq!(tw.sample(100.0), (0.0, false));
    assert_eq!(tw.sample(200.0), (5.0, false));
    assert_eq!(tw.sample(300.0), (10.0, true));
    assert_eq!(tw.sample(1e9), (10.0, true));
}

#[test]
fn point_lerp_is_componentwise() {
    let p = <Point as Lerp>::lerp(&Point::new(0.0, 10.0), &Point::new(10.0, 0.0), 0.25);
    assert_eq!(p, Point::new(2.5, 7.5));
}

#[test]
fn retargeting_same_value_keeps_running_tween() {
    let mut v = Animated::new(0.0);
    v.transition_to(1.0, 0.0, 100.0, Ease::Linear);
    v.advance(50.0);
    assert_eq!(*v.current(), 0.5);
    v.transition_to(1.0, 50.0, 100.0, Ease::Linear);
    v.advance(100.0);
    assert_eq!(*v.current(), 1.0);
    assert!(!v.is_running());
}

#[test]
fn retargeting_starts_from_current_value() {
    let mut v = Animated::new(0.0);
    v.transition_to(1.0, 0.0, 100.0, Ease::Linear);
    v.advance(50.0);
    v.transition_to(0.0, 50.0, 100.0, Ease::Linear);
    v.advance(100.0);
    assert!((*v.current() - 0.25).abs() < 1e-12);
    assert_eq!(*v.target(), 0.0);
}

#[test]
fn set_cancels_tween() {
    let mut v = Animated::new(Point::ZERO);
    v.transition_to(Point::new(4.0, 4.0), 0.0, 100.0, Ease::Linear);
    v.set(Point::new(1.0, 1.0));
    assert!(!v.is_running());
    assert!(!v.advance(1000.0));
    assert_eq!(*v.current(), Point::new(1.0, 1.0));
}
