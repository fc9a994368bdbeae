use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn elapsed_time_is_normalized_and_clamped() {
    assert_eq!(Ease::Linear.at(250.0, 1000.0), 0.25);
    assert_eq!(Ease::Linear.at(5000.0, 1000.0), 1.0);
    assert_eq!(Ease::Linear.at(-10.0, 1000.0), 0.0);
    assert_eq!(Ease::InOutCubic.at(1.0, 0.0), 1.0);
}
