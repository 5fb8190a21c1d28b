use mounted_archery::sim::charge::{charge_amount, launch_speed, ChargeRelease, ChargeState};

#[test]
fn first_second_is_linear() {
    for (t, want) in [(0.1f32, 0.07f32), (0.25, 0.175), (0.5, 0.35), (0.75, 0.525), (0.99, 0.693)] {
        assert!((charge_amount(t) - want).abs() < 1e-5, "t={t}: {} != {want}", charge_amount(t));
    }
}

#[test]
fn curve_is_continuous_at_breakpoints() {
    for t in [1.0f32, 2.0, 3.0] {
        let before = charge_amount(t - 1e-4);
        let after = charge_amount(t + 1e-4);
        assert!((before - after).abs() < 1e-3, "jump at {t}: {before} vs {after}");
    }
}

#[test]
fn curve_is_monotone_and_bounded() {
    let mut prev = 0.0;
    for i in 0..=500 {
        let a = charge_amount(i as f32 * 0.01);
        assert!(a >= prev - 1e-6, "decreasing at {}", i as f32 * 0.01);
        assert!((0.0..=1.0).contains(&a));
        prev = a;
    }
    assert_eq!(charge_amount(-1.0), 0.0);
    assert_eq!(charge_amount(100.0), 1.0);
}

#[test]
fn launch_speed_range() {
    assert!((launch_speed(30.0, 0.0) - 3.0).abs() < 1e-5);
    assert!((launch_speed(30.0, 1.0) - 21.0).abs() < 1e-5);
}

#[test]
fn draw_lifecycle() {
    let mut c = ChargeState::default();
    assert_eq!(c.release(0.1), ChargeRelease::Idle);

    assert!(c.start(10.0));
    assert!(!c.start(10.5), "second start while drawing must be ignored");
    c.update(10.05);
    assert_eq!(c.release(0.1), ChargeRelease::TooShort);
    assert!(!c.charging);

    c.start(20.0);
    c.update(21.0);
    assert!((c.gauge_percent() - 70.0).abs() < 1e-3);
    match c.release(0.1) {
        ChargeRelease::Fire(amount) => assert!((amount - 0.7).abs() < 1e-5),
        other => panic!("expected fire, got {other:?}"),
    }
    assert_eq!(c.gauge_percent(), 0.0);
}
