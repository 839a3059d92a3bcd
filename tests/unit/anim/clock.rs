use super::*;

#[test]
fn first_tick_seeds_at_zero() {
    let mut clock = FrameClock::default();
    let t = clock.tick(5000.0);
    assert_eq!(t.elapsed, 0.0);
    assert_eq!(t.delta, 0.0);
    let t = clock.tick(5500.0);
    assert_eq!(t.elapsed, 0.5);
    assert_eq!(t.delta, 0.5);
}

#[test]
fn time_never_runs_backwards() {
    let mut clock = FrameClock::default();
    clock.tick(1000.0);
    clock.tick(2000.0);
    let t = clock.tick(1500.0);
    assert_eq!(t.elapsed, 1.0);
    assert_eq!(t.delta, 0.0);
}

#[test]
fn reset_reseeds() {
    let mut clock = FrameClock::default();
    clock.tick(0.0);
    clock.tick(3000.0);
    clock.reset();
    assert_eq!(clock.tick(9000.0).elapsed, 0.0);
}

#[test]
fn non_finite_timestamps_are_clamped() {
    let mut clock = FrameClock::default();
    let t = clock.tick(f64::NAN);
    assert_eq!(t.elapsed, 0.0);
    assert!(clock.tick(16.0).delta > 0.0);
}
