use super::*;

#[test]
fn tokens_are_unique_and_delivered_once() {
    let host = HeadlessHost::new();
    let a = host.request_frame();
    let b = host.request_frame();
    assert_ne!(a, b);
    assert_eq!(host.live_registrations(), 2);

    let batch = host.advance_frame();
    assert_eq!(batch.tokens, vec![a, b]);
    assert_eq!(host.live_registrations(), 0);
    assert!(host.advance_frame().tokens.is_empty());
}

#[test]
fn cancel_is_idempotent() {
    let host = HeadlessHost::new();
    let a = host.request_frame();
    host.cancel_frame(a);
    host.cancel_frame(a);
    assert_eq!(host.live_registrations(), 0);
    assert!(host.advance_frame().tokens.is_empty());
}

#[test]
fn clock_advances_by_interval_and_explicit_steps() {
    let host = HeadlessHost::with_frame_interval(10.0);
    assert_eq!(host.advance_frame().now_ms, 10.0);
    host.advance_by(5.0);
    host.advance_by(-3.0);
    host.advance_by(f64::NAN);
    assert_eq!(host.now_ms(), 15.0);
    assert_eq!(host.repaint_now().now_ms, 15.0);
}

#[test]
fn bad_interval_falls_back_to_sixty_hz() {
    let host = HeadlessHost::with_frame_interval(0.0);
    let now = host.advance_frame().now_ms;
    assert!((now - 1000.0 / 60.0).abs() < 1e-9);
}

#[test]
fn clones_share_registrations() {
    let host = HeadlessHost::new();
    let other = host.clone();
    other.request_frame();
    assert_eq!(host.live_registrations(), 1);
}
