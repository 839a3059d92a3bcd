use crate::host::headless::HeadlessHost;
use super::*;

#[test]
fn start_registers_once() {
    let host = HeadlessHost::new();
    let mut s = AnimationScheduler::new(Box::new(host.clone()));
    s.start();
    s.start();
    assert_eq!(host.live_registrations(), 1);
    assert!(s.is_running());
}

#[test]
fn accept_consumes_only_the_live_token() {
    let host = HeadlessHost::new();
    let mut s = AnimationScheduler::new(Box::new(host.clone()));
    s.start();
    let batch = host.advance_frame();
    let token = batch.tokens[0];
    assert!(!s.accept(FrameToken(token.0 + 100)));
    assert!(s.accept(token));
    assert!(!s.accept(token));
    assert!(!s.is_running());
}

#[test]
fn cancel_is_idempotent_and_clears_the_host() {
    let host = HeadlessHost::new();
    let mut s = AnimationScheduler::new(Box::new(host.clone()));
    s.start();
    s.cancel();
    s.cancel();
    assert_eq!(host.live_registrations(), 0);
    assert!(!s.is_running());
}

#[test]
fn drop_cancels() {
    let host = HeadlessHost::new();
    {
        let mut s = AnimationScheduler::new(Box::new(host.clone()));
        s.start();
    }
    assert_eq!(host.live_registrations(), 0);
}
