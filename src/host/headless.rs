use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{FrameHost, FrameToken};

const DEFAULT_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

#[derive(Debug)]
struct HostState {
    now_ms: f64,
    frame_interval_ms: f64,
    next_token: u64,
    pending: Vec<FrameToken>,
}

/// Frames that came due at one repaint.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBatch {
    /// Host clock at delivery, in milliseconds.
    pub now_ms: f64,
    /// Registrations delivered, in request order.
    pub tokens: Vec<FrameToken>,
}

impl FrameBatch {
    /// Hand every token to `rays`; tokens it does not own are ignored by it.
    pub fn deliver_to(&self, rays: &mut crate::LightRays) -> Option<crate::FrameOutcome> {
        let mut outcome = None;
        for &token in &self.tokens {
            match rays.on_frame(token, self.now_ms) {
                crate::FrameOutcome::Stale => {}
                other => outcome = Some(other),
            }
        }
        outcome
    }
}

/// Deterministic frame host driven by a virtual clock.
///
/// Clones share one clock and one registration list, so several instances can run on the
/// same host.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    state: Rc<RefCell<HostState>>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    /// Host repainting at 60 Hz, clock at zero.
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL_MS)
    }

    /// Host repainting every `interval_ms` (non-finite or non-positive falls back to 60 Hz).
    pub fn with_frame_interval(interval_ms: f64) -> Self {
        let frame_interval_ms = if interval_ms.is_finite() && interval_ms > 0.0 {
            interval_ms
        } else {
            DEFAULT_FRAME_INTERVAL_MS
        };
        Self {
            state: Rc::new(RefCell::new(HostState {
                now_ms: 0.0,
                frame_interval_ms,
                next_token: 1,
                pending: Vec::new(),
            })),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.state.borrow().now_ms
    }

    /// Move the clock forward without repainting.
    pub fn advance_by(&self, ms: f64) {
        if ms.is_finite() && ms > 0.0 {
            self.state.borrow_mut().now_ms += ms;
        }
    }

    /// Advance one frame interval and hand out every pending registration.
    pub fn advance_frame(&self) -> FrameBatch {
        let st = &mut *self.state.borrow_mut();
        st.now_ms += st.frame_interval_ms;
        FrameBatch {
            now_ms: st.now_ms,
            tokens: std::mem::take(&mut st.pending),
        }
    }

    /// Hand out pending registrations at the current time.
    pub fn repaint_now(&self) -> FrameBatch {
        let st = &mut *self.state.borrow_mut();
        FrameBatch {
            now_ms: st.now_ms,
            tokens: std::mem::take(&mut st.pending),
        }
    }

    /// Registrations requested and neither delivered nor cancelled.
    pub fn live_registrations(&self) -> usize {
        self.state.borrow().pending.len()
    }
}

impl FrameHost for HeadlessHost {
    fn request_frame(&self) -> FrameToken {
        let st = &mut *self.state.borrow_mut();
        let token = FrameToken(st.next_token);
        st.next_token += 1;
        st.pending.push(token);
        token
    }

    fn cancel_frame(&self, token: FrameToken) {
        self.state.borrow_mut().pending.retain(|t| *t != token);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
