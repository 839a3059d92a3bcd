use crate::host::{FrameHost, FrameToken};

/// Holds at most one live frame registration on a [`FrameHost`].
pub(crate) struct AnimationScheduler {
    host: Box<dyn FrameHost>,
    live: Option<FrameToken>,
}

impl AnimationScheduler {
    pub(crate) fn new(host: Box<dyn FrameHost>) -> Self {
        Self { host, live: None }
    }

    /// Register for the next frame unless a registration is already live.
    pub(crate) fn start(&mut self) {
        if self.live.is_none() {
            self.live = Some(self.host.request_frame());
        }
    }

    /// Withdraw the live registration, if any.
    pub(crate) fn cancel(&mut self) {
        if let Some(token) = self.live.take() {
            self.host.cancel_frame(token);
        }
    }

    /// Liveness guard: consumes the live handle when `token` is it.
    pub(crate) fn accept(&mut self, token: FrameToken) -> bool {
        if self.live == Some(token) {
            self.live = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.live.is_some()
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/scheduler.rs"]
mod tests;
