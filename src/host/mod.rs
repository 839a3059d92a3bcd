//! The host-side "next repaint" primitive.

pub(crate) mod headless;

/// Token for one pending frame registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(pub(crate) u64);

/// Registers one callback before the next repaint and lets it be cancelled.
///
/// The host delivers due tokens back to the instance that requested them (see
/// [`crate::LightRays::on_frame`]). Cancelling an unknown or already delivered token is a no-op.
pub trait FrameHost {
    /// Register interest in the next frame.
    fn request_frame(&self) -> FrameToken;

    /// Withdraw a registration.
    fn cancel_frame(&self, token: FrameToken);
}
