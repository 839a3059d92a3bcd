//! lightrays renders an animated "light rays" background: a fan of soft procedural rays cast
//! from a named anchor outside the visible area, tinted, pulsing and leaning toward the
//! pointer.
//!
//! The effect is a single mounted component, [`LightRays`], which ties together:
//!
//! 1. **Configuration**: [`RayConfig`] (JSON, camelCase) and the [`reconcile`] diff that
//!    decides what a change invalidates.
//! 2. **Geometry and color**: [`resolve_anchor_and_direction`] and [`hex_to_rgb`], both pure.
//! 3. **Program**: one WGSL program ([`ProgramSource::rays`]) compiled once per context, with
//!    uniform locations resolved from its uniform block layout.
//! 4. **Surface**: a [`DrawingContext`] from a [`ContextProvider`], sized by the container and
//!    its device pixel ratio; see [`SurfaceState`] for the lifecycle.
//! 5. **Animation**: one frame registration at a time on a [`FrameHost`], with a clock seeded
//!    at the first frame and frame-rate independent pointer smoothing.
//!
//! The CPU backend ([`CpuContext`]) executes the program per pixel into a `vello_cpu`
//! pixmap. The `gpu` feature adds a `wgpu` backend running the same WGSL.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Never throws at the host**: missing contexts, compile failures and context loss become
//!   [`SurfaceState`] transitions plus `tracing` events.
//! - **Premultiplied RGBA8** output from every backend.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod anim;
mod color;
mod config;
mod foundation;
mod geometry;
mod host;
mod rays;
mod render;
mod shader;
mod surface;

pub use color::{hex_to_rgb, parse_hex_rgb};
pub use config::model::RayConfig;
pub use config::reconcile::{ConfigDiff, reconcile};
pub use foundation::core::{HostContainer, NormalizedColor, Point, Vec2, ViewportSize};
pub use foundation::error::{RaysError, RaysResult};
pub use geometry::{
    OUTSIDE, RayAnchorDirection, RayOrigin, resolve_anchor_and_direction, resolve_named,
};
pub use host::headless::{FrameBatch, HeadlessHost};
pub use host::{FrameHost, FrameToken};
pub use rays::{FrameOutcome, LightRays, RaysStats};
pub use render::cpu::CpuContext;
#[cfg(feature = "gpu")]
pub use render::gpu::WgpuContext;
pub use render::{
    BackendKind, BackendProvider, ContextProvider, DrawingContext, FrameRGBA, ProgramId,
    RenderSettings, UniformLocation, create_context,
};
pub use shader::layout::{UniformField, UniformLayout, UniformType};
pub use shader::source::{ProgramSource, ShaderVariant};
pub use shader::uniforms::{FrameInputs, FrameUniforms, UniformSlot, UniformValue};
pub use surface::{SurfaceElement, SurfaceOpts, SurfaceState};
