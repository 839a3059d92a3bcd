//! The drawing surface and the context behind it.

pub(crate) mod manager;

use crate::foundation::core::{HostContainer, ViewportSize};

/// Lifecycle of a mounted surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceState {
    /// Not mounted yet.
    Unattached,
    /// Mounted, waiting for a drawing context.
    Acquiring,
    /// Context and program ready; frames draw.
    Active,
    /// The context went away; nothing draws until it is restored.
    Lost,
    /// Unmounted; every resource released.
    TornDown,
    /// No usable context for this mount. The element stays, undrawn.
    Inert,
}

/// Limits on drawing-buffer size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceOpts {
    /// Device pixel ratio ceiling.
    pub max_pixel_ratio: f64,
    /// Largest buffer side in physical pixels.
    pub max_buffer_dimension: u32,
}

impl Default for SurfaceOpts {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            max_buffer_dimension: 4096,
        }
    }
}

/// The single element the component renders into its container.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceElement {
    /// Passed through from the configuration.
    pub class_name: String,
    /// Size in CSS pixels; the element fills its container.
    pub css_size: ViewportSize,
    /// Drawing-buffer width in physical pixels.
    pub buffer_width: u32,
    /// Drawing-buffer height in physical pixels.
    pub buffer_height: u32,
}

pub(crate) fn effective_pixel_ratio(device_pixel_ratio: f64, opts: &SurfaceOpts) -> f64 {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    dpr.min(opts.max_pixel_ratio.max(1.0))
}

/// Drawing-buffer size for `container`, at least 1x1 and at most `cap` per side.
pub(crate) fn buffer_dims(container: &HostContainer, opts: &SurfaceOpts, cap: u32) -> (u32, u32) {
    let dpr = effective_pixel_ratio(container.device_pixel_ratio, opts);
    let cap = cap.min(opts.max_buffer_dimension).max(1);
    let side = |css: f64| -> u32 {
        if css.is_finite() && css > 0.0 {
            (css * dpr).round().clamp(1.0, f64::from(cap)) as u32
        } else {
            1
        }
    };
    (side(container.size.width), side(container.size.height))
}

#[cfg(test)]
#[path = "../../tests/unit/surface/dims.rs"]
mod tests;
