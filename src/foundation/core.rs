pub use kurbo::{Point, Vec2};

/// Size of the host container in device-independent (CSS) pixels.
///
/// Re-derived by the host on every container resize. Zero and negative values are accepted and
/// propagate deterministically; they simply produce an empty drawing buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSize {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl ViewportSize {
    /// Create a viewport size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Return `true` when either side is not strictly positive (or not finite).
    pub fn is_empty(self) -> bool {
        !(self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0)
    }
}

/// What the host reports about the container the effect renders into.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostContainer {
    /// Observed box size of the container.
    pub size: ViewportSize,
    /// Logical to physical pixel scale of the display.
    pub device_pixel_ratio: f64,
}

impl HostContainer {
    /// Container of `width x height` CSS pixels at a device pixel ratio of 1.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: ViewportSize::new(width, height),
            device_pixel_ratio: 1.0,
        }
    }

    /// Same container at a different device pixel ratio.
    pub fn with_pixel_ratio(self, device_pixel_ratio: f64) -> Self {
        Self {
            device_pixel_ratio,
            ..self
        }
    }
}

/// Color with each channel normalized to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedColor {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl NormalizedColor {
    /// Opaque white, the fallback for unparseable colors.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Create a color from normalized channels.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channels as an `[r, g, b]` array.
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for NormalizedColor {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
