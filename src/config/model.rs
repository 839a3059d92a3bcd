use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{RaysError, RaysResult};
use crate::geometry::RayOrigin;
use crate::shader::source::ShaderVariant;

/// Smallest value accepted for fields that must stay strictly positive.
const MIN_POSITIVE: f64 = 1e-3;

/// Configuration of one light-rays instance.
///
/// Every field is optional in JSON (camelCase keys) and falls back to the documented default.
/// Values are used through [`RayConfig::sanitized`], so malformed numbers degrade to defaults or
/// the nearest valid value instead of failing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RayConfig {
    /// Where the bundle is anchored.
    pub origin: RayOrigin,
    /// Ray tint as `#RRGGBB`; anything else renders white.
    pub color: String,
    /// Animation speed multiplier (`>= 0`).
    pub speed: f64,
    /// Angular fan width (`> 0`); larger values widen the bundle.
    pub spread: f64,
    /// Ray reach as a multiple of the drawing-buffer width (`> 0`).
    pub length: f64,
    /// Modulate the overall intensity over time.
    pub pulsating: bool,
    /// Distance (multiple of width) over which rays fade to half intensity (`> 0`).
    pub fade_distance: f64,
    /// Color saturation in `[0, 1]`.
    pub saturation: f64,
    /// How strongly the pointer bends the bundle, `[0, 1]`; also the pointer smoothing factor.
    pub mouse_influence: f64,
    /// How strongly sample positions are pulled toward the pointer (`>= 0`).
    pub mouse_distortion: f64,
    /// Track the pointer at all.
    pub follow_mouse: bool,
    /// Grain strength (`>= 0`).
    pub noise_amount: f64,
    /// Angular wobble strength (`>= 0`).
    pub distortion: f64,
    /// Opaque class name applied to the drawing surface.
    pub class_name: String,
}

impl Default for RayConfig {
    fn default() -> Self {
        Self {
            origin: RayOrigin::TopCenter,
            color: "#ffffff".to_owned(),
            speed: 1.0,
            spread: 1.0,
            length: 2.0,
            pulsating: false,
            fade_distance: 1.0,
            saturation: 1.0,
            mouse_influence: 0.1,
            mouse_distortion: 0.0,
            follow_mouse: true,
            noise_amount: 0.0,
            distortion: 0.0,
            class_name: String::new(),
        }
    }
}

impl RayConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> RaysResult<Self> {
        serde_json::from_str(json).map_err(|e| RaysError::serde(e.to_string()))
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: &Path) -> RaysResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read ray config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Copy with every numeric field finite and inside its documented range.
    ///
    /// Non-finite values take the default; finite out-of-range values are clamped.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            origin: self.origin,
            color: self.color.clone(),
            speed: finite_or(self.speed, d.speed).max(0.0),
            spread: finite_or(self.spread, d.spread).max(MIN_POSITIVE),
            length: finite_or(self.length, d.length).max(MIN_POSITIVE),
            pulsating: self.pulsating,
            fade_distance: finite_or(self.fade_distance, d.fade_distance).max(MIN_POSITIVE),
            saturation: finite_or(self.saturation, d.saturation).clamp(0.0, 1.0),
            mouse_influence: finite_or(self.mouse_influence, d.mouse_influence).clamp(0.0, 1.0),
            mouse_distortion: finite_or(self.mouse_distortion, d.mouse_distortion).max(0.0),
            follow_mouse: self.follow_mouse,
            noise_amount: finite_or(self.noise_amount, d.noise_amount).max(0.0),
            distortion: finite_or(self.distortion, d.distortion).max(0.0),
            class_name: self.class_name.clone(),
        }
    }

    /// Shader features this configuration needs compiled in.
    pub fn shader_variant(&self) -> ShaderVariant {
        ShaderVariant {
            noise: self.noise_amount > 0.0,
            distortion: self.distortion > 0.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
