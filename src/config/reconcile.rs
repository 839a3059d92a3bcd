use crate::config::model::RayConfig;

/// Which derived artifacts a configuration change invalidates.
///
/// Produced by [`reconcile`]; the component recomputes exactly the flagged artifacts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigDiff {
    /// The hex color changed: re-parse it.
    pub color: bool,
    /// The origin changed: re-resolve anchor and direction.
    pub geometry: bool,
    /// At least one uploaded value changed.
    pub uniforms: bool,
    /// The shader variant changed: cancel the loop and rebuild the program.
    pub program: bool,
    /// The surface class name changed.
    pub class_name: bool,
}

impl ConfigDiff {
    /// Return `true` when nothing needs recomputing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Compute the minimal set of recomputations needed to go from `old` to `new`.
pub fn reconcile(old: &RayConfig, new: &RayConfig) -> ConfigDiff {
    let color = old.color != new.color;
    let geometry = old.origin != new.origin;
    let scalars_changed = old.speed != new.speed
        || old.spread != new.spread
        || old.length != new.length
        || old.pulsating != new.pulsating
        || old.fade_distance != new.fade_distance
        || old.saturation != new.saturation
        || old.mouse_influence != new.mouse_influence
        || old.mouse_distortion != new.mouse_distortion
        || old.follow_mouse != new.follow_mouse
        || old.noise_amount != new.noise_amount
        || old.distortion != new.distortion;

    ConfigDiff {
        color,
        geometry,
        uniforms: color || geometry || scalars_changed,
        program: old.shader_variant() != new.shader_variant(),
        class_name: old.class_name != new.class_name,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/reconcile.rs"]
mod tests;
