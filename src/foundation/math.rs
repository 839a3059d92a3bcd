/// Reference refresh rate that per-frame smoothing factors are expressed against.
pub(crate) const REFERENCE_HZ: f64 = 60.0;

#[inline]
pub(crate) fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
pub(crate) fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub(crate) fn unit_to_u8(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Fraction of the remaining distance covered after `dt_secs`, for an exponential approach
/// that covers `per_frame` of the distance every frame at [`REFERENCE_HZ`].
pub(crate) fn approach_fraction(per_frame: f64, dt_secs: f64) -> f64 {
    let k = per_frame.clamp(0.0, 1.0);
    if k >= 1.0 {
        return 1.0;
    }
    let frames = (dt_secs * REFERENCE_HZ).max(0.0);
    1.0 - (1.0 - k).powf(frames)
}

pub(crate) fn align_to(value: u32, alignment: u32) -> u32 {
    let mask = alignment - 1;
    (value + mask) & !mask
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
