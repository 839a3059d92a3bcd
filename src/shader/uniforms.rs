use crate::config::model::RayConfig;
use crate::foundation::core::{NormalizedColor, Point};
use crate::foundation::error::{RaysError, RaysResult};
use crate::geometry::RayAnchorDirection;
use crate::shader::layout::UniformType;

/// A typed value for one uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    /// `f32`
    F32(f32),
    /// `vec2<f32>`
    Vec2([f32; 2]),
    /// `vec3<f32>`
    Vec3([f32; 3]),
}

impl UniformValue {
    /// Type this value uploads as.
    pub fn ty(&self) -> UniformType {
        match self {
            UniformValue::F32(_) => UniformType::F32,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec3(_) => UniformType::Vec3,
        }
    }

    fn components(&self) -> &[f32] {
        match self {
            UniformValue::F32(v) => std::slice::from_ref(v),
            UniformValue::Vec2(v) => v,
            UniformValue::Vec3(v) => v,
        }
    }

    /// Write little-endian components into `out`, which must hold `ty().size()` bytes.
    pub(crate) fn write_le(&self, out: &mut [u8]) {
        for (dst, c) in out.chunks_exact_mut(4).zip(self.components()) {
            dst.copy_from_slice(&c.to_le_bytes());
        }
    }

    /// Decode a value of type `ty` from little-endian bytes.
    pub(crate) fn read_le(ty: UniformType, bytes: &[u8]) -> Option<Self> {
        let comp = |i: usize| -> Option<f32> {
            let raw: [u8; 4] = bytes.get(i * 4..i * 4 + 4)?.try_into().ok()?;
            Some(f32::from_le_bytes(raw))
        };
        match ty {
            UniformType::F32 => Some(UniformValue::F32(comp(0)?)),
            UniformType::Vec2 => Some(UniformValue::Vec2([comp(0)?, comp(1)?])),
            UniformType::Vec3 => Some(UniformValue::Vec3([comp(0)?, comp(1)?, comp(2)?])),
            UniformType::Vec4 => None,
        }
    }
}

/// Every uniform the ray program consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniformSlot {
    /// Drawing-buffer size in pixels.
    Resolution,
    /// Seconds since the first frame of this acquisition.
    Time,
    /// Anchor of the bundle.
    RayPos,
    /// Main direction of the bundle.
    RayDir,
    /// Ray tint.
    Color,
    /// Speed multiplier.
    Speed,
    /// Fan width.
    Spread,
    /// Reach as a multiple of width.
    Length,
    /// `1.0` when pulsating.
    Pulsating,
    /// Fade distance as a multiple of width.
    FadeDistance,
    /// Saturation.
    Saturation,
    /// Smoothed pointer position, normalized to the container.
    MousePos,
    /// Direction blend toward the pointer.
    MouseInfluence,
    /// Sample pull toward the pointer.
    MouseDistortion,
    /// Grain strength.
    NoiseAmount,
    /// Angular wobble strength.
    Distortion,
}

impl UniformSlot {
    /// All slots.
    pub const ALL: [UniformSlot; 16] = [
        UniformSlot::Resolution,
        UniformSlot::Time,
        UniformSlot::RayPos,
        UniformSlot::RayDir,
        UniformSlot::Color,
        UniformSlot::Speed,
        UniformSlot::Spread,
        UniformSlot::Length,
        UniformSlot::Pulsating,
        UniformSlot::FadeDistance,
        UniformSlot::Saturation,
        UniformSlot::MousePos,
        UniformSlot::MouseInfluence,
        UniformSlot::MouseDistortion,
        UniformSlot::NoiseAmount,
        UniformSlot::Distortion,
    ];

    /// Member name in the program's uniform block.
    pub fn name(self) -> &'static str {
        match self {
            UniformSlot::Resolution => "i_resolution",
            UniformSlot::Time => "i_time",
            UniformSlot::RayPos => "ray_pos",
            UniformSlot::RayDir => "ray_dir",
            UniformSlot::Color => "rays_color",
            UniformSlot::Speed => "rays_speed",
            UniformSlot::Spread => "light_spread",
            UniformSlot::Length => "ray_length",
            UniformSlot::Pulsating => "pulsating",
            UniformSlot::FadeDistance => "fade_distance",
            UniformSlot::Saturation => "saturation",
            UniformSlot::MousePos => "mouse_pos",
            UniformSlot::MouseInfluence => "mouse_influence",
            UniformSlot::MouseDistortion => "mouse_distortion",
            UniformSlot::NoiseAmount => "noise_amount",
            UniformSlot::Distortion => "distortion",
        }
    }

    /// Declared type.
    pub fn ty(self) -> UniformType {
        match self {
            UniformSlot::Resolution
            | UniformSlot::RayPos
            | UniformSlot::RayDir
            | UniformSlot::MousePos => UniformType::Vec2,
            UniformSlot::Color => UniformType::Vec3,
            _ => UniformType::F32,
        }
    }
}

/// Snapshot of all uniform values for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameUniforms {
    /// Drawing-buffer size in pixels.
    pub resolution: [f32; 2],
    /// Elapsed seconds.
    pub time: f32,
    /// Anchor in buffer pixels.
    pub ray_pos: [f32; 2],
    /// Bundle direction.
    pub ray_dir: [f32; 2],
    /// Normalized tint.
    pub color: [f32; 3],
    /// Speed multiplier.
    pub speed: f32,
    /// Fan width.
    pub spread: f32,
    /// Reach as a multiple of width.
    pub length: f32,
    /// `1.0` when pulsating, else `0.0`.
    pub pulsating: f32,
    /// Fade distance as a multiple of width.
    pub fade_distance: f32,
    /// Saturation in `[0, 1]`.
    pub saturation: f32,
    /// Pointer position normalized to the container (`0..1`, y down).
    pub mouse_pos: [f32; 2],
    /// Direction blend toward the pointer.
    pub mouse_influence: f32,
    /// Sample pull toward the pointer.
    pub mouse_distortion: f32,
    /// Grain strength.
    pub noise_amount: f32,
    /// Angular wobble strength.
    pub distortion: f32,
}

/// Inputs the animation tick combines into [`FrameUniforms`].
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs<'a> {
    /// Sanitized configuration.
    pub config: &'a RayConfig,
    /// Parsed tint.
    pub color: NormalizedColor,
    /// Resolved anchor/direction in buffer pixels.
    pub geometry: RayAnchorDirection,
    /// Drawing-buffer size.
    pub buffer_size: (u32, u32),
    /// Elapsed seconds.
    pub time: f64,
    /// Smoothed, normalized pointer.
    pub mouse: Point,
}

impl FrameUniforms {
    /// Build the uniform snapshot for one frame.
    pub fn compose(inputs: FrameInputs<'_>) -> Self {
        let c = inputs.config;
        let [r, g, b] = inputs.color.to_array();
        Self {
            resolution: [inputs.buffer_size.0 as f32, inputs.buffer_size.1 as f32],
            time: inputs.time as f32,
            ray_pos: [
                inputs.geometry.anchor.x as f32,
                inputs.geometry.anchor.y as f32,
            ],
            ray_dir: [
                inputs.geometry.direction.x as f32,
                inputs.geometry.direction.y as f32,
            ],
            color: [r as f32, g as f32, b as f32],
            speed: c.speed as f32,
            spread: c.spread as f32,
            length: c.length as f32,
            pulsating: if c.pulsating { 1.0 } else { 0.0 },
            fade_distance: c.fade_distance as f32,
            saturation: c.saturation as f32,
            mouse_pos: [inputs.mouse.x as f32, inputs.mouse.y as f32],
            mouse_influence: if c.follow_mouse {
                c.mouse_influence as f32
            } else {
                0.0
            },
            mouse_distortion: if c.follow_mouse {
                c.mouse_distortion as f32
            } else {
                0.0
            },
            noise_amount: c.noise_amount as f32,
            distortion: c.distortion as f32,
        }
    }

    /// Value of one slot.
    pub fn get(&self, slot: UniformSlot) -> UniformValue {
        match slot {
            UniformSlot::Resolution => UniformValue::Vec2(self.resolution),
            UniformSlot::Time => UniformValue::F32(self.time),
            UniformSlot::RayPos => UniformValue::Vec2(self.ray_pos),
            UniformSlot::RayDir => UniformValue::Vec2(self.ray_dir),
            UniformSlot::Color => UniformValue::Vec3(self.color),
            UniformSlot::Speed => UniformValue::F32(self.speed),
            UniformSlot::Spread => UniformValue::F32(self.spread),
            UniformSlot::Length => UniformValue::F32(self.length),
            UniformSlot::Pulsating => UniformValue::F32(self.pulsating),
            UniformSlot::FadeDistance => UniformValue::F32(self.fade_distance),
            UniformSlot::Saturation => UniformValue::F32(self.saturation),
            UniformSlot::MousePos => UniformValue::Vec2(self.mouse_pos),
            UniformSlot::MouseInfluence => UniformValue::F32(self.mouse_influence),
            UniformSlot::MouseDistortion => UniformValue::F32(self.mouse_distortion),
            UniformSlot::NoiseAmount => UniformValue::F32(self.noise_amount),
            UniformSlot::Distortion => UniformValue::F32(self.distortion),
        }
    }

    /// Overwrite one slot; the value must have the slot's type.
    pub fn set(&mut self, slot: UniformSlot, value: UniformValue) -> RaysResult<()> {
        match (slot, value) {
            (UniformSlot::Resolution, UniformValue::Vec2(v)) => self.resolution = v,
            (UniformSlot::Time, UniformValue::F32(v)) => self.time = v,
            (UniformSlot::RayPos, UniformValue::Vec2(v)) => self.ray_pos = v,
            (UniformSlot::RayDir, UniformValue::Vec2(v)) => self.ray_dir = v,
            (UniformSlot::Color, UniformValue::Vec3(v)) => self.color = v,
            (UniformSlot::Speed, UniformValue::F32(v)) => self.speed = v,
            (UniformSlot::Spread, UniformValue::F32(v)) => self.spread = v,
            (UniformSlot::Length, UniformValue::F32(v)) => self.length = v,
            (UniformSlot::Pulsating, UniformValue::F32(v)) => self.pulsating = v,
            (UniformSlot::FadeDistance, UniformValue::F32(v)) => self.fade_distance = v,
            (UniformSlot::Saturation, UniformValue::F32(v)) => self.saturation = v,
            (UniformSlot::MousePos, UniformValue::Vec2(v)) => self.mouse_pos = v,
            (UniformSlot::MouseInfluence, UniformValue::F32(v)) => self.mouse_influence = v,
            (UniformSlot::MouseDistortion, UniformValue::F32(v)) => self.mouse_distortion = v,
            (UniformSlot::NoiseAmount, UniformValue::F32(v)) => self.noise_amount = v,
            (UniformSlot::Distortion, UniformValue::F32(v)) => self.distortion = v,
            (slot, value) => {
                return Err(RaysError::shader(format!(
                    "uniform {} expects {:?}, got {:?}",
                    slot.name(),
                    slot.ty(),
                    value.ty()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/uniforms.rs"]
mod tests;
