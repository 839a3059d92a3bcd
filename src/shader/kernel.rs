//! Software evaluation of the ray program.
//!
//! Mirrors `fs_main` in the WGSL template line for line so the CPU and GPU backends agree up
//! to float rounding. Fragment coordinates are pixel centers with the origin at the top-left.

use rayon::prelude::*;

use crate::foundation::error::{RaysError, RaysResult};
use crate::foundation::math::{fract, mix, unit_to_u8};
use crate::shader::source::ShaderVariant;
use crate::shader::uniforms::FrameUniforms;

const LAYER_A: (f32, f32, f32) = (36.2214, 21.11349, 1.5);
const LAYER_B: (f32, f32, f32) = (22.3991, 18.0234, 1.1);
const LUMA: [f32; 3] = [0.299, 0.587, 0.114];

#[inline]
fn sub(a: [f32; 2], b: [f32; 2]) -> [f32; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

#[inline]
fn len(v: [f32; 2]) -> f32 {
    v[0].hypot(v[1])
}

#[inline]
fn dot(a: [f32; 2], b: [f32; 2]) -> f32 {
    a[0] * b[0] + a[1] * b[1]
}

#[inline]
fn scale(v: [f32; 2], s: f32) -> [f32; 2] {
    [v[0] * s, v[1] * s]
}

fn hash_noise(st: [f32; 2]) -> f32 {
    fract((dot(st, [12.9898, 78.233])).sin() * 43758.547)
}

fn ray_strength(
    u: &FrameUniforms,
    variant: ShaderVariant,
    ref_dir: [f32; 2],
    coord: [f32; 2],
    (seed_a, seed_b, speed_mul): (f32, f32, f32),
) -> f32 {
    let speed = speed_mul * u.speed;
    let to_coord = sub(coord, u.ray_pos);
    let dist = len(to_coord);
    let dir_norm = scale(to_coord, 1.0 / dist.max(1e-4));
    let cos_angle = dot(dir_norm, ref_dir);
    let angle = if variant.distortion {
        cos_angle + u.distortion * (u.time * 2.0 + dist * 0.01).sin() * 0.2
    } else {
        cos_angle
    };
    let spread_factor = angle.max(0.0).powf(1.0 / u.spread.max(1e-3));

    let max_distance = (u.resolution[0] * u.length).max(1e-4);
    let length_falloff = ((max_distance - dist) / max_distance).clamp(0.0, 1.0);
    let fade_span = (u.resolution[0] * u.fade_distance).max(1e-4);
    let fade_falloff = ((fade_span - dist) / fade_span).clamp(0.5, 1.0);

    let pulse = if u.pulsating > 0.5 {
        0.8 + 0.2 * (u.time * speed * 3.0).sin()
    } else {
        1.0
    };

    let base = ((0.45 + 0.15 * (angle * seed_a + u.time * speed).sin())
        + (0.3 + 0.2 * (-angle * seed_b + u.time * speed).cos()))
    .clamp(0.0, 1.0);
    base * length_falloff * fade_falloff * spread_factor * pulse
}

/// Premultiplied RGBA in `[0, 1]` for the fragment centered at `frag`.
pub(crate) fn shade(u: &FrameUniforms, variant: ShaderVariant, frag: [f32; 2]) -> [f32; 4] {
    let res = [u.resolution[0].max(1.0), u.resolution[1].max(1.0)];
    let mouse = [u.mouse_pos[0] * res[0], u.mouse_pos[1] * res[1]];
    let mut coord = frag;

    if u.mouse_distortion > 0.0 {
        let to_mouse = sub(mouse, coord);
        let reach = (res[0] * 0.25).max(1.0);
        let pull = u.mouse_distortion.min(1.0) * (-len(to_mouse) / reach).exp();
        coord = [
            coord[0] + to_mouse[0] * pull * 0.1,
            coord[1] + to_mouse[1] * pull * 0.1,
        ];
    }

    let mut dir = u.ray_dir;
    if u.mouse_influence > 0.0 {
        let to_mouse = sub(mouse, u.ray_pos);
        let mouse_dir = scale(to_mouse, 1.0 / len(to_mouse).max(1e-4));
        let mixed = [
            mix(u.ray_dir[0], mouse_dir[0], u.mouse_influence),
            mix(u.ray_dir[1], mouse_dir[1], u.mouse_influence),
        ];
        dir = scale(mixed, 1.0 / len(mixed).max(1e-4));
    }

    let s1 = ray_strength(u, variant, dir, coord, LAYER_A);
    let s2 = ray_strength(u, variant, dir, coord, LAYER_B);
    let intensity = s1 * 0.5 + s2 * 0.4;
    let mut rgb = [intensity; 3];

    if variant.noise && u.noise_amount > 0.0 {
        let n = hash_noise([
            coord[0] * 0.01 + u.time * 0.1,
            coord[1] * 0.01 + u.time * 0.1,
        ]);
        let k = 1.0 - u.noise_amount + u.noise_amount * n;
        rgb = rgb.map(|c| c * k);
    }

    let brightness = 1.0 - coord[1] / res[1];
    rgb[0] *= 0.1 + brightness * 0.8;
    rgb[1] *= 0.3 + brightness * 0.6;
    rgb[2] *= 0.5 + brightness * 0.5;

    if u.saturation != 1.0 {
        let gray = rgb[0] * LUMA[0] + rgb[1] * LUMA[1] + rgb[2] * LUMA[2];
        rgb = rgb.map(|c| mix(gray, c, u.saturation));
    }

    let a = intensity.clamp(0.0, 1.0);
    [
        (rgb[0] * u.color[0]).clamp(0.0, 1.0) * a,
        (rgb[1] * u.color[1]).clamp(0.0, 1.0) * a,
        (rgb[2] * u.color[2]).clamp(0.0, 1.0) * a,
        a,
    ]
}

/// Run the program over a `width` x `height` premultiplied RGBA8 buffer, one row per task.
pub(crate) fn render_premul_rgba8(
    u: &FrameUniforms,
    variant: ShaderVariant,
    width: u32,
    height: u32,
    out: &mut [u8],
) -> RaysResult<()> {
    let stride = (width as usize) * 4;
    let expected = stride * (height as usize);
    if out.len() != expected {
        return Err(RaysError::render(format!(
            "target buffer is {} bytes, expected {expected} for {width}x{height}",
            out.len()
        )));
    }
    if expected == 0 {
        return Ok(());
    }

    out.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
        let fy = y as f32 + 0.5;
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let rgba = shade(u, variant, [x as f32 + 0.5, fy]);
            for (dst, c) in px.iter_mut().zip(rgba) {
                *dst = unit_to_u8(c);
            }
        }
    });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/shader/kernel.rs"]
mod tests;
