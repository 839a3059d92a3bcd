/// Optional features compiled into the ray program.
///
/// Disabled features cost nothing per pixel; switching one on or off requires a rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShaderVariant {
    /// Per-pixel grain.
    pub noise: bool,
    /// Time-varying angular wobble.
    pub distortion: bool,
}

/// A vertex/fragment program pair, as WGSL text with its entry point names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramSource {
    /// Debug label passed to the backend.
    pub label: &'static str,
    /// Complete WGSL module containing both stages.
    pub wgsl: String,
    /// Name of the `@vertex` entry point.
    pub vertex_entry: &'static str,
    /// Name of the `@fragment` entry point.
    pub fragment_entry: &'static str,
}

pub(crate) const NOISE_FLAG: &str = "ENABLE_NOISE";
pub(crate) const DISTORTION_FLAG: &str = "ENABLE_DISTORTION";

const RAYS_TEMPLATE: &str = r#"
const ENABLE_NOISE: bool = __ENABLE_NOISE__;
const ENABLE_DISTORTION: bool = __ENABLE_DISTORTION__;

struct RayUniforms {
  i_resolution: vec2<f32>,
  ray_pos: vec2<f32>,
  ray_dir: vec2<f32>,
  mouse_pos: vec2<f32>,
  rays_color: vec3<f32>,
  i_time: f32,
  rays_speed: f32,
  light_spread: f32,
  ray_length: f32,
  pulsating: f32,
  fade_distance: f32,
  saturation: f32,
  mouse_influence: f32,
  mouse_distortion: f32,
  noise_amount: f32,
  distortion: f32,
};

@group(0) @binding(0) var<uniform> u: RayUniforms;

struct VsOut {
  @builtin(position) position: vec4<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vi: u32) -> VsOut {
  var corners = array<vec2<f32>, 3>(
    vec2<f32>(-1.0, -1.0),
    vec2<f32>( 3.0, -1.0),
    vec2<f32>(-1.0,  3.0),
  );
  var o: VsOut;
  o.position = vec4<f32>(corners[vi], 0.0, 1.0);
  return o;
}

fn hash_noise(st: vec2<f32>) -> f32 {
  return fract(sin(dot(st, vec2<f32>(12.9898, 78.233))) * 43758.5453123);
}

fn ray_strength(source: vec2<f32>, ref_dir: vec2<f32>, coord: vec2<f32>, seed_a: f32, seed_b: f32, speed: f32) -> f32 {
  let source_to_coord = coord - source;
  let dist = length(source_to_coord);
  let dir_norm = source_to_coord / max(dist, 0.0001);
  let cos_angle = dot(dir_norm, ref_dir);
  var angle = cos_angle;
  if (ENABLE_DISTORTION) {
    angle = cos_angle + u.distortion * sin(u.i_time * 2.0 + dist * 0.01) * 0.2;
  }
  let spread_factor = pow(max(angle, 0.0), 1.0 / max(u.light_spread, 0.001));

  let max_distance = max(u.i_resolution.x * u.ray_length, 0.0001);
  let length_falloff = clamp((max_distance - dist) / max_distance, 0.0, 1.0);
  let fade_span = max(u.i_resolution.x * u.fade_distance, 0.0001);
  let fade_falloff = clamp((fade_span - dist) / fade_span, 0.5, 1.0);

  var pulse = 1.0;
  if (u.pulsating > 0.5) {
    pulse = 0.8 + 0.2 * sin(u.i_time * speed * 3.0);
  }

  let base = clamp(
    (0.45 + 0.15 * sin(angle * seed_a + u.i_time * speed)) +
      (0.3 + 0.2 * cos(-angle * seed_b + u.i_time * speed)),
    0.0,
    1.0
  );
  return base * length_falloff * fade_falloff * spread_factor * pulse;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
  let res = max(u.i_resolution, vec2<f32>(1.0, 1.0));
  var coord = in.position.xy;

  if (u.mouse_distortion > 0.0) {
    let to_mouse = u.mouse_pos * res - coord;
    let reach = max(res.x * 0.25, 1.0);
    let pull = min(u.mouse_distortion, 1.0) * exp(-length(to_mouse) / reach);
    coord = coord + to_mouse * pull * 0.1;
  }

  var dir = u.ray_dir;
  if (u.mouse_influence > 0.0) {
    let to_mouse = u.mouse_pos * res - u.ray_pos;
    let mouse_dir = to_mouse / max(length(to_mouse), 0.0001);
    let mixed = mix(u.ray_dir, mouse_dir, u.mouse_influence);
    dir = mixed / max(length(mixed), 0.0001);
  }

  let s1 = ray_strength(u.ray_pos, dir, coord, 36.2214, 21.11349, 1.5 * u.rays_speed);
  let s2 = ray_strength(u.ray_pos, dir, coord, 22.3991, 18.0234, 1.1 * u.rays_speed);
  let intensity = s1 * 0.5 + s2 * 0.4;
  var rgb = vec3<f32>(intensity, intensity, intensity);

  if (ENABLE_NOISE && u.noise_amount > 0.0) {
    let n = hash_noise(coord * 0.01 + vec2<f32>(u.i_time * 0.1, u.i_time * 0.1));
    rgb = rgb * (1.0 - u.noise_amount + u.noise_amount * n);
  }

  let brightness = 1.0 - coord.y / res.y;
  rgb = rgb * vec3<f32>(0.1 + brightness * 0.8, 0.3 + brightness * 0.6, 0.5 + brightness * 0.5);

  if (u.saturation != 1.0) {
    let gray = dot(rgb, vec3<f32>(0.299, 0.587, 0.114));
    rgb = mix(vec3<f32>(gray, gray, gray), rgb, u.saturation);
  }

  rgb = rgb * u.rays_color;
  let a = clamp(intensity, 0.0, 1.0);
  return vec4<f32>(clamp(rgb, vec3<f32>(0.0, 0.0, 0.0), vec3<f32>(1.0, 1.0, 1.0)) * a, a);
}
"#;

impl ProgramSource {
    /// The light-rays program specialized for `variant`.
    pub fn rays(variant: ShaderVariant) -> Self {
        let wgsl = RAYS_TEMPLATE
            .replace("__ENABLE_NOISE__", bool_literal(variant.noise))
            .replace("__ENABLE_DISTORTION__", bool_literal(variant.distortion));
        Self {
            label: "lightrays_program",
            wgsl,
            vertex_entry: "vs_main",
            fragment_entry: "fs_main",
        }
    }
}

fn bool_literal(v: bool) -> &'static str {
    if v { "true" } else { "false" }
}

/// Value of a module-scope `const NAME: bool = ...;` declaration.
pub(crate) fn bool_const(wgsl: &str, name: &str) -> Option<bool> {
    wgsl.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("const ")?;
        let (decl, value) = rest.split_once('=')?;
        let (decl_name, ty) = decl.split_once(':')?;
        if decl_name.trim() != name || ty.trim() != "bool" {
            return None;
        }
        match value.trim().trim_end_matches(';').trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    })
}

/// Name of the function declared right after the `stage` attribute (`@vertex`/`@fragment`).
pub(crate) fn entry_point(wgsl: &str, stage: &str) -> Option<String> {
    let after = &wgsl[wgsl.find(stage)? + stage.len()..];
    let after_fn = after.trim_start().strip_prefix("fn")?;
    let name: String = after_fn
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() { None } else { Some(name) }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/source.rs"]
mod tests;
