use crate::shader::source::{ProgramSource, ShaderVariant};
use super::*;

#[test]
fn ray_uniform_block_offsets_follow_wgsl_rules() {
    let src = ProgramSource::rays(ShaderVariant::default());
    let layout = UniformLayout::parse_wgsl(&src.wgsl).unwrap();

    let offset = |name: &str| layout.field(name).unwrap().offset;
    assert_eq!(offset("i_resolution"), 0);
    assert_eq!(offset("ray_pos"), 8);
    assert_eq!(offset("ray_dir"), 16);
    assert_eq!(offset("mouse_pos"), 24);
    assert_eq!(offset("rays_color"), 32);
    assert_eq!(offset("i_time"), 44);
    assert_eq!(offset("rays_speed"), 48);
    assert_eq!(offset("distortion"), 84);
    assert_eq!(layout.size(), 96);
    assert_eq!(layout.fields().len(), 16);
}

#[test]
fn vec3_after_scalar_is_padded_to_sixteen() {
    let layout =
        UniformLayout::from_members([("a", UniformType::F32), ("b", UniformType::Vec3)]).unwrap();
    assert_eq!(layout.field("b").unwrap().offset, 16);
    assert_eq!(layout.size(), 32);
}

#[test]
fn small_block_is_padded_to_struct_alignment() {
    let layout = UniformLayout::from_members([("t", UniformType::F32)]).unwrap();
    assert_eq!(layout.size(), 16);
}

#[test]
fn duplicate_and_empty_blocks_are_rejected() {
    let dup = UniformLayout::from_members([("a", UniformType::F32), ("a", UniformType::Vec2)]);
    assert!(matches!(dup, Err(RaysError::Shader(_))));

    let empty = UniformLayout::from_members(std::iter::empty::<(&str, UniformType)>());
    assert!(matches!(empty, Err(RaysError::Shader(_))));
}

#[test]
fn parse_rejects_missing_binding() {
    let err = UniformLayout::parse_wgsl("struct U { a: f32 };").unwrap_err();
    assert!(err.to_string().contains("no uniform block"));
}

#[test]
fn parse_rejects_second_uniform_binding() {
    let wgsl = "struct U { a: f32 };\n\
                @group(0) @binding(0) var<uniform> u: U;\n\
                @group(0) @binding(1) var<uniform> v: U;";
    let err = UniformLayout::parse_wgsl(wgsl).unwrap_err();
    assert!(err.to_string().contains("more than one uniform block"));
}

#[test]
fn commented_out_binding_is_ignored() {
    let wgsl = "struct U { a: f32 };\n\
                // @group(0) @binding(1) var<uniform> old: U;\n\
                @group(0) @binding(0) var<uniform> u: U;";
    assert_eq!(UniformLayout::parse_wgsl(wgsl).unwrap().size(), 16);
}

#[test]
fn parse_rejects_unsupported_types() {
    let wgsl = "struct U { m: mat4x4<f32> };\n@group(0) @binding(0) var<uniform> u: U;";
    let err = UniformLayout::parse_wgsl(wgsl).unwrap_err();
    assert!(err.to_string().contains("mat4x4"));
}

#[test]
fn parse_rejects_member_attributes() {
    let wgsl = "struct U { @size(16) a: f32 };\n@group(0) @binding(0) var<uniform> u: U;";
    assert!(UniformLayout::parse_wgsl(wgsl).is_err());
}

#[test]
fn parse_accepts_short_vector_aliases() {
    let wgsl = "struct U {\n  a: vec2f,\n  b: vec4f,\n};\n@group(0) @binding(0) var<uniform> u: U;";
    let layout = UniformLayout::parse_wgsl(wgsl).unwrap();
    assert_eq!(layout.field("a").unwrap().ty, UniformType::Vec2);
    assert_eq!(layout.field("b").unwrap().offset, 16);
    assert_eq!(layout.size(), 32);
}
