use crate::foundation::error::RaysError;
use crate::render::RenderSettings;
use crate::render::cpu::CpuContext;
use super::*;

fn cpu(w: u32, h: u32) -> CpuContext {
    CpuContext::new(w, h, RenderSettings::default()).unwrap()
}

#[test]
fn build_resolves_every_slot() {
    let mut ctx = cpu(16, 16);
    let program = ShaderProgram::build(&mut ctx, ShaderVariant::default()).unwrap();
    assert_eq!(program.resolved(), UniformSlot::ALL.len());
    assert_eq!(program.variant(), ShaderVariant::default());
}

#[test]
fn undeclared_uniforms_are_skipped() {
    let mut ctx = cpu(16, 16);
    let mut src = ProgramSource::rays(ShaderVariant::default());
    src.wgsl = src.wgsl.replace("  noise_amount: f32,\n", "");
    let program = ShaderProgram::build_from(&mut ctx, &src, ShaderVariant::default()).unwrap();
    assert_eq!(program.resolved(), UniformSlot::ALL.len() - 1);

    let uniforms = FrameUniforms {
        noise_amount: 0.5,
        ..FrameUniforms::default()
    };
    program.upload(&mut ctx, &uniforms).unwrap();
}

#[test]
fn compile_failure_is_reported() {
    let mut ctx = cpu(16, 16);
    let mut src = ProgramSource::rays(ShaderVariant::default());
    src.wgsl = src.wgsl.replace("@vertex", "");
    let err = ShaderProgram::build_from(&mut ctx, &src, ShaderVariant::default()).unwrap_err();
    assert!(matches!(err, RaysError::Shader(_)));
}

#[test]
fn upload_then_draw_renders() {
    let mut ctx = cpu(24, 24);
    let program = ShaderProgram::build(&mut ctx, ShaderVariant::default()).unwrap();
    let uniforms = FrameUniforms {
        resolution: [24.0, 24.0],
        ray_pos: [12.0, -4.8],
        ray_dir: [0.0, 1.0],
        color: [1.0, 1.0, 1.0],
        speed: 1.0,
        spread: 1.0,
        length: 2.0,
        fade_distance: 1.0,
        saturation: 1.0,
        ..FrameUniforms::default()
    };
    program.upload(&mut ctx, &uniforms).unwrap();
    program.draw(&mut ctx).unwrap();
    let frame = ctx.read_pixels().unwrap();
    assert!(frame.data.chunks_exact(4).any(|px| px[3] > 0));
}

#[test]
fn release_deletes_the_program() {
    let mut ctx = cpu(8, 8);
    let program = ShaderProgram::build(&mut ctx, ShaderVariant::default()).unwrap();
    assert_eq!(ctx.program_count(), 1);
    program.release(&mut ctx);
    assert_eq!(ctx.program_count(), 0);
}
