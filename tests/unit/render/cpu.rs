use crate::shader::source::ShaderVariant;
use super::*;

fn stage_defaults(ctx: &mut CpuContext, id: ProgramId) {
    let (w, h) = ctx.buffer_size();
    let u = FrameUniforms {
        resolution: [w as f32, h as f32],
        ray_pos: [0.5 * w as f32, -0.2 * h as f32],
        ray_dir: [0.0, 1.0],
        color: [1.0, 1.0, 1.0],
        speed: 1.0,
        spread: 1.0,
        length: 2.0,
        fade_distance: 1.0,
        saturation: 1.0,
        mouse_pos: [0.5, 0.5],
        ..FrameUniforms::default()
    };
    for slot in UniformSlot::ALL {
        let loc = ctx.uniform_location(id, slot.name()).unwrap();
        ctx.set_uniform(loc, u.get(slot)).unwrap();
    }
}

#[test]
fn draw_fills_the_pixmap() {
    let mut ctx = CpuContext::new(40, 30, RenderSettings::default()).unwrap();
    let id = ctx
        .compile_program(&ProgramSource::rays(ShaderVariant::default()))
        .unwrap();
    stage_defaults(&mut ctx, id);
    ctx.draw(id).unwrap();

    let frame = ctx.read_pixels().unwrap();
    assert_eq!((frame.width, frame.height), (40, 30));
    assert_eq!(frame.data.len(), 40 * 30 * 4);
    assert!(frame.premultiplied);
    assert!(frame.data.chunks_exact(4).any(|px| px[3] > 0));
}

#[test]
fn staged_block_decodes_to_the_same_uniforms() {
    let mut ctx = CpuContext::new(8, 8, RenderSettings::default()).unwrap();
    let id = ctx
        .compile_program(&ProgramSource::rays(ShaderVariant::default()))
        .unwrap();
    stage_defaults(&mut ctx, id);
    let staged = ctx.programs.get(id).unwrap();
    let u = decode_uniforms(&staged.layout, &staged.staging);
    assert_eq!(u.resolution, [8.0, 8.0]);
    assert_eq!(u.ray_dir, [0.0, 1.0]);
    assert_eq!(u.fade_distance, 1.0);
}

#[test]
fn clear_color_fills_transparent_pixels() {
    let settings = RenderSettings {
        clear_rgba: Some([18, 20, 28, 255]),
    };
    let mut ctx = CpuContext::new(16, 16, settings).unwrap();
    let id = ctx
        .compile_program(&ProgramSource::rays(ShaderVariant::default()))
        .unwrap();
    // Nothing staged: zero resolution and spread produce no light.
    ctx.draw(id).unwrap();
    let frame = ctx.read_pixels().unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [18, 20, 28, 255]));
}

#[test]
fn resize_replaces_the_buffer() {
    let mut ctx = CpuContext::new(8, 8, RenderSettings::default()).unwrap();
    ctx.resize(20, 10).unwrap();
    assert_eq!(ctx.buffer_size(), (20, 10));
    assert_eq!(ctx.read_pixels().unwrap().data.len(), 20 * 10 * 4);
}

#[test]
fn release_frees_programs_and_reports_loss() {
    let mut ctx = CpuContext::new(8, 8, RenderSettings::default()).unwrap();
    let id = ctx
        .compile_program(&ProgramSource::rays(ShaderVariant::default()))
        .unwrap();
    assert_eq!(ctx.program_count(), 1);
    ctx.release();
    ctx.release();
    assert_eq!(ctx.program_count(), 0);
    assert!(ctx.is_context_lost());
    assert!(matches!(ctx.draw(id), Err(RaysError::Context(_))));
}

#[test]
fn bad_program_does_not_register() {
    let mut ctx = CpuContext::new(8, 8, RenderSettings::default()).unwrap();
    let mut src = ProgramSource::rays(ShaderVariant::default());
    src.wgsl = src.wgsl.replace("var<uniform>", "var<private>");
    assert!(ctx.compile_program(&src).is_err());
    assert_eq!(ctx.program_count(), 0);
}
