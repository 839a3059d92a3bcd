use super::*;

#[test]
fn variant_flags_are_baked_as_consts() {
    let plain = ProgramSource::rays(ShaderVariant::default());
    assert_eq!(bool_const(&plain.wgsl, NOISE_FLAG), Some(false));
    assert_eq!(bool_const(&plain.wgsl, DISTORTION_FLAG), Some(false));

    let full = ProgramSource::rays(ShaderVariant {
        noise: true,
        distortion: true,
    });
    assert_eq!(bool_const(&full.wgsl, NOISE_FLAG), Some(true));
    assert_eq!(bool_const(&full.wgsl, DISTORTION_FLAG), Some(true));
    assert!(!full.wgsl.contains("__ENABLE_"));
}

#[test]
fn variants_produce_distinct_sources() {
    let a = ProgramSource::rays(ShaderVariant {
        noise: true,
        distortion: false,
    });
    let b = ProgramSource::rays(ShaderVariant {
        noise: false,
        distortion: true,
    });
    assert_ne!(a.wgsl, b.wgsl);
}

#[test]
fn entry_points_match_declared_names() {
    let src = ProgramSource::rays(ShaderVariant::default());
    assert_eq!(
        entry_point(&src.wgsl, "@vertex").as_deref(),
        Some(src.vertex_entry)
    );
    assert_eq!(
        entry_point(&src.wgsl, "@fragment").as_deref(),
        Some(src.fragment_entry)
    );
}

#[test]
fn missing_stage_has_no_entry_point() {
    assert_eq!(entry_point("fn helper() {}", "@fragment"), None);
    assert_eq!(entry_point("@fragment\nconst x = 1;", "@fragment"), None);
}

#[test]
fn bool_const_ignores_other_types_and_names() {
    let wgsl = "const A: f32 = 1.0;\nconst B: bool = maybe;\nconst C: bool = true;";
    assert_eq!(bool_const(wgsl, "A"), None);
    assert_eq!(bool_const(wgsl, "B"), None);
    assert_eq!(bool_const(wgsl, "C"), Some(true));
    assert_eq!(bool_const(wgsl, "D"), None);
}
