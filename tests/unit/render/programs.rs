use crate::shader::layout::UniformType;
use super::*;

#[test]
fn rays_source_passes_checks() {
    let variant = ShaderVariant {
        noise: true,
        distortion: false,
    };
    let checked = check_source(&ProgramSource::rays(variant)).unwrap();
    assert_eq!(checked.variant, variant);
    assert_eq!(checked.layout.size(), 96);
}

#[test]
fn missing_fragment_stage_is_rejected() {
    let mut src = ProgramSource::rays(ShaderVariant::default());
    src.wgsl = src.wgsl.replace("@fragment", "");
    let err = check_source(&src).err().unwrap();
    assert!(err.to_string().contains("missing @fragment"));
}

#[test]
fn renamed_entry_point_is_rejected() {
    let mut src = ProgramSource::rays(ShaderVariant::default());
    src.fragment_entry = "main";
    let err = check_source(&src).err().unwrap();
    assert!(err.to_string().contains("expected \"main\""));
}

#[test]
fn table_locations_and_staging() {
    let mut table = ProgramTable::<()>::default();
    let checked = check_source(&ProgramSource::rays(ShaderVariant::default())).unwrap();
    let id = table.insert(checked, ());

    assert!(table.location(id, "no_such_uniform").is_none());
    let loc = table.location(id, "i_time").unwrap();
    assert_eq!(loc.ty, UniformType::F32);
    table.set(loc, UniformValue::F32(2.0)).unwrap();
    let staged = table.get(id).unwrap();
    assert_eq!(&staged.staging[44..48], &2.0f32.to_le_bytes());

    let err = table.set(loc, UniformValue::Vec2([0.0, 0.0])).unwrap_err();
    assert!(matches!(err, RaysError::Shader(_)));

    assert!(table.remove(id).is_some());
    assert!(table.location(id, "i_time").is_none());
    assert!(table.get(id).is_err());
    assert_eq!(table.len(), 0);
}

#[test]
fn ids_are_not_reused() {
    let mut table = ProgramTable::<()>::default();
    let src = ProgramSource::rays(ShaderVariant::default());
    let a = table.insert(check_source(&src).unwrap(), ());
    table.remove(a);
    let b = table.insert(check_source(&src).unwrap(), ());
    assert_ne!(a, b);
}

#[test]
fn payload_travels_with_its_program() {
    let mut table = ProgramTable::<&'static str>::default();
    let src = ProgramSource::rays(ShaderVariant::default());
    let a = table.insert(check_source(&src).unwrap(), "pipeline-a");
    let b = table.insert(check_source(&src).unwrap(), "pipeline-b");
    assert_eq!(table.get(b).unwrap().payload, "pipeline-b");
    assert_eq!(table.remove(a).map(|p| p.payload), Some("pipeline-a"));
    let rest: Vec<_> = table.drain().map(|p| p.payload).collect();
    assert_eq!(rest, ["pipeline-b"]);
}
