use super::*;

#[test]
fn premul_scales_color_by_alpha() {
    assert_eq!(premul_rgba8(255, 128, 0, 255), [255, 128, 0, 255]);
    assert_eq!(premul_rgba8(255, 255, 255, 0), [0, 0, 0, 0]);
    assert_eq!(premul_rgba8(200, 100, 50, 128), [100, 50, 25, 128]);
}

#[test]
fn cpu_provider_always_yields_a_context() {
    let mut provider = BackendProvider::new(BackendKind::Cpu);
    let ctx = provider.acquire(32, 16).unwrap().unwrap();
    assert_eq!(ctx.backend_name(), "cpu");
    assert_eq!(ctx.buffer_size(), (32, 16));
    assert!(!ctx.is_context_lost());
}

#[test]
fn oversized_cpu_buffer_is_a_context_error() {
    let err = match create_context(BackendKind::Cpu, 70_000, 10, &RenderSettings::default()) {
        Err(e) => e,
        Ok(_) => panic!("expected a context error"),
    };
    assert!(matches!(err, crate::foundation::error::RaysError::Context(_)));
}
