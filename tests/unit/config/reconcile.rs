use crate::geometry::RayOrigin;
use super::*;

#[test]
fn identical_configs_need_nothing() {
    let c = RayConfig::default();
    assert!(reconcile(&c, &c.clone()).is_empty());
}

#[test]
fn color_change_does_not_touch_geometry() {
    let old = RayConfig::default();
    let new = RayConfig {
        color: "#ff0000".to_owned(),
        ..old.clone()
    };
    let d = reconcile(&old, &new);
    assert!(d.color);
    assert!(d.uniforms);
    assert!(!d.geometry);
    assert!(!d.program);
}

#[test]
fn origin_change_does_not_touch_color() {
    let old = RayConfig::default();
    let new = RayConfig {
        origin: RayOrigin::BottomRight,
        ..old.clone()
    };
    let d = reconcile(&old, &new);
    assert!(d.geometry);
    assert!(d.uniforms);
    assert!(!d.color);
    assert!(!d.program);
}

#[test]
fn scalar_change_only_reuploads() {
    let old = RayConfig::default();
    let new = RayConfig {
        speed: 3.0,
        pulsating: true,
        ..old.clone()
    };
    assert_eq!(
        reconcile(&old, &new),
        ConfigDiff {
            uniforms: true,
            ..ConfigDiff::default()
        }
    );
}

#[test]
fn toggling_optional_effects_rebuilds_program() {
    let old = RayConfig::default();
    let noisy = RayConfig {
        noise_amount: 0.3,
        ..old.clone()
    };
    assert!(reconcile(&old, &noisy).program);

    // Changing the amount within an already-enabled effect is a plain upload.
    let noisier = RayConfig {
        noise_amount: 0.6,
        ..noisy.clone()
    };
    let d = reconcile(&noisy, &noisier);
    assert!(d.uniforms);
    assert!(!d.program);
}

#[test]
fn class_name_is_tracked_separately() {
    let old = RayConfig::default();
    let new = RayConfig {
        class_name: "backdrop".to_owned(),
        ..old.clone()
    };
    let d = reconcile(&old, &new);
    assert!(d.class_name);
    assert!(!d.uniforms);
}
