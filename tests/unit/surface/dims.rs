use super::*;

#[test]
fn pixel_ratio_is_clamped_to_two() {
    let opts = SurfaceOpts::default();
    assert_eq!(effective_pixel_ratio(3.0, &opts), 2.0);
    assert_eq!(effective_pixel_ratio(1.5, &opts), 1.5);
    assert_eq!(effective_pixel_ratio(0.0, &opts), 1.0);
    assert_eq!(effective_pixel_ratio(-2.0, &opts), 1.0);
    assert_eq!(effective_pixel_ratio(f64::NAN, &opts), 1.0);
}

#[test]
fn buffer_scales_with_pixel_ratio() {
    let opts = SurfaceOpts::default();
    let c = HostContainer::new(300.0, 150.0).with_pixel_ratio(3.0);
    assert_eq!(buffer_dims(&c, &opts, u32::MAX), (600, 300));
    let c = HostContainer::new(100.5, 10.2).with_pixel_ratio(1.0);
    assert_eq!(buffer_dims(&c, &opts, u32::MAX), (101, 10));
}

#[test]
fn buffer_respects_caps() {
    let opts = SurfaceOpts::default();
    let c = HostContainer::new(5000.0, 100.0).with_pixel_ratio(2.0);
    assert_eq!(buffer_dims(&c, &opts, u32::MAX), (4096, 200));
    assert_eq!(buffer_dims(&c, &opts, 1024), (1024, 200));
}

#[test]
fn degenerate_containers_get_a_one_pixel_buffer() {
    let opts = SurfaceOpts::default();
    assert_eq!(buffer_dims(&HostContainer::new(0.0, 0.0), &opts, u32::MAX), (1, 1));
    assert_eq!(buffer_dims(&HostContainer::new(-50.0, 20.0), &opts, u32::MAX), (1, 20));
    assert_eq!(
        buffer_dims(&HostContainer::new(f64::INFINITY, f64::NAN), &opts, u32::MAX),
        (1, 1)
    );
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: SurfaceOpts = serde_json::from_str(r#"{"maxPixelRatio":1.0}"#).unwrap();
    assert_eq!(opts.max_pixel_ratio, 1.0);
    assert_eq!(opts.max_buffer_dimension, 4096);
}
