use super::*;

#[test]
fn viewport_emptiness_covers_degenerate_sizes() {
    assert!(!ViewportSize::new(10.0, 5.0).is_empty());
    assert!(ViewportSize::new(0.0, 5.0).is_empty());
    assert!(ViewportSize::new(-100.0, -100.0).is_empty());
    assert!(ViewportSize::new(f64::NAN, 5.0).is_empty());
}

#[test]
fn host_container_defaults_to_unit_pixel_ratio() {
    let c = HostContainer::new(640.0, 360.0);
    assert_eq!(c.device_pixel_ratio, 1.0);
    assert_eq!(c.with_pixel_ratio(2.0).device_pixel_ratio, 2.0);
    assert_eq!(c.with_pixel_ratio(2.0).size, c.size);
}

#[test]
fn default_color_is_white() {
    assert_eq!(NormalizedColor::default(), NormalizedColor::WHITE);
    assert_eq!(NormalizedColor::WHITE.to_array(), [1.0, 1.0, 1.0]);
}
