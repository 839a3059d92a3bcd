use super::*;

#[test]
fn fract_and_mix_match_shader_semantics() {
    assert!((fract(2.25) - 0.25).abs() < 1e-6);
    assert!((fract(-0.25) - 0.75).abs() < 1e-6);
    assert_eq!(mix(2.0, 4.0, 0.5), 3.0);
}

#[test]
fn unit_to_u8_clamps_and_rounds() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(2.0), 255);
}

#[test]
fn approach_fraction_is_frame_rate_independent() {
    let one_frame = approach_fraction(0.1, 1.0 / REFERENCE_HZ);
    assert!((one_frame - 0.1).abs() < 1e-9);

    // Two half-length steps cover the same distance as one full step.
    let half = approach_fraction(0.1, 0.5 / REFERENCE_HZ);
    let combined = 1.0 - (1.0 - half) * (1.0 - half);
    assert!((combined - one_frame).abs() < 1e-9);

    assert_eq!(approach_fraction(0.0, 1.0), 0.0);
    assert_eq!(approach_fraction(1.0, 0.0), 1.0);
    assert_eq!(approach_fraction(0.5, -3.0), 0.0);
}

#[test]
fn align_to_rounds_up_to_power_of_two() {
    assert_eq!(align_to(0, 256), 0);
    assert_eq!(align_to(1, 256), 256);
    assert_eq!(align_to(256, 256), 256);
    assert_eq!(align_to(257, 256), 512);
}
