//! Hex color parsing for the ray tint.

use crate::foundation::core::NormalizedColor;

/// Parse a `#RRGGBB` / `RRGGBB` string (case-insensitive) into normalized channels.
///
/// Returns `None` for anything else, including the three-digit shorthand and 8-digit RGBA.
pub fn parse_hex_rgb(hex: &str) -> Option<NormalizedColor> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| -> Option<f64> {
        let v = u8::from_str_radix(&digits[i..i + 2], 16).ok()?;
        Some(f64::from(v) / 255.0)
    };
    Some(NormalizedColor::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Convert a hex color string into normalized `(r, g, b)`.
///
/// Total: any input that is not exactly six hex digits (optionally `#`-prefixed) maps to opaque
/// white.
pub fn hex_to_rgb(hex: &str) -> NormalizedColor {
    parse_hex_rgb(hex).unwrap_or(NormalizedColor::WHITE)
}

#[cfg(test)]
#[path = "../tests/unit/color.rs"]
mod tests;
