//! Anchor point and direction of the ray bundle.

use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::RaysError;

/// How far outside the visible rectangle the anchor is pushed, as a fraction of the size.
pub const OUTSIDE: f64 = 0.2;

/// Named anchor position of the ray bundle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RayOrigin {
    /// Top-left corner, rays pointing down.
    TopLeft,
    /// Top-right corner, rays pointing down.
    TopRight,
    /// Top edge center, rays pointing down.
    #[default]
    TopCenter,
    /// Right of the top center, rays leaning left.
    TopCenterOffset,
    /// Left edge center, rays pointing right.
    Left,
    /// Right edge center, rays pointing left.
    Right,
    /// Bottom-left corner, rays pointing up.
    BottomLeft,
    /// Bottom edge center, rays pointing up.
    BottomCenter,
    /// Bottom-right corner, rays pointing up.
    BottomRight,
}

impl RayOrigin {
    /// All origins, in declaration order.
    pub const ALL: [RayOrigin; 9] = [
        RayOrigin::TopLeft,
        RayOrigin::TopRight,
        RayOrigin::TopCenter,
        RayOrigin::TopCenterOffset,
        RayOrigin::Left,
        RayOrigin::Right,
        RayOrigin::BottomLeft,
        RayOrigin::BottomCenter,
        RayOrigin::BottomRight,
    ];

    /// Kebab-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            RayOrigin::TopLeft => "top-left",
            RayOrigin::TopRight => "top-right",
            RayOrigin::TopCenter => "top-center",
            RayOrigin::TopCenterOffset => "top-center-offset",
            RayOrigin::Left => "left",
            RayOrigin::Right => "right",
            RayOrigin::BottomLeft => "bottom-left",
            RayOrigin::BottomCenter => "bottom-center",
            RayOrigin::BottomRight => "bottom-right",
        }
    }

    /// Lenient lookup: unknown names resolve to [`RayOrigin::TopCenter`].
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for RayOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RayOrigin {
    type Err = RaysError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RayOrigin::ALL
            .into_iter()
            .find(|o| o.name() == s)
            .ok_or_else(|| RaysError::validation(format!("unknown ray origin \"{s}\"")))
    }
}

impl serde::Serialize for RayOrigin {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for RayOrigin {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        let origin = RayOrigin::from_name_or_default(&name);
        if origin.name() != name {
            tracing::warn!(origin = %name, "unknown ray origin, using top-center");
        }
        Ok(origin)
    }
}

/// Anchor point and unit direction of the ray bundle, in drawing-buffer pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayAnchorDirection {
    /// Point the rays emanate from (usually outside the visible rectangle).
    pub anchor: Point,
    /// Main direction of the bundle.
    pub direction: Vec2,
}

/// Resolve the anchor and direction for `origin` in a `width x height` area.
///
/// Pure; any finite input, including zero or negative sizes, yields a well-defined result.
pub fn resolve_anchor_and_direction(
    origin: RayOrigin,
    width: f64,
    height: f64,
) -> RayAnchorDirection {
    let (w, h) = (width, height);
    let (anchor, direction) = match origin {
        RayOrigin::TopLeft => ((0.0, -OUTSIDE * h), (0.0, 1.0)),
        RayOrigin::TopRight => ((w, -OUTSIDE * h), (0.0, 1.0)),
        RayOrigin::TopCenter => ((0.5 * w, -OUTSIDE * h), (0.0, 1.0)),
        RayOrigin::TopCenterOffset => ((0.5 * w + 0.2 * w, -OUTSIDE * h), (-0.2, 1.0)),
        RayOrigin::Left => ((-OUTSIDE * w, 0.5 * h), (1.0, 0.0)),
        RayOrigin::Right => (((1.0 + OUTSIDE) * w, 0.5 * h), (-1.0, 0.0)),
        RayOrigin::BottomLeft => ((0.0, (1.0 + OUTSIDE) * h), (0.0, -1.0)),
        RayOrigin::BottomCenter => ((0.5 * w, (1.0 + OUTSIDE) * h), (0.0, -1.0)),
        RayOrigin::BottomRight => ((w, (1.0 + OUTSIDE) * h), (0.0, -1.0)),
    };
    RayAnchorDirection {
        anchor: Point::new(anchor.0, anchor.1),
        direction: Vec2::new(direction.0, direction.1),
    }
}

/// [`resolve_anchor_and_direction`] for an origin given by name; unknown names use top-center.
pub fn resolve_named(origin: &str, width: f64, height: f64) -> RayAnchorDirection {
    resolve_anchor_and_direction(RayOrigin::from_name_or_default(origin), width, height)
}

#[cfg(test)]
#[path = "../tests/unit/geometry.rs"]
mod tests;
