use crate::foundation::core::Point;
use crate::foundation::math::approach_fraction;

/// Normalized pointer position the rays lean toward, eased toward the latest sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PointerSmoother {
    current: Point,
    target: Point,
}

impl Default for PointerSmoother {
    fn default() -> Self {
        let center = Point::new(0.5, 0.5);
        Self {
            current: center,
            target: center,
        }
    }
}

impl PointerSmoother {
    pub(crate) fn set_target(&mut self, target: Point) {
        if target.x.is_finite() && target.y.is_finite() {
            self.target = target;
        }
    }

    /// Move `current` toward the target by the frame-rate independent share of
    /// `per_frame` over `dt` seconds.
    pub(crate) fn step(&mut self, per_frame: f64, dt: f64) -> Point {
        let k = approach_fraction(per_frame, dt);
        self.current = self.current.lerp(self.target, k);
        self.current
    }

    pub(crate) fn current(&self) -> Point {
        self.current
    }

    #[cfg(test)]
    pub(crate) fn target(&self) -> Point {
        self.target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/pointer.rs"]
mod tests;
