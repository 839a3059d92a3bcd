/// Elapsed and delta time for one tick, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FrameTime {
    pub(crate) elapsed: f64,
    pub(crate) delta: f64,
}

/// Monotonic frame clock seeded by the first timestamp it sees.
#[derive(Clone, Debug, Default)]
pub(crate) struct FrameClock {
    origin_ms: Option<f64>,
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Forget the seed; the next tick reports zero elapsed time.
    pub(crate) fn reset(&mut self) {
        self.origin_ms = None;
        self.last_ms = None;
    }

    pub(crate) fn tick(&mut self, now_ms: f64) -> FrameTime {
        let now_ms = if now_ms.is_finite() { now_ms } else { 0.0 };
        let last = self.last_ms.map_or(now_ms, |l| now_ms.max(l));
        let origin = match self.origin_ms {
            Some(o) => o,
            None => {
                self.origin_ms = Some(last);
                last
            }
        };
        let delta = self.last_ms.map_or(0.0, |l| (last - l) / 1000.0);
        self.last_ms = Some(last);
        FrameTime {
            elapsed: (last - origin).max(0.0) / 1000.0,
            delta,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/clock.rs"]
mod tests;
