// Frame-clock driven tween. The host supplies elapsed time; nothing here reads a clock.

use crate::easing::lerp;
use crate::types::EasingType;

/// Animates a scalar from `start` to `target` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    start: f32,
    target: f32,
    elapsed_ms: f32,
    duration_ms: f32,
    easing: EasingType,
}

impl Tween {
    /// A non-positive or non-finite duration produces a tween that is already finished.
    pub fn new(start: f32, target: f32, duration_ms: f32, easing: EasingType) -> Self {
        let duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        Tween {
            start,
            target,
            elapsed_ms: 0.0,
            duration_ms,
            easing,
        }
    }

    /// Advance by `elapsed_ms` and return the new value.
    pub fn advance(&mut self, elapsed_ms: f32) -> f32 {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + elapsed_ms).min(self.duration_ms);
        }
        self.value()
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.target;
        }
        let t = self.elapsed_ms / self.duration_ms;
        lerp(self.start, self.target, self.easing.apply(t))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}
