// Scroll offset with soft clamping. Offset `i * pitch` centers item `i` on the focal point.
// Input may overshoot the hard bounds by the overscroll allowance; `settle` animates back.

use crate::animation::Tween;
use crate::types::{EasingType, OverscrollConfig, Viewport};

/// Hard scroll range: item 0 centered at `min`, the last item centered at `max`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollBounds {
    pub min: f32,
    pub max: f32,
}

impl ScrollBounds {
    pub fn for_items(item_count: usize, pitch_px: f32) -> Self {
        let last = item_count.saturating_sub(1) as f32;
        ScrollBounds {
            min: 0.0,
            max: last * pitch_px,
        }
    }

    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(self.min, self.max)
    }

    pub fn contains(&self, offset: f32) -> bool {
        offset >= self.min && offset <= self.max
    }
}

/// Overscroll allowance: the largest of the fixed minimum, a viewport fraction, and a pitch multiple.
pub fn overscroll_allowance(config: &OverscrollConfig, viewport: &Viewport, pitch_px: f32) -> f32 {
    config
        .min_px
        .max(config.viewport_fraction * viewport.extent_px)
        .max(config.pitch_multiple * pitch_px)
}

/// What a scroll animation was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAnimationKind {
    /// Return into hard bounds after overscroll.
    Settle,
    /// Bring an item to the focal point.
    ScrollTo(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    tween: Tween,
    kind: ScrollAnimationKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollModel {
    offset: f32,
    animation: Option<ScrollAnimation>,
}

/// Offsets closer than this are treated as already centered.
pub const CENTER_EPSILON_PX: f32 = 0.5;

impl ScrollModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Apply user scroll input. Cancels any running animation and returns the consumed delta.
    pub fn scroll_by(&mut self, delta_px: f32, bounds: ScrollBounds, allowance: f32) -> f32 {
        if !delta_px.is_finite() || delta_px == 0.0 {
            return 0.0;
        }
        self.animation = None;
        let before = self.offset;
        let soft_min = bounds.min - allowance;
        let soft_max = bounds.max + allowance;
        self.offset = (before + delta_px).clamp(soft_min, soft_max);
        self.offset - before
    }

    /// Start animating back inside `bounds`. Returns false if already inside.
    pub fn settle(&mut self, bounds: ScrollBounds, duration_ms: f32, easing: EasingType) -> bool {
        if bounds.contains(self.offset) {
            return false;
        }
        let target = bounds.clamp(self.offset);
        log::debug!("settling scroll {:.1} -> {:.1}", self.offset, target);
        self.animation = Some(ScrollAnimation {
            tween: Tween::new(self.offset, target, duration_ms, easing),
            kind: ScrollAnimationKind::Settle,
        });
        true
    }

    /// Start animating so `index` is centered. Returns false when no motion is needed.
    pub fn scroll_to(
        &mut self,
        index: usize,
        pitch_px: f32,
        bounds: ScrollBounds,
        duration_ms: f32,
        easing: EasingType,
    ) -> bool {
        let target = bounds.clamp(index as f32 * pitch_px);
        if (target - self.offset).abs() <= CENTER_EPSILON_PX {
            self.offset = target;
            self.animation = None;
            return false;
        }
        self.animation = Some(ScrollAnimation {
            tween: Tween::new(self.offset, target, duration_ms, easing),
            kind: ScrollAnimationKind::ScrollTo(index),
        });
        true
    }

    /// Advance any running animation. Returns the animation kind once it completes.
    pub fn tick(&mut self, elapsed_ms: f32) -> Option<ScrollAnimationKind> {
        let animation = self.animation.as_mut()?;
        self.offset = animation.tween.advance(elapsed_ms);
        if animation.tween.is_finished() {
            let kind = animation.kind;
            self.animation = None;
            return Some(kind);
        }
        None
    }

    /// Force the offset into `bounds`, dropping any animation. Used after resize or item count changes.
    pub fn reclamp(&mut self, bounds: ScrollBounds) {
        self.animation = None;
        self.offset = bounds.clamp(self.offset);
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn pending_scroll_to(&self) -> Option<usize> {
        match self.animation {
            Some(ScrollAnimation {
                kind: ScrollAnimationKind::ScrollTo(index),
                ..
            }) => Some(index),
            _ => None,
        }
    }

    /// Index closest to the focal point, clamped into `[0, item_count - 1]`.
    /// Exact half-pitch ties round to the even index.
    pub fn nearest_index(&self, pitch_px: f32, item_count: usize) -> usize {
        if item_count == 0 || !(pitch_px > 0.0) {
            return 0;
        }
        let raw = (self.offset / pitch_px).round_ties_even();
        if !(raw > 0.0) {
            return 0;
        }
        (raw as usize).min(item_count - 1)
    }

    /// Signed delta that would center `index`.
    pub fn offset_to_center(&self, index: usize, pitch_px: f32) -> f32 {
        index as f32 * pitch_px - self.offset
    }
}
