// Focus state machine: Unfocused -> Focusing -> Focused -> Defocusing -> Unfocused.
// Progress is advanced by the host frame clock through `tick`. Last write wins; nothing is queued.

use crate::animation::Tween;
use crate::types::{AnimationConfig, EasingType, FocusPhase};

/// Tracks which item is selected and how far its focus animation has run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FocusAnimator {
    selected: Option<usize>,
    progress: f32,
    phase: FocusPhase,
    tween: Option<Tween>,
}

impl FocusAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start focusing `index`. Returns false when `index` is already focused or focusing.
    pub fn focus(&mut self, index: usize, timing: &AnimationConfig) -> bool {
        if self.selected == Some(index) {
            match self.phase {
                FocusPhase::Focusing | FocusPhase::Focused => return false,
                FocusPhase::Defocusing => {
                    // Resume from where the defocus left off.
                    let remaining = timing.focus_in_ms * (1.0 - self.progress);
                    self.tween = Some(Tween::new(
                        self.progress,
                        1.0,
                        remaining,
                        timing.focus_easing,
                    ));
                    self.phase = FocusPhase::Focusing;
                    log::debug!("focus resumed on {index} at {:.3}", self.progress);
                    return true;
                }
                FocusPhase::Unfocused => {}
            }
        }

        self.selected = Some(index);
        self.progress = 0.0;
        self.tween = Some(Tween::new(
            0.0,
            1.0,
            timing.focus_in_ms,
            timing.focus_easing,
        ));
        self.phase = FocusPhase::Focusing;
        log::debug!("focusing {index}");
        true
    }

    /// Animate back to unfocused. `selected` is kept until the animation completes.
    pub fn clear(&mut self, timing: &AnimationConfig) -> bool {
        if self.phase == FocusPhase::Defocusing {
            return false;
        }
        self.defocus(timing.focus_out_ms, timing.focus_easing)
    }

    /// Scroll input always wins: drop any focus animation and decay toward zero.
    pub fn cancel_for_scroll(&mut self, timing: &AnimationConfig) -> bool {
        if self.phase == FocusPhase::Defocusing {
            return false;
        }
        self.defocus(timing.focus_out_ms, EasingType::EaseOut)
    }

    fn defocus(&mut self, focus_out_ms: f32, easing: EasingType) -> bool {
        if self.phase == FocusPhase::Unfocused {
            return false;
        }
        if self.progress <= 0.0 {
            self.reset();
            return true;
        }
        let duration = focus_out_ms * self.progress;
        self.tween = Some(Tween::new(self.progress, 0.0, duration, easing));
        self.phase = FocusPhase::Defocusing;
        log::debug!("defocusing {:?} from {:.3}", self.selected, self.progress);
        true
    }

    /// Advance the running animation. Returns true while still animating.
    pub fn tick(&mut self, elapsed_ms: f32) -> bool {
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };
        self.progress = tween.advance(elapsed_ms).clamp(0.0, 1.0);
        if !tween.is_finished() {
            return true;
        }

        self.tween = None;
        match self.phase {
            FocusPhase::Focusing => {
                self.progress = 1.0;
                self.phase = FocusPhase::Focused;
                log::debug!("focused {:?}", self.selected);
            }
            FocusPhase::Defocusing => self.reset(),
            FocusPhase::Unfocused | FocusPhase::Focused => {}
        }
        false
    }

    /// Drop the selection if the item no longer exists.
    pub fn retain_within(&mut self, item_count: usize) {
        if matches!(self.selected, Some(i) if i >= item_count) {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        *self = FocusAnimator::default();
    }

    pub fn is_focused(&self, index: usize) -> bool {
        self.selected == Some(index)
            && matches!(self.phase, FocusPhase::Focusing | FocusPhase::Focused)
    }

    /// Focus progress applied to `index`; zero for anything but the selected item.
    pub fn progress_for(&self, index: usize) -> f32 {
        if self.selected == Some(index) {
            self.progress
        } else {
            0.0
        }
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }
}
