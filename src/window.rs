// Index range that can intersect the viewport, plus overscan for host-side prefetch.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::types::{RailConfig, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleWindow {
    /// First index whose card can intersect the viewport.
    pub first_visible: usize,
    pub last_visible: usize,
    /// `first_visible` minus overscan, clamped to 0.
    pub first: usize,
    /// `last_visible` plus overscan, clamped to the last item.
    pub last: usize,
}

impl VisibleWindow {
    /// `None` when there is nothing to place: no items, zero viewport, or scrolled past every card.
    pub fn compute(
        config: &RailConfig,
        viewport: &Viewport,
        scroll_offset_px: f32,
        item_count: usize,
    ) -> Option<Self> {
        if item_count == 0 || viewport.is_degenerate() || !scroll_offset_px.is_finite() {
            return None;
        }
        let pitch = config.item_pitch_px;
        let reach = viewport.focal() + config.base_extent_px.max(config.focus_extent_px) / 2.0;
        let lo = ((scroll_offset_px - reach) / pitch).floor();
        let hi = ((scroll_offset_px + reach) / pitch).ceil();
        let last_index = (item_count - 1) as f32;
        if hi < 0.0 || lo > last_index {
            return None;
        }

        let first_visible = lo.max(0.0) as usize;
        let last_visible = hi.min(last_index) as usize;
        Some(VisibleWindow {
            first_visible,
            last_visible,
            first: first_visible.saturating_sub(config.overscan_items),
            last: last_visible
                .saturating_add(config.overscan_items)
                .min(item_count - 1),
        })
    }

    /// Indices to place, overscan included.
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices().contains(&index)
    }
}
