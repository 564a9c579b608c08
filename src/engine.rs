// RailLayoutEngine: owns rail state and turns it into per-card placements.
// Driven entirely by the host: scroll deltas, focus requests, frame ticks, and viewport sizes in;
// placement records out. Degenerate rails (no items, zero viewport) place nothing and ignore input.

use serde::{Deserialize, Serialize};

use crate::easing::lerp;
use crate::focus::FocusAnimator;
use crate::geometry;
use crate::metrics::AspectSource;
use crate::scroll::{
    overscroll_allowance, ScrollAnimationKind, ScrollBounds, ScrollModel, CENTER_EPSILON_PX,
};
use crate::types::*;
use crate::window::VisibleWindow;
use crate::RailError;

/// How a focus request will be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FocusPlan {
    /// The item was already centered and focus started right away.
    Immediate,
    /// The rail scrolls first; focus starts when the scroll animation completes.
    ScrollThenFocus { delta_px: f32 },
    /// Nothing to focus on this rail.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct RailLayoutEngine {
    config: RailConfig,
    viewport: Viewport,
    item_count: usize,
    scroll: ScrollModel,
    focus: FocusAnimator,
    pending_focus: Option<usize>,
}

impl RailLayoutEngine {
    pub fn new(config: RailConfig) -> Result<Self, RailError> {
        config.validate()?;
        Ok(RailLayoutEngine {
            config,
            viewport: Viewport::default(),
            item_count: 0,
            scroll: ScrollModel::new(),
            focus: FocusAnimator::new(),
            pending_focus: None,
        })
    }

    /// Replace the configuration. Invalid configs are rejected and the old one is kept.
    pub fn configure(&mut self, config: RailConfig) -> Result<(), RailError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected rail config: {err}");
            return Err(err);
        }
        self.config = config;
        self.reclamp_if_needed();
        Ok(())
    }

    pub fn config(&self) -> &RailConfig {
        &self.config
    }

    pub fn set_viewport(&mut self, extent_px: f32, cross_px: f32) {
        self.viewport = Viewport::new(extent_px, cross_px);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        if item_count == self.item_count {
            return;
        }
        self.item_count = item_count;
        self.focus.retain_within(item_count);
        if matches!(self.pending_focus, Some(i) if i >= item_count) {
            self.pending_focus = None;
        }
        if matches!(self.scroll.pending_scroll_to(), Some(i) if i >= item_count) {
            let bounds = self.scroll_bounds();
            self.scroll.reclamp(bounds);
        }
        self.reclamp_if_needed();
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_degenerate(&self) -> bool {
        self.item_count == 0 || self.viewport.is_degenerate()
    }

    pub fn scroll_bounds(&self) -> ScrollBounds {
        ScrollBounds::for_items(self.item_count, self.config.item_pitch_px)
    }

    fn allowance(&self) -> f32 {
        overscroll_allowance(
            &self.config.overscroll,
            &self.viewport,
            self.config.item_pitch_px,
        )
    }

    fn reclamp_if_needed(&mut self) {
        let bounds = self.scroll_bounds();
        let allowance = self.allowance();
        let offset = self.scroll.offset();
        if offset < bounds.min - allowance || offset > bounds.max + allowance {
            self.scroll.reclamp(bounds);
        }
    }

    fn clamp_index(&self, index: usize) -> usize {
        index.min(self.item_count.saturating_sub(1))
    }

    /// Apply a scroll delta and return how much of it was consumed.
    /// Any nonzero delta cancels focus, running scroll animations, and a pending focus.
    pub fn scroll_by(&mut self, delta_px: f32) -> f32 {
        if self.is_degenerate() || !delta_px.is_finite() || delta_px == 0.0 {
            return 0.0;
        }
        self.pending_focus = None;
        self.focus.cancel_for_scroll(&self.config.animation);
        let bounds = self.scroll_bounds();
        let allowance = self.allowance();
        self.scroll.scroll_by(delta_px, bounds, allowance)
    }

    /// Animate back inside hard bounds after input ends. Returns true if an animation started.
    pub fn settle(&mut self) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let bounds = self.scroll_bounds();
        let timing = &self.config.animation;
        self.scroll
            .settle(bounds, timing.settle_ms, timing.settle_easing)
    }

    /// Animate so `index` is centered. Returns true if an animation started.
    /// Focus on any other card is released once the rail starts moving.
    pub fn scroll_to(&mut self, index: usize) -> bool {
        if self.is_degenerate() {
            return false;
        }
        self.pending_focus = None;
        let index = self.clamp_index(index);
        let bounds = self.scroll_bounds();
        let timing = &self.config.animation;
        let started = self.scroll.scroll_to(
            index,
            self.config.item_pitch_px,
            bounds,
            timing.scroll_to_ms,
            timing.scroll_to_easing,
        );
        if started && self.focus.selected().is_some_and(|selected| selected != index) {
            self.focus.clear(&self.config.animation);
        }
        started
    }

    pub fn focus(&mut self, index: usize) {
        if self.is_degenerate() {
            return;
        }
        self.pending_focus = None;
        let index = self.clamp_index(index);
        self.focus.focus(index, &self.config.animation);
    }

    /// Focus `index`, scrolling it to the focal point first when it is off center.
    pub fn request_focus(&mut self, index: usize) -> FocusPlan {
        if self.is_degenerate() {
            return FocusPlan::Ignored;
        }
        let index = self.clamp_index(index);
        let delta_px = self.offset_to_center(index);
        if delta_px.abs() <= CENTER_EPSILON_PX || !self.scroll_to(index) {
            self.focus(index);
            return FocusPlan::Immediate;
        }
        self.pending_focus = Some(index);
        FocusPlan::ScrollThenFocus { delta_px }
    }

    pub fn clear_focus(&mut self) {
        self.pending_focus = None;
        self.focus.clear(&self.config.animation);
    }

    pub fn is_focused(&self, index: usize) -> bool {
        self.focus.is_focused(index)
    }

    pub fn nearest_index(&self) -> usize {
        self.scroll
            .nearest_index(self.config.item_pitch_px, self.item_count)
    }

    /// Signed delta that centers `index` (clamped into range). Zero on an empty rail.
    pub fn offset_to_center(&self, index: usize) -> f32 {
        if self.item_count == 0 {
            return 0.0;
        }
        self.scroll
            .offset_to_center(self.clamp_index(index), self.config.item_pitch_px)
    }

    /// Advance focus and scroll animations. Returns true while anything is still animating.
    pub fn tick(&mut self, elapsed_ms: f32) -> bool {
        self.focus.tick(elapsed_ms);
        if let Some(ScrollAnimationKind::ScrollTo(index)) = self.scroll.tick(elapsed_ms) {
            if self.pending_focus == Some(index) {
                self.pending_focus = None;
                self.focus.focus(index, &self.config.animation);
            }
        }
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.focus.is_animating() || self.scroll.is_animating()
    }

    pub fn visible_window(&self) -> Option<VisibleWindow> {
        VisibleWindow::compute(
            &self.config,
            &self.viewport,
            self.scroll.offset(),
            self.item_count,
        )
    }

    /// Placements for the given viewport using the configured aspect ratio for every card.
    pub fn compute_placements(
        &mut self,
        viewport_extent_px: f32,
        viewport_cross_px: f32,
    ) -> Vec<PlacementRecord> {
        self.compute_placements_with(viewport_extent_px, viewport_cross_px, &())
    }

    /// Placements for the given viewport, taking per-item aspect ratios from `aspects`.
    /// A card with focus progress is always placed, even when it sits outside the window.
    pub fn compute_placements_with(
        &mut self,
        viewport_extent_px: f32,
        viewport_cross_px: f32,
        aspects: &dyn AspectSource,
    ) -> Vec<PlacementRecord> {
        self.set_viewport(viewport_extent_px, viewport_cross_px);
        if self.is_degenerate() {
            return Vec::new();
        }
        let mut indices: Vec<usize> = self
            .visible_window()
            .map(|window| window.indices().collect())
            .unwrap_or_default();
        if let Some(selected) = self.focused_index() {
            if let Err(slot) = indices.binary_search(&selected) {
                indices.insert(slot, selected);
            }
        }
        indices
            .into_iter()
            .map(|index| self.place(index, aspects))
            .collect()
    }

    /// Selected index while its focus progress is visible.
    fn focused_index(&self) -> Option<usize> {
        self.focus
            .selected()
            .filter(|&index| index < self.item_count && self.focus.progress() > 0.0)
    }

    fn place(&self, index: usize, aspects: &dyn AspectSource) -> PlacementRecord {
        let config = &self.config;
        let pitch = config.item_pitch_px;
        let distance_px = index as f32 * pitch - self.scroll.offset();
        let distance_items = distance_px / pitch;

        let gain = geometry::gain(distance_px, pitch);
        let focus = self.focus.progress_for(index);
        let keep = 1.0 - focus;

        let width = lerp(geometry::base_width(config, gain), config.focus_extent_px, focus);
        let aspect = aspects
            .aspect_ratio(index)
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(config.aspect_ratio);
        let height = width * aspect;
        let alpha = lerp(geometry::alpha(config, gain), 1.0, focus);
        let scale = lerp(geometry::depth_scale(config, distance_items), 1.0, focus);

        let curve = geometry::curvature(&config.curve, distance_items);
        let scatter = geometry::scatter(&config.scatter, index, gain).scaled(keep);

        let along_sign = if config.reversed { -1.0 } else { 1.0 };
        let focal = self.viewport.focal();
        let along = focal + along_sign * distance_px + scatter.along_px;
        let along = lerp(along, focal, focus);

        let cross_size = match config.axis {
            RailAxis::Vertical => width,
            RailAxis::Horizontal => height,
        };
        let shift = curve.shift_px * keep;
        let (rail_cross, anchor_sign) = match config.anchor {
            CrossAnchor::Start => (config.edge_inset_px + cross_size / 2.0 + shift, -1.0),
            CrossAnchor::End => (
                self.viewport.cross_px - config.edge_inset_px - cross_size / 2.0 - shift,
                1.0,
            ),
        };
        let cross = lerp(rail_cross + scatter.cross_px, self.viewport.cross_px / 2.0, focus);

        let rotation_deg =
            anchor_sign * along_sign * curve.rotation_deg * keep + scatter.rotation_deg;

        let center = match config.axis {
            RailAxis::Vertical => Point::new(cross, along),
            RailAxis::Horizontal => Point::new(along, cross),
        };

        PlacementRecord {
            index,
            center,
            width,
            height,
            rotation_deg,
            scale,
            alpha: alpha.clamp(0.0, 1.0),
            z_order: gain + focus,
        }
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.focus.selected()
    }

    pub fn focus_progress(&self) -> f32 {
        self.focus.progress()
    }

    pub fn focus_phase(&self) -> FocusPhase {
        self.focus.phase()
    }

    pub fn pending_focus(&self) -> Option<usize> {
        self.pending_focus
    }

    pub fn state(&self) -> RailState {
        RailState {
            scroll_offset_px: self.scroll.offset(),
            selected_index: self.focus.selected(),
            focus_progress: self.focus.progress(),
            focus_phase: self.focus.phase(),
            item_count: self.item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{ItemKey, MetricsCache};
    use proptest::prelude::*;

    const FRAME_MS: f32 = 16.0;

    fn test_config() -> RailConfig {
        RailConfig {
            item_pitch_px: 100.0,
            base_extent_px: 120.0,
            focus_extent_px: 240.0,
            ..RailConfig::default()
        }
    }

    fn engine(item_count: usize) -> RailLayoutEngine {
        let mut engine = RailLayoutEngine::new(test_config()).unwrap();
        engine.set_viewport(800.0, 400.0);
        engine.set_item_count(item_count);
        engine
    }

    fn run_animations(engine: &mut RailLayoutEngine) {
        for _ in 0..200 {
            if !engine.tick(FRAME_MS) {
                break;
            }
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let bad = RailConfig {
            item_pitch_px: -1.0,
            ..RailConfig::default()
        };
        assert!(RailLayoutEngine::new(bad).is_err());

        let mut engine = engine(3);
        assert!(engine.configure(bad).is_err());
        assert_eq!(engine.config().item_pitch_px, 100.0);
    }

    #[test]
    fn scroll_within_bounds_consumes_delta() {
        let mut engine = engine(10);
        assert_eq!(engine.nearest_index(), 0);
        let consumed = engine.scroll_by(250.0);
        assert_eq!(consumed, 250.0);
        assert_eq!(engine.scroll_offset(), 250.0);
        assert_eq!(engine.nearest_index(), 2);
    }

    #[test]
    fn overscroll_is_soft_and_settles() {
        let mut engine = engine(10);
        // allowance = max(64, 0.15 * 800, 0.5 * 100) = 120
        let consumed = engine.scroll_by(-500.0);
        assert_eq!(consumed, -120.0);
        assert!(engine.settle());
        run_animations(&mut engine);
        assert_eq!(engine.scroll_offset(), 0.0);
        assert!(!engine.settle());
    }

    #[test]
    fn focus_then_scroll_decays() {
        let mut engine = engine(10);
        engine.focus(5);
        engine.tick(FRAME_MS * 4.0);
        let before = engine.focus_progress();
        assert!(before > 0.0);

        engine.scroll_by(10.0);
        assert!(!engine.is_focused(5));
        engine.tick(FRAME_MS);
        assert!(engine.focus_progress() < before);

        run_animations(&mut engine);
        assert_eq!(engine.focus_phase(), FocusPhase::Unfocused);
        assert_eq!(engine.selected_index(), None);
    }

    #[test]
    fn focus_is_idempotent_once_settled() {
        let mut engine = engine(10);
        engine.focus(3);
        run_animations(&mut engine);
        let once = engine.state();
        engine.focus(3);
        run_animations(&mut engine);
        assert_eq!(engine.state(), once);
        assert_eq!(once.focus_phase, FocusPhase::Focused);
        assert_eq!(once.focus_progress, 1.0);
    }

    #[test]
    fn focus_clamps_index() {
        let mut engine = engine(4);
        engine.focus(99);
        assert!(engine.is_focused(3));
        assert_eq!(engine.offset_to_center(99), 300.0);
    }

    #[test]
    fn single_item_rail() {
        let mut engine = engine(1);
        let bounds = engine.scroll_bounds();
        assert_eq!(bounds.min, bounds.max);
        engine.scroll_by(70.0);
        assert_eq!(engine.nearest_index(), 0);
        engine.scroll_by(-140.0);
        assert_eq!(engine.nearest_index(), 0);
    }

    #[test]
    fn degenerate_rail_is_inert() {
        let mut engine = RailLayoutEngine::new(test_config()).unwrap();
        engine.set_item_count(5);
        assert!(engine.is_degenerate());
        assert_eq!(engine.scroll_by(50.0), 0.0);
        engine.focus(1);
        assert_eq!(engine.focus_phase(), FocusPhase::Unfocused);

        let mut empty = engine.clone();
        empty.set_item_count(0);
        assert!(empty.compute_placements(800.0, 400.0).is_empty());
        assert_eq!(empty.offset_to_center(3), 0.0);
        assert_eq!(empty.nearest_index(), 0);
        assert_eq!(empty.request_focus(1), FocusPlan::Ignored);

        assert!(engine.compute_placements(0.0, 400.0).is_empty());
    }

    #[test]
    fn placements_peak_at_focal_point() {
        let mut engine = engine(10);
        engine.scroll_by(300.0);
        let placements = engine.compute_placements(800.0, 400.0);
        let center = placements.iter().find(|p| p.index == 3).unwrap();
        let neighbor = placements.iter().find(|p| p.index == 4).unwrap();

        assert_eq!(center.center.y, 400.0);
        assert_eq!(center.width, 120.0);
        assert_eq!(center.alpha, 1.0);
        assert_eq!(center.rotation_deg, 0.0);
        assert_eq!(center.z_order, 1.0);
        // End-anchored vertical rail: right edge minus inset minus half width.
        assert_eq!(center.center.x, 400.0 - 16.0 - 60.0);

        assert!(neighbor.width < center.width);
        assert!(neighbor.alpha < center.alpha);
        assert!(neighbor.z_order < center.z_order);
        assert!(neighbor.center.y > center.center.y);
        assert!((neighbor.height / neighbor.width - 1.4).abs() < 1e-4);
    }

    #[test]
    fn focused_card_grows_and_flattens() {
        let mut engine = engine(10);
        engine.scroll_by(200.0);
        engine.focus(2);
        run_animations(&mut engine);

        let placements = engine.compute_placements(800.0, 400.0);
        let focused = placements.iter().find(|p| p.index == 2).unwrap();
        assert_eq!(focused.width, 240.0);
        assert_eq!(focused.center.x, 200.0);
        assert_eq!(focused.center.y, 400.0);
        assert_eq!(focused.rotation_deg, 0.0);
        assert_eq!(focused.alpha, 1.0);
        assert_eq!(focused.scale, 1.0);
        assert!(placements
            .iter()
            .all(|p| p.index == 2 || p.z_order < focused.z_order));
    }

    #[test]
    fn focus_flattens_in_proportion_to_progress() {
        let mut engine = engine(10);
        let find = |placements: Vec<PlacementRecord>| {
            placements.into_iter().find(|p| p.index == 3).unwrap()
        };
        let resting = find(engine.compute_placements(800.0, 400.0));
        assert!(resting.rotation_deg != 0.0);
        assert!(resting.center.x > 200.0);

        engine.focus(3);
        assert_eq!(find(engine.compute_placements(800.0, 400.0)), resting);

        engine.tick(200.0);
        let progress = engine.focus_progress();
        assert!(progress > 0.0 && progress < 1.0);
        let mid = find(engine.compute_placements(800.0, 400.0));
        assert!(mid.rotation_deg.abs() > 0.0);
        assert!(mid.rotation_deg.abs() < resting.rotation_deg.abs());
        assert!(mid.center.x > 200.0 && mid.center.x < resting.center.x);
        assert!(mid.width > resting.width && mid.width < 240.0);

        run_animations(&mut engine);
        let focused = find(engine.compute_placements(800.0, 400.0));
        assert_eq!(focused.rotation_deg, 0.0);
        assert_eq!(focused.center.x, 200.0);
        assert_eq!(focused.center.y, 400.0);
    }

    #[test]
    fn focused_offscreen_card_is_placed() {
        let mut engine = engine(50);
        engine.focus(30);
        run_animations(&mut engine);
        assert!(!engine.visible_window().unwrap().contains(30));

        let placements = engine.compute_placements(800.0, 400.0);
        let focused = placements.iter().find(|p| p.index == 30).unwrap();
        assert_eq!(focused.center, Point::new(200.0, 400.0));
        assert_eq!(focused.width, 240.0);
        for pair in placements.windows(2) {
            assert!(pair[0].index < pair[1].index);
        }
    }

    #[test]
    fn defocusing_card_stays_placed_after_scrolling_away() {
        let mut engine = engine(50);
        engine.focus(0);
        run_animations(&mut engine);
        engine.scroll_by(3000.0);
        assert_eq!(engine.focus_phase(), FocusPhase::Defocusing);
        engine.tick(FRAME_MS);
        assert!(!engine.visible_window().unwrap().contains(0));

        let placements = engine.compute_placements(800.0, 400.0);
        assert_eq!(placements.first().map(|p| p.index), Some(0));

        run_animations(&mut engine);
        let placements = engine.compute_placements(800.0, 400.0);
        assert!(placements.iter().all(|p| p.index != 0));
    }

    #[test]
    fn configured_scroll_curves_are_used() {
        let config = RailConfig {
            animation: AnimationConfig {
                scroll_to_easing: EasingType::Linear,
                ..AnimationConfig::default()
            },
            ..test_config()
        };
        let mut engine = RailLayoutEngine::new(config).unwrap();
        engine.set_viewport(800.0, 400.0);
        engine.set_item_count(10);
        assert!(engine.scroll_to(6));
        engine.tick(150.0);
        assert!((engine.scroll_offset() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn reversed_horizontal_rail_mirrors() {
        let config = RailConfig {
            axis: RailAxis::Horizontal,
            reversed: true,
            ..test_config()
        };
        let mut engine = RailLayoutEngine::new(config).unwrap();
        engine.set_item_count(10);
        let placements = engine.compute_placements(800.0, 400.0);
        let first = placements.iter().find(|p| p.index == 0).unwrap();
        let second = placements.iter().find(|p| p.index == 1).unwrap();
        assert_eq!(first.center.x, 400.0);
        assert!(second.center.x < first.center.x);
        // Bottom-anchored: card height drives the cross-axis offset.
        assert!((first.center.y - (400.0 - 16.0 - first.height / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn measured_aspect_ratio_overrides_default() {
        let mut engine = engine(3);
        let mut cache = MetricsCache::new();
        cache.record(ItemKey::new(11), 100.0, 50.0);
        let keys = [ItemKey::new(10), ItemKey::new(11), ItemKey::new(12)];
        let placements = engine.compute_placements_with(800.0, 400.0, &cache.for_keys(&keys));
        let measured = placements.iter().find(|p| p.index == 1).unwrap();
        let default = placements.iter().find(|p| p.index == 0).unwrap();
        assert!((measured.height / measured.width - 0.5).abs() < 1e-5);
        assert!((default.height / default.width - 1.4).abs() < 1e-5);
    }

    #[test]
    fn request_focus_scrolls_then_focuses() {
        let mut engine = engine(10);
        let plan = engine.request_focus(4);
        assert_eq!(plan, FocusPlan::ScrollThenFocus { delta_px: 400.0 });
        assert_eq!(engine.pending_focus(), Some(4));
        assert!(!engine.is_focused(4));

        run_animations(&mut engine);
        assert_eq!(engine.scroll_offset(), 400.0);
        assert_eq!(engine.nearest_index(), 4);
        assert_eq!(engine.focus_phase(), FocusPhase::Focused);
        assert!(engine.is_focused(4));
    }

    #[test]
    fn request_focus_on_centered_item_is_immediate() {
        let mut engine = engine(10);
        engine.scroll_by(300.0);
        assert_eq!(engine.request_focus(3), FocusPlan::Immediate);
        assert!(engine.is_focused(3));
    }

    #[test]
    fn scroll_to_clears_other_focus() {
        let mut engine = engine(10);
        engine.scroll_by(200.0);
        engine.focus(2);
        run_animations(&mut engine);

        assert!(engine.scroll_to(6));
        assert!(!engine.is_focused(2));
        assert_eq!(engine.focus_phase(), FocusPhase::Defocusing);
        run_animations(&mut engine);
        assert_eq!(engine.scroll_offset(), 600.0);
        assert_eq!(engine.selected_index(), None);
    }

    #[test]
    fn scroll_to_focused_card_keeps_focus() {
        let mut engine = engine(10);
        engine.focus(4);
        run_animations(&mut engine);
        assert!(engine.scroll_to(4));
        run_animations(&mut engine);
        assert!(engine.is_focused(4));
        assert_eq!(engine.scroll_offset(), 400.0);
    }

    #[test]
    fn scroll_cancels_pending_focus() {
        let mut engine = engine(10);
        engine.request_focus(6);
        engine.tick(FRAME_MS);
        engine.scroll_by(-5.0);
        assert_eq!(engine.pending_focus(), None);
        run_animations(&mut engine);
        assert_eq!(engine.selected_index(), None);
    }

    #[test]
    fn clear_focus_keeps_selection_until_done() {
        let mut engine = engine(10);
        engine.focus(0);
        run_animations(&mut engine);
        engine.clear_focus();
        engine.tick(FRAME_MS);
        assert_eq!(engine.selected_index(), Some(0));
        assert_eq!(engine.focus_phase(), FocusPhase::Defocusing);
        run_animations(&mut engine);
        assert_eq!(engine.selected_index(), None);
    }

    #[test]
    fn shrinking_item_count_reclamps() {
        let mut engine = engine(20);
        engine.scroll_by(1500.0);
        engine.focus(15);
        engine.set_item_count(5);
        assert_eq!(engine.scroll_offset(), 400.0);
        assert_eq!(engine.selected_index(), None);
        assert_eq!(engine.nearest_index(), 4);
    }

    mod property_tests {
        use super::*;

        fn config_strategy() -> impl Strategy<Value = RailConfig> {
            (
                10.0f32..400.0,
                10.0f32..300.0,
                1.0f32..2.0,
                0.1f32..=1.0,
                0.0f32..0.3,
                any::<bool>(),
                any::<bool>(),
                0usize..4,
            )
                .prop_map(
                    |(pitch, base, focus_mul, edge, drop, reversed, horizontal, overscan)| {
                        RailConfig {
                            item_pitch_px: pitch,
                            base_extent_px: base,
                            focus_extent_px: base * focus_mul,
                            min_edge_scale: edge,
                            depth_scale_drop: drop,
                            reversed,
                            axis: if horizontal {
                                RailAxis::Horizontal
                            } else {
                                RailAxis::Vertical
                            },
                            overscan_items: overscan,
                            ..RailConfig::default()
                        }
                    },
                )
        }

        proptest! {
            /// Placements come out sorted, unique, and in range. Only the focused card may sit
            /// outside the overscanned window.
            #[test]
            fn placements_sorted_and_windowed(
                config in config_strategy(),
                item_count in 1usize..200,
                extent in 50.0f32..2000.0,
                cross in 50.0f32..1200.0,
                scroll in -5000.0f32..50_000.0,
                focus_on in prop::option::of(0usize..200),
            ) {
                let mut engine = RailLayoutEngine::new(config).unwrap();
                engine.set_viewport(extent, cross);
                engine.set_item_count(item_count);
                engine.scroll_by(scroll);
                if let Some(k) = focus_on {
                    engine.focus(k % item_count);
                    engine.tick(FRAME_MS * 4.0);
                }
                let placements = engine.compute_placements(extent, cross);
                let selected = engine.selected_index();

                for pair in placements.windows(2) {
                    prop_assert!(pair[0].index < pair[1].index);
                }
                if let Some(window) = engine.visible_window() {
                    let lo = window.first_visible.saturating_sub(config.overscan_items);
                    let hi = window.last_visible + config.overscan_items;
                    for p in &placements {
                        prop_assert!(Some(p.index) == selected || (p.index >= lo && p.index <= hi));
                        prop_assert!(p.index < item_count);
                        prop_assert!((0.0..=1.0).contains(&p.alpha));
                        prop_assert!(p.width > 0.0 && p.height > 0.0);
                    }
                } else {
                    prop_assert!(placements.iter().all(|p| Some(p.index) == selected));
                }
            }

            /// Scrolling by offset_to_center(k) lands on k.
            #[test]
            fn nearest_index_round_trip(
                config in config_strategy(),
                item_count in 1usize..300,
                start in 0.0f32..10_000.0,
                k in 0usize..300,
            ) {
                let k = k % item_count;
                let mut engine = RailLayoutEngine::new(config).unwrap();
                engine.set_viewport(800.0, 400.0);
                engine.set_item_count(item_count);
                engine.scroll_by(start);
                let delta = engine.offset_to_center(k);
                engine.scroll_by(delta);
                prop_assert_eq!(engine.nearest_index(), k);
            }

            /// With a single item the hard bounds collapse and nearest_index is always 0.
            #[test]
            fn single_item_always_index_zero(
                config in config_strategy(),
                deltas in prop::collection::vec(-1000.0f32..1000.0, 1..20),
            ) {
                let mut engine = RailLayoutEngine::new(config).unwrap();
                engine.set_viewport(800.0, 400.0);
                engine.set_item_count(1);
                let bounds = engine.scroll_bounds();
                prop_assert_eq!(bounds.min, bounds.max);
                for delta in deltas {
                    engine.scroll_by(delta);
                    prop_assert_eq!(engine.nearest_index(), 0);
                }
            }

            /// Scroll input during focus always pulls progress down on the next tick.
            #[test]
            fn scroll_during_focus_decays_progress(
                k in 0usize..20,
                warmup_frames in 1usize..40,
                delta in prop_oneof![-500.0f32..-0.5, 0.5f32..500.0],
            ) {
                let mut engine = engine(20);
                engine.focus(k);
                for _ in 0..warmup_frames {
                    engine.tick(FRAME_MS);
                }
                let before = engine.focus_progress();
                prop_assume!(before > 0.0);
                engine.scroll_by(delta);
                engine.tick(FRAME_MS);
                prop_assert!(engine.focus_progress() < before);
            }

            /// Focusing the same index twice leaves identical state.
            #[test]
            fn focus_idempotent(k in 0usize..50, item_count in 1usize..50) {
                let mut engine = engine(item_count);
                engine.focus(k);
                run_animations(&mut engine);
                let once = engine.state();
                engine.focus(k);
                run_animations(&mut engine);
                prop_assert_eq!(engine.state(), once);
            }
        }
    }
}
