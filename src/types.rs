// Plain data shared across the engine. Pixel units are f32 in host viewport space.
// Config types carry serde defaults so a host can send a partial JSON object.

use serde::{Deserialize, Serialize};

use crate::error::RailError;

/// Axis the rail scrolls along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RailAxis {
    /// Cards stacked top to bottom; scroll is vertical.
    #[default]
    Vertical,
    /// Cards laid out left to right; scroll is horizontal (landscape variants).
    Horizontal,
}

/// Viewport edge the rail hugs on the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CrossAnchor {
    /// Left edge (vertical rail) or top edge (horizontal rail).
    Start,
    /// Right edge (vertical rail) or bottom edge (horizontal rail).
    #[default]
    End,
}

/// Point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Viewport size split into rail axis and cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Viewport {
    pub extent_px: f32,
    pub cross_px: f32,
}

impl Viewport {
    pub fn new(extent_px: f32, cross_px: f32) -> Self {
        Viewport {
            extent_px: sanitize(extent_px),
            cross_px: sanitize(cross_px),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.extent_px <= 0.0
    }

    /// Rail-axis focal coordinate.
    pub fn focal(&self) -> f32 {
        self.extent_px / 2.0
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Easing function for focus and scroll animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EasingType {
    Linear,
    EaseOut,
    EaseInOut,
    Spring,
}

/// Perpendicular S-curve applied to items away from the focal point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Distance (in items) at which the curve reaches full strength.
    #[serde(default = "default_curve_radius_items")]
    pub radius_items: f32,
    #[serde(default = "default_curve_power")]
    pub power: f32,
    #[serde(default = "default_curve_max_rotation_deg")]
    pub max_rotation_deg: f32,
    /// Extra perpendicular shift at full strength.
    #[serde(default = "default_curve_max_shift_px")]
    pub max_shift_px: f32,
}

fn default_curve_radius_items() -> f32 {
    3.0
}

fn default_curve_power() -> f32 {
    1.6
}

fn default_curve_max_rotation_deg() -> f32 {
    12.0
}

fn default_curve_max_shift_px() -> f32 {
    48.0
}

impl Default for CurveConfig {
    fn default() -> Self {
        CurveConfig {
            radius_items: default_curve_radius_items(),
            power: default_curve_power(),
            max_rotation_deg: default_curve_max_rotation_deg(),
            max_shift_px: default_curve_max_shift_px(),
        }
    }
}

/// Decorative jitter. Zero amplitudes disable it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    #[serde(default = "default_scatter_amplitude_px")]
    pub amplitude_px: f32,
    #[serde(default = "default_scatter_rotation_deg")]
    pub rotation_deg: f32,
}

fn default_scatter_amplitude_px() -> f32 {
    6.0
}

fn default_scatter_rotation_deg() -> f32 {
    2.5
}

impl Default for ScatterConfig {
    fn default() -> Self {
        ScatterConfig {
            amplitude_px: default_scatter_amplitude_px(),
            rotation_deg: default_scatter_rotation_deg(),
        }
    }
}

/// Soft-clamp allowance past the hard scroll bounds.
/// The allowance is the largest of the three terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverscrollConfig {
    #[serde(default = "default_overscroll_min_px")]
    pub min_px: f32,
    #[serde(default = "default_overscroll_viewport_fraction")]
    pub viewport_fraction: f32,
    #[serde(default = "default_overscroll_pitch_multiple")]
    pub pitch_multiple: f32,
}

fn default_overscroll_min_px() -> f32 {
    64.0
}

fn default_overscroll_viewport_fraction() -> f32 {
    0.15
}

fn default_overscroll_pitch_multiple() -> f32 {
    0.5
}

impl Default for OverscrollConfig {
    fn default() -> Self {
        OverscrollConfig {
            min_px: default_overscroll_min_px(),
            viewport_fraction: default_overscroll_viewport_fraction(),
            pitch_multiple: default_overscroll_pitch_multiple(),
        }
    }
}

/// Animation durations in milliseconds and the curves they run on.
/// Focus-in must last longer than focus-out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_focus_in_ms")]
    pub focus_in_ms: f32,
    #[serde(default = "default_focus_out_ms")]
    pub focus_out_ms: f32,
    #[serde(default = "default_settle_ms")]
    pub settle_ms: f32,
    #[serde(default = "default_scroll_to_ms")]
    pub scroll_to_ms: f32,
    /// Curve for focus-in and `clear_focus`. Scroll-cancelled focus always decays with `EaseOut`.
    #[serde(default = "default_focus_easing")]
    pub focus_easing: EasingType,
    #[serde(default = "default_settle_easing")]
    pub settle_easing: EasingType,
    #[serde(default = "default_scroll_to_easing")]
    pub scroll_to_easing: EasingType,
}

fn default_focus_in_ms() -> f32 {
    420.0
}

fn default_focus_out_ms() -> f32 {
    260.0
}

fn default_settle_ms() -> f32 {
    220.0
}

fn default_scroll_to_ms() -> f32 {
    300.0
}

fn default_focus_easing() -> EasingType {
    EasingType::EaseInOut
}

fn default_settle_easing() -> EasingType {
    EasingType::EaseOut
}

fn default_scroll_to_easing() -> EasingType {
    EasingType::EaseInOut
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            focus_in_ms: default_focus_in_ms(),
            focus_out_ms: default_focus_out_ms(),
            settle_ms: default_settle_ms(),
            scroll_to_ms: default_scroll_to_ms(),
            focus_easing: default_focus_easing(),
            settle_easing: default_settle_easing(),
            scroll_to_easing: default_scroll_to_easing(),
        }
    }
}

/// Rail geometry. Immutable for a layout pass; validated by [`RailConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RailConfig {
    #[serde(default)]
    pub axis: RailAxis,
    /// Mirrored rail: index 0 sits at the far end of the axis.
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub anchor: CrossAnchor,
    /// Card size away from focus.
    #[serde(default = "default_base_extent_px")]
    pub base_extent_px: f32,
    /// Card size at full focus.
    #[serde(default = "default_focus_extent_px")]
    pub focus_extent_px: f32,
    /// Center-to-center spacing along the rail axis.
    #[serde(default = "default_item_pitch_px")]
    pub item_pitch_px: f32,
    /// Offset of the rail from its anchor edge.
    #[serde(default = "default_edge_inset_px")]
    pub edge_inset_px: f32,
    /// Width multiplier for items far from the focal point, in (0, 1].
    #[serde(default = "default_min_edge_scale")]
    pub min_edge_scale: f32,
    /// Per-item-distance falloff of the depth scale.
    #[serde(default = "default_depth_scale_drop")]
    pub depth_scale_drop: f32,
    #[serde(default = "default_min_alpha")]
    pub min_alpha: f32,
    /// Height / width used when the host has no measured ratio for an item.
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f32,
    /// Extra items placed beyond each end of the viewport.
    #[serde(default = "default_overscan_items")]
    pub overscan_items: usize,
    #[serde(default)]
    pub curve: CurveConfig,
    #[serde(default)]
    pub scatter: ScatterConfig,
    #[serde(default)]
    pub overscroll: OverscrollConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

fn default_base_extent_px() -> f32 {
    180.0
}

fn default_focus_extent_px() -> f32 {
    320.0
}

fn default_item_pitch_px() -> f32 {
    140.0
}

fn default_edge_inset_px() -> f32 {
    16.0
}

fn default_min_edge_scale() -> f32 {
    0.72
}

fn default_depth_scale_drop() -> f32 {
    0.06
}

fn default_min_alpha() -> f32 {
    0.35
}

fn default_aspect_ratio() -> f32 {
    1.4
}

/// Largest accepted `overscan_items`.
pub const MAX_OVERSCAN_ITEMS: usize = 16;

fn default_overscan_items() -> usize {
    2
}

impl Default for RailConfig {
    fn default() -> Self {
        RailConfig {
            axis: RailAxis::default(),
            reversed: false,
            anchor: CrossAnchor::default(),
            base_extent_px: default_base_extent_px(),
            focus_extent_px: default_focus_extent_px(),
            item_pitch_px: default_item_pitch_px(),
            edge_inset_px: default_edge_inset_px(),
            min_edge_scale: default_min_edge_scale(),
            depth_scale_drop: default_depth_scale_drop(),
            min_alpha: default_min_alpha(),
            aspect_ratio: default_aspect_ratio(),
            overscan_items: default_overscan_items(),
            curve: CurveConfig::default(),
            scatter: ScatterConfig::default(),
            overscroll: OverscrollConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl RailConfig {
    /// Vertical rail hugging the right edge, sized from the viewport width.
    pub fn right_rail(viewport_width_px: f32) -> Self {
        let width = sanitize(viewport_width_px);
        let base = (width * 0.42).max(1.0);
        RailConfig {
            axis: RailAxis::Vertical,
            anchor: CrossAnchor::End,
            base_extent_px: base,
            focus_extent_px: (width * 0.86).max(base),
            item_pitch_px: base * 0.82,
            edge_inset_px: width * 0.04,
            ..RailConfig::default()
        }
    }

    /// Horizontal rail along the bottom edge, sized from the viewport height.
    pub fn landscape(viewport_height_px: f32) -> Self {
        let height = sanitize(viewport_height_px);
        let base = (height * 0.38).max(1.0);
        RailConfig {
            axis: RailAxis::Horizontal,
            anchor: CrossAnchor::End,
            base_extent_px: base,
            focus_extent_px: (height * 0.7).max(base),
            item_pitch_px: base * 0.9,
            edge_inset_px: height * 0.05,
            aspect_ratio: 0.75,
            ..RailConfig::default()
        }
    }

    /// Reject geometry the engine cannot lay out.
    pub fn validate(&self) -> Result<(), RailError> {
        positive("item_pitch_px", self.item_pitch_px)?;
        positive("base_extent_px", self.base_extent_px)?;
        positive("focus_extent_px", self.focus_extent_px)?;
        positive("aspect_ratio", self.aspect_ratio)?;
        if !(self.min_edge_scale > 0.0 && self.min_edge_scale <= 1.0) {
            return Err(RailError::InvalidConfig(format!(
                "min_edge_scale must be in (0, 1], got {}",
                self.min_edge_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.min_alpha) {
            return Err(RailError::InvalidConfig(format!(
                "min_alpha must be in [0, 1], got {}",
                self.min_alpha
            )));
        }
        non_negative("depth_scale_drop", self.depth_scale_drop)?;
        finite("edge_inset_px", self.edge_inset_px)?;

        positive("curve.radius_items", self.curve.radius_items)?;
        positive("curve.power", self.curve.power)?;
        finite("curve.max_rotation_deg", self.curve.max_rotation_deg)?;
        finite("curve.max_shift_px", self.curve.max_shift_px)?;
        non_negative("scatter.amplitude_px", self.scatter.amplitude_px)?;
        non_negative("scatter.rotation_deg", self.scatter.rotation_deg)?;

        non_negative("overscroll.min_px", self.overscroll.min_px)?;
        non_negative("overscroll.viewport_fraction", self.overscroll.viewport_fraction)?;
        non_negative("overscroll.pitch_multiple", self.overscroll.pitch_multiple)?;

        positive("animation.focus_in_ms", self.animation.focus_in_ms)?;
        positive("animation.focus_out_ms", self.animation.focus_out_ms)?;
        positive("animation.settle_ms", self.animation.settle_ms)?;
        positive("animation.scroll_to_ms", self.animation.scroll_to_ms)?;
        if self.animation.focus_in_ms <= self.animation.focus_out_ms {
            return Err(RailError::InvalidConfig(format!(
                "animation.focus_in_ms ({}) must be longer than animation.focus_out_ms ({})",
                self.animation.focus_in_ms, self.animation.focus_out_ms
            )));
        }
        if self.overscan_items > MAX_OVERSCAN_ITEMS {
            return Err(RailError::InvalidConfig(format!(
                "overscan_items must be <= {MAX_OVERSCAN_ITEMS}, got {}",
                self.overscan_items
            )));
        }
        Ok(())
    }
}

fn finite(name: &str, v: f32) -> Result<(), RailError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(RailError::InvalidConfig(format!("{name} must be finite, got {v}")))
    }
}

fn positive(name: &str, v: f32) -> Result<(), RailError> {
    finite(name, v)?;
    if v > 0.0 {
        Ok(())
    } else {
        Err(RailError::InvalidConfig(format!("{name} must be > 0, got {v}")))
    }
}

fn non_negative(name: &str, v: f32) -> Result<(), RailError> {
    finite(name, v)?;
    if v >= 0.0 {
        Ok(())
    } else {
        Err(RailError::InvalidConfig(format!("{name} must be >= 0, got {v}")))
    }
}

/// Where the focus state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FocusPhase {
    #[default]
    Unfocused,
    Focusing,
    Focused,
    Defocusing,
}

/// Copy of the engine's mutable rail state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RailState {
    pub scroll_offset_px: f32,
    pub selected_index: Option<usize>,
    pub focus_progress: f32,
    pub focus_phase: FocusPhase,
    pub item_count: usize,
}

/// Placement of one card for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub index: usize,
    pub center: Point,
    pub width: f32,
    pub height: f32,
    pub rotation_deg: f32,
    pub scale: f32,
    pub alpha: f32,
    pub z_order: f32,
}

impl PlacementRecord {
    /// Floats per record in [`PlacementRecord::pack`] output.
    pub const PACKED_STRIDE: usize = 10;

    /// Flatten records for a single typed-array crossing:
    /// `[index, x, y, width, height, rotation, scale, alpha, z, 0]` per record.
    pub fn pack(records: &[PlacementRecord]) -> Vec<f32> {
        let mut buf = Vec::with_capacity(records.len() * Self::PACKED_STRIDE);
        for r in records {
            buf.extend_from_slice(&[
                r.index as f32,
                r.center.x,
                r.center.y,
                r.width,
                r.height,
                r.rotation_deg,
                r.scale,
                r.alpha,
                r.z_order,
                0.0,
            ]);
        }
        buf
    }
}
