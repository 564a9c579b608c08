// Pure placement math. Distances are signed along the rail axis, measured from the focal point.
// Nothing here knows about focus state; the engine blends these with focus progress.

use crate::easing::{ease_in_out, lerp};
use crate::types::{CurveConfig, RailConfig, ScatterConfig};

/// Gaussian width in units of item pitch.
pub const GAIN_SIGMA_PITCHES: f32 = 0.95;

/// Proximity score in [0, 1] peaking at the focal point.
pub fn gain(distance_px: f32, pitch_px: f32) -> f32 {
    let sigma = GAIN_SIGMA_PITCHES * pitch_px;
    if !(sigma > 0.0) || !distance_px.is_finite() {
        return 0.0;
    }
    (-(distance_px * distance_px) / (2.0 * sigma * sigma)).exp()
}

/// Card width before focus: eased from `min_edge_scale * base` up to `base`.
pub fn base_width(config: &RailConfig, gain: f32) -> f32 {
    let edge = config.min_edge_scale * config.base_extent_px;
    lerp(edge, config.base_extent_px, ease_in_out(gain.clamp(0.0, 1.0)))
}

pub fn alpha(config: &RailConfig, gain: f32) -> f32 {
    lerp(config.min_alpha, 1.0, gain.clamp(0.0, 1.0)).clamp(0.0, 1.0)
}

/// Secondary depth cue, independent of the gain curve.
pub fn depth_scale(config: &RailConfig, distance_items: f32) -> f32 {
    (1.0 - config.depth_scale_drop * distance_items.abs()).clamp(0.0, 1.0)
}

/// Perpendicular shift and tilt contributed by the S-curve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CurveOffset {
    /// Always >= 0; the engine turns it inward from the anchor edge.
    pub shift_px: f32,
    pub rotation_deg: f32,
}

/// Normalized curve strength in [0, 1] for a distance in items.
pub fn curve_strength(curve: &CurveConfig, distance_items: f32) -> f32 {
    let n = (distance_items.abs() / curve.radius_items).min(1.0);
    if !n.is_finite() {
        return 0.0;
    }
    n.powf(curve.power).min(1.0)
}

pub fn curvature(curve: &CurveConfig, distance_items: f32) -> CurveOffset {
    let n = curve_strength(curve, distance_items);
    let sign = if distance_items > 0.0 {
        1.0
    } else if distance_items < 0.0 {
        -1.0
    } else {
        0.0
    };
    CurveOffset {
        shift_px: n * curve.max_shift_px,
        rotation_deg: sign * n * curve.max_rotation_deg,
    }
}

/// Pseudo-periodic jitter, seeded by index.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScatterOffset {
    pub along_px: f32,
    pub cross_px: f32,
    pub rotation_deg: f32,
}

impl ScatterOffset {
    pub fn scaled(self, factor: f32) -> Self {
        ScatterOffset {
            along_px: self.along_px * factor,
            cross_px: self.cross_px * factor,
            rotation_deg: self.rotation_deg * factor,
        }
    }
}

/// Jitter for `index`, damped by `(1 - gain)` so it vanishes at the focal point.
pub fn scatter(scatter: &ScatterConfig, index: usize, gain: f32) -> ScatterOffset {
    let damp = 1.0 - gain.clamp(0.0, 1.0);
    let i = index as f32;
    ScatterOffset {
        along_px: (i * 1.7 + 0.3).sin() * 0.5 * scatter.amplitude_px * damp,
        cross_px: (i * 2.3 + 1.1).cos() * scatter.amplitude_px * damp,
        rotation_deg: (i * 0.9 + 0.7).sin() * scatter.rotation_deg * damp,
    }
}
