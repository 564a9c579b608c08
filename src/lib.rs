// rail_core: Timescape Rust/WASM rail layout engine.
// The host reports viewport size, item count, scroll deltas, and frame ticks; the engine
// returns card placements. It never touches pixels, widgets, or timers.

mod animation;
mod easing;
mod engine;
mod error;
mod focus;
mod geometry;
mod metrics;
mod scroll;
mod types;
mod window;

use wasm_bindgen::prelude::*;

pub use animation::Tween;
pub use easing::{ease_in_out, lerp};
pub use engine::{FocusPlan, RailLayoutEngine};
pub use error::RailError;
pub use focus::FocusAnimator;
pub use geometry::{gain, CurveOffset, ScatterOffset, GAIN_SIGMA_PITCHES};
pub use metrics::{AspectSource, ItemKey, KeyedAspects, MetricsCache};
pub use scroll::{ScrollAnimationKind, ScrollBounds, ScrollModel};
pub use types::*;
pub use window::VisibleWindow;

/// Initialize panic hook and console logging for the browser.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only when a logger is already installed.
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("rail engine initialized");
}

fn js_error(err: RailError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Negative indices from JS clamp to the first item.
fn to_index(index: i32) -> usize {
    index.max(0) as usize
}

/// Rail engine exposed to JavaScript.
/// Placements cross the boundary once per frame, as JSON or a packed `Float32Array`.
#[wasm_bindgen]
pub struct WasmRailEngine {
    inner: RailLayoutEngine,
}

impl WasmRailEngine {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(config_json: &str) -> Result<WasmRailEngine, RailError> {
        let config: RailConfig = serde_json::from_str(config_json)?;
        Ok(WasmRailEngine {
            inner: RailLayoutEngine::new(config)?,
        })
    }

    pub fn engine(&self) -> &RailLayoutEngine {
        &self.inner
    }

    fn placements_json(&mut self, extent_px: f32, cross_px: f32) -> Result<String, RailError> {
        let placements = self.inner.compute_placements(extent_px, cross_px);
        Ok(serde_json::to_string(&placements)?)
    }

    fn state_json(&self) -> Result<String, RailError> {
        Ok(serde_json::to_string(&self.inner.state())?)
    }
}

#[wasm_bindgen]
impl WasmRailEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmRailEngine, JsValue> {
        WasmRailEngine::from_json(config_json).map_err(js_error)
    }

    /// Replace the config. On error the previous config stays active.
    pub fn configure(&mut self, config_json: &str) -> Result<(), JsValue> {
        let config: RailConfig = serde_json::from_str(config_json)
            .map_err(|e| js_error(RailError::from(e)))?;
        self.inner.configure(config).map_err(js_error)
    }

    pub fn set_item_count(&mut self, item_count: u32) {
        self.inner.set_item_count(item_count as usize);
    }

    pub fn set_viewport(&mut self, extent_px: f32, cross_px: f32) {
        self.inner.set_viewport(extent_px, cross_px);
    }

    /// Returns the consumed part of `delta_px`.
    pub fn scroll_by(&mut self, delta_px: f32) -> f32 {
        self.inner.scroll_by(delta_px)
    }

    pub fn settle(&mut self) -> bool {
        self.inner.settle()
    }

    pub fn scroll_to(&mut self, index: i32) -> bool {
        self.inner.scroll_to(to_index(index))
    }

    pub fn focus(&mut self, index: i32) {
        self.inner.focus(to_index(index));
    }

    /// Returns the focus plan as JSON, e.g. `{"type":"ScrollThenFocus","delta_px":240.0}`.
    pub fn request_focus(&mut self, index: i32) -> Result<String, JsValue> {
        let plan = self.inner.request_focus(to_index(index));
        serde_json::to_string(&plan).map_err(|e| js_error(e.into()))
    }

    pub fn clear_focus(&mut self) {
        self.inner.clear_focus();
    }

    pub fn is_focused(&self, index: i32) -> bool {
        index >= 0 && self.inner.is_focused(index as usize)
    }

    pub fn nearest_index(&self) -> u32 {
        self.inner.nearest_index() as u32
    }

    pub fn offset_to_center(&self, index: i32) -> f32 {
        self.inner.offset_to_center(to_index(index))
    }

    /// Advance animations by one frame. Returns true while still animating.
    pub fn tick(&mut self, elapsed_ms: f32) -> bool {
        self.inner.tick(elapsed_ms)
    }

    /// Placements as a JSON array of records.
    pub fn compute_placements(&mut self, extent_px: f32, cross_px: f32) -> Result<String, JsValue> {
        self.placements_json(extent_px, cross_px).map_err(js_error)
    }

    /// Placements packed `PlacementRecord::PACKED_STRIDE` floats per record.
    pub fn compute_placements_packed(&mut self, extent_px: f32, cross_px: f32) -> js_sys::Float32Array {
        let placements = self.inner.compute_placements(extent_px, cross_px);
        let packed = PlacementRecord::pack(&placements);
        js_sys::Float32Array::from(packed.as_slice())
    }

    /// Current rail state as JSON.
    pub fn state(&self) -> Result<String, JsValue> {
        self.state_json().map_err(js_error)
    }
}
