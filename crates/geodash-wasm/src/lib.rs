//! geodash-wasm: WebAssembly bindings for geodash-core
//!
//! The JS page owns the map widget, the charts and the DOM. This crate owns
//! everything derived: the geography, the synthetic metric store, the
//! session state, and the view models handed back to JS.
//!
//! What it provides
//! ----------------
//! - Panic hook + console logging on module load (via `#[wasm_bindgen(start)]`)
//! - Lifecycle: `configure(json)`, `load_geography(text)`, `load_failed(msg)`,
//!   `app_status()`, `app_error()`
//! - Input: `dispatch(action, now)`, `tick(now)`, `hover(id)`, `click(id)`,
//!   `double_click(id)`
//! - Output (plain JSON-compatible objects): `derived_view()`, `render_map()`,
//!   `detail_panel()`, `legend()`, `header()`, `stats()`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { load_geography, load_failed, dispatch, tick, render_map, derived_view } from 'geodash-wasm';
//!
//! async function main() {
//!   await init();
//!   try {
//!     const res = await fetch('india.geojson');
//!     load_geography(await res.text());
//!   } catch (e) {
//!     load_failed(String(e));
//!     return;
//!   }
//!   applyToMap(render_map());           // [{command: "clear"}, {command: "addFeatures", ...}, ...]
//!   drawCharts(derived_view());
//!
//!   dispatch({ type: 'setScheme', value: 'PMMSY' }, performance.now());
//!   setInterval(() => { if (tick(performance.now())) drawCharts(derived_view()); }, 50);
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - Render and tooltip effects come back as arrays of surface commands
//!   (`clear`, `addFeatures`, `fitBounds`, `showTooltip`, `hideTooltip`) for
//!   the page to replay on its map library.
//! - Unless `configure` sets a `seed`, every load draws one from
//!   `Math.random()`, so figures differ between page loads but stay fixed
//!   for the session.
use std::cell::RefCell;
use std::result::Result;
use wasm_bindgen::prelude::*;

use geodash_core::prelude::*;
use geodash_core::view::CommandBuffer;
use serde::Serialize;

thread_local! {
    static APP: RefCell<AppState> = const { RefCell::new(AppState::Loading) };
    static CONFIG: RefCell<DashboardConfig> = RefCell::new(DashboardConfig::default());
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    log("Initializing geodash WASM module...");
}

fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

#[cfg(target_arch = "wasm32")]
fn host_seed() -> Option<u64> {
    // 2^53: every integer below is exactly representable.
    Some((js_sys::Math::random() * 9_007_199_254_740_992.0) as u64)
}

#[cfg(not(target_arch = "wasm32"))]
fn host_seed() -> Option<u64> {
    None
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects rather than JS `Map`s for the metric bags.
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(Into::into)
}

fn with_dashboard<T>(f: impl FnOnce(&mut Dashboard) -> T) -> Result<T, JsValue> {
    APP.with(|app| {
        let mut app = app.borrow_mut();
        let status = app.status();
        match app.dashboard_mut() {
            Some(dashboard) => Ok(f(dashboard)),
            None => Err(JsValue::from_str(&format!("dashboard is {status}"))),
        }
    })
}

/* --------------------------------------------------------------------------
   Lifecycle
-------------------------------------------------------------------------- */

/// Replaces the session configuration used by the next `load_geography`.
#[wasm_bindgen]
pub fn configure(config_json: &str) -> Result<(), JsValue> {
    let config = DashboardConfig::from_json_str(config_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    CONFIG.with(|c| *c.borrow_mut() = config);
    Ok(())
}

/// Parses the boundary file and starts the session. Returns the new status.
#[wasm_bindgen]
pub fn load_geography(geojson: &str) -> String {
    let mut config = CONFIG.with(|c| c.borrow().clone());
    if config.seed.is_none() {
        config.seed = host_seed();
    }
    let state = AppState::boot(FeatureCollection::from_json_str(geojson), config);
    match &state {
        AppState::Ready(d) => {
            let stats = d.stats();
            log(&format!(
                "✓ Loaded {} states, {} districts, {} sub-districts",
                stats.geography.states, stats.geography.districts, stats.geography.sub_districts
            ));
        }
        AppState::Failed(message) => log(&format!("✗ Geography failed to load: {message}")),
        AppState::Loading => {}
    }
    let status = state.status().to_string();
    APP.with(|app| *app.borrow_mut() = state);
    status
}

/// Records a fetch failure on the JS side. Terminal for the session.
#[wasm_bindgen]
pub fn load_failed(message: &str) {
    log(&format!("✗ Geography fetch failed: {message}"));
    APP.with(|app| *app.borrow_mut() = AppState::Failed(message.to_string()));
}

#[wasm_bindgen]
pub fn app_status() -> String {
    APP.with(|app| app.borrow().status().to_string())
}

#[wasm_bindgen]
pub fn app_error() -> Option<String> {
    APP.with(|app| app.borrow().error().map(str::to_string))
}

/* --------------------------------------------------------------------------
   Input
-------------------------------------------------------------------------- */

/// Applies an action such as `{type: "setGender", value: "female"}`.
/// Year, financial-year and sector changes are held until `tick` passes
/// the debounce window; returns whether the session changed now.
#[wasm_bindgen]
pub fn dispatch(action: JsValue, now_ms: f64) -> Result<bool, JsValue> {
    let action: Action = serde_wasm_bindgen::from_value(action)?;
    with_dashboard(|d| d.dispatch(action, now_ms.max(0.0) as u64))
}

/// Applies held selector changes once their window has elapsed.
#[wasm_bindgen]
pub fn tick(now_ms: f64) -> Result<bool, JsValue> {
    with_dashboard(|d| d.tick(now_ms.max(0.0) as u64))
}

/// Pointer moved over `id` (or over nothing). Returns tooltip commands.
#[wasm_bindgen]
pub fn hover(id: Option<String>) -> Result<JsValue, JsValue> {
    let commands = with_dashboard(|d| {
        let mut surface = CommandBuffer::new();
        d.hover(id.as_deref(), &mut surface);
        surface.take()
    })?;
    to_js(&commands)
}

/// Click on `id` (or on empty map). Returns the resulting detail panel.
#[wasm_bindgen]
pub fn click(id: Option<String>) -> Result<JsValue, JsValue> {
    let panel = with_dashboard(|d| {
        d.click(id.as_deref());
        d.detail_panel()
    })?;
    to_js(&panel)
}

/// Double click on `id`; returns whether the view drilled down.
#[wasm_bindgen]
pub fn double_click(id: Option<String>) -> Result<bool, JsValue> {
    with_dashboard(|d| d.double_click(id.as_deref()))
}

/* --------------------------------------------------------------------------
   Output
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn derived_view() -> Result<JsValue, JsValue> {
    with_dashboard(|d| to_js(d.derived()))?
}

/// Surface commands that bring the map in line with the session.
#[wasm_bindgen]
pub fn render_map() -> Result<JsValue, JsValue> {
    let commands = with_dashboard(|d| {
        let mut surface = CommandBuffer::new();
        d.render_map(&mut surface);
        surface.take()
    })?;
    to_js(&commands)
}

#[wasm_bindgen]
pub fn detail_panel() -> Result<JsValue, JsValue> {
    with_dashboard(|d| to_js(&d.detail_panel()))?
}

#[wasm_bindgen]
pub fn legend() -> Result<JsValue, JsValue> {
    with_dashboard(|d| to_js(&d.legend()))?
}

#[wasm_bindgen]
pub fn header() -> Result<JsValue, JsValue> {
    with_dashboard(|d| to_js(&d.header()))?
}

#[wasm_bindgen]
pub fn stats() -> Result<JsValue, JsValue> {
    with_dashboard(|d| to_js(&d.stats()))?
}
