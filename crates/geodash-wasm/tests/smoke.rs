#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use geodash_wasm::{
    app_error, app_status, click, configure, derived_view, dispatch, double_click, load_failed,
    load_geography, render_map, tick,
};

const SAMPLE: &str = include_str!("../../geodash-core/data/india_sample.geojson");

fn boot() {
    geodash_wasm::start();
    configure(r#"{"seed": 7}"#).unwrap();
    assert_eq!(load_geography(SAMPLE), "ready");
}

fn action(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap()
}

#[wasm_bindgen_test]
fn loads_sample_and_derives_a_view() {
    boot();
    assert_eq!(app_status(), "ready");
    assert!(derived_view().unwrap().is_object());
    assert!(js_sys::Array::is_array(&render_map().unwrap()));
}

#[wasm_bindgen_test]
fn dispatch_and_tick_follow_the_debounce_window() {
    boot();
    assert!(dispatch(action(r#"{"type":"setScheme","value":"PMMSY"}"#), 0.0).unwrap());
    assert!(!dispatch(action(r#"{"type":"setSector","value":"marine"}"#), 10.0).unwrap());
    assert!(!tick(100.0).unwrap());
    assert!(tick(1_000.0).unwrap());
}

#[wasm_bindgen_test]
fn drill_down_and_click() {
    boot();
    render_map().unwrap();
    assert!(double_click(Some("KL".into())).unwrap());
    render_map().unwrap();
    assert!(click(Some("KL-KLM".into())).unwrap().is_object());
}

#[wasm_bindgen_test]
fn failed_fetch_is_terminal() {
    geodash_wasm::start();
    load_failed("network down");
    assert_eq!(app_status(), "failed");
    assert_eq!(app_error().as_deref(), Some("network down"));
    assert!(derived_view().is_err());
    assert_eq!(load_geography("{ broken"), "failed");
}
