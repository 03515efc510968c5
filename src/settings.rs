//! Runtime configuration
//!
//! Build-time defaults, overlaid by an optional `window.__INSURE_CONSOLE__`
//! object the hosting page can define before the bundle loads.

use console_core::ConsoleConfig;
use wasm_bindgen::JsValue;

pub const CONFIG_GLOBAL: &str = "__INSURE_CONSOLE__";

/// The effective configuration, and why the page overlay was rejected if it was
pub fn load() -> (ConsoleConfig, Option<String>) {
    let base = ConsoleConfig::from_build_env();
    let Some(window) = web_sys::window() else {
        return (base, None);
    };

    let raw = match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(raw) if !raw.is_undefined() && !raw.is_null() => raw,
        _ => return (base, None),
    };

    let overlay: serde_json::Value = match serde_wasm_bindgen::from_value(raw) {
        Ok(value) => value,
        Err(e) => return (base, Some(e.to_string())),
    };

    match base.overlay(overlay) {
        Ok(config) => (config, None),
        Err(e) => (base, Some(e.to_string())),
    }
}
