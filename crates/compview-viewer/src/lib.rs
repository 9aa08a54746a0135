//! Compview Viewer - browser front end for component inspection
//!
//! Loads one glTF model into a Bevy scene and lets the user hide components
//! from a sidebar, orbit and zoom (never closer than the visible geometry
//! allows), and click meshes to read their descriptions.

mod app;
mod picking;
mod ui;
mod url;
mod viewport;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // `?debug` turns on info-level logging in the browser console
    let max_level = if url::has_param("debug") {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(max_level)
            .build(),
    );

    app::run();
}
