//! Keeps the page body sized to the visible viewport
//!
//! Mobile browsers report a layout viewport taller than what is visible while
//! the URL bar is shown. On window `resize`, `orientationchange` and
//! visual-viewport `resize` the body is sized to the visual viewport so the
//! canvas (fit to its parent) always fills the visible area.

use bevy::prelude::*;

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, install_resize_hooks)
            .add_systems(Update, update_ui_layout);
    }
}

/// Body size in CSS pixels for a viewport; the visual viewport height wins
/// when the browser provides one
pub fn body_size(inner_width: f64, inner_height: f64, visual_height: Option<f64>) -> (f64, f64) {
    let height = visual_height.filter(|h| *h > 0.0).unwrap_or(inner_height);
    (inner_width, height)
}

#[cfg(target_arch = "wasm32")]
fn install_resize_hooks() {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };

    resize_body();

    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        resize_body();
    }) as Box<dyn FnMut(_)>);
    let callback: &js_sys::Function = closure.as_ref().unchecked_ref();

    for event in ["resize", "orientationchange"] {
        if let Err(e) = window.add_event_listener_with_callback(event, callback) {
            tracing::warn!("Failed to listen for {}: {:?}", event, e);
        }
    }
    if let Some(visual) = window.visual_viewport() {
        if let Err(e) = visual.add_event_listener_with_callback("resize", callback) {
            tracing::warn!("Failed to listen for visual viewport resize: {:?}", e);
        }
    }

    // Listeners live for the page lifetime
    closure.forget();
}

#[cfg(not(target_arch = "wasm32"))]
fn install_resize_hooks() {}

#[cfg(target_arch = "wasm32")]
fn resize_body() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(body) = window.document().and_then(|d| d.body()) else {
        return;
    };

    let inner_width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let inner_height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let visual_height = window.visual_viewport().map(|v| v.height());
    let (width, height) = body_size(inner_width, inner_height, visual_height);

    let style = body.style();
    if let Err(e) = style
        .set_property("width", &format!("{}px", width))
        .and_then(|_| style.set_property("height", &format!("{}px", height)))
    {
        tracing::warn!("Failed to resize page body: {:?}", e);
    }
}

/// Track the window size for the responsive sidebar
fn update_ui_layout(windows: Query<&Window>, mut ui_layout: ResMut<compview_scene::UiLayout>) {
    if let Ok(window) = windows.single() {
        let width = window.width();
        let height = window.height();

        if (ui_layout.screen_width - width).abs() > 1.0
            || (ui_layout.screen_height - height).abs() > 1.0
        {
            ui_layout.update_from_window(width, height);
        }
    }
}
