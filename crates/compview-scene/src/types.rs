//! Shared resources for the loaded model, selection and UI state

use bevy::prelude::*;
use compview_core::config::parse_hex_color;
use compview_core::{Component as ModelComponent, ComponentRegistry, SelectionController, ViewerConfig};

/// Viewer configuration, inserted by the front end before the plugins run
#[derive(Debug, Clone, Resource, Default)]
pub struct ViewerSettings(pub ViewerConfig);

/// Emissive colour applied to the selected mesh
#[derive(Debug, Clone, Copy, Resource)]
pub struct HighlightColor(pub LinearRgba);

impl Default for HighlightColor {
    fn default() -> Self {
        Self(LinearRgba::RED)
    }
}

/// Component registry of the loaded model plus the sidebar checkbox state
#[derive(Debug, Clone, Resource, Default)]
pub struct ComponentList {
    pub registry: ComponentRegistry<Entity>,
    /// Checkbox state per component, parallel to registry order
    pub visible: Vec<bool>,
}

impl ComponentList {
    /// Wrap a freshly built registry; every component starts visible
    pub fn new(registry: ComponentRegistry<Entity>) -> Self {
        let visible = vec![true; registry.len()];
        Self { registry, visible }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Whether every component is visible (drives the "Toggle All" box)
    pub fn all_visible(&self) -> bool {
        !self.visible.is_empty() && self.visible.iter().all(|&v| v)
    }

    /// Record the outcome of a single-component toggle
    pub fn set_visible(&mut self, name: &str, visible: bool) {
        let position = self.registry.iter().position(|c| c.name == name);
        if let Some(flag) = position.and_then(|idx| self.visible.get_mut(idx)) {
            *flag = visible;
        }
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        self.visible.iter_mut().for_each(|v| *v = visible);
    }

    /// Components whose name contains `query` (case-insensitive), with their
    /// registry index
    pub fn filtered<'a>(
        &'a self,
        query: &'a str,
    ) -> impl Iterator<Item = (usize, &'a ModelComponent<Entity>)> + 'a {
        let needle = query.trim().to_lowercase();
        self.registry
            .iter()
            .enumerate()
            .filter(move |(_, c)| needle.is_empty() || c.name.to_lowercase().contains(&needle))
    }
}

/// Sidebar search text
#[derive(Debug, Clone, Resource, Default)]
pub struct ComponentFilter {
    pub query: String,
}

/// Click selection over model mesh entities
#[derive(Debug, Clone, Resource, Default)]
pub struct ActiveSelection(pub SelectionController<Entity>);

/// A visibility change requested by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum VisibilityRequest {
    Component { name: String, visible: bool },
    All(bool),
}

/// Visibility changes waiting to be applied to the scene
#[derive(Debug, Clone, Resource, Default)]
pub struct PendingVisibility(pub Vec<VisibilityRequest>);

impl PendingVisibility {
    pub fn push(&mut self, request: VisibilityRequest) {
        self.0.push(request);
    }
}

/// UI layout detection and responsive settings
#[derive(Debug, Clone, Resource)]
pub struct UiLayout {
    pub is_mobile: bool,
    pub screen_width: f32,
    pub screen_height: f32,
    pub show_left_panel: bool,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self {
            is_mobile: false,
            screen_width: 1920.0,
            screen_height: 1080.0,
            show_left_panel: true,
        }
    }
}

impl UiLayout {
    pub fn update_from_window(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
        // Narrow or portrait screens get the compact layout
        self.is_mobile = width < 800.0 || (height > width * 1.2);
    }

    pub fn left_panel_width(&self) -> f32 {
        if self.is_mobile {
            self.screen_width * 0.85
        } else {
            260.0
        }
    }

    pub fn ui_scale(&self) -> f32 {
        if self.is_mobile { 1.2 } else { 1.0 }
    }
}

/// Parse a configured `#rrggbb` colour, falling back with a warning
pub fn config_color(value: &str, fallback: Color) -> Color {
    match parse_hex_color(value) {
        Ok([r, g, b]) => Color::srgb(r, g, b),
        Err(e) => {
            tracing::warn!("{}, using default", e);
            fallback
        }
    }
}
