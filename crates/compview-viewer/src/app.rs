//! Bevy application setup

use bevy::prelude::*;
use bevy::winit::WinitSettings;
use bevy_egui::EguiPlugin;
use bevy_picking::{prelude::MeshPickingPlugin, DefaultPickingPlugins};
use compview_core::ViewerConfig;
use compview_scene::{CompviewScenePlugin, ViewerSettings};

use crate::picking::SelectionPlugin;
use crate::ui::UiPlugin;
use crate::url;
use crate::viewport::ViewportPlugin;

/// Configuration shipped with the viewer
const EMBEDDED_CONFIG: &str = include_str!("../assets/viewer.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_config(content: &str) -> ViewerConfig {
    match ViewerConfig::parse(content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid viewer configuration, using defaults: {}", e);
            ViewerConfig::default()
        }
    }
}

/// Apply a `?model=` override on top of the configured path
fn apply_model_override(config: &mut ViewerConfig, model: Option<String>) {
    if let Some(path) = model {
        tracing::info!("Model path from URL parameter: {}", path);
        config.model.path = path;
    }
}

pub fn run() {
    let mut config = load_config(EMBEDDED_CONFIG);
    apply_model_override(&mut config, url::model_override());

    App::new()
        .insert_resource(ViewerSettings(config))
        .insert_resource(WinitSettings::default())
        .add_plugins(DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Component Viewer".to_string(),
                    canvas: Some("#viewer-canvas".to_string()),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: false,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                // Model paths are relative to the page
                file_path: "".to_string(),
                // Static hosting serves no .meta files
                meta_check: bevy::asset::AssetMetaCheck::Never,
                ..default()
            })
        )
        // Picking plugins must come before EguiPlugin so it detects PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(MeshPickingPlugin)
        .add_plugins(EguiPlugin::default())
        .add_plugins(CompviewScenePlugin)
        .add_plugins(ViewportPlugin)
        .add_plugins(SelectionPlugin)
        .add_plugins(UiPlugin)
        .run();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = ViewerConfig::parse(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config.model.path, "public/BelleIIModel.gltf");
        assert_eq!(config.controls.zoom.divisor, 700.0);
        assert_eq!(config.descriptions.entries.len(), 6);
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let config = load_config("[model\npath = ");
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_model_override() {
        let mut config = ViewerConfig::default();
        apply_model_override(&mut config, None);
        assert_eq!(config.model.path, "public/BelleIIModel.gltf");

        apply_model_override(&mut config, Some("models/other.glb".to_string()));
        assert_eq!(config.model.path, "models/other.glb");
    }
}
