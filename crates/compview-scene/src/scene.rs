//! Scene setup - camera, lights and background

use bevy::prelude::*;

use crate::camera::{MainCamera, OrbitCamera};
use crate::types::{config_color, HighlightColor, ViewerSettings};

/// Ambient brightness for a configured intensity of 1.0
const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 500.0;

/// Directional illuminance (lux) for a configured intensity of 1.0
const DIRECTIONAL_LUX_PER_UNIT: f32 = 10_000.0;

/// Marker component for the main directional light
#[derive(Component)]
pub struct MainDirectionalLight;

/// Plugin for scene setup
pub struct SceneSetupPlugin;

impl Plugin for SceneSetupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HighlightColor>()
            .add_systems(Startup, setup_scene);
    }
}

fn setup_scene(mut commands: Commands, settings: Res<ViewerSettings>, orbit: Res<OrbitCamera>) {
    let config = &settings.0;
    let lighting = &config.lighting;

    commands.insert_resource(ClearColor(config_color(
        &lighting.background,
        Color::srgb(0.878, 0.878, 0.878),
    )));
    commands.insert_resource(HighlightColor(
        config_color(&config.selection.highlight_color, Color::srgb(1.0, 0.0, 0.0)).to_linear(),
    ));

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.camera.fov_degrees.to_radians(),
            near: config.camera.near,
            far: config.camera.far,
            ..default()
        }),
        Transform::from_translation(orbit.eye()).looking_at(orbit.focus, Vec3::Y),
        AmbientLight {
            color: config_color(&lighting.ambient_color, Color::WHITE),
            brightness: lighting.ambient_intensity * AMBIENT_BRIGHTNESS_PER_UNIT,
            ..default()
        },
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            color: config_color(&lighting.directional_color, Color::WHITE),
            illuminance: lighting.directional_intensity * DIRECTIONAL_LUX_PER_UNIT,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(lighting.directional_position))
            .looking_at(Vec3::ZERO, Vec3::Y),
        MainDirectionalLight,
    ));

    tracing::info!(
        "Scene ready: camera at {:?}, fov {}°",
        config.camera.position,
        config.camera.fov_degrees
    );
}
