//! Camera controls and orbit navigation
//!
//! Y-up spherical orbit around a focus point. Drag rotates, wheel and pinch
//! zoom. Rotation and distance chase their targets with exponential damping,
//! and the distance always stays inside the current [`ZoomBounds`].

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use compview_core::config::{CameraConfig, ControlsConfig};
use compview_core::ZoomBounds;

use crate::types::ViewerSettings;

/// Keeps the camera off the poles
const MAX_ELEVATION: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Pixel-unit wheel deltas per scroll line
const PIXELS_PER_LINE: f32 = 100.0;

/// Orbit camera state
#[derive(Debug, Clone, Resource)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub target_distance: f32,
    pub azimuth: f32,
    pub target_azimuth: f32,
    pub elevation: f32,
    pub target_elevation: f32,
    /// Radians per pixel of drag
    pub rotate_speed: f32,
    /// Relative distance change per scroll line
    pub zoom_speed: f32,
    /// Fraction of the remaining delta applied per 60 Hz frame
    pub damping: f32,
    pub bounds: ZoomBounds,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), &ControlsConfig::default())
    }
}

impl OrbitCamera {
    pub fn from_config(camera: &CameraConfig, controls: &ControlsConfig) -> Self {
        let bounds = ZoomBounds::from_settings(&controls.zoom);
        let mut orbit = Self::looking_at(Vec3::from_array(camera.position), Vec3::from_array(camera.look_at));
        orbit.rotate_speed = controls.rotate_speed;
        orbit.zoom_speed = controls.zoom_speed;
        orbit.damping = controls.damping_factor;
        orbit.bounds = bounds;
        orbit.distance = bounds.clamp(orbit.distance);
        orbit.target_distance = orbit.distance;
        orbit
    }

    /// Orbit state reproducing an eye position around `focus`
    pub fn looking_at(eye: Vec3, focus: Vec3) -> Self {
        let offset = eye - focus;
        let distance = offset.length();
        let (azimuth, elevation) = if distance > f32::EPSILON {
            (
                offset.x.atan2(offset.z),
                (offset.y / distance).clamp(-1.0, 1.0).asin(),
            )
        } else {
            (0.0, 0.0)
        };
        let elevation = elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION);
        let controls = ControlsConfig::default();

        Self {
            focus,
            distance,
            target_distance: distance,
            azimuth,
            target_azimuth: azimuth,
            elevation,
            target_elevation: elevation,
            rotate_speed: controls.rotate_speed,
            zoom_speed: controls.zoom_speed,
            damping: controls.damping_factor,
            bounds: ZoomBounds {
                min_distance: 0.0,
                max_distance: f32::MAX,
            },
        }
    }

    /// Current eye position
    pub fn eye(&self) -> Vec3 {
        let horizontal = self.distance * self.elevation.cos();
        self.focus
            + Vec3::new(
                horizontal * self.azimuth.sin(),
                self.distance * self.elevation.sin(),
                horizontal * self.azimuth.cos(),
            )
    }

    /// Rotate by a pointer drag in pixels
    pub fn rotate(&mut self, drag: Vec2) {
        self.target_azimuth -= drag.x * self.rotate_speed;
        self.target_elevation =
            (self.target_elevation + drag.y * self.rotate_speed).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Zoom by scroll lines; positive moves closer
    pub fn zoom(&mut self, lines: f32) {
        let factor = (1.0 - lines * self.zoom_speed).max(0.05);
        self.zoom_by(factor);
    }

    /// Multiply the target distance, clamped to bounds
    pub fn zoom_by(&mut self, factor: f32) {
        self.target_distance = self.bounds.clamp(self.target_distance * factor);
    }

    /// Apply a new minimum distance and pull both distances into range
    pub fn set_min_distance(&mut self, min_distance: f32) {
        self.bounds.min_distance = min_distance.max(0.0);
        self.distance = self.bounds.clamp(self.distance);
        self.target_distance = self.bounds.clamp(self.target_distance);
        tracing::debug!("Camera min distance set to {:.5}", self.bounds.min_distance);
    }

    /// Advance damping by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let t = 1.0 - (-self.damping * 60.0 * dt).exp();
        self.azimuth += (self.target_azimuth - self.azimuth) * t;
        self.elevation += (self.target_elevation - self.elevation) * t;
        self.distance += (self.target_distance - self.distance) * t;
        self.distance = self.bounds.clamp(self.distance);
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for camera controls
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitCamera>()
            .add_systems(PreStartup, init_orbit_camera)
            .add_systems(Update, update_camera);
    }
}

fn init_orbit_camera(mut commands: Commands, settings: Res<ViewerSettings>) {
    let config = &settings.0;
    commands.insert_resource(OrbitCamera::from_config(&config.camera, &config.controls));
}

fn update_camera(
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    time: Res<Time>,
    mut contexts: bevy_egui::EguiContexts,
) {
    // Don't steal input from egui panels
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false);

    if !egui_wants_pointer {
        if mouse_button.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO {
            orbit.rotate(mouse_motion.delta);
        }

        let lines = match mouse_scroll.unit {
            MouseScrollUnit::Line => mouse_scroll.delta.y,
            MouseScrollUnit::Pixel => mouse_scroll.delta.y / PIXELS_PER_LINE,
        };
        if lines != 0.0 {
            orbit.zoom(lines);
        }

        let touches: Vec<_> = touch_input.iter().collect();
        match touches.as_slice() {
            [touch] => {
                let delta = touch.delta();
                if delta != Vec2::ZERO {
                    orbit.rotate(delta);
                }
            }
            [t1, t2] => {
                let curr = t1.position().distance(t2.position());
                let prev = (t1.position() - t1.delta()).distance(t2.position() - t2.delta());
                if curr > 1.0 && prev > 1.0 {
                    orbit.zoom_by(prev / curr);
                }
            }
            _ => {}
        }
    }

    orbit.step(time.delta_secs());

    if let Ok(mut transform) = camera_query.single_mut() {
        transform.translation = orbit.eye();
        transform.look_at(orbit.focus, Vec3::Y);
    }
}
