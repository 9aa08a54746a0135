//! Viewer configuration loading
//!
//! Every field has a default matching the reference viewer, so an empty
//! document is a valid configuration. Documents may be TOML or JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::descriptions::DescriptionTable;
use crate::zoom::ZoomSettings;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),
    #[error("Invalid zoom setting: {0}")]
    InvalidZoom(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub descriptions: DescriptionTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// glTF/GLB asset path, relative to the page
    #[serde(default = "default_model_path")]
    pub path: String,
    /// Uniform scale applied to the model root
    #[serde(default = "default_model_scale")]
    pub scale: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            scale: default_model_scale(),
        }
    }
}

fn default_model_path() -> String {
    "public/BelleIIModel.gltf".to_string()
}

fn default_model_scale() -> f32 {
    0.001
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub look_at: [f32; 3],
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            look_at: [0.0, 0.0, 0.0],
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 2.0, 10.0]
}

fn default_fov() -> f32 {
    75.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    1000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Fraction of the remaining orbit/zoom delta applied per 60 Hz frame
    #[serde(default = "default_damping")]
    pub damping_factor: f32,
    /// Radians per pixel of pointer drag
    #[serde(default = "default_rotate_speed")]
    pub rotate_speed: f32,
    /// Relative distance change per scroll line
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f32,
    #[serde(default)]
    pub zoom: ZoomSettings,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            damping_factor: default_damping(),
            rotate_speed: default_rotate_speed(),
            zoom_speed: default_zoom_speed(),
            zoom: ZoomSettings::default(),
        }
    }
}

fn default_damping() -> f32 {
    0.05
}

fn default_rotate_speed() -> f32 {
    0.005
}

fn default_zoom_speed() -> f32 {
    0.1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingConfig {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_white")]
    pub ambient_color: String,
    #[serde(default = "default_ambient_intensity")]
    pub ambient_intensity: f32,
    #[serde(default = "default_white")]
    pub directional_color: String,
    #[serde(default = "default_directional_intensity")]
    pub directional_intensity: f32,
    #[serde(default = "default_directional_position")]
    pub directional_position: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            ambient_color: default_white(),
            ambient_intensity: default_ambient_intensity(),
            directional_color: default_white(),
            directional_intensity: default_directional_intensity(),
            directional_position: default_directional_position(),
        }
    }
}

fn default_background() -> String {
    "#e0e0e0".to_string()
}

fn default_white() -> String {
    "#ffffff".to_string()
}

fn default_ambient_intensity() -> f32 {
    0.8
}

fn default_directional_intensity() -> f32 {
    0.6
}

fn default_directional_position() -> [f32; 3] {
    [5.0, 10.0, 7.5]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Emissive colour applied to the selected mesh
    #[serde(default = "default_highlight")]
    pub highlight_color: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            highlight_color: default_highlight(),
        }
    }
}

fn default_highlight() -> String {
    "#ff0000".to_string()
}

impl ViewerConfig {
    /// Parse a JSON or TOML document
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let trimmed = content.trim_start();
        let config: Self = if trimmed.starts_with('{') {
            serde_json::from_str(content)?
        } else {
            toml::from_str(content)?
        };
        Self::validate_zoom(&config.controls.zoom)?;
        Ok(config)
    }

    fn validate_zoom(zoom: &ZoomSettings) -> Result<(), ConfigError> {
        if zoom.divisor.is_nan() || zoom.divisor <= 0.0 {
            return Err(ConfigError::InvalidZoom(format!(
                "divisor must be positive, got {}",
                zoom.divisor
            )));
        }
        if zoom.default_min_distance < 0.0 || zoom.max_distance < zoom.default_min_distance {
            return Err(ConfigError::InvalidZoom(format!(
                "expected 0 <= default_min_distance ({}) <= max_distance ({})",
                zoom.default_min_distance, zoom.max_distance
            )));
        }
        Ok(())
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Serialize as pretty TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Parse a `#rrggbb` (or `rrggbb`) colour into linear-agnostic sRGB floats
pub fn parse_hex_color(value: &str) -> Result<[f32; 3], ConfigError> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(value.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ConfigError::InvalidColor(value.to_string()))
    };

    Ok([channel(0)?, channel(2)?, channel(4)?])
}
