//! Zoom-limit coordinator
//!
//! The orbit camera may not approach closer than a fraction of the farthest
//! visible component's nearest-vertex distance. Hiding outer shells lets the
//! user zoom further into the inner parts.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::registry::Component;
use crate::scene::SceneGraph;

/// Tunables for the minimum zoom distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomSettings {
    /// Controls how tightly the camera can approach visible geometry.
    /// A larger divisor allows closer zoom.
    #[serde(default = "default_divisor")]
    pub divisor: f32,
    /// Minimum distance when no component is visible
    #[serde(default = "default_min_distance")]
    pub default_min_distance: f32,
    /// Maximum orbit distance
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            divisor: default_divisor(),
            default_min_distance: default_min_distance(),
            max_distance: default_max_distance(),
        }
    }
}

fn default_divisor() -> f32 {
    700.0
}

fn default_min_distance() -> f32 {
    0.005
}

fn default_max_distance() -> f32 {
    50.0
}

/// Allowed orbit distance range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    pub min_distance: f32,
    pub max_distance: f32,
}

impl ZoomBounds {
    pub fn from_settings(settings: &ZoomSettings) -> Self {
        Self {
            min_distance: settings.default_min_distance.max(0.0),
            max_distance: settings.max_distance,
        }
    }

    /// Clamp a distance into the range
    pub fn clamp(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance.max(self.min_distance))
    }
}

/// Minimum camera distance for the currently visible components.
///
/// Only components whose representative node is visible and whose distance
/// is defined take part. With none left the configured default applies.
pub fn min_distance_for<S: SceneGraph>(
    components: &[Component<S::NodeId>],
    scene: &S,
    settings: &ZoomSettings,
) -> f32 {
    let largest = components
        .iter()
        .filter(|c| c.has_distance() && scene.is_visible(c.representative))
        .map(|c| c.distance)
        .fold(None, |acc: Option<f32>, d| Some(acc.map_or(d, |a| a.max(d))));

    let min_distance = match largest {
        Some(distance) if settings.divisor > 0.0 => distance / settings.divisor,
        Some(distance) => {
            warn!("Zoom divisor {} is not positive, ignoring it", settings.divisor);
            distance
        }
        None => settings.default_min_distance,
    };

    debug!("Updated min distance: {}", min_distance);
    min_distance.max(0.0)
}
