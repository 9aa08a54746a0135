//! Applies sidebar visibility requests and keeps the zoom limit in step

use bevy::prelude::*;
use compview_core::{min_distance_for, set_all_visibility, set_component_visibility};

use crate::adapter::ModelScene;
use crate::camera::OrbitCamera;
use crate::types::{ComponentList, PendingVisibility, ViewerSettings, VisibilityRequest};

pub struct VisibilityPlugin;

impl Plugin for VisibilityPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_visibility_requests);
    }
}

fn apply_visibility_requests(
    mut pending: ResMut<PendingVisibility>,
    mut list: ResMut<ComponentList>,
    mut orbit: ResMut<OrbitCamera>,
    settings: Res<ViewerSettings>,
    mut scene: ModelScene,
) {
    if pending.0.is_empty() {
        return;
    }

    for request in pending.0.drain(..) {
        match request {
            VisibilityRequest::Component { name, visible } => {
                set_component_visibility(&mut scene, &name, visible);
                list.set_visible(&name, visible);
            }
            VisibilityRequest::All(visible) => {
                let changed = set_all_visibility(&mut scene, &list.registry, visible);
                list.set_all_visible(visible);
                tracing::debug!("All components visible={} ({} meshes)", visible, changed);
            }
        }
    }

    let min_distance = min_distance_for(list.registry.components(), &scene, &settings.0.controls.zoom);
    orbit.set_min_distance(min_distance);
}
