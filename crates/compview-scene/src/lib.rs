//! Compview Scene - Bevy rendering layer for the component viewer
//!
//! Owns the orbit camera, lights and background, the glTF model lifecycle,
//! the [`ModelScene`] adapter through which `compview-core` reads and mutates
//! model meshes, and the egui widgets shared by the viewer front end.

pub mod adapter;
pub mod camera;
pub mod models;
pub mod scene;
pub mod types;
pub mod ui;
pub mod visibility;

use bevy::prelude::*;

/// Plugin that sets up the shared 3D scene components
pub struct CompviewScenePlugin;

impl Plugin for CompviewScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewerSettings>()
            .init_resource::<ComponentList>()
            .init_resource::<ComponentFilter>()
            .init_resource::<ActiveSelection>()
            .init_resource::<PendingVisibility>()
            .init_resource::<UiLayout>()
            .add_plugins(camera::CameraPlugin)
            .add_plugins(scene::SceneSetupPlugin)
            .add_plugins(models::ModelsPlugin)
            .add_plugins(visibility::VisibilityPlugin);
    }
}

// Re-export commonly used types
pub use adapter::ModelScene;
pub use camera::{MainCamera, OrbitCamera};
pub use models::{ModelMesh, ModelPhase, ModelState};
pub use types::*;
