//! glTF model loading and mesh tagging
//!
//! The model moves through `Loading -> Spawned -> Tagged -> Ready`, or ends in
//! `Failed`. Tagging walks the spawned scene depth-first and marks every
//! mesh entity with a [`ModelMesh`]; the component registry is built right
//! after, once the tag commands have been applied.

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::scene::{SceneInstance, SceneSpawner};
use compview_core::{min_distance_for, ComponentRegistry};

use crate::adapter::{to_core_vec3, ModelScene};
use crate::camera::{MainCamera, OrbitCamera};
use crate::types::{ComponentList, ViewerSettings};

/// Where the model is in its lifecycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModelPhase {
    #[default]
    Loading,
    Spawned,
    Tagged,
    Ready,
    Failed(String),
}

/// The single model shown by the viewer
#[derive(Debug, Clone, Resource, Default)]
pub struct ModelState {
    pub path: String,
    pub phase: ModelPhase,
    handle: Option<Handle<Gltf>>,
    root: Option<Entity>,
}

impl ModelState {
    pub fn is_ready(&self) -> bool {
        self.phase == ModelPhase::Ready
    }

    /// Sidebar status line
    pub fn status_text(&self) -> String {
        match &self.phase {
            ModelPhase::Loading | ModelPhase::Spawned | ModelPhase::Tagged => {
                format!("Loading {}...", self.path)
            }
            ModelPhase::Ready => format!("Loaded {}", self.path),
            ModelPhase::Failed(reason) => format!("Failed to load {}: {}", self.path, reason),
        }
    }
}

/// Marker for the scene root carrying the model scale
#[derive(Component)]
pub struct ModelRoot;

/// A renderable mesh of the loaded model
#[derive(Component, Debug, Clone)]
pub struct ModelMesh {
    /// Depth-first traversal index
    pub order: usize,
    /// Authored node name (may be empty)
    pub raw_name: String,
}

/// Emissive colour the mesh's material had before any highlight
#[derive(Component, Debug, Clone, Copy)]
pub struct BaseEmissive(pub LinearRgba);

/// Plugin for model loading
pub struct ModelsPlugin;

impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelState>()
            .add_systems(Startup, start_model_load)
            .add_systems(
                Update,
                (poll_model_load, tag_model_meshes, build_component_registry).chain(),
            );
    }
}

fn start_model_load(
    mut state: ResMut<ModelState>,
    settings: Res<ViewerSettings>,
    asset_server: Res<AssetServer>,
) {
    let path = settings.0.model.path.clone();
    tracing::info!("Loading model: {}", path);
    state.handle = Some(asset_server.load::<Gltf>(path.clone()));
    state.path = path;
    state.phase = ModelPhase::Loading;
}

/// Check the load state and spawn the scene once the glTF is available
fn poll_model_load(
    mut commands: Commands,
    mut state: ResMut<ModelState>,
    settings: Res<ViewerSettings>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
) {
    if state.phase != ModelPhase::Loading {
        return;
    }
    let Some(handle) = state.handle.clone() else {
        return;
    };

    match asset_server.get_load_state(handle.id()) {
        Some(LoadState::Loaded) => {
            let scene = gltf_assets
                .get(&handle)
                .and_then(|gltf| gltf.default_scene.clone().or_else(|| gltf.scenes.first().cloned()));

            let Some(scene) = scene else {
                tracing::error!("Model {} contains no scenes", state.path);
                state.phase = ModelPhase::Failed("no scenes in file".to_string());
                return;
            };

            let scale = settings.0.model.scale;
            let root = commands
                .spawn((
                    SceneRoot(scene),
                    Transform::from_scale(Vec3::splat(scale)),
                    ModelRoot,
                ))
                .id();
            tracing::info!("Model loaded: {} (scale {})", state.path, scale);
            state.root = Some(root);
            state.phase = ModelPhase::Spawned;
        }
        Some(LoadState::Failed(err)) => {
            tracing::error!("Failed to load model {}: {}", state.path, err);
            state.phase = ModelPhase::Failed(err.to_string());
        }
        _ => {
            // Still loading
        }
    }
}

/// Tag every mesh under the model root once the scene instance is ready.
///
/// Each mesh gets its own copy of its material so highlighting one mesh never
/// bleeds into others sharing the original.
fn tag_model_meshes(
    mut commands: Commands,
    mut state: ResMut<ModelState>,
    scene_spawner: Res<SceneSpawner>,
    instances: Query<&SceneInstance>,
    children_query: Query<&Children>,
    mesh_query: Query<Option<&MeshMaterial3d<StandardMaterial>>, With<Mesh3d>>,
    names: Query<&Name>,
    parents: Query<&ChildOf>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if state.phase != ModelPhase::Spawned {
        return;
    }
    let Some(root) = state.root else {
        return;
    };
    let Ok(instance) = instances.get(root) else {
        return;
    };
    if !scene_spawner.instance_is_ready(**instance) {
        return;
    }

    let mut order = 0;
    let mut stack = vec![root];
    while let Some(entity) = stack.pop() {
        if let Ok(material) = mesh_query.get(entity) {
            let raw_name = mesh_node_name(entity, &names, &parents);
            let mut tagged = commands.entity(entity);
            tagged.insert(ModelMesh { order, raw_name });

            if let Some(original) = material.and_then(|m| materials.get(&m.0)).cloned() {
                let base = original.emissive;
                let handle = materials.add(original);
                tagged.insert((MeshMaterial3d(handle), BaseEmissive(base)));
            }
            order += 1;
        }

        // Reverse so children pop in authored order
        if let Ok(children) = children_query.get(entity) {
            stack.extend(children.iter().rev());
        }
    }

    tracing::info!("Tagged {} selectable meshes in {}", order, state.path);
    state.phase = ModelPhase::Tagged;
}

/// Name of the glTF node that owns a mesh primitive.
///
/// Primitives are spawned as children of their node; the node carries the
/// authored name. Unnamed nodes come back empty.
fn mesh_node_name(entity: Entity, names: &Query<&Name>, parents: &Query<&ChildOf>) -> String {
    parents
        .get(entity)
        .ok()
        .and_then(|child_of| names.get(child_of.parent()).ok())
        .or_else(|| names.get(entity).ok())
        .map(|name| authored_name(name.as_str()).to_string())
        .unwrap_or_default()
}

/// Strip the `GltfNode<index>` placeholder the glTF loader gives unnamed nodes
fn authored_name(name: &str) -> &str {
    match name.strip_prefix("GltfNode") {
        Some(index) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => "",
        _ => name,
    }
}

/// Build the component registry and apply the initial zoom limit
fn build_component_registry(
    mut state: ResMut<ModelState>,
    mut list: ResMut<ComponentList>,
    mut orbit: ResMut<OrbitCamera>,
    settings: Res<ViewerSettings>,
    camera_query: Query<&GlobalTransform, With<MainCamera>>,
    scene: ModelScene,
) {
    if state.phase != ModelPhase::Tagged {
        return;
    }

    let camera = camera_query
        .single()
        .map(|t| t.translation())
        .unwrap_or_else(|_| orbit.eye());

    let registry = ComponentRegistry::build(&scene, to_core_vec3(camera));
    let min_distance = min_distance_for(registry.components(), &scene, &settings.0.controls.zoom);
    orbit.set_min_distance(min_distance);

    tracing::info!(
        "Model ready: {} components, {} meshes, min zoom distance {:.5}",
        registry.len(),
        registry.mesh_count(),
        min_distance
    );

    *list = ComponentList::new(registry);
    state.phase = ModelPhase::Ready;
}
