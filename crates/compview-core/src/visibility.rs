//! Component visibility toggling

use tracing::debug;

use crate::naming::normalize_name;
use crate::registry::ComponentRegistry;
use crate::scene::SceneGraph;

/// Set the visibility flag of every renderable node whose normalized name
/// equals `name`.
///
/// Returns the number of matched nodes. A name that matches nothing is a
/// silent no-op.
pub fn set_component_visibility<S: SceneGraph>(scene: &mut S, name: &str, visible: bool) -> usize {
    let matched: Vec<S::NodeId> = scene
        .renderable_nodes()
        .into_iter()
        .filter(|&node| normalize_name(scene.raw_name(node)) == name)
        .collect();

    for &node in &matched {
        scene.set_visible(node, visible);
    }

    if matched.is_empty() {
        debug!("No meshes match component '{}'", name);
    } else {
        debug!("Component '{}' visible={} ({} meshes)", name, visible, matched.len());
    }

    matched.len()
}

/// Apply one visibility value to every component in the registry
pub fn set_all_visibility<S: SceneGraph>(
    scene: &mut S,
    registry: &ComponentRegistry<S::NodeId>,
    visible: bool,
) -> usize {
    registry
        .iter()
        .map(|component| set_component_visibility(scene, &component.name, visible))
        .sum()
}
