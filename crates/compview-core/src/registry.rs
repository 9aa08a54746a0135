//! Component registry built once after a model loads
//!
//! Groups renderable nodes by canonical name. The first node encountered for
//! a name is the component's representative: it alone determines the
//! component's nearest-camera distance and its visibility for zoom-limit
//! purposes. Every node sharing the name is a member and is toggled with it.

use glam::Vec3;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::distance::{is_defined, nearest_vertex_distance};
use crate::naming::normalize_name;
use crate::scene::SceneGraph;

/// A group of renderable nodes sharing one canonical name
#[derive(Debug, Clone, PartialEq)]
pub struct Component<N> {
    /// Canonical (normalized) name, unique within a registry
    pub name: String,
    /// Nearest vertex of the representative to the camera at build time
    pub distance: f32,
    /// First node encountered with this name
    pub representative: N,
    /// All nodes with this name, in traversal order
    pub members: Vec<N>,
}

impl<N> Component<N> {
    /// Whether the distance came from real geometry
    pub fn has_distance(&self) -> bool {
        is_defined(self.distance)
    }
}

/// Components sorted by descending nearest-camera distance
#[derive(Debug, Clone)]
pub struct ComponentRegistry<N> {
    components: Vec<Component<N>>,
    by_node: HashMap<N, usize>,
}

impl<N> Default for ComponentRegistry<N> {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            by_node: HashMap::new(),
        }
    }
}

impl<N> ComponentRegistry<N>
where
    N: Copy + Eq + std::hash::Hash + std::fmt::Debug,
{
    /// Traverse `scene` and group its renderable nodes by canonical name.
    ///
    /// Components are stably sorted by descending distance, so equal
    /// distances keep traversal order. Components without a defined distance
    /// come last.
    pub fn build<S>(scene: &S, camera: Vec3) -> Self
    where
        S: SceneGraph<NodeId = N>,
    {
        let mut components: Vec<Component<N>> = Vec::new();
        let mut index_by_name: HashMap<String, usize> = HashMap::new();
        let mut mesh_count = 0usize;

        for node in scene.renderable_nodes() {
            mesh_count += 1;
            let name = normalize_name(scene.raw_name(node));

            if let Some(&idx) = index_by_name.get(&name) {
                components[idx].members.push(node);
                continue;
            }

            let distance = nearest_vertex_distance(
                scene.local_positions(node),
                &scene.world_transform(node),
                camera,
            );
            index_by_name.insert(name.clone(), components.len());
            components.push(Component {
                name,
                distance,
                representative: node,
                members: vec![node],
            });
        }

        components.sort_by(|a, b| sort_key(b.distance).total_cmp(&sort_key(a.distance)));

        let mut by_node = HashMap::with_capacity(mesh_count);
        for (idx, component) in components.iter().enumerate() {
            for &member in &component.members {
                by_node.insert(member, idx);
            }
        }

        info!(
            "Component registry built: {} components from {} selectable meshes",
            components.len(),
            mesh_count
        );
        for (rank, component) in components.iter().enumerate() {
            debug!(
                "{}. {}: {:.2} units ({} meshes)",
                rank + 1,
                component.name,
                component.distance,
                component.members.len()
            );
        }

        Self { components, by_node }
    }

    /// Components in sorted order
    pub fn components(&self) -> &[Component<N>] {
        &self.components
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component<N>> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Look up a component by canonical name
    pub fn get(&self, name: &str) -> Option<&Component<N>> {
        self.components.iter().find(|c| c.name == name)
    }

    /// The component a node belongs to
    pub fn component_of(&self, node: N) -> Option<&Component<N>> {
        self.by_node.get(&node).map(|&idx| &self.components[idx])
    }

    /// Total number of member nodes across all components
    pub fn mesh_count(&self) -> usize {
        self.by_node.len()
    }
}

/// Undefined distances sort below every real distance
fn sort_key(distance: f32) -> f32 {
    if is_defined(distance) {
        distance
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MemoryNode, MemoryScene};
    use glam::Affine3A;

    fn node_at(name: &str, z: f32) -> MemoryNode {
        MemoryNode::new(
            name,
            vec![[0.0, 0.0, 0.0]],
            Affine3A::from_translation(Vec3::new(0.0, 0.0, z)),
        )
    }

    #[test]
    fn test_partitions_by_normalized_name() {
        let mut scene = MemoryScene::new();
        let names = ["Mesh001", "Other1", "Mesh002", "Mesh_3_", "Other_", "Mesh_"];
        let nodes: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, n)| scene.push(node_at(n, i as f32)))
            .collect();

        let registry = ComponentRegistry::build(&scene, Vec3::ZERO);

        for &a in &nodes {
            for &b in &nodes {
                let same_component = registry.component_of(a).map(|c| &c.name)
                    == registry.component_of(b).map(|c| &c.name);
                let same_name = normalize_name(scene.raw_name(a)) == normalize_name(scene.raw_name(b));
                assert_eq!(same_component, same_name, "{a:?} vs {b:?}");
            }
        }
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.mesh_count(), nodes.len());
        assert_eq!(registry.get("Mesh").map(|c| c.members.len()), Some(4));
        assert_eq!(registry.get("Other").map(|c| c.members.len()), Some(2));
        assert_eq!(registry.get("Mesh_").map(|c| c.members.len()), None);
    }

    #[test]
    fn test_sorted_by_descending_distance() {
        let mut scene = MemoryScene::new();
        scene.push(node_at("Near", -1.0));
        scene.push(node_at("Far", -30.0));
        scene.push(node_at("Mid", -10.0));

        let registry = ComponentRegistry::build(&scene, Vec3::ZERO);
        let names: Vec<_> = registry.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Far", "Mid", "Near"]);
        assert!((registry.components()[0].distance - 30.0).abs() < 1e-5);
    }

    #[test]
    fn test_ties_keep_traversal_order() {
        let mut scene = MemoryScene::new();
        scene.push(node_at("Beta", 5.0));
        scene.push(node_at("Alpha", -5.0));
        scene.push(node_at("Gamma", 5.0));

        let registry = ComponentRegistry::build(&scene, Vec3::ZERO);
        let names: Vec<_> = registry.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha", "Gamma"]);
    }

    #[test]
    fn test_representative_sets_distance() {
        let mut scene = MemoryScene::new();
        let first = scene.push(node_at("Coil1", -20.0));
        // A later, closer copy does not lower the component distance
        let second = scene.push(node_at("Coil2", -2.0));

        let registry = ComponentRegistry::build(&scene, Vec3::ZERO);
        let coil = registry.get("Coil").unwrap();
        assert_eq!(coil.representative, first);
        assert_eq!(coil.members, vec![first, second]);
        assert!((coil.distance - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_geometry_sorts_last() {
        let mut scene = MemoryScene::new();
        scene.push(MemoryNode::new("Empty", Vec::new(), Affine3A::IDENTITY));
        scene.push(node_at("Solid", -4.0));

        let registry = ComponentRegistry::build(&scene, Vec3::ZERO);
        let names: Vec<_> = registry.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Solid", "Empty"]);
        assert!(!registry.get("Empty").unwrap().has_distance());
    }

    #[test]
    fn test_empty_scene() {
        let scene = MemoryScene::new();
        let registry = ComponentRegistry::build(&scene, Vec3::ZERO);
        assert!(registry.is_empty());
        assert_eq!(registry.mesh_count(), 0);
    }
}
