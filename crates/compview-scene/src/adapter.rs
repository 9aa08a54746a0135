//! [`SceneGraph`] over the ECS
//!
//! Model meshes are the entities tagged with [`ModelMesh`]. Visibility maps to
//! the entity's own [`Visibility`], highlighting to the emissive colour of
//! its (per-mesh) [`StandardMaterial`].

use bevy::ecs::system::SystemParam;
use bevy::mesh::VertexAttributeValues;
use bevy::prelude::*;
use compview_core::glam;
use compview_core::SceneGraph;

use crate::models::{BaseEmissive, ModelMesh};
use crate::types::HighlightColor;

type ModelMeshItem = (
    Entity,
    &'static ModelMesh,
    &'static Mesh3d,
    &'static GlobalTransform,
    &'static mut Visibility,
    Option<&'static MeshMaterial3d<StandardMaterial>>,
    Option<&'static BaseEmissive>,
);

/// Read/write access to the loaded model's meshes
#[derive(SystemParam)]
pub struct ModelScene<'w, 's> {
    nodes: Query<'w, 's, ModelMeshItem>,
    meshes: Res<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    highlight: Res<'w, HighlightColor>,
}

impl SceneGraph for ModelScene<'_, '_> {
    type NodeId = Entity;

    fn renderable_nodes(&self) -> Vec<Entity> {
        let mut nodes: Vec<(usize, Entity)> = self
            .nodes
            .iter()
            .map(|(entity, mesh, ..)| (mesh.order, entity))
            .collect();
        nodes.sort_unstable_by_key(|&(order, _)| order);
        nodes.into_iter().map(|(_, entity)| entity).collect()
    }

    fn raw_name(&self, node: Entity) -> &str {
        self.nodes
            .get(node)
            .map(|(_, mesh, ..)| mesh.raw_name.as_str())
            .unwrap_or("")
    }

    fn local_positions(&self, node: Entity) -> &[[f32; 3]] {
        let Ok((_, _, mesh3d, ..)) = self.nodes.get(node) else {
            return &[];
        };
        match self
            .meshes
            .get(&mesh3d.0)
            .and_then(|mesh| mesh.attribute(Mesh::ATTRIBUTE_POSITION))
        {
            Some(VertexAttributeValues::Float32x3(positions)) => positions.as_slice(),
            _ => &[],
        }
    }

    fn world_transform(&self, node: Entity) -> glam::Affine3A {
        self.nodes
            .get(node)
            .map(|(_, _, _, transform, ..)| to_core_affine(transform))
            .unwrap_or(glam::Affine3A::IDENTITY)
    }

    fn is_visible(&self, node: Entity) -> bool {
        self.nodes
            .get(node)
            .map(|(_, _, _, _, visibility, ..)| *visibility != Visibility::Hidden)
            .unwrap_or(false)
    }

    fn set_visible(&mut self, node: Entity, visible: bool) {
        if let Ok((_, _, _, _, mut visibility, ..)) = self.nodes.get_mut(node) {
            *visibility = if visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }

    fn set_highlight(&mut self, node: Entity, highlighted: bool) -> bool {
        let Ok((_, _, _, _, _, Some(material), Some(base))) = self.nodes.get(node) else {
            return false;
        };
        let Some(material) = self.materials.get_mut(&material.0) else {
            return false;
        };
        material.emissive = if highlighted { self.highlight.0 } else { base.0 };
        true
    }
}

/// Convert an engine transform into the core crate's glam type
pub fn to_core_affine(transform: &GlobalTransform) -> glam::Affine3A {
    glam::Affine3A::from_cols_array(&transform.affine().to_cols_array())
}

pub fn to_core_vec3(v: Vec3) -> glam::Vec3 {
    glam::Vec3::from_array(v.to_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    fn world_with_model() -> (World, Vec<Entity>) {
        let mut world = World::new();
        world.insert_resource(HighlightColor(LinearRgba::RED));

        let mut meshes = Assets::<Mesh>::default();
        let mut mesh = Mesh::new(
            bevy::mesh::PrimitiveTopology::TriangleList,
            bevy::asset::RenderAssetUsages::default(),
        );
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        );
        let mesh = meshes.add(mesh);

        let mut materials = Assets::<StandardMaterial>::default();
        let material = materials.add(StandardMaterial {
            emissive: LinearRgba::BLUE,
            ..default()
        });

        let mut entities = Vec::new();
        // Spawned out of traversal order on purpose
        for (order, name) in [(2, "ECL_1"), (0, "BKLM_1"), (1, "BKLM_2")] {
            let entity = world
                .spawn((
                    ModelMesh {
                        order,
                        raw_name: name.to_string(),
                    },
                    Mesh3d(mesh.clone()),
                    GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -10.0 * (order as f32 + 1.0))),
                    Visibility::Inherited,
                    MeshMaterial3d(material.clone()),
                    BaseEmissive(LinearRgba::BLUE),
                ))
                .id();
            entities.push(entity);
        }
        // A mesh without a standard material
        entities.push(
            world
                .spawn((
                    ModelMesh {
                        order: 3,
                        raw_name: "Bare".to_string(),
                    },
                    Mesh3d(mesh),
                    GlobalTransform::IDENTITY,
                    Visibility::Inherited,
                ))
                .id(),
        );

        world.insert_resource(meshes);
        world.insert_resource(materials);
        (world, entities)
    }

    #[test]
    fn test_nodes_follow_traversal_order() {
        let (mut world, entities) = world_with_model();
        let mut state: SystemState<ModelScene> = SystemState::new(&mut world);
        let scene = state.get_mut(&mut world);

        assert_eq!(
            scene.renderable_nodes(),
            vec![entities[1], entities[2], entities[0], entities[3]]
        );
        assert_eq!(scene.raw_name(entities[0]), "ECL_1");
        assert_eq!(scene.local_positions(entities[0]).len(), 3);
    }

    #[test]
    fn test_world_transform_converts() {
        let (mut world, entities) = world_with_model();
        let mut state: SystemState<ModelScene> = SystemState::new(&mut world);
        let scene = state.get_mut(&mut world);

        let affine = scene.world_transform(entities[1]);
        let origin = affine.transform_point3(glam::Vec3::ZERO);
        assert!((origin - glam::Vec3::new(0.0, 0.0, -10.0)).length() < 1e-5);
    }

    #[test]
    fn test_visibility_round_trip() {
        let (mut world, entities) = world_with_model();
        let mut state: SystemState<ModelScene> = SystemState::new(&mut world);
        let mut scene = state.get_mut(&mut world);

        assert!(scene.is_visible(entities[0]));
        scene.set_visible(entities[0], false);
        assert!(!scene.is_visible(entities[0]));
        scene.set_visible(entities[0], true);
        assert!(scene.is_visible(entities[0]));
    }

    #[test]
    fn test_highlight_sets_and_restores_emissive() {
        let (mut world, entities) = world_with_model();
        let mut state: SystemState<ModelScene> = SystemState::new(&mut world);
        {
            let mut scene = state.get_mut(&mut world);
            assert!(scene.set_highlight(entities[0], true));
            assert!(!scene.set_highlight(entities[3], true));
        }

        let emissive = |world: &World, entity: Entity| {
            let handle = world.get::<MeshMaterial3d<StandardMaterial>>(entity).map(|m| m.0.clone());
            handle.and_then(|h| world.resource::<Assets<StandardMaterial>>().get(&h).map(|m| m.emissive))
        };
        assert_eq!(emissive(&world, entities[0]), Some(LinearRgba::RED));

        {
            let mut scene = state.get_mut(&mut world);
            assert!(scene.set_highlight(entities[0], false));
        }
        assert_eq!(emissive(&world, entities[0]), Some(LinearRgba::BLUE));
    }
}
