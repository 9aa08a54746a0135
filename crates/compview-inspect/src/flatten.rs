//! glTF document to [`MemoryScene`]
//!
//! Walks the default scene (or the first one) depth-first. Every mesh
//! primitive becomes one node named after the glTF node that owns it, with
//! its world transform including the model scale.

use compview_core::glam::{Affine3A, Mat4, Vec3};
use compview_core::{MemoryNode, MemoryScene};

/// Flatten the document's scene into renderable nodes
pub fn flatten(document: &gltf::Document, buffers: &[gltf::buffer::Data], scale: f32) -> MemoryScene {
    let mut scene = MemoryScene::new();
    let root = Mat4::from_scale(Vec3::splat(scale));

    let Some(source) = document.default_scene().or_else(|| document.scenes().next()) else {
        tracing::warn!("Document has no scenes");
        return scene;
    };

    for node in source.nodes() {
        visit(&node, root, buffers, &mut scene);
    }
    scene
}

fn visit(node: &gltf::Node, parent: Mat4, buffers: &[gltf::buffer::Data], scene: &mut MemoryScene) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let name = node.name().unwrap_or("");
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .map(|iter| iter.collect())
                .unwrap_or_default();
            scene.push(MemoryNode::new(name, positions, Affine3A::from_mat4(world)));
        }
    }

    for child in node.children() {
        visit(&child, world, buffers, scene);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use compview_core::SceneGraph;

    /// Two nested nodes with a one- and a two-primitive mesh, plus a distant
    /// sibling reusing the first mesh
    pub(crate) const FIXTURE: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0, 3] } ],
        "nodes": [
            { "name": "Detector", "children": [1, 2], "translation": [0.0, 0.0, -10.0] },
            { "name": "BKLM_1", "mesh": 0 },
            { "name": "ECL_2", "mesh": 1, "translation": [0.0, 0.0, -5.0] },
            { "name": "BKLM_2", "mesh": 0, "translation": [0.0, 0.0, -100.0] }
        ],
        "meshes": [
            { "primitives": [ { "attributes": { "POSITION": 0 } } ] },
            { "primitives": [
                { "attributes": { "POSITION": 1 } },
                { "attributes": { "POSITION": 0 } }
            ] }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
              "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
            { "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3",
              "min": [0.0, 0.0, -3.0], "max": [0.0, 0.0, -1.0] }
        ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
            { "buffer": 0, "byteOffset": 36, "byteLength": 36 }
        ],
        "buffers": [ {
            "byteLength": 72,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAAAAAAAAAAAAIC/AAAAAAAAAAAAAADAAAAAAAAAAAAAAEDA"
        } ]
    }"#;

    pub(crate) fn fixture_scene(scale: f32) -> MemoryScene {
        let (document, buffers, _) = gltf::import_slice(FIXTURE.as_bytes()).unwrap();
        flatten(&document, &buffers, scale)
    }

    #[test]
    fn test_one_node_per_primitive_in_depth_first_order() {
        let scene = fixture_scene(1.0);
        let names: Vec<_> = scene
            .renderable_nodes()
            .into_iter()
            .map(|n| scene.raw_name(n).to_string())
            .collect();
        assert_eq!(names, vec!["BKLM_1", "ECL_2", "ECL_2", "BKLM_2"]);
    }

    #[test]
    fn test_positions_and_transforms() {
        let scene = fixture_scene(1.0);
        let nodes = scene.renderable_nodes();

        assert_eq!(scene.local_positions(nodes[0]).len(), 3);
        assert_eq!(scene.local_positions(nodes[1])[2], [0.0, 0.0, -3.0]);

        // ECL_2 sits under Detector: -10 - 5
        let origin = scene.world_transform(nodes[1]).transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.0, -15.0)).length() < 1e-5);

        let sibling = scene.world_transform(nodes[3]).transform_point3(Vec3::ZERO);
        assert!((sibling - Vec3::new(0.0, 0.0, -100.0)).length() < 1e-5);
    }

    #[test]
    fn test_scale_applies_to_whole_model() {
        let scene = fixture_scene(0.001);
        let nodes = scene.renderable_nodes();
        let origin = scene.world_transform(nodes[1]).transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.0, -0.015)).length() < 1e-7);
    }
}
