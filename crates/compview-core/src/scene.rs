//! Scene access used by the viewer logic
//!
//! The registry, visibility toggle, zoom coordinator and selection never
//! touch the rendering engine directly. They read and mutate renderable
//! nodes through [`SceneGraph`], which the Bevy layer implements over ECS
//! queries and [`MemoryScene`] implements over plain vectors.

use glam::Affine3A;
use std::fmt::Debug;
use std::hash::Hash;

/// Renderable nodes of a loaded model
pub trait SceneGraph {
    /// Stable handle for a renderable node
    type NodeId: Copy + Eq + Hash + Debug;

    /// Every renderable (mesh-bearing) node, in depth-first traversal order
    fn renderable_nodes(&self) -> Vec<Self::NodeId>;

    /// Raw authored name of the node; empty when the node is unnamed
    fn raw_name(&self, node: Self::NodeId) -> &str;

    /// Vertex positions in the node's local space
    fn local_positions(&self, node: Self::NodeId) -> &[[f32; 3]];

    /// Local-to-world transform of the node
    fn world_transform(&self, node: Self::NodeId) -> Affine3A;

    /// The node's own visibility flag
    fn is_visible(&self, node: Self::NodeId) -> bool;

    fn set_visible(&mut self, node: Self::NodeId, visible: bool);

    /// Turn the selection highlight on or off.
    ///
    /// Returns `false` when the node's material has no emissive colour to
    /// drive; the node stays selectable regardless.
    fn set_highlight(&mut self, node: Self::NodeId, highlighted: bool) -> bool;
}

/// Index of a node in a [`MemoryScene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

/// A renderable node held by [`MemoryScene`]
#[derive(Debug, Clone)]
pub struct MemoryNode {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub world: Affine3A,
    pub visible: bool,
    /// `None` when the material has no emissive colour
    pub highlighted: Option<bool>,
}

impl MemoryNode {
    /// Create a visible node with an emissive-capable material
    pub fn new(name: impl Into<String>, positions: Vec<[f32; 3]>, world: Affine3A) -> Self {
        Self {
            name: name.into(),
            positions,
            world,
            visible: true,
            highlighted: Some(false),
        }
    }

    /// Drop the emissive colour from this node's material
    pub fn without_emissive(mut self) -> Self {
        self.highlighted = None;
        self
    }
}

/// Flat, in-memory scene
///
/// Used by the inspect CLI after flattening a glTF document, and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    nodes: Vec<MemoryNode>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a node; insertion order is traversal order
    pub fn push(&mut self, node: MemoryNode) -> NodeIndex {
        self.nodes.push(node);
        NodeIndex(self.nodes.len() - 1)
    }

    pub fn node(&self, index: NodeIndex) -> Option<&MemoryNode> {
        self.nodes.get(index.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the node is currently highlighted
    pub fn is_highlighted(&self, index: NodeIndex) -> bool {
        self.node(index)
            .and_then(|n| n.highlighted)
            .unwrap_or(false)
    }
}

impl SceneGraph for MemoryScene {
    type NodeId = NodeIndex;

    fn renderable_nodes(&self) -> Vec<NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex).collect()
    }

    fn raw_name(&self, node: NodeIndex) -> &str {
        self.node(node).map(|n| n.name.as_str()).unwrap_or("")
    }

    fn local_positions(&self, node: NodeIndex) -> &[[f32; 3]] {
        self.node(node).map(|n| n.positions.as_slice()).unwrap_or(&[])
    }

    fn world_transform(&self, node: NodeIndex) -> Affine3A {
        self.node(node).map(|n| n.world).unwrap_or(Affine3A::IDENTITY)
    }

    fn is_visible(&self, node: NodeIndex) -> bool {
        self.node(node).map(|n| n.visible).unwrap_or(false)
    }

    fn set_visible(&mut self, node: NodeIndex, visible: bool) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.visible = visible;
        }
    }

    fn set_highlight(&mut self, node: NodeIndex, highlighted: bool) -> bool {
        match self.nodes.get_mut(node.0).and_then(|n| n.highlighted.as_mut()) {
            Some(state) => {
                *state = highlighted;
                true
            }
            None => false,
        }
    }
}
