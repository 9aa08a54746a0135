//! Click selection state machine
//!
//! At most one node is selected. Clicking the selected node again or clicking
//! empty space returns to idle; clicking another node moves the highlight.

use crate::descriptions::DescriptionTable;
use crate::scene::SceneGraph;

/// Current selection
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<N> {
    Idle,
    Selected {
        node: N,
        /// Raw name of the selected node
        name: String,
        /// Text shown in the info panel
        panel_text: String,
    },
}

impl<N: Copy> Selection<N> {
    pub fn node(&self) -> Option<N> {
        match self {
            Selection::Idle => None,
            Selection::Selected { node, .. } => Some(*node),
        }
    }

    /// Info panel text while something is selected
    pub fn panel_text(&self) -> Option<&str> {
        match self {
            Selection::Idle => None,
            Selection::Selected { panel_text, .. } => Some(panel_text.as_str()),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }
}

/// Drives highlight and panel state from pointer clicks
#[derive(Debug, Clone)]
pub struct SelectionController<N> {
    selection: Selection<N>,
}

impl<N> Default for SelectionController<N> {
    fn default() -> Self {
        Self {
            selection: Selection::Idle,
        }
    }
}

impl<N> SelectionController<N>
where
    N: Copy + Eq + std::hash::Hash + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            selection: Selection::Idle,
        }
    }

    pub fn selection(&self) -> &Selection<N> {
        &self.selection
    }

    /// Apply a click whose nearest visible hit is `hit`
    pub fn click<S>(&mut self, hit: Option<N>, scene: &mut S, descriptions: &DescriptionTable) -> &Selection<N>
    where
        S: SceneGraph<NodeId = N>,
    {
        match hit {
            Some(node) if self.selection.node() == Some(node) => self.clear(scene),
            Some(node) => self.select(node, scene, descriptions),
            None => self.clear(scene),
        }
        &self.selection
    }

    /// Clear the highlight and hide the panel
    pub fn clear<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph<NodeId = N>,
    {
        if let Some(previous) = self.selection.node() {
            scene.set_highlight(previous, false);
            tracing::debug!("Deselected {:?}", previous);
        }
        self.selection = Selection::Idle;
    }

    fn select<S>(&mut self, node: N, scene: &mut S, descriptions: &DescriptionTable)
    where
        S: SceneGraph<NodeId = N>,
    {
        self.clear(scene);

        if !scene.set_highlight(node, true) {
            tracing::debug!("{:?} has no emissive material, selecting without highlight", node);
        }

        let name = scene.raw_name(node).to_string();
        let panel_text = descriptions.panel_text(&name);
        tracing::info!("{}", panel_text);
        self.selection = Selection::Selected {
            node,
            name,
            panel_text,
        };
    }
}

/// Nearest hit among visible nodes.
///
/// `hits` pairs each intersected node with its ray parameter; order does not
/// matter.
pub fn nearest_visible_hit<S, I>(scene: &S, hits: I) -> Option<S::NodeId>
where
    S: SceneGraph,
    I: IntoIterator<Item = (S::NodeId, f32)>,
{
    hits.into_iter()
        .filter(|&(node, t)| t >= 0.0 && scene.is_visible(node))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(node, _)| node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MemoryNode, MemoryScene, NodeIndex};
    use glam::Affine3A;

    fn scene() -> (MemoryScene, NodeIndex, NodeIndex, NodeIndex) {
        let mut scene = MemoryScene::new();
        let bklm = scene.push(MemoryNode::new("BKLM_2", Vec::new(), Affine3A::IDENTITY));
        let plain = scene.push(MemoryNode::new("Mesh002", Vec::new(), Affine3A::IDENTITY));
        let bare = scene.push(
            MemoryNode::new("ECL_crystal", Vec::new(), Affine3A::IDENTITY).without_emissive(),
        );
        (scene, bklm, plain, bare)
    }

    #[test]
    fn test_click_selects_and_highlights() {
        let (mut scene, bklm, _, _) = scene();
        let descriptions = DescriptionTable::default();
        let mut controller = SelectionController::new();

        let selection = controller.click(Some(bklm), &mut scene, &descriptions);
        assert_eq!(selection.node(), Some(bklm));
        assert_eq!(
            selection.panel_text(),
            Some("Selected: BKLM_2. This part is part of the BKLM mechanism.")
        );
        assert!(scene.is_highlighted(bklm));
    }

    #[test]
    fn test_same_node_twice_returns_to_idle() {
        let (mut scene, bklm, _, _) = scene();
        let descriptions = DescriptionTable::default();
        let mut controller = SelectionController::new();

        controller.click(Some(bklm), &mut scene, &descriptions);
        let selection = controller.click(Some(bklm), &mut scene, &descriptions);

        assert!(selection.is_idle());
        assert_eq!(selection.panel_text(), None);
        assert!(!scene.is_highlighted(bklm));
    }

    #[test]
    fn test_empty_click_returns_to_idle() {
        let (mut scene, bklm, _, _) = scene();
        let descriptions = DescriptionTable::default();
        let mut controller = SelectionController::new();

        controller.click(Some(bklm), &mut scene, &descriptions);
        assert!(controller.click(None, &mut scene, &descriptions).is_idle());
        assert!(!scene.is_highlighted(bklm));

        // Idle stays idle
        assert!(controller.click(None, &mut scene, &descriptions).is_idle());
    }

    #[test]
    fn test_new_node_moves_highlight() {
        let (mut scene, bklm, plain, _) = scene();
        let descriptions = DescriptionTable::default();
        let mut controller = SelectionController::new();

        controller.click(Some(bklm), &mut scene, &descriptions);
        let selection = controller.click(Some(plain), &mut scene, &descriptions);

        assert_eq!(selection.node(), Some(plain));
        assert_eq!(
            selection.panel_text(),
            Some("Selected: Mesh002. No description available.")
        );
        assert!(!scene.is_highlighted(bklm));
        assert!(scene.is_highlighted(plain));
    }

    #[test]
    fn test_node_without_emissive_is_selectable() {
        let (mut scene, _, _, bare) = scene();
        let descriptions = DescriptionTable::default();
        let mut controller = SelectionController::new();

        let selection = controller.click(Some(bare), &mut scene, &descriptions);
        assert_eq!(selection.node(), Some(bare));
        assert!(!scene.is_highlighted(bare));

        controller.clear(&mut scene);
        assert!(controller.selection().is_idle());
    }

    #[test]
    fn test_nearest_visible_hit() {
        let (mut scene, bklm, plain, bare) = scene();
        scene.set_visible(plain, false);

        let hits = vec![(bare, 4.0), (plain, 1.0), (bklm, 2.5)];
        assert_eq!(nearest_visible_hit(&scene, hits), Some(bklm));
        assert_eq!(nearest_visible_hit(&scene, vec![(plain, 1.0)]), None);
        assert_eq!(nearest_visible_hit(&scene, Vec::new()), None);
    }
}
