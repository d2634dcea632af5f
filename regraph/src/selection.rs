//! Which nodes are selected
//!
//! Selection is transient editor state: it is never part of a history
//! snapshot and never written to a project file.

use crate::graph::GraphStore;
use crate::node::{NodeId, Rect, Vec2};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: BTreeSet<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Apply a click on a node
    ///
    /// An additive click toggles the node. A plain click on an unselected
    /// node selects only that node; on an already-selected node it keeps
    /// the whole selection so the group can be dragged together.
    pub fn click(&mut self, id: NodeId, additive: bool) {
        if additive {
            if !self.ids.remove(&id) {
                self.ids.insert(id);
            }
        } else if !self.ids.contains(&id) {
            self.ids.clear();
            self.ids.insert(id);
        }
    }

    /// Add every node whose hit box intersects `rect`
    ///
    /// Existing selection is kept; callers clear first for a fresh box.
    pub fn box_select(&mut self, graph: &GraphStore, rect: Rect, node_size: Vec2) -> usize {
        let before = self.ids.len();
        self.ids.extend(
            graph
                .nodes()
                .iter()
                .filter(|n| n.bounds(node_size).intersects(&rect))
                .map(|n| n.id()),
        );
        self.ids.len() - before
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn select_all(&mut self, graph: &GraphStore) {
        self.ids = graph.nodes().iter().map(|n| n.id()).collect();
    }

    /// Replace the selection wholesale
    pub fn set(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.ids = ids.into_iter().collect();
    }

    /// Forget ids that no longer exist in the graph
    pub fn retain_existing(&mut self, graph: &GraphStore) {
        self.ids.retain(|id| graph.contains(*id));
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NODE_SIZE, NodeKind};

    #[test]
    fn test_plain_click_selects_only_target() {
        let mut selection = Selection::new();
        selection.click(NodeId(1), false);
        selection.click(NodeId(2), false);
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec![NodeId(2)]);
    }

    #[test]
    fn test_additive_click_toggles() {
        let mut selection = Selection::new();
        selection.click(NodeId(1), true);
        selection.click(NodeId(2), true);
        assert_eq!(selection.len(), 2);
        selection.click(NodeId(1), true);
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec![NodeId(2)]);
    }

    #[test]
    fn test_click_on_selected_keeps_group() {
        let mut selection = Selection::new();
        selection.click(NodeId(1), true);
        selection.click(NodeId(2), true);
        selection.click(NodeId(1), false);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_box_select_is_additive() {
        let mut graph = GraphStore::empty();
        let near = graph.add_node(NodeKind::Digit, Vec2::new(0.0, 0.0));
        let far = graph.add_node(NodeKind::Word, Vec2::new(1000.0, 1000.0));
        let mut selection = Selection::new();
        selection.click(far, false);

        let added = selection.box_select(&graph, Rect::new(-10.0, -10.0, 20.0, 20.0), NODE_SIZE);
        assert_eq!(added, 1);
        assert!(selection.contains(near));
        assert!(selection.contains(far));
    }

    #[test]
    fn test_retain_existing() {
        let mut graph = GraphStore::empty();
        let a = graph.add_node(NodeKind::Digit, Vec2::ZERO);
        let mut selection = Selection::new();
        selection.set([a, NodeId(99)]);
        selection.retain_existing(&graph);
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec![a]);
    }
}
