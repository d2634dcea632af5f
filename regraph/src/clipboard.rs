//! Copying and pasting induced subgraphs
//!
//! A copy keeps the selected nodes and only the edges whose endpoints are
//! both selected. A paste re-creates that subgraph under fresh ids, centered
//! on the paste position.

use crate::graph::{Edge, GraphStore};
use crate::node::{Node, NodeId, Vec2};
use crate::selection::Selection;
use std::collections::HashMap;

/// A detached copy of a node subset and its internal edges
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipboardBuffer {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl ClipboardBuffer {
    /// Capture the subgraph induced by the selection
    pub fn copy(graph: &GraphStore, selection: &Selection) -> Self {
        let nodes: Vec<Node> = graph
            .nodes()
            .iter()
            .filter(|n| selection.contains(n.id()))
            .cloned()
            .collect();
        let edges = graph
            .edges()
            .iter()
            .filter(|e| selection.contains(e.from) && selection.contains(e.to))
            .copied()
            .collect();
        ClipboardBuffer { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mean position of the buffered nodes
    pub fn centroid(&self) -> Vec2 {
        if self.nodes.is_empty() {
            return Vec2::ZERO;
        }
        let count = self.nodes.len() as f32;
        let sum = self
            .nodes
            .iter()
            .fold(Vec2::ZERO, |acc, n| acc + n.position);
        Vec2::new(sum.x / count, sum.y / count)
    }

    /// Insert a copy of the buffer into `graph`, centered on `target`
    ///
    /// Every node gets a fresh id from the graph's counter and keeps its
    /// offset from the buffer's centroid. Edges are re-homed through the
    /// old-to-new id map, so nothing links to pre-existing nodes. Returns
    /// the new ids in buffer order.
    pub fn paste_into(&self, graph: &mut GraphStore, target: Vec2) -> Vec<NodeId> {
        let centroid = self.centroid();
        let mut remap = HashMap::with_capacity(self.nodes.len());
        let mut new_ids = Vec::with_capacity(self.nodes.len());

        for node in &self.nodes {
            let id = graph.allocate_id();
            let position = target + (node.position - centroid);
            graph.insert_node(node.with_id(id, position));
            remap.insert(node.id(), id);
            new_ids.push(id);
        }

        for edge in &self.edges {
            if let (Some(&from), Some(&to)) = (remap.get(&edge.from), remap.get(&edge.to))
                && let Err(err) = graph.add_edge(from, to)
            {
                tracing::warn!("skipping pasted edge {} -> {}: {}", from, to, err);
            }
        }

        new_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    fn two_linked() -> (GraphStore, NodeId, NodeId, NodeId) {
        let mut graph = GraphStore::empty();
        let a = graph.add_node(NodeKind::Digit, Vec2::new(0.0, 0.0));
        let b = graph.add_node(NodeKind::OneOrMore, Vec2::new(200.0, 100.0));
        let c = graph.add_node(NodeKind::End, Vec2::new(400.0, 0.0));
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn test_copy_keeps_only_internal_edges() {
        let (graph, a, b, _) = two_linked();
        let mut selection = Selection::new();
        selection.set([a, b]);

        let buffer = ClipboardBuffer::copy(&graph, &selection);
        assert_eq!(buffer.nodes().len(), 2);
        assert_eq!(buffer.edges(), &[Edge::new(a, b)]);
    }

    #[test]
    fn test_paste_remaps_ids_and_edges() {
        let (mut graph, a, b, c) = two_linked();
        let mut selection = Selection::new();
        selection.set([a, b]);
        let buffer = ClipboardBuffer::copy(&graph, &selection);

        let new_ids = buffer.paste_into(&mut graph, Vec2::new(1000.0, 1000.0));
        assert_eq!(new_ids.len(), 2);
        for id in &new_ids {
            assert!(![a, b, c].contains(id));
        }
        let pasted_edges: Vec<_> = graph
            .edges()
            .iter()
            .filter(|e| new_ids.contains(&e.from) || new_ids.contains(&e.to))
            .collect();
        assert_eq!(pasted_edges, vec![&Edge::new(new_ids[0], new_ids[1])]);
    }

    #[test]
    fn test_paste_centers_on_target() {
        let (mut graph, a, b, _) = two_linked();
        let mut selection = Selection::new();
        selection.set([a, b]);
        let buffer = ClipboardBuffer::copy(&graph, &selection);
        assert_eq!(buffer.centroid(), Vec2::new(100.0, 50.0));

        let new_ids = buffer.paste_into(&mut graph, Vec2::new(500.0, 500.0));
        assert_eq!(graph.node(new_ids[0]).unwrap().position, Vec2::new(400.0, 450.0));
        assert_eq!(graph.node(new_ids[1]).unwrap().position, Vec2::new(600.0, 550.0));
    }

    #[test]
    fn test_paste_preserves_custom_text() {
        let mut graph = GraphStore::empty();
        let id = graph.add_node(NodeKind::Custom, Vec2::ZERO);
        graph.node_mut(id).unwrap().set_text("cat");
        let mut selection = Selection::new();
        selection.set([id]);

        let buffer = ClipboardBuffer::copy(&graph, &selection);
        let new_ids = buffer.paste_into(&mut graph, Vec2::ZERO);
        assert_eq!(graph.node(new_ids[0]).unwrap().fragment(), "cat");
    }

    #[test]
    fn test_empty_buffer_pastes_nothing() {
        let mut graph = GraphStore::new();
        let ids = ClipboardBuffer::default().paste_into(&mut graph, Vec2::ZERO);
        assert!(ids.is_empty());
        assert_eq!(graph.len(), 1);
    }
}
