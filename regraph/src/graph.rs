//! Graph store for pattern nodes and the links between them
//!
//! The store owns every node and directed edge, hands out node ids, and is
//! the only place structural edits happen. It never records history itself;
//! the session snapshots it before calling into it.

use crate::error::GraphError;
use crate::node::{Node, NodeId, NodeKind, Vec2};
use serde::{Deserialize, Serialize};

/// A directed link: `to`'s fragment follows `from`'s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Edge { from, to }
    }

    /// Check if the node is either endpoint
    pub fn touches(&self, id: NodeId) -> bool {
        self.from == id || self.to == id
    }
}

/// Where the default start anchor sits in a fresh session
pub const DEFAULT_ANCHOR_POSITION: Vec2 = Vec2 { x: 100.0, y: 300.0 };

/// Nodes and edges, both kept in insertion order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_id: u64,
}

impl GraphStore {
    /// Create a store with no nodes at all
    pub fn empty() -> Self {
        GraphStore::default()
    }

    /// Create the store a new session starts with: one start anchor
    pub fn new() -> Self {
        let mut graph = GraphStore::empty();
        graph.add_node(NodeKind::Start, DEFAULT_ANCHOR_POSITION);
        graph
    }

    /// Assemble a store from already-validated parts
    ///
    /// Edges with a missing endpoint and self-edges are dropped. The id
    /// counter is raised past the largest node id so it never hands out an
    /// id that is already taken.
    pub(crate) fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>, next_id: u64) -> Self {
        let floor = nodes
            .iter()
            .map(|n| n.id().0.saturating_add(1))
            .max()
            .unwrap_or(0);
        let mut graph = GraphStore {
            nodes,
            edges: Vec::with_capacity(edges.len()),
            next_id: next_id.max(floor),
        };
        for edge in edges {
            match graph.add_edge(edge.from, edge.to) {
                Ok(()) => {}
                Err(err) => tracing::warn!("dropping edge {} -> {}: {}", edge.from, edge.to, err),
            }
        }
        graph
    }

    /// Allocate a fresh id and insert a node of the given kind
    pub fn add_node(&mut self, kind: NodeKind, position: Vec2) -> NodeId {
        let id = self.allocate_id();
        self.nodes.push(Node::new(id, kind, position));
        id
    }

    /// Insert a prebuilt node, keeping its id
    ///
    /// The id must come from [`GraphStore::allocate_id`] on this store.
    pub(crate) fn insert_node(&mut self, node: Node) {
        debug_assert!(self.node(node.id()).is_none());
        self.nodes.push(node);
    }

    /// Reserve the next id without inserting anything
    ///
    /// The counter stops at `u64::MAX`; project loading rejects documents
    /// that would start there.
    pub fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        match self.next_id.checked_add(1) {
            Some(next) => self.next_id = next,
            None => tracing::error!("node id space exhausted at {}", id),
        }
        id
    }

    /// Remove a node and every edge touching it
    ///
    /// Returns the removed node, or `None` if it was not present.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id() == id)?;
        self.remove_edges_for(id);
        Some(self.nodes.remove(index))
    }

    /// Insert a directed edge
    ///
    /// A node may have any number of outgoing edges; nothing is replaced.
    /// Self-edges, edges to unknown nodes and exact duplicates are rejected.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.check_edge(from, to)?;
        self.edges.push(Edge::new(from, to));
        Ok(())
    }

    /// Check whether [`GraphStore::add_edge`] would accept this edge
    pub fn check_edge(&self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        if from == to {
            return Err(GraphError::SelfEdge(from));
        }
        for id in [from, to] {
            if !self.contains(id) {
                return Err(GraphError::UnknownNode(id));
            }
        }
        if self.edges.contains(&Edge::new(from, to)) {
            return Err(GraphError::DuplicateEdge { from, to });
        }
        Ok(())
    }

    /// Remove every edge where the node is an endpoint
    pub fn remove_edges_for(&mut self, id: NodeId) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(id));
        before - self.edges.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The id the next added node will receive
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Never let the counter move backwards
    pub(crate) fn raise_next_id(&mut self, floor: u64) {
        self.next_id = self.next_id.max(floor);
    }

    /// First outgoing edge target of a node, by edge insertion order
    pub fn first_successor(&self, id: NodeId) -> Option<NodeId> {
        self.edges.iter().find(|e| e.from == id).map(|e| e.to)
    }

    pub fn has_incoming(&self, id: NodeId) -> bool {
        self.edges.iter().any(|e| e.to == id)
    }

    #[cfg(test)]
    pub(crate) fn nodes_mut_for_test(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_start_anchor() {
        let graph = GraphStore::new();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.nodes()[0].kind(), NodeKind::Start);
        assert_eq!(graph.nodes()[0].position, DEFAULT_ANCHOR_POSITION);
        assert_eq!(graph.next_id(), 1);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut graph = GraphStore::empty();
        let a = graph.add_node(NodeKind::Digit, Vec2::ZERO);
        graph.remove_node(a);
        let b = graph.add_node(NodeKind::Digit, Vec2::ZERO);
        assert_ne!(a, b);
        assert_eq!(b, NodeId(1));
    }

    #[test]
    fn test_remove_node_cascades_edges() {
        let mut graph = GraphStore::empty();
        let a = graph.add_node(NodeKind::Start, Vec2::ZERO);
        let b = graph.add_node(NodeKind::Digit, Vec2::ZERO);
        let c = graph.add_node(NodeKind::OneOrMore, Vec2::ZERO);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.add_edge(a, c).unwrap();

        let removed = graph.remove_node(b).unwrap();
        assert_eq!(removed.id(), b);
        assert_eq!(graph.edges(), &[Edge::new(a, c)]);
    }

    #[test]
    fn test_remove_missing_node_is_noop() {
        let mut graph = GraphStore::new();
        assert!(graph.remove_node(NodeId(42)).is_none());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_add_edge_rejects_self_edge() {
        let mut graph = GraphStore::new();
        let id = graph.nodes()[0].id();
        assert_eq!(graph.add_edge(id, id), Err(GraphError::SelfEdge(id)));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_add_edge_rejects_unknown_endpoint() {
        let mut graph = GraphStore::new();
        let id = graph.nodes()[0].id();
        assert_eq!(
            graph.add_edge(id, NodeId(9)),
            Err(GraphError::UnknownNode(NodeId(9)))
        );
    }

    #[test]
    fn test_multiple_outgoing_edges_are_kept() {
        let mut graph = GraphStore::empty();
        let a = graph.add_node(NodeKind::Start, Vec2::ZERO);
        let b = graph.add_node(NodeKind::Digit, Vec2::ZERO);
        let c = graph.add_node(NodeKind::Word, Vec2::ZERO);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(a, c).unwrap();
        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.first_successor(a), Some(b));
        assert_eq!(
            graph.add_edge(a, b),
            Err(GraphError::DuplicateEdge { from: a, to: b })
        );
    }

    #[test]
    fn test_from_parts_drops_dangling_edges() {
        let nodes = vec![Node::new(NodeId(3), NodeKind::Start, Vec2::ZERO)];
        let edges = vec![Edge::new(NodeId(3), NodeId(8))];
        let graph = GraphStore::from_parts(nodes, edges, 0);
        assert!(graph.edges().is_empty());
        assert_eq!(graph.next_id(), 4);
    }

    #[test]
    fn test_counter_stops_at_top_of_id_space() {
        let nodes = vec![Node::new(NodeId(u64::MAX - 1), NodeKind::Start, Vec2::ZERO)];
        let mut graph = GraphStore::from_parts(nodes, Vec::new(), 0);
        assert_eq!(graph.next_id(), u64::MAX);
        assert_eq!(graph.allocate_id(), NodeId(u64::MAX));
        assert_eq!(graph.next_id(), u64::MAX);
    }
}
