//! Turns the node graph into a pattern string
//!
//! The walk starts at the entry node and follows the first outgoing edge of
//! each node until it reaches a node with none. Branches beyond the first
//! edge are never visited, and the walk has no notion of group nesting:
//! `(`, `)` and `|` are ordinary chain links.

use crate::graph::GraphStore;
use crate::node::{Node, NodeId, NodeKind};

/// Default bound on the number of edges followed
pub const DEFAULT_TRAVERSAL_LIMIT: usize = 1000;

/// Linearize with the default step bound
pub fn linearize(graph: &GraphStore) -> String {
    linearize_with_limit(graph, DEFAULT_TRAVERSAL_LIMIT)
}

/// Linearize, following at most `limit` edges after the entry node
///
/// Hitting the bound is not an error: whatever was emitted so far is
/// returned. This is what keeps a cyclic graph from looping forever.
pub fn linearize_with_limit(graph: &GraphStore, limit: usize) -> String {
    let Some(entry) = entry_node(graph) else {
        return String::new();
    };

    let mut pattern = String::from(entry.fragment());
    let mut current = entry.id();

    for _ in 0..limit {
        let Some(next) = graph.first_successor(current) else {
            break;
        };
        // A target missing from the store is a dead end.
        let Some(node) = graph.node(next) else {
            break;
        };
        pattern.push_str(node.fragment());
        current = next;
    }

    pattern
}

/// Pick the node linearization starts from
///
/// The first start anchor wins; without one, the first node (in insertion
/// order) that no edge points to. A graph where every node has an incoming
/// edge has no entry.
pub fn entry_node(graph: &GraphStore) -> Option<&Node> {
    graph
        .nodes()
        .iter()
        .find(|n| n.kind() == NodeKind::Start)
        .or_else(|| graph.nodes().iter().find(|n| !graph.has_incoming(n.id())))
}

/// Ids along the linearized chain, in emission order
///
/// Renderers use this to highlight the nodes that made it into the pattern.
pub fn chain(graph: &GraphStore, limit: usize) -> Vec<NodeId> {
    let Some(entry) = entry_node(graph) else {
        return Vec::new();
    };
    let mut ids = vec![entry.id()];
    let mut current = entry.id();
    for _ in 0..limit {
        match graph.first_successor(current) {
            Some(next) if graph.contains(next) => {
                ids.push(next);
                current = next;
            }
            _ => break,
        }
    }
    ids
}
