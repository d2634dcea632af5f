//! Project documents
//!
//! A project is a versioned JSON document holding every node (id, kind,
//! position, color category, label, fragment), the edge list and the id
//! counter. Selection is never written.

use crate::error::ProjectError;
use crate::graph::{Edge, GraphStore};
use crate::node::{ColorCategory, Node, NodeId, NodeKind, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tag identifying a regraph project document
pub const FORMAT_NAME: &str = "regraph-project";

/// The only version this build reads and writes
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NodeRecord {
    id: NodeId,
    kind: NodeKind,
    position: Vec2,
    color: ColorCategory,
    label: String,
    fragment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ProjectFile {
    format: String,
    version: u32,
    next_id: u64,
    nodes: Vec<NodeRecord>,
    edges: Vec<Edge>,
}

/// Only the header is read first, so an unknown version is reported as
/// such instead of as a schema mismatch.
#[derive(Deserialize)]
struct Header {
    format: String,
    version: u32,
}

/// Encode a graph as a pretty-printed project document
pub fn to_json(graph: &GraphStore) -> Result<String, ProjectError> {
    let file = ProjectFile {
        format: FORMAT_NAME.to_string(),
        version: FORMAT_VERSION,
        next_id: graph.next_id(),
        nodes: graph
            .nodes()
            .iter()
            .map(|n| NodeRecord {
                id: n.id(),
                kind: n.kind(),
                position: n.position,
                color: n.color(),
                label: n.label().to_string(),
                fragment: n.fragment().to_string(),
            })
            .collect(),
        edges: graph.edges().to_vec(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Decode a project document into a fresh graph
///
/// Unknown formats, unknown versions, duplicate node ids and ids at the
/// top of the id space are errors.
/// Edges pointing at missing nodes are dropped with a warning.
pub fn from_json(input: &str) -> Result<GraphStore, ProjectError> {
    let header: Header = serde_json::from_str(input)?;
    if header.format != FORMAT_NAME {
        return Err(ProjectError::UnknownFormat(header.format));
    }
    if header.version != FORMAT_VERSION {
        return Err(ProjectError::UnsupportedVersion(header.version));
    }

    let file: ProjectFile = serde_json::from_str(input)?;
    if file.next_id == u64::MAX {
        return Err(ProjectError::IdOverflow(file.next_id));
    }
    let mut seen = HashSet::with_capacity(file.nodes.len());
    let mut nodes = Vec::with_capacity(file.nodes.len());
    for record in file.nodes {
        if record.id.0 == u64::MAX {
            return Err(ProjectError::IdOverflow(record.id.0));
        }
        if !seen.insert(record.id) {
            return Err(ProjectError::DuplicateNodeId(record.id));
        }
        if record.color != record.kind.color() {
            tracing::debug!(
                "node {} stored color {:?}, using {:?}",
                record.id,
                record.color,
                record.kind.color()
            );
        }
        nodes.push(Node::restore(
            record.id,
            record.kind,
            record.position,
            record.label,
            record.fragment,
        ));
    }

    Ok(GraphStore::from_parts(nodes, file.edges, file.next_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GraphStore {
        let mut graph = GraphStore::new();
        let start = graph.nodes()[0].id();
        let custom = graph.add_node(NodeKind::Custom, Vec2::new(250.0, 300.0));
        graph.node_mut(custom).unwrap().set_text("cat");
        let end = graph.add_node(NodeKind::End, Vec2::new(400.0, 300.0));
        graph.add_edge(start, custom).unwrap();
        graph.add_edge(custom, end).unwrap();
        graph
    }

    #[test]
    fn test_save_then_load_preserves_graph() {
        let graph = sample();
        let json = to_json(&graph).unwrap();
        assert_eq!(from_json(&json).unwrap(), graph);
    }

    #[test]
    fn test_document_fields() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["format"], FORMAT_NAME);
        assert_eq!(value["version"], FORMAT_VERSION);
        assert_eq!(value["next_id"], 3);
        assert_eq!(value["nodes"][1]["kind"], "custom");
        assert_eq!(value["nodes"][1]["color"], "custom");
        assert_eq!(value["nodes"][1]["fragment"], "cat");
        assert_eq!(value["edges"][0]["from"], 0);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let json = r#"{"format":"regraph-project","version":7,"next_id":0,"nodes":[],"edges":[]}"#;
        assert_eq!(from_json(json), Err(ProjectError::UnsupportedVersion(7)));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let json = r#"{"format":"sketch","version":1}"#;
        assert_eq!(
            from_json(json),
            Err(ProjectError::UnknownFormat("sketch".to_string()))
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(from_json("not json"), Err(ProjectError::Json(_))));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{
            "format": "regraph-project", "version": 1, "next_id": 2,
            "nodes": [
                {"id": 1, "kind": "digit", "position": {"x": 0, "y": 0}, "color": "digit", "label": "d", "fragment": "\\d"},
                {"id": 1, "kind": "word", "position": {"x": 0, "y": 0}, "color": "letters", "label": "w", "fragment": "\\w"}
            ],
            "edges": []
        }"#;
        assert_eq!(from_json(json), Err(ProjectError::DuplicateNodeId(NodeId(1))));
    }

    #[test]
    fn test_rejects_node_id_at_top_of_id_space() {
        let json = r#"{
            "format": "regraph-project", "version": 1, "next_id": 0,
            "nodes": [
                {"id": 18446744073709551615, "kind": "start", "position": {"x": 0, "y": 0}, "color": "anchor", "label": "Start of Line", "fragment": "^"}
            ],
            "edges": []
        }"#;
        assert_eq!(from_json(json), Err(ProjectError::IdOverflow(u64::MAX)));
    }

    #[test]
    fn test_rejects_exhausted_counter() {
        let json = r#"{"format":"regraph-project","version":1,"next_id":18446744073709551615,"nodes":[],"edges":[]}"#;
        assert_eq!(from_json(json), Err(ProjectError::IdOverflow(u64::MAX)));
    }

    #[test]
    fn test_accepts_highest_usable_id() {
        let json = r#"{
            "format": "regraph-project", "version": 1, "next_id": 0,
            "nodes": [
                {"id": 18446744073709551614, "kind": "digit", "position": {"x": 0, "y": 0}, "color": "digit", "label": "Number (0-9)", "fragment": "\\d"}
            ],
            "edges": []
        }"#;
        let graph = from_json(json).unwrap();
        assert_eq!(graph.next_id(), u64::MAX);
    }

    #[test]
    fn test_custom_label_mirrors_loaded_fragment() {
        let json = r#"{
            "format": "regraph-project", "version": 1, "next_id": 1,
            "nodes": [
                {"id": 0, "kind": "custom", "position": {"x": 0, "y": 0}, "color": "custom", "label": "dog", "fragment": "cat"}
            ],
            "edges": []
        }"#;
        let graph = from_json(json).unwrap();
        assert_eq!(graph.nodes()[0].fragment(), "cat");
        assert_eq!(graph.nodes()[0].label(), "cat");
    }

    #[test]
    fn test_drops_dangling_edges_and_fixes_counter() {
        let json = r#"{
            "format": "regraph-project", "version": 1, "next_id": 0,
            "nodes": [
                {"id": 5, "kind": "start", "position": {"x": 0, "y": 0}, "color": "anchor", "label": "Start of Line", "fragment": "^"}
            ],
            "edges": [{"from": 5, "to": 6}]
        }"#;
        let graph = from_json(json).unwrap();
        assert!(graph.edges().is_empty());
        assert_eq!(graph.next_id(), 6);
    }
}
