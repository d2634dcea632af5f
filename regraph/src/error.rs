//! Error types for the node-graph editor
//!
//! This module provides error handling using the `thiserror` crate.
//! Errors are categorized by their source: graph edits, project loading,
//! template lookup, or the host regex engine. None of them is fatal to a
//! session; the session logs them and leaves its state unchanged.

use crate::node::NodeId;
use thiserror::Error;

/// The main error type for the editor core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// A structural edit was rejected by the graph store
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// A project document could not be read or written
    #[error("project error: {0}")]
    Project(#[from] ProjectError),

    /// A template name was not found in the catalog
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// The linearized pattern was rejected by the regex engine
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// A filesystem operation failed
    #[error("io error: {0}")]
    Io(String),
}

/// Rejected structural edits
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge from a node to itself
    #[error("node {0} cannot link to itself")]
    SelfEdge(NodeId),

    /// An edge or edit referring to a node that is not in the graph
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The exact same directed edge already exists
    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge {
        /// Source node
        from: NodeId,
        /// Target node
        to: NodeId,
    },

    /// A text edit on a node whose fragment is fixed by its kind
    #[error("node {0} is not editable")]
    NotEditable(NodeId),
}

/// Errors raised while decoding or encoding a project document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectError {
    /// The document is not valid JSON for the project schema
    #[error("malformed project document: {0}")]
    Json(String),

    /// The `format` tag does not name a regraph project
    #[error("unknown project format '{0}'")]
    UnknownFormat(String),

    /// The format version is not one this build can read
    #[error("unsupported project version {0}")]
    UnsupportedVersion(u32),

    /// Two node records share the same id
    #[error("duplicate node id {0}")]
    DuplicateNodeId(NodeId),

    /// A node id or the id counter is at the top of the id space
    #[error("id {0} leaves no room for new nodes")]
    IdOverflow(u64),
}

impl From<serde_json::Error> for ProjectError {
    fn from(err: serde_json::Error) -> Self {
        ProjectError::Json(err.to_string())
    }
}

/// Template catalog lookup failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// No template is registered under this name
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
}

/// Failures reported by the host regex engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    /// The pattern does not parse
    #[error("invalid pattern: {0}")]
    Invalid(String),
}

impl From<regex::Error> for PatternError {
    fn from(err: regex::Error) -> Self {
        PatternError::Invalid(err.to_string())
    }
}

impl From<std::io::Error> for EditorError {
    fn from(err: std::io::Error) -> Self {
        EditorError::Io(err.to_string())
    }
}

/// Result type alias for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
