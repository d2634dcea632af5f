//! Editing session
//!
//! The session owns the live graph together with selection, history,
//! clipboard and debug state, and is the only way to mutate the graph.
//! Every structural edit records a history snapshot immediately before it is
//! applied, so undo always returns to the state the user saw before the
//! edit.

use crate::clipboard::ClipboardBuffer;
use crate::config::EditorConfig;
use crate::debugger::{DebugMatch, MatchNavigator};
use crate::error::{GraphError, ProjectError, TemplateError};
use crate::graph::GraphStore;
use crate::history::History;
use crate::linearize;
use crate::node::{Node, NodeId, NodeKind, Rect, Vec2};
use crate::project;
use crate::selection::Selection;
use crate::template;

#[derive(Debug, Clone)]
pub struct Session {
    graph: GraphStore,
    selection: Selection,
    history: History,
    clipboard: Option<ClipboardBuffer>,
    config: EditorConfig,
    editing: Option<NodeId>,
    dragging: bool,
    test_text: String,
    navigator: MatchNavigator,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    /// Start a session with the default start anchor
    pub fn new() -> Self {
        Session::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Session {
            graph: GraphStore::new(),
            selection: Selection::new(),
            history: History::new(config.history_depth),
            clipboard: None,
            config,
            editing: None,
            dragging: false,
            test_text: String::new(),
            navigator: MatchNavigator::new(),
        }
    }

    /// Start a session around an existing graph, with empty history
    pub fn from_graph(graph: GraphStore, config: EditorConfig) -> Self {
        Session {
            graph,
            ..Session::with_config(config)
        }
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn clipboard(&self) -> Option<&ClipboardBuffer> {
        self.clipboard.as_ref()
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selection.contains(id)
    }

    /// Node currently in text-edit mode
    pub fn editing(&self) -> Option<NodeId> {
        self.editing
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn record(&mut self) {
        self.history.record(&self.graph);
    }

    // Graph edits

    pub fn add_node(&mut self, kind: NodeKind, position: Vec2) -> NodeId {
        self.record();
        let id = self.graph.add_node(kind, position);
        tracing::debug!("added {:?} node {}", kind, id);
        id
    }

    /// Delete one node and its edges; `false` if it does not exist
    ///
    /// The start anchor gets no special protection. Without it the pattern
    /// starts at the first unlinked node instead.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if !self.graph.contains(id) {
            return false;
        }
        self.record();
        self.graph.remove_node(id);
        self.forget(id);
        tracing::debug!("removed node {}", id);
        true
    }

    /// Delete every selected node; returns how many were removed
    pub fn delete_selection(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        self.record();
        let removed = self.remove_selected();
        tracing::debug!("deleted {} selected node(s)", removed);
        removed
    }

    fn remove_selected(&mut self) -> usize {
        let ids: Vec<NodeId> = self.selection.ids().collect();
        let removed = ids
            .iter()
            .filter(|id| self.graph.remove_node(**id).is_some())
            .count();
        self.selection.clear();
        if self.editing.is_some_and(|id| !self.graph.contains(id)) {
            self.editing = None;
        }
        removed
    }

    fn forget(&mut self, id: NodeId) {
        self.selection.retain_existing(&self.graph);
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    /// Link `from` to `to`
    ///
    /// Rejected edges leave both graph and history untouched.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        if let Err(err) = self.graph.check_edge(from, to) {
            tracing::warn!("edge {} -> {} rejected: {}", from, to, err);
            return Err(err);
        }
        self.record();
        self.graph.add_edge(from, to)?;
        tracing::debug!("linked {} -> {}", from, to);
        Ok(())
    }

    /// Remove every edge touching a node; returns how many were removed
    pub fn disconnect_node(&mut self, id: NodeId) -> usize {
        if !self.graph.edges().iter().any(|e| e.touches(id)) {
            return 0;
        }
        self.record();
        self.graph.remove_edges_for(id)
    }

    // Selection

    /// Click on a node; unknown ids are ignored
    pub fn click(&mut self, id: NodeId, additive: bool) -> bool {
        if !self.graph.contains(id) {
            return false;
        }
        self.selection.click(id, additive);
        true
    }

    pub fn box_select(&mut self, rect: Rect) -> usize {
        self.selection
            .box_select(&self.graph, rect, self.config.node_size)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.graph);
    }

    // Dragging

    /// Start moving the selected nodes; records one snapshot for the drag
    pub fn begin_drag(&mut self) -> bool {
        if self.selection.is_empty() || self.dragging {
            return false;
        }
        self.record();
        self.dragging = true;
        true
    }

    /// Move every selected node by `delta` during a drag
    pub fn drag_selection(&mut self, delta: Vec2) {
        if !self.dragging {
            return;
        }
        let ids: Vec<NodeId> = self.selection.ids().collect();
        for id in ids {
            if let Some(node) = self.graph.node_mut(id) {
                node.position = node.position + delta;
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    // Text editing

    /// Enter text-edit mode on a custom node
    pub fn begin_edit(&mut self, id: NodeId) -> Result<(), GraphError> {
        self.editable(id)?;
        if self.editing != Some(id) {
            self.record();
            self.editing = Some(id);
        }
        Ok(())
    }

    /// Update the text of the node being edited as the user types
    ///
    /// Editing a node that is not in edit mode enters edit mode first.
    pub fn edit_text(&mut self, id: NodeId, text: &str) -> Result<(), GraphError> {
        self.begin_edit(id)?;
        if let Some(node) = self.graph.node_mut(id) {
            node.set_text(text);
        }
        Ok(())
    }

    /// Set the final text and leave edit mode
    pub fn commit_edit(&mut self, id: NodeId, text: &str) -> Result<(), GraphError> {
        self.edit_text(id, text)?;
        self.editing = None;
        tracing::debug!("node {} text set to {:?}", id, text);
        Ok(())
    }

    fn editable(&self, id: NodeId) -> Result<&Node, GraphError> {
        let node = self.graph.node(id).ok_or(GraphError::UnknownNode(id))?;
        if !node.kind().is_editable() {
            tracing::warn!("node {} is a fixed {:?} node", id, node.kind());
            return Err(GraphError::NotEditable(id));
        }
        Ok(node)
    }

    // Clipboard

    /// Copy the selected subgraph; an empty selection keeps the old buffer
    pub fn copy(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let buffer = ClipboardBuffer::copy(&self.graph, &self.selection);
        let count = buffer.nodes().len();
        self.clipboard = Some(buffer);
        count
    }

    /// Copy the selected subgraph, then delete it as one undoable step
    pub fn cut(&mut self) -> usize {
        let copied = self.copy();
        if copied == 0 {
            return 0;
        }
        self.record();
        self.remove_selected()
    }

    /// Paste the clipboard centered on `target` and select the new nodes
    pub fn paste(&mut self, target: Vec2) -> Vec<NodeId> {
        let Some(buffer) = self.clipboard.as_ref().filter(|b| !b.is_empty()) else {
            return Vec::new();
        };
        self.history.record(&self.graph);
        let ids = buffer.paste_into(&mut self.graph, target);
        self.selection.set(ids.iter().copied());
        tracing::debug!("pasted {} node(s)", ids.len());
        ids
    }

    // History

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.graph) {
            Some(graph) => {
                self.restore(graph);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.graph) {
            Some(graph) => {
                self.restore(graph);
                true
            }
            None => false,
        }
    }

    /// Make a restored graph live without letting ids go backwards
    fn restore(&mut self, mut graph: GraphStore) {
        graph.raise_next_id(self.graph.next_id());
        self.graph = graph;
        self.selection.retain_existing(&self.graph);
        self.editing = None;
        self.dragging = false;
    }

    // Templates

    /// Splice a catalog template in at `start`, as one undoable step
    pub fn apply_template(&mut self, name: &str, start: Vec2) -> Result<Vec<NodeId>, TemplateError> {
        let template = template::find(name).inspect_err(|err| tracing::warn!("{}", err))?;
        self.record();
        let ids = template.expand(&mut self.graph, start, self.config.template_spacing);
        tracing::debug!("expanded template {} into {} node(s)", name, ids.len());
        Ok(ids)
    }

    // Pattern and matching

    /// Linearize the live graph; recomputed on every call
    pub fn pattern(&self) -> String {
        linearize::linearize_with_limit(&self.graph, self.config.traversal_limit)
    }

    /// Ids of the nodes that make up the current pattern
    pub fn chain(&self) -> Vec<NodeId> {
        linearize::chain(&self.graph, self.config.traversal_limit)
    }

    pub fn set_test_text(&mut self, text: &str) {
        self.test_text = text.to_string();
    }

    pub fn test_text(&self) -> &str {
        &self.test_text
    }

    /// Match analysis for the current pattern and test text
    ///
    /// Recomputed only when either input changed since the last call.
    pub fn debug(&mut self) -> &MatchNavigator {
        let pattern = self.pattern();
        self.navigator.refresh(&pattern, &self.test_text);
        &self.navigator
    }

    pub fn debug_matches(&mut self) -> &[DebugMatch] {
        self.debug().matches()
    }

    pub fn next_match(&mut self) -> Option<&DebugMatch> {
        self.debug();
        self.navigator.next()
    }

    pub fn previous_match(&mut self) -> Option<&DebugMatch> {
        self.debug();
        self.navigator.previous()
    }

    // Persistence

    pub fn save_project(&self) -> Result<String, ProjectError> {
        project::to_json(&self.graph)
    }

    /// Replace the session contents with a project document
    ///
    /// On error the live session is left exactly as it was. On success
    /// selection, history and the match cache start over.
    pub fn load_project(&mut self, input: &str) -> Result<(), ProjectError> {
        let graph = project::from_json(input).inspect_err(|err| {
            tracing::warn!("project load failed: {}", err);
        })?;
        self.graph = graph;
        self.selection.clear();
        self.history.clear();
        self.editing = None;
        self.dragging = false;
        self.navigator.invalidate();
        tracing::debug!("loaded project with {} node(s)", self.graph.len());
        Ok(())
    }
}
