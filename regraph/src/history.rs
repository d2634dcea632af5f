//! Snapshot-based undo and redo
//!
//! Every recorded entry is a full copy of the graph store taken just before
//! a mutation. Both stacks are bounded; when one overflows, its oldest entry
//! is dropped.

use crate::graph::GraphStore;
use std::collections::VecDeque;

/// Default number of entries each stack keeps
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// An immutable copy of the graph at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    graph: GraphStore,
}

impl Snapshot {
    pub fn capture(graph: &GraphStore) -> Self {
        Snapshot {
            graph: graph.clone(),
        }
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// Produce an independent live copy of the captured graph
    fn restore(self) -> GraphStore {
        self.graph
    }
}

#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        History::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        History {
            undo: VecDeque::with_capacity(capacity),
            redo: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record the state before a mutation and drop any redo lineage
    pub fn record(&mut self, graph: &GraphStore) {
        push_bounded(&mut self.undo, Snapshot::capture(graph), self.capacity);
        self.redo.clear();
    }

    /// Step back one entry
    ///
    /// Returns the graph to make live, or `None` when there is nothing to
    /// undo. The current graph is pushed onto the redo stack.
    pub fn undo(&mut self, current: &GraphStore) -> Option<GraphStore> {
        let snapshot = self.undo.pop_back()?;
        push_bounded(&mut self.redo, Snapshot::capture(current), self.capacity);
        Some(snapshot.restore())
    }

    /// Step forward one entry; the mirror image of [`History::undo`]
    pub fn redo(&mut self, current: &GraphStore) -> Option<GraphStore> {
        let snapshot = self.redo.pop_back()?;
        push_bounded(&mut self.undo, Snapshot::capture(current), self.capacity);
        Some(snapshot.restore())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Most recent undo entry
    pub fn peek_undo(&self) -> Option<&Snapshot> {
        self.undo.back()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, capacity: usize) {
    if capacity == 0 {
        return;
    }
    if stack.len() == capacity {
        stack.pop_front();
    }
    stack.push_back(snapshot);
}
