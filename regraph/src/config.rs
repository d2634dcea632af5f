//! Session tuning knobs

use crate::history::DEFAULT_HISTORY_DEPTH;
use crate::linearize::DEFAULT_TRAVERSAL_LIMIT;
use crate::node::{NODE_SIZE, Vec2};
use crate::template::DEFAULT_TEMPLATE_SPACING;

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Entries kept on each of the undo and redo stacks
    pub history_depth: usize,
    /// Edges the linearizer follows before giving up
    pub traversal_limit: usize,
    /// Horizontal gap between template nodes
    pub template_spacing: f32,
    /// Hit box used for box selection
    pub node_size: Vec2,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            history_depth: DEFAULT_HISTORY_DEPTH,
            traversal_limit: DEFAULT_TRAVERSAL_LIMIT,
            template_spacing: DEFAULT_TEMPLATE_SPACING,
            node_size: NODE_SIZE,
        }
    }
}
