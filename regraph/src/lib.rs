//! Regraph Core Library
//!
//! A node-graph model for building regular expressions: typed nodes linked
//! into a chain, linearized into a pattern string, with undo/redo,
//! clipboard, templates and match debugging on top.

pub mod clipboard;
pub mod config;
pub mod debugger;
pub mod error;
pub mod graph;
pub mod history;
pub mod intent;
pub mod linearize;
pub mod node;
pub mod project;
pub mod scan;
pub mod selection;
pub mod session;
pub mod template;

pub use clipboard::ClipboardBuffer;
pub use config::EditorConfig;
pub use debugger::{DebugGroup, DebugMatch, MatchNavigator, analyze, try_analyze};
pub use error::{
    EditorError, GraphError, PatternError, ProjectError, Result, TemplateError,
};
pub use graph::{Edge, GraphStore};
pub use history::{History, Snapshot};
pub use intent::{Intent, Outcome};
pub use linearize::{entry_node, linearize, linearize_with_limit};
pub use node::{ColorCategory, Node, NodeId, NodeKind, Rect, Vec2};
pub use scan::{FileMatches, scan_paths};
pub use selection::Selection;
pub use session::Session;
pub use template::{CATALOG, Step, Template};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        // Build "^\d+$" node by node and run it against a test string.
        let mut session = Session::new();
        let start = session.graph().nodes()[0].id();
        let digit = session.add_node(NodeKind::Digit, Vec2::new(260.0, 300.0));
        let plus = session.add_node(NodeKind::OneOrMore, Vec2::new(420.0, 300.0));
        let end = session.add_node(NodeKind::End, Vec2::new(580.0, 300.0));
        session.connect(start, digit).unwrap();
        session.connect(digit, plus).unwrap();
        session.connect(plus, end).unwrap();

        assert_eq!(session.pattern(), "^\\d+$");
        session.set_test_text("2024");
        assert_eq!(session.debug_matches().len(), 1);
        session.set_test_text("20x24");
        assert!(session.debug_matches().is_empty());
    }
}
