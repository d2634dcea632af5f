//! User intents coming from the presentation layer
//!
//! A renderer turns raw input into [`Intent`] values and hands them to
//! [`Session::apply`]. Failures never propagate past this point: they come
//! back as [`Outcome::Rejected`] for the renderer to show in its log.

use crate::error::EditorError;
use crate::node::{NodeId, NodeKind, Rect, Vec2};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    AddNode { kind: NodeKind, position: Vec2 },
    Click { id: NodeId, additive: bool },
    BoxSelect(Rect),
    ClearSelection,
    SelectAll,
    DeleteSelection,
    BeginEdit(NodeId),
    EditText { id: NodeId, text: String },
    CommitEdit { id: NodeId, text: String },
    Connect { from: NodeId, to: NodeId },
    Disconnect(NodeId),
    BeginDrag,
    Drag(Vec2),
    EndDrag,
    Copy,
    Cut,
    Paste(Vec2),
    Undo,
    Redo,
    ApplyTemplate { name: String, position: Vec2 },
    SetTestText(String),
    NextMatch,
    PreviousMatch,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Something visible changed
    Changed,
    /// Valid intent with nothing to do (empty selection, empty history, ...)
    Unchanged,
    /// The intent was refused; the session is unchanged
    Rejected(EditorError),
}

impl Outcome {
    fn from_flag(changed: bool) -> Self {
        if changed {
            Outcome::Changed
        } else {
            Outcome::Unchanged
        }
    }

    fn from_result<T>(result: Result<T, impl Into<EditorError>>) -> Self {
        match result {
            Ok(_) => Outcome::Changed,
            Err(err) => Outcome::Rejected(err.into()),
        }
    }
}

impl Session {
    /// Execute one intent
    pub fn apply(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::AddNode { kind, position } => {
                self.add_node(kind, position);
                Outcome::Changed
            }
            Intent::Click { id, additive } => Outcome::from_flag(self.click(id, additive)),
            Intent::BoxSelect(rect) => Outcome::from_flag(self.box_select(rect) > 0),
            Intent::ClearSelection => {
                let had_selection = !self.selection().is_empty();
                self.clear_selection();
                Outcome::from_flag(had_selection)
            }
            Intent::SelectAll => {
                self.select_all();
                Outcome::Changed
            }
            Intent::DeleteSelection => Outcome::from_flag(self.delete_selection() > 0),
            Intent::BeginEdit(id) => Outcome::from_result(self.begin_edit(id)),
            Intent::EditText { id, text } => Outcome::from_result(self.edit_text(id, &text)),
            Intent::CommitEdit { id, text } => Outcome::from_result(self.commit_edit(id, &text)),
            Intent::Connect { from, to } => Outcome::from_result(self.connect(from, to)),
            Intent::Disconnect(id) => Outcome::from_flag(self.disconnect_node(id) > 0),
            Intent::BeginDrag => Outcome::from_flag(self.begin_drag()),
            Intent::Drag(delta) => {
                let dragging = self.is_dragging();
                self.drag_selection(delta);
                Outcome::from_flag(dragging)
            }
            Intent::EndDrag => {
                self.end_drag();
                Outcome::Unchanged
            }
            Intent::Copy => {
                self.copy();
                Outcome::Unchanged
            }
            Intent::Cut => Outcome::from_flag(self.cut() > 0),
            Intent::Paste(target) => Outcome::from_flag(!self.paste(target).is_empty()),
            Intent::Undo => Outcome::from_flag(self.undo()),
            Intent::Redo => Outcome::from_flag(self.redo()),
            Intent::ApplyTemplate { name, position } => {
                Outcome::from_result(self.apply_template(&name, position))
            }
            Intent::SetTestText(text) => {
                let changed = self.test_text() != text;
                self.set_test_text(&text);
                Outcome::from_flag(changed)
            }
            Intent::NextMatch => Outcome::from_flag(self.next_match().is_some()),
            Intent::PreviousMatch => Outcome::from_flag(self.previous_match().is_some()),
        }
    }
}
