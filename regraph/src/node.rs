//! Node kinds and the fragments they contribute
//!
//! Every node on the canvas contributes one piece of text to the final
//! pattern. For all kinds except [`NodeKind::Custom`] that text is fixed by
//! the kind and looked up in a single table; custom nodes carry free text
//! that the user edits in place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a node within one graph store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point or offset in canvas space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle in canvas space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from two opposite corners in any order
    ///
    /// Box selection drags can go in any direction, so the corners are
    /// normalized here.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Rect {
            x,
            y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Check whether two rectangles overlap (touching edges count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}

/// The closed set of node categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // Anchors
    Start,
    End,

    // Character classes
    Letters,
    Digit,
    Whitespace,
    Any,
    Word,
    Symbol,

    // Negated classes
    NotDigit,
    NotWhitespace,
    NotWord,

    // Quantifiers
    ZeroOrMore,
    OneOrMore,
    Optional,

    // Structure
    GroupStart,
    GroupEnd,
    Or,

    /// Free text typed by the user
    Custom,
}

/// Display category of a node, persisted with the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorCategory {
    Anchor,
    Letters,
    Digit,
    Special,
    Negated,
    Quantifier,
    Structure,
    Symbol,
    Custom,
}

/// Text shown on a fresh custom node until the user types something
pub const CUSTOM_PLACEHOLDER: &str = "abc";

struct KindInfo {
    fragment: &'static str,
    label: &'static str,
    color: ColorCategory,
}

impl NodeKind {
    /// Every kind, in palette order
    pub const ALL: [NodeKind; 18] = [
        NodeKind::Start,
        NodeKind::End,
        NodeKind::Letters,
        NodeKind::Digit,
        NodeKind::Whitespace,
        NodeKind::Any,
        NodeKind::Word,
        NodeKind::Symbol,
        NodeKind::NotDigit,
        NodeKind::NotWhitespace,
        NodeKind::NotWord,
        NodeKind::ZeroOrMore,
        NodeKind::OneOrMore,
        NodeKind::Optional,
        NodeKind::GroupStart,
        NodeKind::GroupEnd,
        NodeKind::Or,
        NodeKind::Custom,
    ];

    fn info(self) -> KindInfo {
        let (fragment, label, color) = match self {
            NodeKind::Start => ("^", "Start of Line", ColorCategory::Anchor),
            NodeKind::End => ("$", "End of Line", ColorCategory::Anchor),
            NodeKind::Letters => ("[a-zA-Z]+", "Letters (a-z)", ColorCategory::Letters),
            NodeKind::Digit => ("\\d", "Number (0-9)", ColorCategory::Digit),
            NodeKind::Whitespace => ("\\s", "Whitespace", ColorCategory::Special),
            NodeKind::Any => (".", "Anything", ColorCategory::Special),
            NodeKind::Word => ("\\w", "Word Char", ColorCategory::Letters),
            NodeKind::Symbol => ("@", "Specific Symbol", ColorCategory::Symbol),
            NodeKind::NotDigit => ("\\D", "Not a Number", ColorCategory::Negated),
            NodeKind::NotWhitespace => ("\\S", "Not Whitespace", ColorCategory::Negated),
            NodeKind::NotWord => ("\\W", "Not Word Char", ColorCategory::Negated),
            NodeKind::ZeroOrMore => ("*", "Repeat (0+)", ColorCategory::Quantifier),
            NodeKind::OneOrMore => ("+", "Repeat (1+)", ColorCategory::Quantifier),
            NodeKind::Optional => ("?", "Optional", ColorCategory::Quantifier),
            NodeKind::GroupStart => ("(", "Start Group", ColorCategory::Structure),
            NodeKind::GroupEnd => (")", "End Group", ColorCategory::Structure),
            NodeKind::Or => ("|", "OR (Either)", ColorCategory::Structure),
            NodeKind::Custom => (CUSTOM_PLACEHOLDER, CUSTOM_PLACEHOLDER, ColorCategory::Custom),
        };
        KindInfo {
            fragment,
            label,
            color,
        }
    }

    /// The fragment a fresh node of this kind contributes
    pub fn default_fragment(self) -> &'static str {
        self.info().fragment
    }

    /// The label a fresh node of this kind displays
    pub fn default_label(self) -> &'static str {
        self.info().label
    }

    pub fn color(self) -> ColorCategory {
        self.info().color
    }

    /// Only custom nodes accept text edits
    pub fn is_editable(self) -> bool {
        self == NodeKind::Custom
    }

    /// Parse the snake_case name used in project files and on the command line
    pub fn from_name(name: &str) -> Option<NodeKind> {
        NodeKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Letters => "letters",
            NodeKind::Digit => "digit",
            NodeKind::Whitespace => "whitespace",
            NodeKind::Any => "any",
            NodeKind::Word => "word",
            NodeKind::Symbol => "symbol",
            NodeKind::NotDigit => "not_digit",
            NodeKind::NotWhitespace => "not_whitespace",
            NodeKind::NotWord => "not_word",
            NodeKind::ZeroOrMore => "zero_or_more",
            NodeKind::OneOrMore => "one_or_more",
            NodeKind::Optional => "optional",
            NodeKind::GroupStart => "group_start",
            NodeKind::GroupEnd => "group_end",
            NodeKind::Or => "or",
            NodeKind::Custom => "custom",
        }
    }
}

/// Width and height of a node's hit box on the canvas
pub const NODE_SIZE: Vec2 = Vec2 { x: 140.0, y: 60.0 };

/// A vertex of the pattern graph
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    fragment: String,
    label: String,
    pub position: Vec2,
}

impl Node {
    /// Create a node with the kind's default fragment and label
    pub fn new(id: NodeId, kind: NodeKind, position: Vec2) -> Self {
        Node {
            id,
            kind,
            fragment: kind.default_fragment().to_string(),
            label: kind.default_label().to_string(),
            position,
        }
    }

    /// Rebuild a node from persisted parts
    ///
    /// Fixed kinds always get their table fragment back and keep the stored
    /// label. Custom nodes keep the stored text, and their label follows it.
    pub(crate) fn restore(
        id: NodeId,
        kind: NodeKind,
        position: Vec2,
        label: String,
        fragment: String,
    ) -> Self {
        let mut node = Node::new(id, kind, position);
        if kind.is_editable() {
            node.set_text(&fragment);
        } else {
            node.label = label;
        }
        node
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> ColorCategory {
        self.kind.color()
    }

    /// Replace the text of a custom node; the label follows the fragment
    ///
    /// Returns `false` and leaves the node unchanged for fixed kinds.
    pub fn set_text(&mut self, text: &str) -> bool {
        if !self.kind.is_editable() {
            return false;
        }
        self.fragment = text.to_string();
        self.label = text.to_string();
        true
    }

    /// Hit box of the node at its current position
    pub fn bounds(&self, size: Vec2) -> Rect {
        Rect::new(self.position.x, self.position.y, size.x, size.y)
    }

    /// Same node under a different id, used when pasting
    pub(crate) fn with_id(&self, id: NodeId, position: Vec2) -> Self {
        Node {
            id,
            position,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fragments() {
        assert_eq!(NodeKind::Start.default_fragment(), "^");
        assert_eq!(NodeKind::End.default_fragment(), "$");
        assert_eq!(NodeKind::Digit.default_fragment(), "\\d");
        assert_eq!(NodeKind::NotWord.default_fragment(), "\\W");
        assert_eq!(NodeKind::OneOrMore.default_fragment(), "+");
        assert_eq!(NodeKind::Or.default_fragment(), "|");
    }

    #[test]
    fn test_only_custom_is_editable() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.is_editable(), kind == NodeKind::Custom, "{:?}", kind);
        }
    }

    #[test]
    fn test_set_text_mirrors_label() {
        let mut node = Node::new(NodeId(0), NodeKind::Custom, Vec2::ZERO);
        assert_eq!(node.fragment(), CUSTOM_PLACEHOLDER);
        assert!(node.set_text("foo"));
        assert_eq!(node.fragment(), "foo");
        assert_eq!(node.label(), "foo");
    }

    #[test]
    fn test_set_text_rejected_for_fixed_kind() {
        let mut node = Node::new(NodeId(0), NodeKind::Digit, Vec2::ZERO);
        assert!(!node.set_text("x"));
        assert_eq!(node.fragment(), "\\d");
        assert_eq!(node.label(), "Number (0-9)");
    }

    #[test]
    fn test_restore_ignores_fragment_for_fixed_kind() {
        let node = Node::restore(
            NodeId(4),
            NodeKind::Word,
            Vec2::ZERO,
            "Word Char".to_string(),
            "tampered".to_string(),
        );
        assert_eq!(node.fragment(), "\\w");
    }

    #[test]
    fn test_restore_custom_label_follows_fragment() {
        let node = Node::restore(
            NodeId(2),
            NodeKind::Custom,
            Vec2::ZERO,
            "stale label".to_string(),
            "cat".to_string(),
        );
        assert_eq!(node.fragment(), "cat");
        assert_eq!(node.label(), "cat");
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(NodeKind::from_name("bogus"), None);
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(11.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let rect = Rect::from_corners(Vec2::new(10.0, 20.0), Vec2::new(0.0, 5.0));
        assert_eq!(rect, Rect::new(0.0, 5.0, 10.0, 15.0));
    }
}
