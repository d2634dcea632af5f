//! Built-in pattern templates
//!
//! Each template is a fixed sequence of steps. Expanding one creates a node
//! per step, laid out left to right, and links every node to the one before
//! it. The first node has no incoming edge; nothing links into or out of the
//! pre-existing graph.

use crate::error::TemplateError;
use crate::graph::GraphStore;
use crate::node::{NodeId, NodeKind, Vec2};

/// Horizontal distance between consecutive template nodes
pub const DEFAULT_TEMPLATE_SPACING: f32 = 160.0;

/// One node of a template expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A node with its kind's fixed fragment
    Kind(NodeKind),
    /// A custom node carrying this literal text
    Literal(&'static str),
}

use Step::{Kind, Literal};

/// A named, fixed expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub steps: &'static [Step],
}

const EMAIL: &[Step] = &[
    Kind(NodeKind::Word),
    Kind(NodeKind::OneOrMore),
    Literal("@"),
    Kind(NodeKind::Word),
    Kind(NodeKind::OneOrMore),
    Literal("\\."),
    Kind(NodeKind::Word),
    Kind(NodeKind::OneOrMore),
];

const ISO_DATE: &[Step] = &[
    Kind(NodeKind::Digit),
    Literal("{4}"),
    Literal("-"),
    Kind(NodeKind::Digit),
    Literal("{2}"),
    Literal("-"),
    Kind(NodeKind::Digit),
    Literal("{2}"),
];

const US_PHONE: &[Step] = &[
    Kind(NodeKind::Digit),
    Literal("{3}"),
    Literal("-"),
    Kind(NodeKind::Digit),
    Literal("{3}"),
    Literal("-"),
    Kind(NodeKind::Digit),
    Literal("{4}"),
];

const URL: &[Step] = &[
    Literal("https"),
    Kind(NodeKind::Optional),
    Literal("://"),
    Kind(NodeKind::Word),
    Kind(NodeKind::OneOrMore),
    Literal("\\."),
    Kind(NodeKind::Word),
    Kind(NodeKind::OneOrMore),
    Kind(NodeKind::NotWhitespace),
    Kind(NodeKind::ZeroOrMore),
];

const IPV4: &[Step] = &[
    Kind(NodeKind::Digit),
    Literal("{1,3}"),
    Literal("\\."),
    Kind(NodeKind::Digit),
    Literal("{1,3}"),
    Literal("\\."),
    Kind(NodeKind::Digit),
    Literal("{1,3}"),
    Literal("\\."),
    Kind(NodeKind::Digit),
    Literal("{1,3}"),
];

/// The catalog, in menu order
pub const CATALOG: &[Template] = &[
    Template {
        name: "email",
        description: "Email address",
        steps: EMAIL,
    },
    Template {
        name: "date",
        description: "ISO-8601 date (YYYY-MM-DD)",
        steps: ISO_DATE,
    },
    Template {
        name: "phone",
        description: "US phone number (555-123-4567)",
        steps: US_PHONE,
    },
    Template {
        name: "url",
        description: "Simplified http(s) URL",
        steps: URL,
    },
    Template {
        name: "ipv4",
        description: "IPv4 address",
        steps: IPV4,
    },
];

/// Look a template up by name
pub fn find(name: &str) -> Result<&'static Template, TemplateError> {
    CATALOG
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| TemplateError::UnknownTemplate(name.to_string()))
}

impl Template {
    /// The pattern this template linearizes to on its own
    pub fn pattern(&self) -> String {
        self.steps
            .iter()
            .map(|step| match step {
                Kind(kind) => kind.default_fragment(),
                Literal(text) => *text,
            })
            .collect()
    }

    /// Add the template's nodes and chain edges to `graph`
    ///
    /// Node `i` is placed at `start + (i * spacing, 0)`. Returns the new
    /// ids in chain order. History is the caller's concern.
    pub fn expand(&self, graph: &mut GraphStore, start: Vec2, spacing: f32) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            let position = start + Vec2::new(index as f32 * spacing, 0.0);
            let id = match step {
                Kind(kind) => graph.add_node(*kind, position),
                Literal(text) => {
                    let id = graph.add_node(NodeKind::Custom, position);
                    if let Some(node) = graph.node_mut(id) {
                        node.set_text(text);
                    }
                    id
                }
            };
            if let Some(&previous) = ids.last()
                && let Err(err) = graph.add_edge(previous, id)
            {
                tracing::warn!("template {}: {}", self.name, err);
            }
            ids.push(id);
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linearize::linearize;

    #[test]
    fn test_catalog_patterns() {
        assert_eq!(find("email").unwrap().pattern(), "\\w+@\\w+\\.\\w+");
        assert_eq!(find("date").unwrap().pattern(), "\\d{4}-\\d{2}-\\d{2}");
        assert_eq!(find("phone").unwrap().pattern(), "\\d{3}-\\d{3}-\\d{4}");
        assert_eq!(find("url").unwrap().pattern(), "https?://\\w+\\.\\w+\\S*");
        assert_eq!(
            find("ipv4").unwrap().pattern(),
            "\\d{1,3}\\.\\d{1,3}\\.\\d{1,3}\\.\\d{1,3}"
        );
    }

    #[test]
    fn test_unknown_template() {
        assert_eq!(
            find("zip"),
            Err(TemplateError::UnknownTemplate("zip".to_string()))
        );
    }

    #[test]
    fn test_expand_lays_out_and_links() {
        let mut graph = GraphStore::empty();
        let template = find("email").unwrap();
        let ids = template.expand(&mut graph, Vec2::new(10.0, 20.0), 100.0);

        assert_eq!(ids.len(), template.steps.len());
        assert_eq!(graph.edges().len(), ids.len() - 1);
        assert_eq!(graph.node(ids[2]).unwrap().position, Vec2::new(210.0, 20.0));
        assert_eq!(graph.node(ids[2]).unwrap().kind(), NodeKind::Custom);
        assert_eq!(graph.node(ids[2]).unwrap().label(), "@");
        assert_eq!(linearize(&graph), template.pattern());
    }

    #[test]
    fn test_expand_does_not_touch_existing_nodes() {
        let mut graph = GraphStore::new();
        let anchor = graph.nodes()[0].id();
        find("ipv4")
            .unwrap()
            .expand(&mut graph, Vec2::ZERO, DEFAULT_TEMPLATE_SPACING);
        assert!(graph.edges().iter().all(|e| !e.touches(anchor)));
        assert_eq!(linearize(&graph), "^");
    }

    #[test]
    fn test_every_template_compiles() {
        for template in CATALOG {
            assert!(
                regex::Regex::new(&template.pattern()).is_ok(),
                "{} does not compile",
                template.name
            );
        }
    }
}
