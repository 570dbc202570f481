//! Compiled path expressions.
//!
//! Supported grammar, evaluated relative to a context element:
//!
//! ```text
//! path      := ['./' | './/'] step (('/' | '//') step)*  |  '.'
//! step      := '*' | name | '*[local-name() = "local"]'
//! name      := [prefix ':'] local
//! ```

use super::names::Namespaces;
use crate::error::{Error, Result};
use roxmltree::Node;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    Any,
    Name(String),
    LocalName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NodeTest,
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlPath {
    steps: Vec<Step>,
}

impl XmlPath {
    /// Compile an expression.
    pub fn parse(expr: &str) -> Result<Self> {
        let invalid = || Error::InvalidPath(expr.to_string());
        let trimmed = expr.trim();

        if trimmed == "." {
            return Ok(Self { steps: Vec::new() });
        }
        if trimmed.is_empty() || (trimmed.starts_with('/') && !trimmed.starts_with("//")) {
            return Err(invalid());
        }

        let (mut axis, rest) = if let Some(rest) = trimmed.strip_prefix(".//") {
            (Axis::Descendant, rest)
        } else if let Some(rest) = trimmed.strip_prefix("//") {
            (Axis::Descendant, rest)
        } else if let Some(rest) = trimmed.strip_prefix("./") {
            (Axis::Child, rest)
        } else {
            (Axis::Child, trimmed)
        };

        let mut steps = Vec::new();
        for segment in rest.split('/') {
            if segment.is_empty() {
                if axis == Axis::Descendant {
                    return Err(invalid());
                }
                axis = Axis::Descendant;
                continue;
            }
            let test = parse_node_test(segment.trim()).ok_or_else(invalid)?;
            steps.push(Step { axis, test });
            axis = Axis::Child;
        }

        if steps.is_empty() || axis == Axis::Descendant {
            return Err(invalid());
        }
        Ok(Self { steps })
    }

    /// Evaluate against `context`, returning matches in document order
    /// without duplicates.
    pub fn evaluate<'a, 'input>(
        &self,
        context: Node<'a, 'input>,
        namespaces: &Namespaces,
    ) -> Vec<Node<'a, 'input>> {
        let mut current = vec![context];

        for step in &self.steps {
            let mut next = BTreeMap::new();
            for node in &current {
                let candidates: Vec<Node<'a, 'input>> = match step.axis {
                    Axis::Child => node.children().filter(Node::is_element).collect(),
                    Axis::Descendant => node.descendants().skip(1).filter(Node::is_element).collect(),
                };
                for candidate in candidates {
                    if step.test.matches(&candidate, namespaces) {
                        next.insert(candidate.id().get(), candidate);
                    }
                }
            }
            current = next.into_values().collect();
            if current.is_empty() {
                break;
            }
        }

        current
    }
}

impl NodeTest {
    fn matches(&self, node: &Node<'_, '_>, namespaces: &Namespaces) -> bool {
        match self {
            NodeTest::Any => node.is_element(),
            NodeTest::Name(name) => namespaces.element_matches(node, name),
            NodeTest::LocalName(local) => node.is_element() && node.tag_name().name() == local,
        }
    }
}

fn parse_node_test(segment: &str) -> Option<NodeTest> {
    if segment == "*" {
        return Some(NodeTest::Any);
    }

    if let Some(predicate) = segment.strip_prefix("*[").and_then(|s| s.strip_suffix(']')) {
        let value = predicate
            .trim()
            .strip_prefix("local-name()")?
            .trim_start()
            .strip_prefix('=')?
            .trim();
        let local = strip_quotes(value)?;
        return is_name(local).then(|| NodeTest::LocalName(local.to_string()));
    }

    let valid = match segment.split_once(':') {
        Some((prefix, local)) => is_name(prefix) && is_name(local),
        None => is_name(segment),
    };
    valid.then(|| NodeTest::Name(segment.to_string()))
}

fn strip_quotes(value: &str) -> Option<&str> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
}

fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
