//! The element sum type and the container capability.

use super::{Image, Paragraph, Run, Section, Text};
use serde::Serialize;

/// Identifier of an element within one document.
///
/// Ids are assigned in build order, so a parent's id is always smaller than
/// its children's. Elements refer to their parent by id rather than by
/// reference; see [`crate::Document::parent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ElementId(u32);

impl ElementId {
    /// Wrap a raw id.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out consecutive [`ElementId`]s while a tree is built.
#[derive(Debug, Default)]
pub(crate) struct ElementIds {
    next: u32,
}

impl ElementIds {
    pub(crate) fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }
}

/// Elements that own an ordered list of children.
pub trait Container {
    /// Children in document order.
    fn elements(&self) -> &[Element];

    /// Whether there are no children.
    fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    /// Number of children.
    fn len(&self) -> usize {
        self.elements().len()
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// A span of text inside a run
    Text(Text),
    /// A run of inline content
    Run(Run),
    /// A paragraph of runs
    Paragraph(Paragraph),
    /// A section of paragraphs
    Section(Section),
    /// An embedded picture inside a run
    Image(Image),
}

impl Element {
    /// This element's id.
    pub fn id(&self) -> ElementId {
        match self {
            Element::Text(e) => e.id(),
            Element::Run(e) => e.id(),
            Element::Paragraph(e) => e.id(),
            Element::Section(e) => e.id(),
            Element::Image(e) => e.id(),
        }
    }

    /// Id of the enclosing element, if any.
    pub fn parent(&self) -> Option<ElementId> {
        match self {
            Element::Text(e) => e.parent(),
            Element::Run(e) => e.parent(),
            Element::Paragraph(e) => e.parent(),
            Element::Section(_) => None,
            Element::Image(e) => e.parent(),
        }
    }

    /// The container view of this element; `None` for leaves.
    pub fn as_container(&self) -> Option<&dyn Container> {
        match self {
            Element::Run(e) => Some(e as &dyn Container),
            Element::Paragraph(e) => Some(e as &dyn Container),
            Element::Section(e) => Some(e as &dyn Container),
            Element::Text(_) | Element::Image(_) => None,
        }
    }

    /// Children of a container; `None` for leaves.
    pub fn children(&self) -> Option<&[Element]> {
        self.as_container().map(Container::elements)
    }

    /// Whether this variant can hold children.
    pub fn is_container(&self) -> bool {
        self.as_container().is_some()
    }

    /// Short variant name, as used in serialized output.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::Run(_) => "run",
            Element::Paragraph(_) => "paragraph",
            Element::Section(_) => "section",
            Element::Image(_) => "image",
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_run(&self) -> Option<&Run> {
        match self {
            Element::Run(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Element::Paragraph(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Element::Section(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Element::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Text(e) => std::fmt::Display::fmt(e, f),
            Element::Image(e) => std::fmt::Display::fmt(e, f),
            other => write!(f, "<{}:{}>", other.kind(), other.id()),
        }
    }
}
