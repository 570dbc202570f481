//! Text, run and paragraph models.

use super::{Container, Element, ElementId, Image};
use serde::Serialize;
use std::collections::BTreeMap;

/// An immutable span of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    id: ElementId,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<ElementId>,
    content: String,
}

impl Text {
    /// Create a text element.
    pub fn new(id: ElementId, parent: Option<ElementId>, content: impl Into<String>) -> Self {
        Self {
            id,
            parent,
            content: content.into(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// The text content.
    pub fn text(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.content)
    }
}

/// A run: text spans and pictures sharing one set of run properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    id: ElementId,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<ElementId>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, String>,
    children: Vec<Element>,
}

impl Run {
    /// Create an empty run.
    pub fn new(id: ElementId, parent: Option<ElementId>) -> Self {
        Self {
            id,
            parent,
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Append a text span.
    pub fn push_text(&mut self, text: Text) {
        self.children.push(Element::Text(text));
    }

    /// Append a picture.
    pub fn push_image(&mut self, image: Image) {
        self.children.push(Element::Image(image));
    }

    /// Set one run property (e.g. `b` → `true`).
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Look up a run property.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// All run properties, ordered by name.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Text children.
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.children.iter().filter_map(Element::as_text)
    }

    /// Picture children.
    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.children.iter().filter_map(Element::as_image)
    }

    /// Concatenated text of this run.
    pub fn text(&self) -> String {
        self.texts().map(Text::text).collect()
    }
}

impl Container for Run {
    fn elements(&self) -> &[Element] {
        &self.children
    }
}

/// Paragraph style reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParagraphStyle {
    /// Style ID from `w:pStyle` (e.g. "Heading1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
}

/// A paragraph of runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    id: ElementId,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<ElementId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<ParagraphStyle>,
    children: Vec<Element>,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new(id: ElementId, parent: Option<ElementId>) -> Self {
        Self {
            id,
            parent,
            style: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// The paragraph style, present when the paragraph had properties.
    pub fn style(&self) -> Option<&ParagraphStyle> {
        self.style.as_ref()
    }

    /// Shorthand for the style name.
    pub fn style_name(&self) -> Option<&str> {
        self.style.as_ref().and_then(|s| s.style_name.as_deref())
    }

    pub fn set_style(&mut self, style: ParagraphStyle) {
        self.style = Some(style);
    }

    /// Append a run.
    pub fn push_run(&mut self, run: Run) {
        self.children.push(Element::Run(run));
    }

    /// Runs in document order.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.children.iter().filter_map(Element::as_run)
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs().map(|r| r.text()).collect()
    }
}

impl Container for Paragraph {
    fn elements(&self) -> &[Element] {
        &self.children
    }
}
