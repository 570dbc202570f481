//! Section and document root.

use super::{Container, Element, ElementId, Paragraph};
use crate::iter::{Preorder, RecursiveElementsIterator};
use serde::Serialize;

/// A document section: the paragraphs of one `w:body`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    id: ElementId,
    children: Vec<Element>,
}

impl Section {
    /// Create an empty section.
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Append a paragraph.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.children.push(Element::Paragraph(paragraph));
    }

    /// Paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.children.iter().filter_map(Element::as_paragraph)
    }
}

impl Container for Section {
    fn elements(&self) -> &[Element] {
        &self.children
    }
}

/// A read document: an ordered list of sections.
///
/// The tree is immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    sections: Vec<Element>,
}

impl Document {
    /// Build a document from its sections.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self {
            sections: sections.into_iter().map(Element::Section).collect(),
        }
    }

    /// Sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter_map(Element::as_section)
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Top-level elements (always sections).
    pub fn elements(&self) -> &[Element] {
        &self.sections
    }

    /// Cursor over the top-level elements.
    pub fn iter(&self) -> RecursiveElementsIterator<'_> {
        RecursiveElementsIterator::new(&self.sections)
    }

    /// Every element in preorder with its depth (sections are depth 0).
    pub fn walk(&self) -> Preorder<'_> {
        Preorder::new(self.iter())
    }

    /// Find an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.walk().map(|(_, e)| e).find(|e| e.id() == id)
    }

    /// The enclosing element of `id`, if it has one.
    pub fn parent(&self, id: ElementId) -> Option<&Element> {
        let parent = self.get(id)?.parent()?;
        self.get(parent)
    }

    /// Whether there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Text content, one line per paragraph.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for section in self.sections() {
            for para in section.paragraphs() {
                text.push_str(&para.text());
                text.push('\n');
            }
        }
        text
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to JSON string (compact).
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Run, Text};

    fn sample() -> Document {
        let id = ElementId::new;
        let mut section = Section::new(id(0));
        let mut para = Paragraph::new(id(1), Some(id(0)));
        let mut run = Run::new(id(2), Some(id(1)));
        run.push_text(Text::new(id(3), Some(id(2)), "Hello"));
        para.push_run(run);
        section.push_paragraph(para);
        section.push_paragraph(Paragraph::new(id(4), Some(id(0))));
        Document::from_sections(vec![section])
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert_eq!(doc.walk().count(), 0);
        assert_eq!(doc.plain_text(), "");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(sample().plain_text(), "Hello\n\n");
    }

    #[test]
    fn test_lookup_by_id() {
        let doc = sample();
        let text = doc.get(ElementId::new(3)).unwrap();
        assert_eq!(text.as_text().map(Text::text), Some("Hello"));

        let run = doc.parent(ElementId::new(3)).unwrap();
        assert_eq!(run.kind(), "run");
        assert_eq!(doc.parent(ElementId::new(2)).map(Element::kind), Some("paragraph"));
        assert!(doc.parent(ElementId::new(0)).is_none());
        assert!(doc.get(ElementId::new(42)).is_none());
    }

    #[test]
    fn test_json_tags_variants() {
        let json = sample().to_json_compact().unwrap();
        assert!(json.starts_with(r#"{"sections":[{"type":"section""#));
        assert!(json.contains(r#""type":"text""#));
        assert!(json.contains("Hello"));
    }
}
