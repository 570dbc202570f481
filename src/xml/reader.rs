//! Path-query facade over one loaded XML document.

use super::names::Namespaces;
use super::path::XmlPath;
use crate::error::Result;
use roxmltree::{Document, Node};
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Compiled-path cache, created on the first query against a document.
#[derive(Debug, Default)]
struct QueryEngine {
    compiled: RefCell<HashMap<String, Rc<XmlPath>>>,
}

impl QueryEngine {
    fn compile(&self, expr: &str) -> Result<Rc<XmlPath>> {
        if let Some(path) = self.compiled.borrow().get(expr) {
            return Ok(Rc::clone(path));
        }
        let path = Rc::new(XmlPath::parse(expr)?);
        self.compiled
            .borrow_mut()
            .insert(expr.to_string(), Rc::clone(&path));
        Ok(path)
    }
}

/// Loads one XML document and answers path queries against it.
///
/// The reader borrows the source text; package parts are read with
/// [`OoxmlContainer::read_xml`](crate::container::OoxmlContainer::read_xml)
/// and then loaded.
///
/// Queries never fail: with no document loaded, an unsupported expression,
/// or a context node from another document, they return nothing.
///
/// # Example
///
/// ```
/// use docxtree::xml::XmlReader;
///
/// let xml = r#"<w:body xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
///   <w:p><w:pStyle w:val="Title"/></w:p>
/// </w:body>"#;
///
/// let mut reader = XmlReader::new();
/// reader.load_from_str(xml)?;
///
/// let paragraph = reader.query_one("w:p", None).unwrap();
/// assert_eq!(
///     reader.attribute("w:val", Some(paragraph), Some("w:pStyle")),
///     Some("Title".to_string())
/// );
/// # Ok::<(), docxtree::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct XmlReader<'input> {
    document: Option<Document<'input>>,
    namespaces: Namespaces,
    engine: OnceCell<QueryEngine>,
}

impl<'input> XmlReader<'input> {
    /// Create a reader using the OOXML prefix table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with a custom prefix table.
    pub fn with_namespaces(namespaces: Namespaces) -> Self {
        Self {
            namespaces,
            ..Self::default()
        }
    }

    /// Parse `xml` and make it the loaded document.
    pub fn load_from_str(&mut self, xml: &'input str) -> Result<&Document<'input>> {
        let document = Document::parse(xml)?;
        self.engine = OnceCell::new();
        Ok(self.document.insert(document))
    }

    /// The loaded document, if any.
    pub fn document(&self) -> Option<&Document<'input>> {
        self.document.as_ref()
    }

    /// The prefix table used for name matching.
    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// All nodes matching `path`, in document order.
    ///
    /// Without a context node the path is evaluated from the root element.
    pub fn query<'a>(
        &'a self,
        path: &str,
        context: Option<Node<'a, 'input>>,
    ) -> Vec<Node<'a, 'input>> {
        let Some(document) = self.document.as_ref() else {
            return Vec::new();
        };

        let context = match context {
            Some(node) if std::ptr::eq(node.document(), document) => node,
            Some(_) => {
                log::warn!("context node for `{}` belongs to another document", path);
                return Vec::new();
            }
            None => document.root_element(),
        };

        let engine = self.engine.get_or_init(QueryEngine::default);
        match engine.compile(path) {
            Ok(compiled) => compiled.evaluate(context, &self.namespaces),
            Err(e) => {
                log::warn!("{}", e);
                Vec::new()
            }
        }
    }

    /// The first node matching `path`.
    pub fn query_one<'a>(
        &'a self,
        path: &str,
        context: Option<Node<'a, 'input>>,
    ) -> Option<Node<'a, 'input>> {
        self.query(path, context).into_iter().next()
    }

    /// Whether anything matches `path`.
    pub fn exists<'a>(&'a self, path: &str, context: Option<Node<'a, 'input>>) -> bool {
        !self.query(path, context).is_empty()
    }

    /// Read an attribute, treating an empty value the same as a missing one.
    ///
    /// With `path`, the attribute is read from the first element matching the
    /// path under `context`; otherwise from `context` itself.
    pub fn attribute<'a>(
        &'a self,
        name: &str,
        context: Option<Node<'a, 'input>>,
        path: Option<&str>,
    ) -> Option<String> {
        let element = match path {
            Some(path) => self.query_one(path, context)?,
            None => context?,
        };

        element
            .attributes()
            .find(|attr| self.namespaces.attribute_matches(&element, attr, name))
            .map(|attr| attr.value())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Concatenated text of every text node under `node`.
    pub fn text(&self, node: Node<'_, '_>) -> String {
        node.descendants()
            .filter(Node::is_text)
            .filter_map(|n| n.text())
            .collect()
    }

    /// Whether `node` is an element with the given name.
    pub fn is_named(&self, node: &Node<'_, '_>, name: &str) -> bool {
        self.namespaces.element_matches(node, name)
    }
}
