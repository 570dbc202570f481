//! Prefix table and name matching.

use roxmltree::{Attribute, Node};
use std::collections::HashMap;

/// Prefixes usable in query paths and attribute names, each bound to one or
/// more namespace URIs.
///
/// The default table binds the WordprocessingML and DrawingML prefixes to
/// both their transitional and strict URIs.
#[derive(Debug, Clone)]
pub struct Namespaces {
    prefixes: HashMap<String, Vec<String>>,
}

impl Namespaces {
    /// An empty table; every prefix then matches the prefix declared in the
    /// document.
    pub fn empty() -> Self {
        Self {
            prefixes: HashMap::new(),
        }
    }

    /// The OOXML prefixes used by word-processing parts.
    pub fn ooxml() -> Self {
        let mut ns = Self::empty();
        ns.register("w", "http://schemas.openxmlformats.org/wordprocessingml/2006/main");
        ns.register("w", "http://purl.oclc.org/ooxml/wordprocessingml/main");
        ns.register("r", "http://schemas.openxmlformats.org/officeDocument/2006/relationships");
        ns.register("r", "http://purl.oclc.org/ooxml/officeDocument/relationships");
        ns.register("a", "http://schemas.openxmlformats.org/drawingml/2006/main");
        ns.register("a", "http://purl.oclc.org/ooxml/drawingml/main");
        ns.register(
            "wp",
            "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing",
        );
        ns.register("wp", "http://purl.oclc.org/ooxml/drawingml/wordprocessingDrawing");
        ns.register("pic", "http://schemas.openxmlformats.org/drawingml/2006/picture");
        ns.register("pic", "http://purl.oclc.org/ooxml/drawingml/picture");
        ns
    }

    /// Bind `prefix` to an additional namespace URI.
    pub fn register(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let uris = self.prefixes.entry(prefix.into()).or_default();
        let uri = uri.into();
        if !uris.contains(&uri) {
            uris.push(uri);
        }
    }

    /// URIs bound to `prefix`.
    pub fn uris(&self, prefix: &str) -> Option<&[String]> {
        self.prefixes.get(prefix).map(Vec::as_slice)
    }

    /// Whether an element matches a name test written as `prefix:local` or
    /// `local`.
    ///
    /// A registered prefix matches by namespace URI and local name. An
    /// unregistered prefix matches when the document binds that same prefix
    /// to the element's namespace. An unprefixed name matches on local name
    /// alone.
    pub fn element_matches(&self, node: &Node<'_, '_>, name: &str) -> bool {
        if !node.is_element() {
            return false;
        }
        let tag = node.tag_name();
        self.name_matches(node, tag.name(), tag.namespace(), name)
    }

    /// Same rules as [`Namespaces::element_matches`], applied to an attribute
    /// of `node`. Unprefixed attribute names only match attributes in no
    /// namespace.
    pub fn attribute_matches(&self, node: &Node<'_, '_>, attr: &Attribute<'_, '_>, name: &str) -> bool {
        match name.split_once(':') {
            Some(_) => self.name_matches(node, attr.name(), attr.namespace(), name),
            None => attr.namespace().is_none() && attr.name() == name,
        }
    }

    fn name_matches(
        &self,
        scope: &Node<'_, '_>,
        local: &str,
        namespace: Option<&str>,
        wanted: &str,
    ) -> bool {
        let Some((prefix, wanted_local)) = wanted.split_once(':') else {
            return local == wanted;
        };
        if local != wanted_local {
            return false;
        }
        match (self.uris(prefix), namespace) {
            (Some(uris), Some(ns)) => uris.iter().any(|uri| uri == ns),
            (None, Some(ns)) => scope.lookup_prefix(ns) == Some(prefix),
            (_, None) => false,
        }
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Self::ooxml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_registered_prefix_matches_by_uri() {
        let doc = Document::parse(
            r#"<x:p xmlns:x="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#,
        )
        .unwrap();
        let ns = Namespaces::ooxml();
        let root = doc.root_element();
        assert!(ns.element_matches(&root, "w:p"));
        assert!(!ns.element_matches(&root, "w:r"));
        assert!(ns.element_matches(&root, "p"));
    }

    #[test]
    fn test_strict_uri_matches() {
        let doc = Document::parse(
            r#"<w:p xmlns:w="http://purl.oclc.org/ooxml/wordprocessingml/main"/>"#,
        )
        .unwrap();
        assert!(Namespaces::ooxml().element_matches(&doc.root_element(), "w:p"));
    }

    #[test]
    fn test_unregistered_prefix_matches_declared_prefix() {
        let doc = Document::parse(r#"<v:shape xmlns:v="urn:schemas-microsoft-com:vml" v:id="s1"/>"#)
            .unwrap();
        let root = doc.root_element();
        let ns = Namespaces::ooxml();
        assert!(ns.element_matches(&root, "v:shape"));
        assert!(!ns.element_matches(&root, "o:shape"));

        let attr = root.attributes().next().unwrap();
        assert!(ns.attribute_matches(&root, &attr, "v:id"));
        assert!(!ns.attribute_matches(&root, &attr, "id"));
    }

    #[test]
    fn test_foreign_namespace_does_not_match() {
        let doc = Document::parse(r#"<w:p xmlns:w="urn:other"/>"#).unwrap();
        let root = doc.root_element();
        assert!(!Namespaces::ooxml().element_matches(&root, "w:p"));
        assert!(Namespaces::empty().element_matches(&root, "w:p"));
    }

    #[test]
    fn test_unprefixed_attribute() {
        let doc = Document::parse(r#"<Relationship Id="rId1" Target="a.xml"/>"#).unwrap();
        let root = doc.root_element();
        let ns = Namespaces::ooxml();
        let id = root.attributes().next().unwrap();
        assert!(ns.attribute_matches(&root, &id, "Id"));
        assert!(!ns.attribute_matches(&root, &id, "Target"));
        assert!(!ns.element_matches(&root, "w:Relationship"));
    }
}
