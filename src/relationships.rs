//! Package relationship resolution.
//!
//! Reads `_rels/.rels` and every `word/_rels/*.rels` part into a
//! [`RelationshipTable`] keyed by owning part name (`"main"` for the package
//! itself, `"document"` for `word/document.xml`, and so on).

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use crate::xml::XmlReader;
use serde::Serialize;
use std::collections::BTreeMap;

/// Table key for the package-level relationships.
pub const MAIN_PART: &str = "main";

/// Table key for the main document part's relationships.
pub const DOCUMENT_PART: &str = "document";

/// Location of the package-level relationship part.
pub const PACKAGE_RELS: &str = "_rels/.rels";

/// Folder holding the word-processing parts.
pub const WORD_DIR: &str = "word/";

/// Relationship type prefixes stripped from `Type`.
const TYPE_PREFIXES: [&str; 3] = [
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/",
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/",
    "http://purl.oclc.org/ooxml/officeDocument/relationships/",
];

/// One resolved relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    /// Relationship ID (e.g. "rId1")
    pub id: String,
    /// Relationship type with the known namespace prefix removed
    /// (e.g. "image", "styles")
    #[serde(rename = "type")]
    pub rel_type: String,
    /// Package entry for internal targets; the URI as written for external ones
    pub target: String,
    /// Target as written with a trailing `.xml` removed
    pub doc_part: String,
    /// Whether `TargetMode="External"`
    pub external: bool,
}

/// Relationships of one owning part, ordered by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PartRelationships {
    by_id: BTreeMap<String, Relationship>,
}

impl PartRelationships {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Relationships in lexicographic ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.by_id.values()
    }

    /// Relationships whose stripped type equals `rel_type`.
    pub fn by_type(&self, rel_type: &str) -> Vec<&Relationship> {
        self.iter().filter(|r| r.rel_type == rel_type).collect()
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether there are no relationships.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Add a relationship, replacing any earlier one with the same ID.
    pub fn add(&mut self, rel: Relationship) {
        if let Some(previous) = self.by_id.insert(rel.id.clone(), rel) {
            log::debug!("duplicate relationship id {}, keeping the later entry", previous.id);
        }
    }
}

/// All relationship parts of a package, keyed by owning part name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RelationshipTable {
    parts: BTreeMap<String, PartRelationships>,
}

impl RelationshipTable {
    /// Relationships owned by `part`.
    pub fn part(&self, part: &str) -> Option<&PartRelationships> {
        self.parts.get(part)
    }

    /// Look up one relationship.
    pub fn get(&self, part: &str, id: &str) -> Option<&Relationship> {
        self.part(part).and_then(|rels| rels.get(id))
    }

    /// Parts in name order.
    pub fn parts(&self) -> impl Iterator<Item = (&str, &PartRelationships)> {
        self.parts.iter().map(|(name, rels)| (name.as_str(), rels))
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether no part was read.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn insert(&mut self, part: impl Into<String>, rels: PartRelationships) {
        self.parts.insert(part.into(), rels);
    }
}

/// Builds a [`RelationshipTable`] from an opened package.
pub struct RelationshipResolver<'c> {
    container: &'c OoxmlContainer,
    strict: bool,
}

impl<'c> RelationshipResolver<'c> {
    /// Create a resolver that tolerates malformed relationship parts.
    pub fn new(container: &'c OoxmlContainer) -> Self {
        Self {
            container,
            strict: false,
        }
    }

    /// Fail on a malformed relationship part instead of skipping it.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Read every relationship part.
    pub fn resolve(&self) -> Result<RelationshipTable> {
        let mut table = RelationshipTable::default();
        table.insert(MAIN_PART, self.read_part(PACKAGE_RELS, "")?);

        let rels_dir = format!("{}_rels/", WORD_DIR);
        let mut entries = self.container.list_files_with_prefix(&rels_dir);
        entries.sort();

        for entry in entries {
            let Some(part) = owning_part_name(&entry, &rels_dir) else {
                continue;
            };
            let rels = self.read_part(&entry, WORD_DIR)?;
            log::debug!("{}: {} relationships", part, rels.len());
            table.insert(part, rels);
        }

        Ok(table)
    }

    fn read_part(&self, entry: &str, dir: &str) -> Result<PartRelationships> {
        let xml = match self.container.read_xml(entry) {
            Ok(xml) => xml,
            Err(Error::MissingComponent(_)) => return Ok(PartRelationships::new()),
            Err(e) => return Err(e),
        };

        let mut reader = XmlReader::new();
        match reader.load_from_str(&xml) {
            Ok(_) => {}
            Err(Error::XmlParse(msg)) if !self.strict => {
                log::warn!("skipping malformed relationship part {}: {}", entry, msg);
                return Ok(PartRelationships::new());
            }
            Err(e) => return Err(e),
        }
        Ok(parse_relationships(&reader, dir))
    }
}

/// Derive the owning part name from a relationship entry name.
///
/// `word/_rels/document.xml.rels` owns `document`; directories and entries
/// that are not `.rels` files own nothing.
fn owning_part_name(entry: &str, rels_dir: &str) -> Option<String> {
    let name = entry.strip_prefix(rels_dir)?;
    if name.is_empty() || name.ends_with('/') {
        return None;
    }
    let part = name
        .strip_suffix(".xml.rels")
        .or_else(|| name.strip_suffix(".rels"))?;
    Some(part.to_string())
}

/// Read the relationship elements of a loaded `.rels` document.
///
/// Internal targets are resolved against `dir`; external targets are kept
/// as written.
pub fn parse_relationships(reader: &XmlReader<'_>, dir: &str) -> PartRelationships {
    let mut rels = PartRelationships::new();

    for node in reader.query("*", None) {
        let Some(id) = reader.attribute("Id", Some(node), None) else {
            log::debug!("skipping relationship without Id");
            continue;
        };

        let rel_type = reader.attribute("Type", Some(node), None).unwrap_or_default();
        let raw_target = reader.attribute("Target", Some(node), None).unwrap_or_default();
        let external = reader
            .attribute("TargetMode", Some(node), None)
            .is_some_and(|mode| mode == "External");

        let doc_part = raw_target
            .strip_suffix(".xml")
            .unwrap_or(raw_target.as_str())
            .to_string();
        let target = if external {
            raw_target
        } else {
            OoxmlContainer::resolve_path(dir, &raw_target)
        };

        rels.add(Relationship {
            id,
            rel_type: strip_type_prefix(&rel_type).to_string(),
            target,
            doc_part,
            external,
        });
    }

    rels
}

/// Remove a known namespace prefix from a relationship type URI.
pub fn strip_type_prefix(rel_type: &str) -> &str {
    TYPE_PREFIXES
        .iter()
        .find_map(|prefix| rel_type.strip_prefix(prefix))
        .unwrap_or(rel_type)
}
