//! Word document reader.

use super::ReaderOptions;
use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use crate::model::{
    Document, ElementId, ElementIds, Image, ImageMetadata, ImageTarget, Paragraph,
    ParagraphStyle, Run, Section, Text,
};
use crate::relationships::{RelationshipResolver, RelationshipTable, DOCUMENT_PART};
use crate::xml::XmlReader;
use roxmltree::Node;
use std::path::{Path, PathBuf};

/// Main document part inside the package.
pub const DOCUMENT_XML: &str = "word/document.xml";

/// Reads a `.docx` package into a [`Document`].
///
/// Reading happens once, in [`Reader::open`]: relationships are resolved
/// first, then the main document part is walked. The result is read-only.
#[derive(Debug)]
pub struct Reader {
    path: PathBuf,
    relationships: RelationshipTable,
    document: Document,
}

impl Reader {
    /// Read a document with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, &ReaderOptions::default())
    }

    /// Read a document.
    pub fn open_with_options(path: impl AsRef<Path>, options: &ReaderOptions) -> Result<Self> {
        let container = OoxmlContainer::open(path)?;

        let relationships = RelationshipResolver::new(&container)
            .strict(options.strict_relationships)
            .resolve()?;
        log::debug!(
            "{}: {} relationship parts",
            container.path().display(),
            relationships.len()
        );

        let document = DocumentWalker {
            container: &container,
            relationships: &relationships,
            options,
            ids: ElementIds::default(),
        }
        .walk()?;

        Ok(Self {
            path: container.path().to_path_buf(),
            relationships,
            document,
        })
    }

    /// The assembled document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Take ownership of the assembled document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Relationships of every part, keyed by owning part name.
    pub fn relationships(&self) -> &RelationshipTable {
        &self.relationships
    }

    /// Path of the package that was read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Builds the element tree from `word/document.xml`.
struct DocumentWalker<'r> {
    container: &'r OoxmlContainer,
    relationships: &'r RelationshipTable,
    options: &'r ReaderOptions,
    ids: ElementIds,
}

impl DocumentWalker<'_> {
    fn walk(mut self) -> Result<Document> {
        let source = match self.container.read_xml(DOCUMENT_XML) {
            Ok(source) => source,
            Err(Error::MissingComponent(_)) => {
                log::warn!(
                    "{} has no {}, returning an empty document",
                    self.container.path().display(),
                    DOCUMENT_XML
                );
                return Ok(Document::default());
            }
            Err(e) => return Err(e),
        };

        let mut xml = XmlReader::new();
        xml.load_from_str(&source)?;

        let Some(body) = xml.query_one("w:body", None) else {
            log::warn!("{} has no body", DOCUMENT_XML);
            return Ok(Document::default());
        };

        let mut section = Section::new(self.ids.next_id());
        for node in xml.query("*", Some(body)) {
            if xml.is_named(&node, "w:p") {
                let paragraph = self.build_paragraph(&xml, node, section.id());
                section.push_paragraph(paragraph);
            } else {
                log::trace!("skipping body element {}", node.tag_name().name());
            }
        }
        log::debug!("read {} paragraphs", section.paragraphs().count());

        Ok(Document::from_sections(vec![section]))
    }

    fn build_paragraph<'a, 'i>(
        &mut self,
        xml: &'a XmlReader<'i>,
        node: Node<'a, 'i>,
        parent: ElementId,
    ) -> Paragraph {
        let mut paragraph = Paragraph::new(self.ids.next_id(), Some(parent));

        if let Some(ppr) = xml.query_one("w:pPr", Some(node)) {
            paragraph.set_style(ParagraphStyle {
                style_name: xml.attribute("w:val", Some(ppr), Some("w:pStyle")),
            });
        }

        for run_node in xml.query("w:r", Some(node)) {
            let run = self.build_run(xml, run_node, paragraph.id());
            paragraph.push_run(run);
        }

        paragraph
    }

    fn build_run<'a, 'i>(&mut self, xml: &'a XmlReader<'i>, node: Node<'a, 'i>, parent: ElementId) -> Run {
        let mut run = Run::new(self.ids.next_id(), Some(parent));

        for child in xml.query("*", Some(node)) {
            if xml.is_named(&child, "w:t") {
                run.push_text(Text::new(self.ids.next_id(), Some(run.id()), xml.text(child)));
            } else if xml.is_named(&child, "w:drawing") {
                if let Some(image) = self.build_image(xml, child, run.id()) {
                    run.push_image(image);
                }
            } else if xml.is_named(&child, "w:rPr") {
                for prop in child.children().filter(Node::is_element) {
                    let value = xml
                        .attribute("w:val", Some(prop), None)
                        .unwrap_or_else(|| "true".to_string());
                    run.set_property(prop.tag_name().name(), value);
                }
            } else {
                log::trace!("skipping run element {}", child.tag_name().name());
            }
        }

        run
    }

    fn build_image<'a, 'i>(
        &mut self,
        xml: &'a XmlReader<'i>,
        drawing: Node<'a, 'i>,
        parent: ElementId,
    ) -> Option<Image> {
        let Some(blip) = xml.query_one(".//*[local-name() = \"blip\"]", Some(drawing)) else {
            log::debug!("drawing without a picture reference, skipped");
            return None;
        };

        let rel_id = xml.attribute("r:embed", Some(blip), None).unwrap_or_default();
        let target = match self.relationships.get(DOCUMENT_PART, &rel_id) {
            Some(rel) if rel.external => Some(ImageTarget::External {
                uri: rel.target.clone(),
            }),
            Some(rel) => Some(ImageTarget::Package {
                package: self.container.path().to_path_buf(),
                entry: rel.target.clone(),
            }),
            None => {
                log::warn!("image relationship {:?} not found", rel_id);
                None
            }
        };

        let mut image = Image::new(self.ids.next_id(), Some(parent), rel_id, target);
        if self.options.probe_images {
            if let Some(metadata) = self.probe(&image) {
                image = image.with_metadata(metadata);
            }
        }
        Some(image)
    }

    fn probe(&self, image: &Image) -> Option<ImageMetadata> {
        let Some(ImageTarget::Package { entry, .. }) = image.target() else {
            return None;
        };
        let data = match self.container.read_binary(entry) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("cannot read image {}: {}", entry, e);
                return None;
            }
        };
        let metadata = ImageMetadata::probe(&data);
        if metadata.is_none() {
            log::warn!("unrecognized image format in {}", entry);
        }
        metadata
    }
}
