//! # docxtree
//!
//! Reads Word (`.docx`) packages into a navigable element tree.
//!
//! The package relationships are resolved first, then `word/document.xml`
//! is walked into sections, paragraphs, runs, text spans and pictures.
//! Picture references are followed through the relationship table to the
//! entry that holds the bytes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docxtree::Reader;
//!
//! let reader = Reader::open("report.docx")?;
//! let doc = reader.document();
//!
//! for (depth, element) in doc.walk() {
//!     println!("{}{}", "  ".repeat(depth), element);
//! }
//!
//! for section in doc.sections() {
//!     for para in section.paragraphs() {
//!         println!("[{}] {}", para.style_name().unwrap_or("-"), para.text());
//!     }
//! }
//! # Ok::<(), docxtree::Error>(())
//! ```
//!
//! ## Pictures
//!
//! ```no_run
//! let doc = docxtree::read_document("report.docx")?;
//! for (_, element) in doc.walk() {
//!     if let Some(image) = element.as_image() {
//!         let bytes = image.read_bytes()?;
//!         println!("{} {:?} {} bytes", image.rel_id(), image.mime_type(), bytes.len());
//!     }
//! }
//! # Ok::<(), docxtree::Error>(())
//! ```

pub mod container;
pub mod docx;
pub mod error;
pub mod iter;
pub mod model;
pub mod relationships;
pub mod xml;

// Re-exports
pub use container::OoxmlContainer;
pub use docx::{Reader, ReaderOptions};
pub use error::{Error, Result};
pub use iter::{Preorder, RecursiveElementsIterator};
pub use model::{
    Container, Document, Element, ElementId, Image, ImageMetadata, ImageTarget, Paragraph,
    ParagraphStyle, Run, Section, Text,
};
pub use relationships::{PartRelationships, Relationship, RelationshipResolver, RelationshipTable};

use std::path::Path;

/// Read a document with default options.
///
/// # Example
///
/// ```no_run
/// let doc = docxtree::read_document("document.docx")?;
/// println!("{}", doc.plain_text());
/// # Ok::<(), docxtree::Error>(())
/// ```
pub fn read_document(path: impl AsRef<Path>) -> Result<Document> {
    Ok(Reader::open(path)?.into_document())
}

/// Extract the plain text of a document, one line per paragraph.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    Ok(read_document(path)?.plain_text())
}
