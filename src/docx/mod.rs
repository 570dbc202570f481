//! DOCX (Word) document reader.
//!
//! [`Reader`] resolves the package relationships and walks
//! `word/document.xml` into the element tree.

mod options;
mod reader;

pub use options::ReaderOptions;
pub use reader::{Reader, DOCUMENT_XML};
