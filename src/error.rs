//! Error types for the docxtree library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docxtree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a package.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The package file does not exist.
    #[error("Document file {} not found", .0.display())]
    SourceNotFound(PathBuf),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required package entry is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// A query expression outside the supported path subset.
    #[error("Invalid path expression: {0}")]
    InvalidPath(String),

    /// An image whose relationship ID has no matching relationship.
    #[error("Unresolved relationship: {0}")]
    UnresolvedRelationship(String),

    /// An image that links to a resource outside the package.
    #[error("External target cannot be read from the package: {0}")]
    ExternalTarget(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
