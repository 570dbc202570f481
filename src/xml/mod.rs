//! XML loading and path queries.
//!
//! Parts are parsed with `roxmltree` and queried through [`XmlReader`] with a
//! restricted path language (see [`XmlPath`]).

mod names;
mod path;
mod reader;

pub use names::Namespaces;
pub use path::XmlPath;
pub use reader::XmlReader;
pub use roxmltree::{Document as XmlDocument, Node as XmlNode};
