//! Document element tree.
//!
//! A [`Document`] owns its [`Section`]s, which own paragraphs, runs, text
//! spans and pictures. Every node is an [`Element`]; the ones that hold
//! children implement [`Container`].

mod document;
mod element;
mod image;
mod paragraph;

pub use document::*;
pub use element::{Container, Element, ElementId};
pub(crate) use element::ElementIds;
pub use image::*;
pub use paragraph::*;
