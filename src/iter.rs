//! Depth-first traversal over the element tree.

use crate::model::{Container, Element};

/// A cursor over one container's children.
///
/// Descending with [`children`](Self::children) returns a fresh cursor and
/// leaves this one where it is, so each depth can be enumerated
/// independently.
///
/// ```
/// use docxtree::Document;
///
/// let doc = Document::default();
/// let mut it = doc.iter();
/// it.rewind();
/// assert!(!it.valid());
/// assert!(it.current().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveElementsIterator<'a> {
    elements: &'a [Element],
    cursor: usize,
}

impl<'a> RecursiveElementsIterator<'a> {
    /// Start at the first element of `elements`.
    pub fn new(elements: &'a [Element]) -> Self {
        Self {
            elements,
            cursor: 0,
        }
    }

    /// Iterate over a container's children.
    pub fn over(container: &'a dyn Container) -> Self {
        Self::new(container.elements())
    }

    /// The element under the cursor.
    pub fn current(&self) -> Option<&'a Element> {
        self.elements.get(self.cursor)
    }

    /// Position of the cursor in the sequence.
    pub fn key(&self) -> usize {
        self.cursor
    }

    /// Move to the next element.
    pub fn advance(&mut self) {
        if self.cursor < self.elements.len() {
            self.cursor += 1;
        }
    }

    /// Whether the cursor is on an element.
    pub fn valid(&self) -> bool {
        self.cursor < self.elements.len()
    }

    /// Move back to the first element.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Whether the current element is a container with at least one child.
    pub fn has_children(&self) -> bool {
        self.current()
            .and_then(Element::children)
            .is_some_and(|c| !c.is_empty())
    }

    /// A cursor over the current element's children, if it has any.
    pub fn children(&self) -> Option<RecursiveElementsIterator<'a>> {
        if !self.has_children() {
            return None;
        }
        self.current()
            .and_then(Element::children)
            .map(RecursiveElementsIterator::new)
    }
}

impl<'a> Iterator for RecursiveElementsIterator<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current()?;
        self.advance();
        Some(current)
    }
}

/// Preorder walk yielding `(depth, element)`, parents before children.
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    stack: Vec<RecursiveElementsIterator<'a>>,
}

impl<'a> Preorder<'a> {
    pub fn new(root: RecursiveElementsIterator<'a>) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (usize, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let top = self.stack.last_mut()?;
            if !top.valid() {
                self.stack.pop();
                continue;
            }

            let element = top.current()?;
            let children = top.children();
            top.advance();
            if let Some(children) = children {
                self.stack.push(children);
            }
            return Some((depth, element));
        }
    }
}
