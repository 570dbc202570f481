//! Reader configuration.

/// Options for reading documents.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Read embedded pictures to record their format and dimensions
    pub probe_images: bool,

    /// Fail on a malformed relationship part instead of skipping it
    pub strict_relationships: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            probe_images: true,
            strict_relationships: false,
        }
    }
}

impl ReaderOptions {
    /// Create default reader options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable picture probing.
    pub fn with_probe_images(mut self, probe: bool) -> Self {
        self.probe_images = probe;
        self
    }

    /// Enable or disable strict relationship parsing.
    pub fn with_strict_relationships(mut self, strict: bool) -> Self {
        self.strict_relationships = strict;
        self
    }
}
