//! Embedded picture model.

use super::ElementId;
use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use serde::Serialize;
use std::io::Cursor;
use std::path::PathBuf;

/// Where the bytes of a picture live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ImageTarget {
    /// An entry inside the package file.
    Package {
        /// Path of the package on disk
        package: PathBuf,
        /// Archive entry (e.g. "word/media/image1.png")
        entry: String,
    },
    /// A linked resource outside the package.
    External {
        /// URI as written in the relationship
        uri: String,
    },
}

impl ImageTarget {
    /// The final path segment of the target.
    pub fn file_name(&self) -> &str {
        let path = match self {
            ImageTarget::Package { entry, .. } => entry.as_str(),
            ImageTarget::External { uri } => uri.as_str(),
        };
        path.rsplit('/').next().unwrap_or(path)
    }
}

impl std::fmt::Display for ImageTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageTarget::Package { package, entry } => {
                write!(f, "zip://{}#{}", package.display(), entry)
            }
            ImageTarget::External { uri } => f.write_str(uri),
        }
    }
}

/// Format and pixel dimensions, when the picture could be probed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ImageMetadata {
    /// Guess the format from the data and read the dimensions from its
    /// header. Returns `None` for data the `image` crate cannot identify,
    /// such as EMF/WMF.
    pub fn probe(data: &[u8]) -> Option<Self> {
        let reader = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .ok()?;
        let format = reader.format()?;
        let (width, height) = reader.into_dimensions().ok()?;

        Some(Self {
            mime_type: Some(format.to_mime_type().to_string()),
            width: Some(width),
            height: Some(height),
        })
    }

    /// Whether nothing is known about the picture.
    pub fn is_empty(&self) -> bool {
        self.mime_type.is_none() && self.width.is_none() && self.height.is_none()
    }
}

/// A picture referenced from a run through a relationship ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    id: ElementId,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<ElementId>,
    rel_id: String,
    target: Option<ImageTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "ImageMetadata::is_empty")]
    metadata: ImageMetadata,
}

impl Image {
    /// Create a picture. `target` is `None` when the relationship ID did not
    /// resolve.
    pub fn new(
        id: ElementId,
        parent: Option<ElementId>,
        rel_id: impl Into<String>,
        target: Option<ImageTarget>,
    ) -> Self {
        let name = target.as_ref().map(|t| t.file_name().to_string());
        Self {
            id,
            parent,
            rel_id: rel_id.into(),
            target,
            name,
            metadata: ImageMetadata::default(),
        }
    }

    /// Attach probed metadata.
    pub fn with_metadata(mut self, metadata: ImageMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Relationship ID from the `r:embed` attribute.
    pub fn rel_id(&self) -> &str {
        &self.rel_id
    }

    /// Resolved location, or `None` if the relationship was missing.
    pub fn target(&self) -> Option<&ImageTarget> {
        self.target.as_ref()
    }

    /// Whether the relationship ID resolved.
    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }

    /// File name of the target (e.g. "image1.png").
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.metadata.mime_type.as_deref()
    }

    pub fn width(&self) -> Option<u32> {
        self.metadata.width
    }

    pub fn height(&self) -> Option<u32> {
        self.metadata.height
    }

    /// Read the picture bytes from the package.
    ///
    /// Fails with [`Error::UnresolvedRelationship`] when the relationship ID
    /// never resolved and with [`Error::ExternalTarget`] for linked pictures.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.target {
            Some(ImageTarget::Package { package, entry }) => {
                OoxmlContainer::open(package)?.read_binary(entry)
            }
            Some(ImageTarget::External { uri }) => Err(Error::ExternalTarget(uri.clone())),
            None => Err(Error::UnresolvedRelationship(self.rel_id.clone())),
        }
    }
}

impl std::fmt::Display for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.target {
            Some(target) => write!(f, "<image:{}:{}>", self.rel_id, target),
            None => write!(f, "<image:{}:>", self.rel_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut data = Vec::new();
        image::RgbImage::new(width, height)
            .write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
            .unwrap();
        data
    }

    #[test]
    fn test_png_metadata() {
        let meta = ImageMetadata::probe(&png(3, 2)).unwrap();
        assert_eq!(meta.mime_type.as_deref(), Some("image/png"));
        assert_eq!(meta.width, Some(3));
        assert_eq!(meta.height, Some(2));
    }

    #[test]
    fn test_unrecognized_bytes_have_no_metadata() {
        assert!(ImageMetadata::probe(b"not an image").is_none());
        assert!(ImageMetadata::probe(&[]).is_none());
    }

    #[test]
    fn test_target_display_and_name() {
        let target = ImageTarget::Package {
            package: PathBuf::from("/tmp/report.docx"),
            entry: "word/media/image1.png".to_string(),
        };
        assert_eq!(target.to_string(), "zip:///tmp/report.docx#word/media/image1.png");
        assert_eq!(target.file_name(), "image1.png");

        let external = ImageTarget::External {
            uri: "https://example.com/pics/cat.gif".to_string(),
        };
        assert_eq!(external.file_name(), "cat.gif");
    }

    #[test]
    fn test_unresolved_image() {
        let image = Image::new(ElementId::new(4), Some(ElementId::new(3)), "rId99", None);
        assert!(!image.is_resolved());
        assert_eq!(image.name(), None);
        assert!(image.metadata().is_empty());
        assert_eq!(image.to_string(), "<image:rId99:>");
        assert!(matches!(
            image.read_bytes(),
            Err(Error::UnresolvedRelationship(ref id)) if id == "rId99"
        ));
    }

    #[test]
    fn test_external_image_bytes_refused() {
        let image = Image::new(
            ElementId::new(0),
            None,
            "rId2",
            Some(ImageTarget::External {
                uri: "https://example.com/a.png".to_string(),
            }),
        );
        assert_eq!(image.name(), Some("a.png"));
        assert!(matches!(image.read_bytes(), Err(Error::ExternalTarget(_))));
    }
}
