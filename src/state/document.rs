use image::DynamicImage;
use std::path::Path;
use tracing::info;

use super::data::SourceReference;
use crate::error::{CleanerError, Result};

/// The decoded original image plus where it came from.
/// Never mutated; a new load replaces it.
#[derive(Debug, Clone)]
pub struct Document {
    pub image: DynamicImage,
    pub source: SourceReference,
}

/// Holds the loaded document and the working copy shown as "Modified".
///
/// Both are `None` until the first successful load. The working copy is
/// always a complete decoded image; transforms replace it wholesale.
#[derive(Debug, Default)]
pub struct DocumentSession {
    document: Option<Document>,
    working: Option<DynamicImage>,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `source` and make it the current document.
    ///
    /// On failure the previous document and working copy stay as they were.
    pub fn load(&mut self, source: SourceReference) -> Result<()> {
        let image = decode(source.path())?;

        info!(
            "📄 Loaded {} ({}x{}, dragged: {})",
            source.path().display(),
            image.width(),
            image.height(),
            source.is_dragged()
        );

        self.working = Some(image.clone());
        self.document = Some(Document { image, source });
        Ok(())
    }

    /// Throw away all applied transforms.
    /// Does nothing when no document is loaded.
    pub fn reload(&mut self) {
        if let Some(document) = &self.document {
            self.working = Some(document.image.clone());
        }
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn working(&self) -> Option<&DynamicImage> {
        self.working.as_ref()
    }

    pub fn source(&self) -> Option<&SourceReference> {
        self.document.as_ref().map(|d| &d.source)
    }

    /// Swap in a freshly collected tool result
    pub(crate) fn replace_working(&mut self, image: DynamicImage) {
        self.working = Some(image);
    }
}

fn decode(path: &Path) -> Result<DynamicImage> {
    // Sniff the content instead of trusting the extension
    image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.decode())
        .map_err(|source| CleanerError::Load {
            path: path.to_path_buf(),
            source,
        })
}
