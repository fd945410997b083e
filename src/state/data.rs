/// Shared data structures for the application state
///
/// These structs describe where a document came from, what the user asked
/// the image tool to do, and where an export ended up.
use std::path::{Path, PathBuf};

use super::settings::{DeskewLevel, ThresholdLevel};

/// Where the loaded document came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceReference {
    /// Picked through the open dialog or passed on the command line
    Opened(PathBuf),
    /// Dropped onto the window; the name is not reused for exports
    Dropped(PathBuf),
}

impl SourceReference {
    pub fn path(&self) -> &Path {
        match self {
            Self::Opened(path) | Self::Dropped(path) => path,
        }
    }

    pub fn is_dragged(&self) -> bool {
        matches!(self, Self::Dropped(_))
    }

    /// The path to derive export names from, if any
    pub fn stable_path(&self) -> Option<&Path> {
        match self {
            Self::Opened(path) => Some(path),
            Self::Dropped(_) => None,
        }
    }
}

/// Transform kinds the image tool can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Threshold,
    Deskew,
    Crop,
}

/// One button click worth of work for the image tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformRequest {
    pub kind: TransformKind,
    /// Percentage for threshold/deskew, `None` for crop
    pub parameter: Option<u8>,
}

impl TransformRequest {
    pub fn threshold(level: ThresholdLevel) -> Self {
        Self {
            kind: TransformKind::Threshold,
            parameter: Some(level.percent()),
        }
    }

    pub fn deskew(level: DeskewLevel) -> Self {
        Self {
            kind: TransformKind::Deskew,
            parameter: Some(level.percent()),
        }
    }

    pub fn crop() -> Self {
        Self {
            kind: TransformKind::Crop,
            parameter: None,
        }
    }

    /// Parameter rendered the way ImageMagick expects it ("60%")
    pub fn parameter_arg(&self) -> Option<String> {
        self.parameter.map(|p| format!("{}%", p))
    }
}

/// File formats the save buttons produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Jpeg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }

    /// Label for the save dialog filter
    pub fn filter_name(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG Image",
            Self::Pdf => "PDF Document",
        }
    }
}

/// Where an export was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub suggested_name: String,
    pub path: PathBuf,
    pub format: ExportFormat,
    /// OCR text written next to a searchable PDF; `None` for plain exports
    pub sidecar: Option<PathBuf>,
}
