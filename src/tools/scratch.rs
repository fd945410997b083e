//! Scratch files handed to and read back from external tools.
//!
//! Each slot has a fixed, well-known file name inside the workspace
//! directory. A `ScratchFile` guard deletes its file when dropped, so every
//! exit path of an invocation (success, tool failure, early `?`) cleans up.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use tracing::{debug, warn};

use crate::error::{CleanerError, Result};

/// One scratch file per role in an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScratchSlot {
    TransformInput,
    TransformOutput,
    OcrInput,
    OcrBase,
}

impl ScratchSlot {
    pub const ALL: [ScratchSlot; 4] = [
        Self::TransformInput,
        Self::TransformOutput,
        Self::OcrInput,
        Self::OcrBase,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::TransformInput => "_temp_input.png",
            Self::TransformOutput => "_temp_output.png",
            Self::OcrInput => "_ocr_input.png",
            Self::OcrBase => "_ocr_base.pdf",
        }
    }
}

/// Directory that holds the scratch files
#[derive(Debug, Clone)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, slot: ScratchSlot) -> PathBuf {
        self.dir.join(slot.file_name())
    }

    /// Remove whatever an earlier, crashed run left in any slot
    pub fn sweep(&self) {
        let paths: Vec<PathBuf> = ScratchSlot::ALL.iter().map(|slot| self.path_for(*slot)).collect();
        cleanup(&paths);
    }

    /// Claim a slot. Any file left at that path by a crashed run is removed
    /// first so a stale result can never be collected.
    pub fn acquire(&self, slot: ScratchSlot) -> ScratchFile {
        let path = self.path_for(slot);
        remove_if_present(&path);
        ScratchFile { path }
    }

    /// Write `image` as PNG into `slot`.
    ///
    /// The guard exists before the write starts, so even a half-written
    /// file is removed if encoding fails.
    pub fn stage(&self, slot: ScratchSlot, image: &DynamicImage) -> Result<ScratchFile> {
        let file = self.acquire(slot);
        image
            .save_with_format(file.path(), ImageFormat::Png)
            .map_err(|source| CleanerError::Stage {
                path: file.path().to_path_buf(),
                source,
            })?;
        debug!("staged {}", file.path().display());
        Ok(file)
    }
}

/// Owns one scratch path for the length of an invocation
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        remove_if_present(&self.path);
    }
}

/// Decode a tool's output completely into memory.
///
/// Nothing keeps a handle on the file afterwards, so the guard can delete
/// it right away.
pub fn collect(file: &ScratchFile, tool: &str) -> Result<DynamicImage> {
    if !file.exists() {
        return Err(CleanerError::MissingOutput {
            tool: tool.to_string(),
            path: file.path().to_path_buf(),
        });
    }

    image::open(file.path()).map_err(|source| CleanerError::Collect {
        path: file.path().to_path_buf(),
        source,
    })
}

/// Remove the listed files, ignoring any that are already gone
pub fn cleanup<P: AsRef<Path>>(paths: &[P]) {
    for path in paths {
        remove_if_present(path.as_ref());
    }
}

fn remove_if_present(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("removed scratch file {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("could not remove scratch file {}: {}", path.display(), e),
    }
}
