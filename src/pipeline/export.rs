use chrono::{Local, NaiveDateTime};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{pdf, Cleaner};
use crate::error::{CleanerError, Result};
use crate::state::data::{ExportFormat, ExportTarget, SourceReference};
use crate::state::settings::CleanupSettings;
use crate::tools::invoker::run_checked;
use crate::tools::{imagemagick, ocr, ScratchSlot, ToolRunner};

/// Suffix of generated names for documents without a reusable file name
pub const FALLBACK_SUFFIX: &str = "document-cleaner";

/// Asks the user where to save. `None` means the dialog was cancelled.
pub trait SavePrompt {
    fn save_path(&self, suggested_name: &str, format: ExportFormat) -> Option<PathBuf>;
}

/// What an export call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(ExportTarget),
    /// The user closed the save dialog
    Cancelled,
    /// Nothing loaded, or OCR unavailable; no prompt was shown
    Skipped,
}

/// Default file name for an export.
///
/// A document opened from disk keeps its stem (`/x/scan.png` → `scan.jpg`).
/// Dropped documents get `<YYYYMMDDHHmm>_document-cleaner.<ext>`, which
/// sorts chronologically.
pub fn suggested_name_at(source: Option<&SourceReference>, extension: &str, now: NaiveDateTime) -> String {
    let stem = source
        .and_then(SourceReference::stable_path)
        .and_then(Path::file_stem)
        .map(|s| s.to_string_lossy().into_owned());

    let base = stem.unwrap_or_else(|| format!("{}_{}", now.format("%Y%m%d%H%M"), FALLBACK_SUFFIX));
    format!("{}.{}", base, extension)
}

/// `scan.pdf` → `scan.txt`; anything not ending in `.pdf` gets `.txt` appended
pub fn sidecar_text_path(pdf_path: &Path) -> PathBuf {
    if pdf_path.extension().is_some_and(|ext| ext == "pdf") {
        return pdf_path.with_extension("txt");
    }
    let mut name = OsString::from(pdf_path.as_os_str());
    name.push(".txt");
    PathBuf::from(name)
}

/// Add `extension` when the user typed a bare name into the dialog
fn with_default_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(extension)
    }
}

fn write_jpeg(image: &image::DynamicImage, path: &Path) -> Result<()> {
    // JPEG has no alpha channel
    image
        .to_rgb8()
        .save_with_format(path, image::ImageFormat::Jpeg)
        .map_err(|source| CleanerError::Export {
            path: path.to_path_buf(),
            source,
        })
}

impl<R: ToolRunner> Cleaner<R> {
    pub fn suggested_name(&self, extension: &str) -> String {
        suggested_name_at(self.session.source(), extension, Local::now().naive_local())
    }

    /// Save the working copy as JPEG or as a 150 DPI PDF. No external tool
    /// is involved.
    pub fn export_image(&self, format: ExportFormat, prompt: &dyn SavePrompt) -> Result<ExportOutcome> {
        let Some(working) = self.session.working() else {
            return Ok(ExportOutcome::Skipped);
        };

        let suggested_name = self.suggested_name(format.extension());
        let Some(path) = prompt.save_path(&suggested_name, format) else {
            debug!("save dialog cancelled");
            return Ok(ExportOutcome::Cancelled);
        };
        let path = with_default_extension(path, format.extension());

        match format {
            ExportFormat::Jpeg => write_jpeg(working, &path)?,
            ExportFormat::Pdf => pdf::write_image_pdf(working, &path, pdf::EXPORT_DPI)?,
        }
        info!("💾 Saved {:?} to {}", format, path.display());

        Ok(ExportOutcome::Written(ExportTarget {
            suggested_name,
            path,
            format,
            sidecar: None,
        }))
    }

    /// Write a searchable PDF plus a `.txt` sidecar with the recognized text.
    ///
    /// Skipped without prompting when nothing is loaded or OCR was found
    /// unavailable at startup. Both intermediate scratch files are released
    /// on every path out of here.
    pub fn export_with_ocr(&mut self, settings: &CleanupSettings, prompt: &dyn SavePrompt) -> Result<ExportOutcome> {
        if !self.ocr.is_available() {
            debug!("OCR export skipped: {:?}", self.ocr);
            return Ok(ExportOutcome::Skipped);
        }
        let Some(working) = self.session.working() else {
            return Ok(ExportOutcome::Skipped);
        };

        let suggested_name = self.suggested_name("pdf");
        let Some(path) = prompt.save_path(&suggested_name, ExportFormat::Pdf) else {
            debug!("save dialog cancelled");
            return Ok(ExportOutcome::Cancelled);
        };
        let path = with_default_extension(path, "pdf");
        let language = settings.ocr_language;

        let image = self.workspace.stage(ScratchSlot::OcrInput, working)?;
        let base = self.workspace.acquire(ScratchSlot::OcrBase);

        run_checked(
            &self.runner,
            &imagemagick::image_to_pdf(&self.tools.convert, image.path(), base.path()),
        )?;
        if !base.exists() {
            return Err(CleanerError::MissingOutput {
                tool: self.tools.convert.clone(),
                path: base.path().to_path_buf(),
            });
        }

        run_checked(
            &self.runner,
            &ocr::searchable_pdf(&self.tools.ocrmypdf, language, base.path(), &path),
        )?;

        let text = run_checked(
            &self.runner,
            &ocr::extract_text(&self.tools.tesseract, image.path(), language),
        )?;
        let sidecar = sidecar_text_path(&path);
        fs::write(&sidecar, &text.stdout)?;

        info!(
            "🔎 Saved searchable PDF to {} (text: {}, language: {})",
            path.display(),
            sidecar.display(),
            language.code()
        );

        Ok(ExportOutcome::Written(ExportTarget {
            suggested_name,
            path,
            format: ExportFormat::Pdf,
            sidecar: Some(sidecar),
        }))
    }
}
