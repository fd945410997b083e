//! OCR tooling: `ocrmypdf` for searchable PDFs, `tesseract` for plain text,
//! and the startup check that decides whether OCR export is offered at all.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use super::invoker::{run_checked, Invocation, ToolRunner};
use crate::config::ToolConfig;
use crate::error::CleanerError;
use crate::state::settings::OcrLanguage;

/// `ocrmypdf --skip-text -l <lang> <input.pdf> <output.pdf>`
///
/// `--skip-text` leaves pages that already carry text alone and adds an
/// invisible text layer to the rest.
pub fn searchable_pdf(program: &str, language: OcrLanguage, input: &Path, output: &Path) -> Invocation {
    Invocation::new(program)
        .args(["--skip-text", "-l", language.code()])
        .arg(input)
        .arg(output)
}

/// `tesseract <image> stdout -l <lang>`
pub fn extract_text(program: &str, image: &Path, language: OcrLanguage) -> Invocation {
    Invocation::new(program)
        .arg(image)
        .args(["stdout", "-l", language.code()])
}

pub fn list_languages(program: &str) -> Invocation {
    Invocation::new(program).arg("--list-langs")
}

/// Parse `tesseract --list-langs` output.
///
/// The first line is a header ("List of available languages in ..."); the
/// remaining non-empty lines are traineddata names.
pub fn parse_language_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("List of available languages"))
        .map(str::to_string)
        .collect()
}

/// Required languages absent from `installed`, in picker order.
/// Codes tesseract knows but the picker doesn't offer (`osd`, `fra`) are ignored.
pub fn missing_languages(installed: &[String]) -> Vec<OcrLanguage> {
    let known: Vec<OcrLanguage> = installed
        .iter()
        .filter_map(|code| OcrLanguage::from_code(code))
        .collect();

    OcrLanguage::REQUIRED
        .iter()
        .copied()
        .filter(|lang| !known.contains(lang))
        .collect()
}

/// Why OCR export is switched off for this session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrUnavailable {
    MissingTool { tool: String, reason: String },
    MissingLanguages(Vec<OcrLanguage>),
}

impl OcrUnavailable {
    /// Dialog title for the startup warning
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingTool { .. } => "OCR not available",
            Self::MissingLanguages(_) => "Missing languages",
        }
    }
}

impl fmt::Display for OcrUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTool { tool, reason } => write!(f, "{} not available: {}", tool, reason),
            Self::MissingLanguages(missing) => {
                let codes: Vec<&str> = missing.iter().map(|l| l.code()).collect();
                let packages: Vec<String> = codes
                    .iter()
                    .map(|code| format!("tesseract-ocr-{}", code))
                    .collect();
                write!(
                    f,
                    "Following OCR languages are not installed: {}\n\nInstall with:\nsudo apt install {}",
                    codes.join(", "),
                    packages.join(" ")
                )
            }
        }
    }
}

/// Result of the one-time startup probe
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OcrAvailability {
    #[default]
    Unchecked,
    Unavailable(OcrUnavailable),
    Available,
}

impl OcrAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Check tesseract, its language packs, then ocrmypdf.
    pub fn probe<R: ToolRunner + ?Sized>(runner: &R, tools: &ToolConfig) -> Self {
        let availability = match probe_inner(runner, tools) {
            Ok(()) => Self::Available,
            Err(reason) => Self::Unavailable(reason),
        };

        match &availability {
            Self::Available => info!("🔤 OCR available ({})", tools.tesseract),
            Self::Unavailable(reason) => warn!("OCR disabled: {}", reason),
            Self::Unchecked => {}
        }

        availability
    }
}

fn probe_inner<R: ToolRunner + ?Sized>(runner: &R, tools: &ToolConfig) -> Result<(), OcrUnavailable> {
    let output = run_checked(runner, &list_languages(&tools.tesseract))
        .map_err(|e| missing_tool(&tools.tesseract, e))?;

    let installed = parse_language_list(&output.combined_text());
    let missing = missing_languages(&installed);
    if !missing.is_empty() {
        return Err(OcrUnavailable::MissingLanguages(missing));
    }

    run_checked(runner, &Invocation::new(tools.ocrmypdf.as_str()).arg("--version"))
        .map_err(|e| missing_tool(&tools.ocrmypdf, e))?;

    Ok(())
}

fn missing_tool(tool: &str, err: CleanerError) -> OcrUnavailable {
    OcrUnavailable::MissingTool {
        tool: tool.to_string(),
        reason: err.to_string(),
    }
}
