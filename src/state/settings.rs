/// Cleanup settings chosen in the toolbar
///
/// The UI keeps one `CleanupSettings` value and passes it explicitly into
/// every transform and export call. Nothing here survives a restart.
use std::fmt;

/// Binarization cutoff for the threshold transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThresholdLevel {
    P40,
    P50,
    #[default]
    P60,
    P70,
}

impl ThresholdLevel {
    pub const ALL: &'static [ThresholdLevel] = &[Self::P40, Self::P50, Self::P60, Self::P70];

    pub fn percent(self) -> u8 {
        match self {
            Self::P40 => 40,
            Self::P50 => 50,
            Self::P60 => 60,
            Self::P70 => 70,
        }
    }
}

impl fmt::Display for ThresholdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Sensitivity handed to `-deskew`
///
/// Passed through to ImageMagick unchanged; larger values allow larger
/// detected skew angles to be corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeskewLevel {
    P20,
    P30,
    #[default]
    P40,
    P50,
}

impl DeskewLevel {
    pub const ALL: &'static [DeskewLevel] = &[Self::P20, Self::P30, Self::P40, Self::P50];

    pub fn percent(self) -> u8 {
        match self {
            Self::P20 => 20,
            Self::P30 => 30,
            Self::P40 => 40,
            Self::P50 => 50,
        }
    }
}

impl fmt::Display for DeskewLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// OCR languages the tool supports
///
/// `code()` is the Tesseract traineddata name, which is also what
/// `ocrmypdf -l` expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum OcrLanguage {
    #[default]
    Italian,
    English,
    German,
}

impl OcrLanguage {
    /// Every language must be installed for OCR export to be enabled
    pub const REQUIRED: &'static [OcrLanguage] = &[Self::Italian, Self::English, Self::German];

    pub fn code(self) -> &'static str {
        match self {
            Self::Italian => "ita",
            Self::English => "eng",
            Self::German => "deu",
        }
    }

    /// Two-letter label shown in the language picker
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Italian => "it",
            Self::English => "en",
            Self::German => "de",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::REQUIRED.iter().copied().find(|lang| lang.code() == code)
    }
}

impl fmt::Display for OcrLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// All toolbar selections in one place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanupSettings {
    pub threshold: ThresholdLevel,
    pub deskew: DeskewLevel,
    pub ocr_language: OcrLanguage,
}

impl CleanupSettings {
    pub fn new() -> Self {
        Self::default()
    }
}
