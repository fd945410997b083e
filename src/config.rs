use std::env;
use std::path::PathBuf;

/// Environment variables that override the tool defaults
pub const ENV_CONVERT: &str = "DOCUMENT_CLEANER_CONVERT";
pub const ENV_OCRMYPDF: &str = "DOCUMENT_CLEANER_OCRMYPDF";
pub const ENV_TESSERACT: &str = "DOCUMENT_CLEANER_TESSERACT";
pub const ENV_SCRATCH_DIR: &str = "DOCUMENT_CLEANER_SCRATCH_DIR";

/// Where to find the external tools and where scratch files go.
///
/// Defaults resolve the binaries from `PATH` and put scratch files in the
/// current directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub convert: String,
    pub ocrmypdf: String,
    pub tesseract: String,
    pub scratch_dir: PathBuf,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            convert: "convert".into(),
            ocrmypdf: "ocrmypdf".into(),
            tesseract: "tesseract".into(),
            scratch_dir: PathBuf::from("."),
        }
    }
}

impl ToolConfig {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns; empty values are ignored
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(v) = get(ENV_CONVERT) {
            cfg.convert = v;
        }
        if let Some(v) = get(ENV_OCRMYPDF) {
            cfg.ocrmypdf = v;
        }
        if let Some(v) = get(ENV_TESSERACT) {
            cfg.tesseract = v;
        }
        if let Some(v) = get(ENV_SCRATCH_DIR) {
            cfg.scratch_dir = PathBuf::from(v);
        }

        cfg
    }

    /// Command line wins over the environment
    pub fn with_scratch_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.scratch_dir = dir;
        }
        self
    }
}
