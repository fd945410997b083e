use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "document-cleaner", about = "Clean up scanned documents and export them as JPEG or (searchable) PDF", version)]
pub struct Cli {
    /// Image to open on launch.
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Directory for the temporary files handed to convert/ocrmypdf/tesseract.
    ///
    /// Overrides DOCUMENT_CLEANER_SCRATCH_DIR. Defaults to the current directory.
    #[arg(long = "scratch-dir", value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `document_cleaner=trace`. Overrides RUST_LOG.
    #[arg(long = "log-level", value_name = "FILTER")]
    pub log_level: Option<String>,
}
