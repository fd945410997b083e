//! Core of the document cleaner: document state, external tool
//! orchestration, scratch file handling and exports.
//!
//! The binary in `main.rs` is only an iced shell around [`pipeline::Cleaner`].

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod tools;
pub mod ui;

pub use config::ToolConfig;
pub use error::{CleanerError, Result};
pub use pipeline::{Cleaner, ExportOutcome, SavePrompt, TransformOutcome};
pub use state::data::{ExportFormat, ExportTarget, SourceReference, TransformRequest};
pub use state::settings::{CleanupSettings, DeskewLevel, OcrLanguage, ThresholdLevel};
pub use tools::{OcrAvailability, SystemRunner, ToolRunner};
