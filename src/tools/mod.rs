/// External tool integration
///
/// This module handles:
/// - Running external binaries synchronously (invoker.rs)
/// - Building ImageMagick command lines (imagemagick.rs)
/// - Building OCR command lines and probing OCR support (ocr.rs)
/// - Fixed-name scratch files with guaranteed cleanup (scratch.rs)

pub mod imagemagick;
pub mod invoker;
pub mod ocr;
pub mod scratch;

pub use invoker::{Invocation, SystemRunner, ToolOutput, ToolRunner};
pub use ocr::{OcrAvailability, OcrUnavailable};
pub use scratch::{ScratchFile, ScratchSlot, Workspace};
