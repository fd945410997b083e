/// Error types for document loading, external tool runs and exports
///
/// Every failure is local to the action that triggered it. The UI shows the
/// message in a dialog and the session stays usable afterwards.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanerError {
    /// The image file could not be read or decoded
    #[error("failed to open image {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An external binary could not be started at all
    #[error("{tool} is not available: {source}")]
    MissingTool {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// An external binary ran and exited with a non-zero status
    #[error("{tool} failed ({}): {stderr}", describe_code(*code))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The tool claimed success but its output file is not there
    #[error("{tool} produced no output at {}", path.display())]
    MissingOutput { tool: String, path: PathBuf },

    /// Writing an image into the scratch area failed
    #[error("failed to stage scratch file {}: {source}", path.display())]
    Stage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Reading a tool's output back into memory failed
    #[error("failed to read tool output {}: {source}", path.display())]
    Collect {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Encoding the working image to its export destination failed
    #[error("failed to export {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("file I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Alias used throughout the crate
pub type Result<T> = std::result::Result<T, CleanerError>;

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failed_message() {
        let err = CleanerError::ToolFailed {
            tool: "convert".to_string(),
            code: Some(1),
            stderr: "convert: no images defined".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "convert failed (exit code 1): convert: no images defined"
        );

        let killed = CleanerError::ToolFailed {
            tool: "ocrmypdf".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(killed.to_string().contains("terminated by signal"));
    }
}
