//! Synchronous external process runner.
//!
//! The runner knows nothing about what the arguments mean; the builders in
//! `imagemagick` and `ocr` decide that.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{CleanerError, Result};

/// A program plus its full argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// What a finished process left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stdout followed by stderr, lossily decoded.
    /// Some tesseract builds print their language list on stderr.
    pub fn combined_text(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&self.stderr));
        text
    }
}

/// Runs an invocation to completion, blocking the caller
pub trait ToolRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput>;
}

/// Runs real binaries from `PATH` (or absolute paths from the config)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput> {
        let output = Command::new(invocation.program())
            .args(invocation.arguments())
            .output()?;

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Run `invocation` and turn anything but a clean exit into an error.
pub fn run_checked<R: ToolRunner + ?Sized>(runner: &R, invocation: &Invocation) -> Result<ToolOutput> {
    debug!("$ {}", invocation);

    let output = runner.run(invocation).map_err(|source| {
        warn!("could not start {}: {}", invocation.program(), source);
        CleanerError::MissingTool {
            tool: invocation.program().to_string(),
            source,
        }
    })?;

    if !output.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let first_line = stderr.lines().next().unwrap_or("").trim().to_string();
        warn!(
            code = ?output.code,
            "{} failed: {}",
            invocation.program(),
            first_line
        );
        return Err(CleanerError::ToolFailed {
            tool: invocation.program().to_string(),
            code: output.code,
            stderr: first_line,
        });
    }

    debug!("{} finished ({} bytes on stdout)", invocation.program(), output.stdout.len());
    Ok(output)
}
