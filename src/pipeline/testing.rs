//! In-process stand-ins for convert, ocrmypdf and tesseract.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::tools::{Invocation, ToolOutput, ToolRunner};

pub(crate) struct FakeTools {
    calls: RefCell<Vec<Invocation>>,
    failing: Option<&'static str>,
    silent: Option<&'static str>,
    languages: &'static str,
    ocr_text: &'static str,
}

impl FakeTools {
    pub(crate) fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failing: None,
            silent: None,
            languages: "List of available languages in \"/usr/share/tesseract-ocr/5/tessdata/\" (4):\ndeu\neng\nita\nosd\n",
            ocr_text: "Fattura n. 42\nTotale 10,00\n",
        }
    }

    /// Every run of `program` exits with status 1 and writes nothing
    pub(crate) fn failing(program: &'static str) -> Self {
        Self {
            failing: Some(program),
            ..Self::new()
        }
    }

    /// Every run of `program` exits with status 0 but writes nothing
    pub(crate) fn silent(program: &'static str) -> Self {
        Self {
            silent: Some(program),
            ..Self::new()
        }
    }

    pub(crate) fn with_languages(languages: &'static str) -> Self {
        Self {
            languages,
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub(crate) fn programs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| c.program().to_string())
            .collect()
    }
}

fn ok(stdout: &str) -> ToolOutput {
    ToolOutput {
        code: Some(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

impl ToolRunner for FakeTools {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput> {
        self.calls.borrow_mut().push(invocation.clone());

        if self.failing == Some(invocation.program()) {
            return Ok(ToolOutput {
                code: Some(1),
                stdout: Vec::new(),
                stderr: b"simulated failure\n".to_vec(),
            });
        }

        if self.silent == Some(invocation.program()) {
            return Ok(ok(""));
        }

        let args: Vec<PathBuf> = invocation.arguments().iter().map(PathBuf::from).collect();
        let has_flag = |flag: &str| invocation.arguments().iter().any(|a| a == flag);

        match invocation.program() {
            "convert" => {
                let (Some(input), Some(output)) = (args.first(), args.last()) else {
                    return Err(io::Error::other("convert needs input and output"));
                };
                if output.extension().is_some_and(|ext| ext == "pdf") {
                    // Input must exist, like the real tool
                    fs::metadata(input)?;
                    fs::write(output, b"%PDF-1.4\n% fake\n")?;
                } else {
                    let image = image::open(input).map_err(io::Error::other)?;
                    image.grayscale().save(output).map_err(io::Error::other)?;
                }
                Ok(ok(""))
            }
            "ocrmypdf" if has_flag("--version") => Ok(ok("16.4.3\n")),
            "ocrmypdf" => {
                let input = &args[args.len() - 2];
                let output = &args[args.len() - 1];
                fs::copy(input, output)?;
                Ok(ok(""))
            }
            "tesseract" if has_flag("--list-langs") => Ok(ok(self.languages)),
            "tesseract" => {
                fs::metadata(&args[0])?;
                Ok(ok(self.ocr_text))
            }
            _ => Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory")),
        }
    }
}
