/// Orchestration of transforms and exports
///
/// `Cleaner` owns the document session, the scratch workspace and the tool
/// runner. Every operation takes `&mut self`, so only one external
/// invocation can use the fixed scratch names at a time.
///
/// - Threshold / deskew / crop (transform.rs)
/// - JPEG, PDF and searchable PDF exports (export.rs)
/// - In-process PDF encoding (pdf.rs)

pub mod export;
pub mod pdf;
pub mod transform;

#[cfg(test)]
pub(crate) mod testing;

pub use export::{ExportOutcome, SavePrompt};
pub use transform::TransformOutcome;

use tracing::debug;

use crate::config::ToolConfig;
use crate::error::Result;
use crate::state::data::SourceReference;
use crate::state::document::DocumentSession;
use crate::tools::{OcrAvailability, SystemRunner, ToolRunner, Workspace};

pub struct Cleaner<R: ToolRunner = SystemRunner> {
    session: DocumentSession,
    workspace: Workspace,
    tools: ToolConfig,
    runner: R,
    ocr: OcrAvailability,
}

impl<R: ToolRunner> Cleaner<R> {
    /// Set up the controller and clear scratch leftovers from a crashed run
    pub fn new(tools: ToolConfig, runner: R) -> Self {
        let workspace = Workspace::new(tools.scratch_dir.clone());
        debug!("scratch files go to {}", workspace.dir().display());
        workspace.sweep();

        Self {
            session: DocumentSession::new(),
            workspace,
            tools,
            runner,
            ocr: OcrAvailability::Unchecked,
        }
    }

    /// Probe OCR support. Only the first call runs the tools; the answer
    /// holds for the rest of the session.
    pub fn check_ocr(&mut self) -> &OcrAvailability {
        if self.ocr == OcrAvailability::Unchecked {
            self.ocr = OcrAvailability::probe(&self.runner, &self.tools);
        }
        &self.ocr
    }

    pub fn ocr(&self) -> &OcrAvailability {
        &self.ocr
    }

    pub fn load(&mut self, source: SourceReference) -> Result<()> {
        self.session.load(source)
    }

    pub fn reload(&mut self) {
        self.session.reload();
    }

    pub fn session(&self) -> &DocumentSession {
        &self.session
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeTools;
    use super::*;
    use crate::tools::ScratchSlot;
    use std::fs;

    #[test]
    fn test_new_sweeps_stale_scratch_files() {
        let dir = tempfile::tempdir().unwrap();
        for slot in ScratchSlot::ALL {
            fs::write(dir.path().join(slot.file_name()), b"left over").unwrap();
        }

        let cleaner = Cleaner::new(
            ToolConfig::default().with_scratch_dir(Some(dir.path().to_path_buf())),
            FakeTools::new(),
        );

        assert_eq!(fs::read_dir(cleaner.workspace().dir()).unwrap().count(), 0);
        assert!(cleaner.runner().calls().is_empty());
    }

    #[test]
    fn test_ocr_probe_runs_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut cleaner = Cleaner::new(
            ToolConfig::default().with_scratch_dir(Some(dir.path().to_path_buf())),
            FakeTools::new(),
        );
        assert_eq!(cleaner.ocr(), &OcrAvailability::Unchecked);

        assert!(cleaner.check_ocr().is_available());
        let probes = cleaner.runner().calls().len();
        assert!(probes > 0);

        cleaner.check_ocr();
        assert_eq!(cleaner.runner().calls().len(), probes);
    }
}
