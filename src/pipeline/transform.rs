use tracing::{debug, info};

use super::Cleaner;
use crate::error::Result;
use crate::state::data::TransformRequest;
use crate::state::settings::CleanupSettings;
use crate::tools::invoker::run_checked;
use crate::tools::{imagemagick, scratch, ScratchSlot, ToolRunner};

/// What a transform call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOutcome {
    /// The working copy was replaced; the preview needs a refresh
    Applied,
    /// Nothing is loaded, nothing happened
    NoDocument,
}

impl<R: ToolRunner> Cleaner<R> {
    /// Stage the working copy, run `convert`, collect the result.
    ///
    /// On any failure the working copy is left as it was. Both scratch files
    /// are released when this returns, whichever way it returns.
    pub fn apply(&mut self, request: TransformRequest) -> Result<TransformOutcome> {
        let Some(working) = self.session.working() else {
            debug!("{:?} ignored, no document loaded", request.kind);
            return Ok(TransformOutcome::NoDocument);
        };

        let input = self.workspace.stage(ScratchSlot::TransformInput, working)?;
        let output = self.workspace.acquire(ScratchSlot::TransformOutput);

        let invocation =
            imagemagick::transform(&self.tools.convert, input.path(), &request, output.path());
        run_checked(&self.runner, &invocation)?;

        let result = scratch::collect(&output, &self.tools.convert)?;
        info!(
            "✨ {:?} applied → {}x{}",
            request.kind,
            result.width(),
            result.height()
        );

        self.session.replace_working(result);
        Ok(TransformOutcome::Applied)
    }

    /// Grayscale + binarize at the selected cutoff
    pub fn apply_threshold(&mut self, settings: &CleanupSettings) -> Result<TransformOutcome> {
        self.apply(TransformRequest::threshold(settings.threshold))
    }

    /// Straighten a tilted scan
    pub fn apply_deskew(&mut self, settings: &CleanupSettings) -> Result<TransformOutcome> {
        self.apply(TransformRequest::deskew(settings.deskew))
    }

    /// Trim uniform borders
    pub fn apply_crop(&mut self) -> Result<TransformOutcome> {
        self.apply(TransformRequest::crop())
    }
}
