//! Round driver.

use eyre::Result;
use stitch_core::WriteResult;
use stitch_ir::{Round, TypeElement};
use tracing::{info, info_span, warn};

use crate::{
    artifact::GeneratedArtifact,
    config::EngineConfig,
    pipeline::{Diagnostic, Pipeline},
    writer::ArtifactWriter,
};

/// What one round produced.
#[derive(Debug, Default)]
pub struct RoundOutcome {
    pub artifacts: Vec<GeneratedArtifact>,
    pub diagnostics: Vec<Diagnostic>,
    /// An error was raised in this round or an earlier one. The host passes
    /// it on to the next round.
    pub error_raised: bool,
    /// Types synthesized this round that later rounds must process.
    pub generated_elements: Vec<TypeElement>,
    /// Artifacts dropped because the round aborted.
    pub withheld: usize,
}

impl RoundOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Hand every artifact to `writer`, then close the round.
    ///
    /// # Errors
    ///
    /// Fails on the first rejected or failed write.
    pub fn write(&self, writer: &mut dyn ArtifactWriter) -> Result<Vec<WriteResult>> {
        let results = self
            .artifacts
            .iter()
            .map(|artifact| writer.write(artifact))
            .collect::<Result<Vec<_>>>()?;
        writer.finish_round()?;
        Ok(results)
    }
}

/// Runs rounds through a pipeline.
pub struct Engine {
    config: EngineConfig,
    pipeline: Pipeline,
}

impl Engine {
    pub fn new(config: EngineConfig, pipeline: Pipeline) -> Self {
        Self { config, pipeline }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Process one round.
    ///
    /// A round that follows a failed one does nothing. Declaration-scoped
    /// failures come back as diagnostics, never as `Err`.
    ///
    /// # Errors
    ///
    /// Returns an error if a phase or plugin fails fatally.
    pub fn process_round(&self, round: Round) -> Result<RoundOutcome> {
        let _span = info_span!("round", elements = round.elements.len()).entered();

        if round.error_raised {
            info!("an earlier round raised an error; nothing to do");
            return Ok(RoundOutcome {
                error_raised: true,
                ..RoundOutcome::default()
            });
        }

        let ctx = self.pipeline.run(round, self.config.clone())?;
        let error_raised = ctx.has_errors();
        let mut outcome = RoundOutcome {
            artifacts: ctx.artifacts,
            diagnostics: ctx.diagnostics,
            error_raised,
            generated_elements: ctx.generated_elements,
            withheld: 0,
        };

        if error_raised && self.config.abort_round_on_error {
            outcome.withheld = outcome.artifacts.len();
            outcome.artifacts.clear();
            outcome.generated_elements.clear();
            warn!(withheld = outcome.withheld, "round aborted on error");
        }

        info!(
            artifacts = outcome.artifacts.len(),
            errors = outcome.diagnostics.iter().filter(|d| d.severity.is_error()).count(),
            "round finished"
        );
        Ok(outcome)
    }
}
