//! Pipeline orchestrator.

use eyre::Result;
use stitch_ir::Round;
use tracing::{debug, info_span};

use super::{
    Phase, PhaseInfo, Plugin, RoundContext,
    phases::{ExtractPhase, MergePhase, ResolvePhase},
};
use crate::config::EngineConfig;

/// The round pipeline orchestrator.
///
/// The pipeline manages the execution of round phases and plugin hooks.
/// It runs built-in phases (extract, resolve, merge) followed by any user
/// phases, calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::new())
///     .phase(SynthesizePhase);
///
/// let ctx = pipeline.run(round, config)?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with default built-in phases.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Every phase this pipeline runs, in order.
    pub fn phases(&self) -> Vec<PhaseInfo> {
        builtin_phases()
            .iter()
            .chain(self.phases.iter())
            .map(|phase| phase.info())
            .collect()
    }

    /// Run the pipeline on a round.
    ///
    /// Executes all phases in order:
    /// 1. ExtractPhase - indexes the round, extracts declaration models
    /// 2. ResolvePhase - resolves markers into generation targets
    /// 3. MergePhase - expands composed properties of adapter targets
    /// 4. User phases (if any)
    ///
    /// Plugin hooks are called before and after each phase.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase or plugin fails fatally.
    pub fn run(&self, round: Round, config: EngineConfig) -> Result<RoundContext> {
        let mut ctx = RoundContext::new(round, config);

        for phase in builtin_phases().iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut RoundContext) -> Result<()> {
        let phase_name = phase.name();
        let _span = info_span!("phase", name = phase_name).entered();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        let before = ctx.diagnostics.len();
        phase.run(ctx)?;
        debug!(
            diagnostics = ctx.diagnostics.len() - before,
            targets = ctx.targets.len(),
            artifacts = ctx.artifacts.len(),
            "phase finished"
        );

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_phases() -> Vec<Box<dyn Phase>> {
    vec![
        Box::new(ExtractPhase),
        Box::new(ResolvePhase),
        Box::new(MergePhase),
    ]
}
