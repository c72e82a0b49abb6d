//! Pipeline phase trait.

use eyre::Result;

use super::RoundContext;

/// Information about a pipeline phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    /// The phase name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
}

/// A phase in the round pipeline.
///
/// Phases are executed in order by the pipeline. Each phase can read and
/// modify the round context, adding models, targets, artifacts or
/// diagnostics.
///
/// Built-in phases:
/// - `ExtractPhase` - builds declaration models for marked types
/// - `ResolvePhase` - turns markers into generation targets
/// - `MergePhase` - expands composed properties of adapter targets
///
/// Synthesis phases are added by a language backend.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the round context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Declaration-scoped
    /// failures are recorded as diagnostics instead.
    fn run(&self, ctx: &mut RoundContext) -> Result<()>;

    /// Get information about this phase.
    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
