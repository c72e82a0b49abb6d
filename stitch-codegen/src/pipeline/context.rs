//! Round context passed through pipeline phases.

use std::sync::Arc;

use indexmap::IndexMap;
use stitch_ir::{Round, TypeElement};

use super::diagnostic::Diagnostic;
use crate::{
    artifact::GeneratedArtifact,
    config::EngineConfig,
    error::CodegenError,
    merge::AdapterModel,
    model::{Declaration, ModelCache, Universe},
    resolve::GenerationTarget,
};

/// Context passed through all pipeline phases.
///
/// Everything here lives for exactly one round. Nothing is carried into the
/// next round except what the host feeds back in.
#[derive(Debug)]
pub struct RoundContext {
    /// The round being processed.
    pub round: Round,
    pub config: EngineConfig,
    /// Lookup table over every type in the round (populated by ExtractPhase).
    pub universe: Universe,
    /// Round-scoped extraction cache.
    pub cache: ModelCache,
    /// Structural models of processed declarations, by canonical name.
    pub models: IndexMap<String, Arc<Declaration>>,
    /// Generation targets (populated by ResolvePhase).
    pub targets: Vec<GenerationTarget>,
    /// Merged adapter models by canonical name (populated by MergePhase).
    pub adapters: IndexMap<String, AdapterModel>,
    /// Diagnostics collected during the round.
    pub diagnostics: Vec<Diagnostic>,
    /// Synthesized artifacts (populated by synthesis phases).
    pub artifacts: Vec<GeneratedArtifact>,
    /// Types introduced by synthesis that later rounds must see.
    pub generated_elements: Vec<TypeElement>,
}

impl RoundContext {
    /// Create a new round context.
    pub fn new(round: Round, config: EngineConfig) -> Self {
        Self {
            round,
            config,
            universe: Universe::default(),
            cache: ModelCache::new(),
            models: IndexMap::new(),
            targets: Vec::new(),
            adapters: IndexMap::new(),
            diagnostics: Vec::new(),
            artifacts: Vec::new(),
            generated_elements: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Error diagnostics in the order they were raised.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    /// Record a declaration-scoped failure, attributed to `location`.
    ///
    /// `location` is the declaration being processed, which for merge
    /// failures is the root adapter rather than the composed type.
    pub fn add_codegen_error(&mut self, phase: &str, location: &str, error: &CodegenError) {
        self.diagnostics.push(Diagnostic::codegen(phase, error).at(location));
    }

    /// Note something about the round that is not a failure.
    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_context() -> RoundContext {
        RoundContext::new(Round::new(Vec::new()), EngineConfig::default())
    }

    #[test]
    fn test_context_creation() {
        let ctx = make_context();

        assert!(ctx.universe.is_empty());
        assert!(ctx.targets.is_empty());
        assert!(ctx.diagnostics.is_empty());
        assert!(ctx.cache.is_empty());
    }

    #[test]
    fn test_info_is_not_an_error() {
        let mut ctx = make_context();

        ctx.add_info("resolve", "2 targets");

        assert!(!ctx.has_errors());
        assert_eq!(ctx.error_count(), 0);
        assert_eq!(ctx.diagnostics.len(), 1);
    }

    #[test]
    fn test_codegen_error_located_at_root() {
        let mut ctx = make_context();
        let err = CodegenError::ComposedFieldCannotHaveDefault {
            declaration: "com.example.Address".into(),
            property: "geo".into(),
        };

        ctx.add_codegen_error("merge", "com.example.User", &err);

        assert_eq!(ctx.error_count(), 1);
        let diag = ctx.errors().next().unwrap();
        assert_eq!(diag.location.as_deref(), Some("com.example.User"));
        assert_eq!(diag.code.as_deref(), Some("composed_field_cannot_have_default"));
    }
}
