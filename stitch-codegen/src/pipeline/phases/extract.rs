//! Extract phase - builds the round's type universe and declaration models.

use eyre::Result;
use tracing::debug;

use crate::{
    extract::{DeclarationExtractor, Purpose},
    model::Universe,
    pipeline::{Phase, RoundContext},
};

/// Phase that indexes every type of the round and extracts a structural
/// model for each processed declaration.
///
/// Serialization-specific validation happens later, when the resolve phase
/// asks for an adapter model.
pub struct ExtractPhase;

impl Phase for ExtractPhase {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn description(&self) -> &'static str {
        "Build declaration models for marked types"
    }

    fn run(&self, ctx: &mut RoundContext) -> Result<()> {
        ctx.universe = Universe::from_round(&ctx.round);
        let extractor = DeclarationExtractor::new(&ctx.universe);
        let mut failures = Vec::new();

        for element in ctx.universe.processed() {
            let canonical = element.canonical_name();
            match extractor.extract(&mut ctx.cache, &canonical, Purpose::Binding) {
                Ok(declaration) => {
                    debug!(
                        declaration = %canonical,
                        kind = ?declaration.kind,
                        properties = declaration.properties.len(),
                        "extracted"
                    );
                    ctx.models.insert(canonical, declaration);
                }
                Err(err) => failures.push((canonical, err)),
            }
        }

        for (canonical, err) in &failures {
            ctx.add_codegen_error(self.name(), canonical, err);
        }
        Ok(())
    }
}
