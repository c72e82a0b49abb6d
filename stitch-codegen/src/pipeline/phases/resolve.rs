//! Resolve phase - turns markers into generation targets.

use eyre::Result;
use tracing::{debug, warn};

use crate::{
    pipeline::{Phase, RoundContext},
    resolve::TargetResolver,
};

/// Phase that resolves every marker of every processed declaration.
///
/// Failures are recorded against the declaration and only drop what they
/// invalidate; sibling declarations are always attempted.
pub struct ResolvePhase;

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Resolve marker parameters and generation targets"
    }

    fn run(&self, ctx: &mut RoundContext) -> Result<()> {
        let resolver = TargetResolver::new(&ctx.universe);
        let mut failures = Vec::new();

        for element in ctx.universe.processed() {
            let canonical = element.canonical_name();
            let resolution = resolver.resolve(element, &mut ctx.cache);

            for err in resolution.errors {
                warn!(declaration = %canonical, code = err.code(), "skipping: {err}");
                failures.push((canonical.clone(), err));
            }
            for target in &resolution.targets {
                debug!(declaration = %canonical, marker = target.marker().key(), "target resolved");
            }
            ctx.targets.extend(resolution.targets);
        }

        for (canonical, err) in &failures {
            ctx.add_codegen_error(self.name(), canonical, err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stitch_ir::{ClassName, Marker, MarkerKind, MarkerValue, Round, TypeElement, TypeKind};

    use super::*;
    use crate::{config::EngineConfig, pipeline::phases::ExtractPhase};

    fn run(elements: Vec<TypeElement>) -> RoundContext {
        let mut ctx = RoundContext::new(Round::new(elements), EngineConfig::default());
        ExtractPhase.run(&mut ctx).expect("extract should succeed");
        ResolvePhase.run(&mut ctx).expect("resolve should succeed");
        ctx
    }

    fn network_service(name: &str, scope: &str) -> TypeElement {
        let mut element = TypeElement::new(ClassName::get("com.example", name), TypeKind::Interface);
        element.markers.push(
            Marker::new(MarkerKind::NetworkService).param("scope", MarkerValue::Str(scope.into())),
        );
        element
    }

    #[test]
    fn test_invalid_declaration_does_not_stop_siblings() {
        let ctx = run(vec![
            network_service("AdminApi", "admin"),
            network_service("UserApi", "loggedIn"),
        ]);

        assert_eq!(ctx.targets.len(), 1);
        assert_eq!(
            ctx.targets[0].declaration().canonical_name(),
            "com.example.UserApi"
        );
        assert_eq!(ctx.error_count(), 1);
        let diag = ctx.errors().next().unwrap();
        assert_eq!(diag.code.as_deref(), Some("invalid_scope_value"));
        assert_eq!(diag.location.as_deref(), Some("com.example.AdminApi"));
        assert_eq!(diag.phase, "resolve");
    }
}
