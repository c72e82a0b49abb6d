//! Merge phase - expands composed properties for class adapters.

use std::collections::HashSet;

use eyre::Result;
use tracing::{debug, warn};

use crate::{
    merge::ComposedPropertyMerger,
    pipeline::{Phase, RoundContext},
    resolve::GenerationTarget,
};

/// Phase that builds an [`AdapterModel`](crate::merge::AdapterModel) for
/// every class adapter target.
///
/// A target whose merge fails is dropped. Its diagnostic is located at the
/// adapter's declaration even when the failure sits in a composed type.
pub struct MergePhase;

impl Phase for MergePhase {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn description(&self) -> &'static str {
        "Expand composed properties of serialization targets"
    }

    fn run(&self, ctx: &mut RoundContext) -> Result<()> {
        let merger = ComposedPropertyMerger::new(&ctx.universe);
        let mut failures = Vec::new();

        for target in &ctx.targets {
            let GenerationTarget::JsonAdapter { declaration } = target else {
                continue;
            };
            let canonical = declaration.canonical_name();
            match merger.merge(declaration.clone(), &mut ctx.cache) {
                Ok(model) => {
                    debug!(
                        declaration = %canonical,
                        groups = model.composed.len(),
                        "merged"
                    );
                    ctx.adapters.insert(canonical, model);
                }
                Err(err) => {
                    warn!(declaration = %canonical, code = err.code(), "skipping adapter: {err}");
                    failures.push((canonical, err));
                }
            }
        }

        let failed: HashSet<&str> = failures.iter().map(|(c, _)| c.as_str()).collect();
        ctx.targets.retain(|target| match target {
            GenerationTarget::JsonAdapter { declaration } => {
                !failed.contains(declaration.canonical_name().as_str())
            }
            _ => true,
        });
        for (canonical, err) in &failures {
            ctx.add_codegen_error(self.name(), canonical, err);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stitch_ir::{
        ClassName, Marker, MarkerKind, ParameterElement, PropertyElement, Round, TypeElement,
        TypeKind, TypeName,
    };

    use super::*;
    use crate::{
        config::EngineConfig,
        pipeline::phases::{ExtractPhase, ResolvePhase},
    };

    fn property(name: &str, ty: TypeName, composed: bool) -> PropertyElement {
        PropertyElement {
            name: name.into(),
            ty,
            nullable: false,
            transient: false,
            composed,
            mutable: false,
            initializer: false,
            json_name: None,
        }
    }

    fn parameter(name: &str, ty: TypeName, has_default: bool) -> ParameterElement {
        ParameterElement {
            name: name.into(),
            ty,
            nullable: false,
            has_default,
        }
    }

    fn json_class(name: &str, fields: &[(&str, TypeName, bool, bool)]) -> TypeElement {
        let mut element = TypeElement::new(ClassName::get("com.example", name), TypeKind::Class);
        element.properties = fields
            .iter()
            .map(|(n, ty, composed, _)| property(n, ty.clone(), *composed))
            .collect();
        element.constructor = Some(
            fields
                .iter()
                .map(|(n, ty, _, default)| parameter(n, ty.clone(), *default))
                .collect(),
        );
        element.markers.push(Marker::new(MarkerKind::JsonClass));
        element
    }

    fn run(elements: Vec<TypeElement>) -> RoundContext {
        let mut ctx = RoundContext::new(Round::new(elements), EngineConfig::default());
        let phases: [&dyn Phase; 3] = [&ExtractPhase, &ResolvePhase, &MergePhase];
        for phase in phases {
            phase.run(&mut ctx).expect("phase should succeed");
        }
        ctx
    }

    fn class(name: &str) -> TypeName {
        TypeName::class(ClassName::get("com.example", name))
    }

    fn string() -> TypeName {
        TypeName::class(ClassName::get("java.lang", "String"))
    }

    #[test]
    fn test_merge_builds_adapter_models() {
        let mut address = TypeElement::new(ClassName::get("com.example", "Address"), TypeKind::Class);
        address.properties = vec![property("city", string(), false)];
        address.constructor = Some(vec![parameter("city", string(), false)]);

        let ctx = run(vec![
            json_class(
                "User",
                &[("name", string(), false, false), ("address", class("Address"), true, false)],
            ),
            address,
        ]);

        assert!(!ctx.has_errors());
        let model = &ctx.adapters["com.example.User"];
        assert_eq!(model.composed.len(), 1);
        let names: Vec<_> = model
            .flattened()
            .iter()
            .map(|f| f.property.name.as_str())
            .collect();
        assert_eq!(names, ["name", "city"]);
    }

    #[test]
    fn test_failed_merge_drops_target_and_reports_at_root() {
        let mut geo = TypeElement::new(ClassName::get("com.example", "Geo"), TypeKind::Class);
        geo.properties = vec![property("lat", string(), false)];
        geo.constructor = Some(vec![parameter("lat", string(), false)]);
        let mut address = TypeElement::new(ClassName::get("com.example", "Address"), TypeKind::Class);
        address.properties = vec![property("geo", class("Geo"), true)];
        address.constructor = Some(vec![parameter("geo", class("Geo"), true)]);

        let ctx = run(vec![
            json_class("User", &[("address", class("Address"), true, false)]),
            json_class("Plain", &[("id", string(), false, false)]),
            address,
            geo,
        ]);

        assert_eq!(ctx.error_count(), 1);
        let diag = ctx.errors().next().unwrap();
        assert_eq!(diag.code.as_deref(), Some("composed_field_cannot_have_default"));
        assert_eq!(diag.location.as_deref(), Some("com.example.User"));
        assert!(!ctx.adapters.contains_key("com.example.User"));
        assert!(ctx.adapters.contains_key("com.example.Plain"));
        assert_eq!(ctx.targets.len(), 1);
    }
}
