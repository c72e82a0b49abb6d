//! Generation targets: what to synthesize for each marked declaration.

use std::sync::Arc;

use serde::Serialize;
use stitch_ir::{MarkerKind, TypeElement, TypeKind};
use tracing::debug;

use super::{
    BoundTypeRef, ContributorKind, Inference, MarkerInstance, MarkerResolver, MultibindingKind,
    NetworkScope, TypeHandle, resolve_bindings,
};
use crate::{
    error::CodegenError,
    extract::{DeclarationExtractor, Purpose},
    model::{Declaration, ModelCache, Universe},
};

/// One unit of synthesis.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum GenerationTarget {
    Binding {
        declaration: Arc<Declaration>,
        bound: BoundTypeRef,
        exclude_qualifier: bool,
    },
    Multibinding {
        declaration: Arc<Declaration>,
        bound: BoundTypeRef,
        binding_kind: MultibindingKind,
        contributor: ContributorKind,
    },
    ViewModel {
        declaration: Arc<Declaration>,
        interface: TypeHandle,
        /// Additional interfaces that passed validation.
        additional: Vec<TypeHandle>,
    },
    AssistedFactory {
        declaration: Arc<Declaration>,
        implementation: TypeHandle,
    },
    /// Adapter for a class; expanded by the merge phase.
    JsonAdapter { declaration: Arc<Declaration> },
    EnumAdapter {
        declaration: Arc<Declaration>,
        fallback: String,
    },
    NetworkService {
        declaration: Arc<Declaration>,
        scope: NetworkScope,
    },
}

impl GenerationTarget {
    pub fn declaration(&self) -> &Arc<Declaration> {
        match self {
            Self::Binding { declaration, .. }
            | Self::Multibinding { declaration, .. }
            | Self::ViewModel { declaration, .. }
            | Self::AssistedFactory { declaration, .. }
            | Self::JsonAdapter { declaration }
            | Self::EnumAdapter { declaration, .. }
            | Self::NetworkService { declaration, .. } => declaration,
        }
    }

    pub fn marker(&self) -> MarkerKind {
        match self {
            Self::Binding { .. } => MarkerKind::ContributesInternalBinding,
            Self::Multibinding { .. } => MarkerKind::ContributesMultibinding,
            Self::ViewModel { .. } => MarkerKind::ContributesViewModel,
            Self::AssistedFactory { .. } => MarkerKind::AssistedFactory,
            Self::JsonAdapter { .. } => MarkerKind::JsonClass,
            Self::EnumAdapter { .. } => MarkerKind::JsonEnumWithFallback,
            Self::NetworkService { .. } => MarkerKind::NetworkService,
        }
    }
}

/// Targets and failures for one declaration.
///
/// A failure only removes what it invalidates, so both lists may be
/// non-empty.
#[derive(Debug, Default)]
pub struct Resolution {
    pub targets: Vec<GenerationTarget>,
    pub errors: Vec<CodegenError>,
}

/// Resolves every marker of a declaration into targets.
pub struct TargetResolver<'a> {
    universe: &'a Universe,
    markers: MarkerResolver<'a>,
    extractor: DeclarationExtractor<'a>,
}

impl<'a> TargetResolver<'a> {
    pub fn new(universe: &'a Universe) -> Self {
        Self {
            universe,
            markers: MarkerResolver::new(universe),
            extractor: DeclarationExtractor::new(universe),
        }
    }

    pub fn resolve(&self, element: &TypeElement, cache: &mut ModelCache) -> Resolution {
        let mut resolution = Resolution::default();
        for marker in &element.markers {
            let result = self
                .markers
                .resolve(element, marker)
                .and_then(|instance| self.targets_for(element, instance, cache, &mut resolution.errors));
            match result {
                Ok(targets) => resolution.targets.extend(targets),
                Err(err) => resolution.errors.push(err),
            }
        }
        resolution
    }

    fn extract(
        &self,
        element: &TypeElement,
        cache: &mut ModelCache,
        purpose: Purpose,
    ) -> Result<Arc<Declaration>, CodegenError> {
        self.extractor
            .extract(cache, &element.canonical_name(), purpose)
    }

    fn targets_for(
        &self,
        element: &TypeElement,
        instance: MarkerInstance,
        cache: &mut ModelCache,
        errors: &mut Vec<CodegenError>,
    ) -> Result<Vec<GenerationTarget>, CodegenError> {
        let canonical = element.canonical_name();
        match instance {
            MarkerInstance::InternalBinding {
                bound_types,
                exclude_qualifier,
                ..
            } => {
                let declaration = self.extract(element, cache, Purpose::Binding)?;
                let bound = resolve_bindings(
                    &declaration,
                    &bound_types,
                    Inference::InterfaceOnly,
                    self.universe,
                )?;
                Ok(bound
                    .into_iter()
                    .map(|bound| GenerationTarget::Binding {
                        declaration: declaration.clone(),
                        bound,
                        exclude_qualifier,
                    })
                    .collect())
            }
            MarkerInstance::Multibinding {
                binding_kind,
                bound_types,
                contributor,
            } => {
                let declaration = self.extract(element, cache, Purpose::Binding)?;
                let inference = match contributor {
                    ContributorKind::Binder => Inference::InterfaceOnly,
                    ContributorKind::Object => Inference::InterfaceOrSuperclass,
                };
                let bound =
                    resolve_bindings(&declaration, &bound_types, inference, self.universe)?;
                Ok(bound
                    .into_iter()
                    .map(|bound| GenerationTarget::Multibinding {
                        declaration: declaration.clone(),
                        bound,
                        binding_kind,
                        contributor,
                    })
                    .collect())
            }
            MarkerInstance::ViewModel {
                interface,
                additional,
                ..
            } => {
                if element.assisted_inject {
                    debug!(declaration = %canonical, "assisted view model, left to its factory");
                    return Ok(Vec::new());
                }
                let declaration = self.extract(element, cache, Purpose::Binding)?;
                check_interface(&canonical, MarkerKind::ContributesViewModel, &interface)?;
                let additional = additional
                    .into_iter()
                    .filter(|handle| {
                        match check_interface(&canonical, MarkerKind::ContributesViewModel, handle) {
                            Ok(()) => true,
                            Err(err) => {
                                errors.push(err);
                                false
                            }
                        }
                    })
                    .collect();
                Ok(vec![GenerationTarget::ViewModel {
                    declaration,
                    interface,
                    additional,
                }])
            }
            MarkerInstance::AssistedFactory { implementation, .. } => {
                if element.kind != TypeKind::Interface {
                    return Err(CodegenError::InvalidInterfaceReference {
                        declaration: canonical.clone(),
                        marker: MarkerKind::AssistedFactory.key().to_string(),
                        reference: canonical,
                    });
                }
                let declaration = self.extract(element, cache, Purpose::Binding)?;
                Ok(vec![GenerationTarget::AssistedFactory {
                    declaration,
                    implementation,
                }])
            }
            MarkerInstance::JsonClass {
                generate_adapter,
                generator,
            } => {
                if !generate_adapter || !generator.is_empty() {
                    debug!(declaration = %canonical, %generator, "adapter owned by another generator");
                    return Ok(Vec::new());
                }
                if matches!(
                    element.kind,
                    TypeKind::Interface | TypeKind::Enum | TypeKind::Annotation
                ) {
                    return Err(CodegenError::NotAClass {
                        declaration: canonical,
                        kind: element.kind.as_str().to_string(),
                    });
                }
                let declaration = self.extract(element, cache, Purpose::Serialization)?;
                Ok(vec![GenerationTarget::JsonAdapter { declaration }])
            }
            MarkerInstance::JsonEnumWithFallback { fallback } => {
                if element.kind != TypeKind::Enum {
                    return Err(CodegenError::NotAnEnum {
                        declaration: canonical,
                    });
                }
                let declaration = self.extract(element, cache, Purpose::Serialization)?;
                if !declaration.constants.contains(&fallback) {
                    return Err(CodegenError::FallbackConstantNotFound {
                        declaration: canonical,
                        fallback,
                    });
                }
                Ok(vec![GenerationTarget::EnumAdapter {
                    declaration,
                    fallback,
                }])
            }
            MarkerInstance::NetworkService { scope } => {
                let declaration = self.extract(element, cache, Purpose::Binding)?;
                Ok(vec![GenerationTarget::NetworkService { declaration, scope }])
            }
        }
    }
}

fn check_interface(
    declaration: &str,
    marker: MarkerKind,
    handle: &TypeHandle,
) -> Result<(), CodegenError> {
    if handle.may_be_interface() {
        Ok(())
    } else {
        Err(CodegenError::InvalidInterfaceReference {
            declaration: declaration.to_string(),
            marker: marker.key().to_string(),
            reference: handle.type_name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use stitch_ir::{ClassName, Marker, MarkerValue, Round, TypeName};

    use super::*;

    fn ty(name: &str) -> TypeName {
        TypeName::class(ClassName::get("com.example", name))
    }

    fn round() -> Round {
        let bar = TypeElement::new(ClassName::get("com.example", "Bar"), TypeKind::Interface);
        let base = TypeElement::new(ClassName::get("com.example", "BaseViewModel"), TypeKind::Class);
        let mut status = TypeElement::new(ClassName::get("com.example", "Status"), TypeKind::Enum);
        status.constants = vec!["ACTIVE".into()];
        Round::new(vec![bar, base, status])
    }

    fn resolve(element: &TypeElement) -> Resolution {
        let mut round = round();
        round.elements.retain(|e| e.name != element.name);
        round.elements.push(element.clone());
        let universe = Universe::from_round(&round);
        let mut cache = ModelCache::new();
        TargetResolver::new(&universe).resolve(element, &mut cache)
    }

    #[test]
    fn test_internal_binding_targets() {
        let mut foo = TypeElement::new(ClassName::get("com.example", "Foo"), TypeKind::Class);
        foo.interfaces = vec![ty("Bar")];
        foo.markers.push(Marker::new(MarkerKind::ContributesInternalBinding));

        let resolution = resolve(&foo);
        assert!(resolution.errors.is_empty());
        assert!(matches!(
            &resolution.targets[..],
            [GenerationTarget::Binding { bound, .. }] if bound.simple_name() == "Bar"
        ));
    }

    #[test]
    fn test_view_model_drops_only_bad_additional_interface() {
        let mut vm = TypeElement::new(ClassName::get("com.example", "HomeViewModel"), TypeKind::Class);
        vm.markers.push(
            Marker::new(MarkerKind::ContributesViewModel)
                .param("view_model_interface", MarkerValue::Str("com.example.Bar".into()))
                .param(
                    "additional_interfaces",
                    MarkerValue::List(vec![
                        "com.example.BaseViewModel".into(),
                        "com.example.Later".into(),
                    ]),
                ),
        );

        let resolution = resolve(&vm);
        assert_eq!(resolution.errors.len(), 1);
        assert_eq!(resolution.errors[0].code(), "invalid_interface_reference");
        let [GenerationTarget::ViewModel { additional, .. }] = &resolution.targets[..] else {
            panic!("expected one view model target");
        };
        assert_eq!(additional.len(), 1);
        assert!(additional[0].is_symbolic());
    }

    #[test]
    fn test_view_model_with_class_primary_is_skipped() {
        let mut vm = TypeElement::new(ClassName::get("com.example", "HomeViewModel"), TypeKind::Class);
        vm.markers.push(
            Marker::new(MarkerKind::ContributesViewModel)
                .param("view_model_interface", MarkerValue::Str("com.example.BaseViewModel".into())),
        );
        let resolution = resolve(&vm);
        assert!(resolution.targets.is_empty());
        assert_eq!(resolution.errors.len(), 1);
    }

    #[test]
    fn test_assisted_view_model_is_skipped_silently() {
        let mut vm = TypeElement::new(ClassName::get("com.example", "DetailViewModel"), TypeKind::Class);
        vm.assisted_inject = true;
        vm.markers.push(
            Marker::new(MarkerKind::ContributesViewModel)
                .param("view_model_interface", MarkerValue::Str("com.example.Bar".into())),
        );
        let resolution = resolve(&vm);
        assert!(resolution.targets.is_empty());
        assert!(resolution.errors.is_empty());
    }

    #[test]
    fn test_enum_fallback_checks() {
        let mut status = round().elements[2].clone();
        status.markers.push(
            Marker::new(MarkerKind::JsonEnumWithFallback)
                .param("fallback", MarkerValue::Str("UNKNOWN".into())),
        );
        let resolution = resolve(&status);
        assert!(resolution.targets.is_empty());
        assert_eq!(
            resolution.errors,
            [CodegenError::FallbackConstantNotFound {
                declaration: "com.example.Status".into(),
                fallback: "UNKNOWN".into(),
            }]
        );

        let mut foo = TypeElement::new(ClassName::get("com.example", "Foo"), TypeKind::Class);
        foo.markers.push(
            Marker::new(MarkerKind::JsonEnumWithFallback)
                .param("fallback", MarkerValue::Str("UNKNOWN".into())),
        );
        assert_eq!(resolve(&foo).errors[0].code(), "not_an_enum");
    }

    #[test]
    fn test_json_class_owned_elsewhere_is_skipped() {
        let mut foo = TypeElement::new(ClassName::get("com.example", "Foo"), TypeKind::Class);
        foo.markers.push(
            Marker::new(MarkerKind::JsonClass).param("generator", MarkerValue::Str("sealed:type".into())),
        );
        let resolution = resolve(&foo);
        assert!(resolution.targets.is_empty());
        assert!(resolution.errors.is_empty());
    }

    #[test]
    fn test_json_class_on_interface() {
        let mut bar = round().elements[0].clone();
        bar.markers.push(Marker::new(MarkerKind::JsonClass));
        let resolution = resolve(&bar);
        assert_eq!(resolution.errors[0].code(), "not_a_class");
    }
}
