//! Declaration Model Extractor.

use std::sync::Arc;

use serde::Serialize;
use stitch_ir::{TypeElement, TypeKind};
use tracing::trace;

use crate::{
    error::CodegenError,
    model::{Declaration, DeclarationKind, ModelCache, Property, PropertySource, Universe},
};

/// What the model will be used for.
///
/// Binding modules only need the declaration's shape; constructor
/// parameters without a backing property are injected there. Serialization
/// needs every required parameter to be readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Binding,
    Serialization,
}

/// Builds [`Declaration`]s from the round's raw types.
pub struct DeclarationExtractor<'a> {
    universe: &'a Universe,
}

impl<'a> DeclarationExtractor<'a> {
    pub fn new(universe: &'a Universe) -> Self {
        Self { universe }
    }

    /// Extract the declaration named `canonical`, memoized in `cache`.
    pub fn extract(
        &self,
        cache: &mut ModelCache,
        canonical: &str,
        purpose: Purpose,
    ) -> Result<Arc<Declaration>, CodegenError> {
        cache.get_or_insert_with(canonical, purpose, || {
            let element = self.universe.get_canonical(canonical).ok_or_else(|| {
                CodegenError::UnknownDeclaration {
                    declaration: canonical.to_string(),
                }
            })?;
            trace!(declaration = canonical, ?purpose, "extracting");
            extract_element(element, purpose).map(Arc::new)
        })
    }
}

/// Extract a model from one element without caching.
pub fn extract_element(
    element: &TypeElement,
    purpose: Purpose,
) -> Result<Declaration, CodegenError> {
    let constructor = element.constructor.clone().unwrap_or_default();

    let properties: Vec<Property> = element
        .properties
        .iter()
        .map(|p| {
            let parameter = constructor.iter().position(|c| c.name == p.name);
            let (source, has_default) = match parameter {
                Some(index) => (PropertySource::Parameter(index), constructor[index].has_default),
                None => (PropertySource::Member, p.initializer),
            };
            Property {
                name: p.name.clone(),
                ty: p.ty.clone(),
                nullable: p.nullable,
                source,
                has_default,
                transient: p.transient,
                composed: p.composed,
                mutable: p.mutable,
                json_name: p.json_name.clone(),
            }
        })
        .collect();

    if purpose == Purpose::Serialization {
        for param in constructor.iter().filter(|c| !c.has_default) {
            match properties.iter().find(|p| p.name == param.name) {
                None => {
                    return Err(CodegenError::MissingPropertyForRequiredParameter {
                        declaration: element.canonical_name(),
                        parameter: param.name.clone(),
                    });
                }
                Some(p) if p.transient => {
                    return Err(CodegenError::TransientParameterWithoutDefault {
                        declaration: element.canonical_name(),
                        property: p.name.clone(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    Ok(Declaration {
        name: element.name.clone(),
        kind: classify(element),
        type_kind: element.kind,
        enclosing: element.name.enclosing(),
        superclass: element.superclass.clone(),
        interfaces: element.interfaces.clone(),
        type_parameters: element.type_parameters.clone(),
        properties,
        constructor,
        constants: if element.kind == TypeKind::Enum {
            element.constants.clone()
        } else {
            Vec::new()
        },
        annotations: element.annotations.clone(),
        methods: element.methods.clone(),
        assisted_inject: element.assisted_inject,
    })
}

fn classify(element: &TypeElement) -> DeclarationKind {
    match element.kind {
        TypeKind::Enum => DeclarationKind::Enum,
        TypeKind::Interface => DeclarationKind::FactoryHost,
        _ if !element.interfaces.is_empty() => DeclarationKind::InterfaceImplementer,
        _ => DeclarationKind::DataHolder,
    }
}

#[cfg(test)]
mod tests {
    use stitch_ir::{ClassName, ParameterElement, Primitive, PropertyElement, Round, TypeName};

    use super::*;

    fn string() -> TypeName {
        TypeName::class(ClassName::get("java.lang", "String"))
    }

    fn property(name: &str) -> PropertyElement {
        PropertyElement {
            name: name.into(),
            ty: string(),
            nullable: false,
            transient: false,
            composed: false,
            mutable: false,
            initializer: false,
            json_name: None,
        }
    }

    fn param(name: &str, has_default: bool) -> ParameterElement {
        ParameterElement {
            name: name.into(),
            ty: string(),
            nullable: false,
            has_default,
        }
    }

    fn user() -> TypeElement {
        let mut element = TypeElement::new(ClassName::get("com.example", "User"), TypeKind::Class);
        element.properties = vec![property("nickname"), property("id"), property("name")];
        element.constructor = Some(vec![param("id", false), param("name", true)]);
        element
    }

    #[test]
    fn test_properties_know_their_parameter_position() {
        let declaration = extract_element(&user(), Purpose::Serialization).unwrap();
        let sources: Vec<_> = declaration.properties.iter().map(|p| p.source).collect();
        assert_eq!(
            sources,
            [
                PropertySource::Member,
                PropertySource::Parameter(0),
                PropertySource::Parameter(1)
            ]
        );
        assert!(declaration.property("name").unwrap().has_default);
        assert_eq!(declaration.kind, DeclarationKind::DataHolder);
    }

    #[test]
    fn test_required_parameter_needs_property() {
        let mut element = user();
        element
            .constructor
            .as_mut()
            .unwrap()
            .push(param("token", false));

        let err = extract_element(&element, Purpose::Serialization).unwrap_err();
        assert_eq!(
            err,
            CodegenError::MissingPropertyForRequiredParameter {
                declaration: "com.example.User".into(),
                parameter: "token".into(),
            }
        );
        // Injected constructors have parameters without properties.
        assert!(extract_element(&element, Purpose::Binding).is_ok());
    }

    #[test]
    fn test_transient_parameter_without_default() {
        let mut element = user();
        element.properties[1].transient = true;
        let err = extract_element(&element, Purpose::Serialization).unwrap_err();
        assert_eq!(err.code(), "transient_parameter_without_default");
    }

    #[test]
    fn test_enum_constants_and_kinds() {
        let mut status = TypeElement::new(ClassName::get("com.example", "Status"), TypeKind::Enum);
        status.constants = vec!["ACTIVE".into(), "UNKNOWN".into()];
        let declaration = extract_element(&status, Purpose::Serialization).unwrap();
        assert_eq!(declaration.kind, DeclarationKind::Enum);
        assert_eq!(declaration.constants, ["ACTIVE", "UNKNOWN"]);

        let mut foo = TypeElement::new(ClassName::get("com.example", "Foo"), TypeKind::Class);
        foo.interfaces = vec![TypeName::class(ClassName::get("com.example", "Bar"))];
        let declaration = extract_element(&foo, Purpose::Binding).unwrap();
        assert_eq!(declaration.kind, DeclarationKind::InterfaceImplementer);
    }

    #[test]
    fn test_member_initializer_counts_as_default() {
        let mut element = TypeElement::new(ClassName::get("com.example", "Counter"), TypeKind::Class);
        element.properties = vec![PropertyElement {
            ty: TypeName::Primitive(Primitive::Int),
            mutable: true,
            initializer: true,
            ..property("count")
        }];
        let declaration = extract_element(&element, Purpose::Serialization).unwrap();
        assert!(declaration.properties[0].has_default);
    }

    #[test]
    fn test_extractor_caches_results() {
        let universe = Universe::from_round(&Round::new(vec![user()]));
        let extractor = DeclarationExtractor::new(&universe);
        let mut cache = ModelCache::new();

        let first = extractor
            .extract(&mut cache, "com.example.User", Purpose::Serialization)
            .unwrap();
        let second = extractor
            .extract(&mut cache, "com.example.User", Purpose::Serialization)
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let missing = extractor.extract(&mut cache, "com.example.Nope", Purpose::Binding);
        assert_eq!(missing.unwrap_err().code(), "unknown_declaration");
    }
}
