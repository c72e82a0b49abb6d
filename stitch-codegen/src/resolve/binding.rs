//! Binding Resolver: which types a declaration is bound to.

use crate::{
    error::CodegenError,
    model::{Declaration, Universe},
    resolve::{BoundTypeRef, TypeHandle},
};

/// Where inference may look when no bound type was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inference {
    InterfaceOnly,
    /// Fall back to the superclass when nothing is implemented.
    InterfaceOrSuperclass,
}

/// Bound types for `declaration`: the explicit list when given, otherwise
/// the sole implemented interface.
pub fn resolve_bindings(
    declaration: &Declaration,
    explicit: &[BoundTypeRef],
    inference: Inference,
    universe: &Universe,
) -> Result<Vec<BoundTypeRef>, CodegenError> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }

    match declaration.interfaces.as_slice() {
        [sole] => Ok(vec![BoundTypeRef(TypeHandle::resolve(sole.clone(), universe))]),
        [] => match (&declaration.superclass, inference) {
            (Some(superclass), Inference::InterfaceOrSuperclass) => Ok(vec![BoundTypeRef(
                TypeHandle::resolve(superclass.clone(), universe),
            )]),
            _ => Err(CodegenError::MissingBoundType {
                declaration: declaration.canonical_name(),
                searched: match inference {
                    Inference::InterfaceOnly => "interface",
                    Inference::InterfaceOrSuperclass => "interface or superclass",
                },
            }),
        },
        many => Err(CodegenError::AmbiguousBoundType {
            declaration: declaration.canonical_name(),
            interfaces: many.iter().map(ToString::to_string).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use stitch_ir::{ClassName, Round, TypeElement, TypeKind, TypeName};

    use super::*;
    use crate::extract::{Purpose, extract_element};

    fn iface(name: &str) -> TypeName {
        TypeName::class(ClassName::get("com.example", name))
    }

    fn declaration(interfaces: &[&str], superclass: Option<&str>) -> Declaration {
        let mut element = TypeElement::new(ClassName::get("com.example", "Foo"), TypeKind::Class);
        element.interfaces = interfaces.iter().map(|n| iface(n)).collect();
        element.superclass = superclass.map(iface);
        extract_element(&element, Purpose::Binding).unwrap()
    }

    fn universe() -> Universe {
        Universe::from_round(&Round::new(vec![TypeElement::new(
            ClassName::get("com.example", "Bar"),
            TypeKind::Interface,
        )]))
    }

    #[test]
    fn test_infers_sole_interface() {
        let bound = resolve_bindings(
            &declaration(&["Bar"], None),
            &[],
            Inference::InterfaceOnly,
            &universe(),
        )
        .unwrap();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].canonical_name(), "com.example.Bar");
        assert_eq!(bound[0].0.kind(), Some(TypeKind::Interface));
    }

    #[test]
    fn test_multiple_interfaces_are_ambiguous() {
        let err = resolve_bindings(
            &declaration(&["Bar", "Baz"], None),
            &[],
            Inference::InterfaceOnly,
            &universe(),
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::AmbiguousBoundType { ref interfaces, .. } if interfaces.len() == 2));
    }

    #[test]
    fn test_explicit_list_wins_over_inference() {
        let explicit = vec![
            BoundTypeRef(TypeHandle::resolve(iface("Bar"), &universe())),
            BoundTypeRef(TypeHandle::resolve(iface("Qux"), &universe())),
        ];
        let bound = resolve_bindings(
            &declaration(&["Bar", "Baz"], None),
            &explicit,
            Inference::InterfaceOnly,
            &universe(),
        )
        .unwrap();
        assert_eq!(bound, explicit);
    }

    #[test]
    fn test_superclass_fallback_only_when_allowed() {
        let decl = declaration(&[], Some("Base"));
        let bound = resolve_bindings(&decl, &[], Inference::InterfaceOrSuperclass, &universe())
            .unwrap();
        assert_eq!(bound[0].simple_name(), "Base");
        assert!(bound[0].0.is_symbolic());

        let err = resolve_bindings(&decl, &[], Inference::InterfaceOnly, &universe()).unwrap_err();
        assert_eq!(err.code(), "missing_bound_type");
    }
}
