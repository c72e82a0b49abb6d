//! Test utilities for building rounds.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use stitch_ir::{
    AnnotationElement, ClassName, Marker, MarkerKind, MarkerValue, MethodElement,
    ParameterElement, PropertyElement, Round, TypeElement, TypeKind, TypeName, parse_type,
};

/// Parse a canonical class name, panicking on malformed input.
pub fn class_name(canonical: &str) -> ClassName {
    ClassName::best_guess(canonical)
        .unwrap_or_else(|| panic!("'{canonical}' is not a canonical class name"))
}

/// Parse a type string, panicking on malformed input.
pub fn type_name(ty: &str) -> TypeName {
    parse_type(ty, &[]).map(|(ty, _)| ty).unwrap_or_else(|e| panic!("{e}"))
}

/// Build a round from elements.
pub fn round(elements: impl IntoIterator<Item = TypeElement>) -> Round {
    Round::new(elements.into_iter().collect())
}

/// Fluent builder for a [`TypeElement`].
///
/// Type strings use the round-file syntax: qualified names, generics and a
/// trailing `?` for nullable.
///
/// ```ignore
/// let user = TypeBuilder::class("com.example.User")
///     .property("id", "java.lang.String")
///     .defaulted("age", "int")
///     .marker(json_class())
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    element: TypeElement,
}

impl TypeBuilder {
    pub fn new(canonical: &str, kind: TypeKind) -> Self {
        Self {
            element: TypeElement::new(class_name(canonical), kind),
        }
    }

    pub fn class(canonical: &str) -> Self {
        Self::new(canonical, TypeKind::Class)
    }

    pub fn interface(canonical: &str) -> Self {
        Self::new(canonical, TypeKind::Interface)
    }

    pub fn enumeration(canonical: &str, constants: &[&str]) -> Self {
        let mut builder = Self::new(canonical, TypeKind::Enum);
        builder.element.constants = constants.iter().map(|c| c.to_string()).collect();
        builder
    }

    pub fn object(canonical: &str) -> Self {
        Self::new(canonical, TypeKind::Object)
    }

    pub fn companion(canonical: &str) -> Self {
        Self::new(canonical, TypeKind::CompanionObject)
    }

    pub fn type_parameter(mut self, name: &str) -> Self {
        self.element.type_parameters.push(name.to_string());
        self
    }

    pub fn superclass(mut self, ty: &str) -> Self {
        self.element.superclass = Some(self.parse(ty).0);
        self
    }

    pub fn implements(mut self, ty: &str) -> Self {
        let ty = self.parse(ty).0;
        self.element.interfaces.push(ty);
        self
    }

    pub fn annotation(mut self, annotation: AnnotationElement) -> Self {
        self.element.annotations.push(annotation);
        self
    }

    /// A property backed by a constructor parameter without default.
    pub fn property(self, name: &str, ty: &str) -> Self {
        self.backed(name, ty, false)
    }

    /// A property backed by a constructor parameter with a default.
    pub fn defaulted(self, name: &str, ty: &str) -> Self {
        self.backed(name, ty, true)
    }

    /// A constructor parameter with no property.
    pub fn parameter(mut self, name: &str, ty: &str, has_default: bool) -> Self {
        let parameter = self.parameter_element(name, ty, has_default);
        self.element
            .constructor
            .get_or_insert_with(Vec::new)
            .push(parameter);
        self
    }

    /// A mutable member property declared outside the constructor.
    pub fn member(mut self, name: &str, ty: &str) -> Self {
        let mut property = self.property_element(name, ty);
        property.mutable = true;
        self.element.properties.push(property);
        self
    }

    /// Adjust an already-declared property.
    pub fn edit_property(mut self, name: &str, edit: impl FnOnce(&mut PropertyElement)) -> Self {
        let property = self
            .element
            .properties
            .iter_mut()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("no property '{name}'"));
        edit(property);
        self
    }

    pub fn composed(self, name: &str) -> Self {
        self.edit_property(name, |p| p.composed = true)
    }

    pub fn transient(self, name: &str) -> Self {
        self.edit_property(name, |p| p.transient = true)
    }

    pub fn method(mut self, name: &str, returns: &str, params: &[(&str, &str)]) -> Self {
        let method = MethodElement {
            name: name.to_string(),
            returns: self.parse(returns).0,
            params: params
                .iter()
                .map(|(n, ty)| self.parameter_element(n, ty, false))
                .collect(),
        };
        self.element.methods.push(method);
        self
    }

    pub fn assisted_inject(mut self) -> Self {
        self.element.assisted_inject = true;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.element.markers.push(marker);
        self.element.markers.sort_by_key(|m| m.kind);
        self
    }

    pub fn build(self) -> TypeElement {
        self.element
    }

    fn backed(mut self, name: &str, ty: &str, has_default: bool) -> Self {
        let property = self.property_element(name, ty);
        self.element.properties.push(property);
        self.parameter(name, ty, has_default)
    }

    fn parse(&self, ty: &str) -> (TypeName, bool) {
        parse_type(ty, &self.element.type_parameters).unwrap_or_else(|e| panic!("{e}"))
    }

    fn property_element(&self, name: &str, ty: &str) -> PropertyElement {
        let (ty, nullable) = self.parse(ty);
        PropertyElement {
            name: name.to_string(),
            ty,
            nullable,
            transient: false,
            composed: false,
            mutable: false,
            initializer: false,
            json_name: None,
        }
    }

    fn parameter_element(&self, name: &str, ty: &str, has_default: bool) -> ParameterElement {
        let (ty, nullable) = self.parse(ty);
        ParameterElement {
            name: name.to_string(),
            ty,
            nullable,
            has_default,
        }
    }
}

/// An annotation with a single `value` string member.
pub fn named(value: &str) -> AnnotationElement {
    AnnotationElement::new(ClassName::get("javax.inject", "Named"))
        .member("value", stitch_ir::AnnotationValue::Str(value.to_string()))
}

pub fn internal_binding() -> Marker {
    Marker::new(MarkerKind::ContributesInternalBinding)
}

pub fn multibinding(binding_type: &str, contributor: &str) -> Marker {
    Marker::new(MarkerKind::ContributesMultibinding)
        .param("binding_type", MarkerValue::Str(binding_type.to_string()))
        .param("contributor_type", MarkerValue::Str(contributor.to_string()))
}

pub fn view_model(interface: &str, additional: &[&str]) -> Marker {
    Marker::new(MarkerKind::ContributesViewModel)
        .param("view_model_interface", MarkerValue::Str(interface.to_string()))
        .param(
            "additional_interfaces",
            MarkerValue::List(additional.iter().map(|s| s.to_string()).collect()),
        )
}

pub fn assisted_factory(implementation: &str) -> Marker {
    Marker::new(MarkerKind::AssistedFactory).param(
        "view_model_implementation",
        MarkerValue::Str(implementation.to_string()),
    )
}

pub fn json_class() -> Marker {
    Marker::new(MarkerKind::JsonClass)
}

pub fn json_enum(fallback: &str) -> Marker {
    Marker::new(MarkerKind::JsonEnumWithFallback)
        .param("fallback", MarkerValue::Str(fallback.to_string()))
}

pub fn network_service(scope: &str) -> Marker {
    Marker::new(MarkerKind::NetworkService).param("scope", MarkerValue::Str(scope.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_backs_properties_with_parameters() {
        let element = TypeBuilder::class("com.example.User")
            .property("id", "java.lang.String")
            .defaulted("age", "int?")
            .member("note", "java.lang.String?")
            .build();

        assert_eq!(element.properties.len(), 3);
        let constructor = element.constructor.unwrap();
        assert_eq!(constructor.len(), 2);
        assert!(constructor[1].has_default);
        assert!(constructor[1].nullable);
        assert!(element.properties[2].mutable);
    }

    #[test]
    fn test_builder_resolves_type_parameters() {
        let element = TypeBuilder::class("com.example.Page")
            .type_parameter("T")
            .property("items", "java.util.List<T>")
            .build();
        assert!(element.properties[0].ty.has_type_variable());
    }
}
