//! Structural model of one marked declaration.

use serde::Serialize;
use stitch_ir::{
    AnnotationElement, ClassName, MarkerKind, MethodElement, ParameterElement, TypeKind, TypeName,
};

/// Shape of a declaration, as far as generation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationKind {
    DataHolder,
    Enum,
    InterfaceImplementer,
    FactoryHost,
}

/// Where a property's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertySource {
    /// Backs the primary constructor parameter at this position.
    Parameter(usize),
    /// Declared in the body only.
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub ty: TypeName,
    pub nullable: bool,
    pub source: PropertySource,
    pub has_default: bool,
    pub transient: bool,
    pub composed: bool,
    pub mutable: bool,
    pub json_name: Option<String>,
}

impl Property {
    /// Name used on the wire.
    pub fn json_name(&self) -> &str {
        self.json_name.as_deref().unwrap_or(&self.name)
    }

    pub fn parameter_index(&self) -> Option<usize> {
        match self.source {
            PropertySource::Parameter(index) => Some(index),
            PropertySource::Member => None,
        }
    }

    pub fn is_parameter(&self) -> bool {
        self.parameter_index().is_some()
    }

    /// A missing value is an error when reading.
    pub fn is_required(&self) -> bool {
        !self.nullable && !self.has_default
    }
}

/// Immutable once extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: ClassName,
    pub kind: DeclarationKind,
    pub type_kind: TypeKind,
    pub enclosing: Option<ClassName>,
    pub superclass: Option<TypeName>,
    pub interfaces: Vec<TypeName>,
    pub type_parameters: Vec<String>,
    pub properties: Vec<Property>,
    pub constructor: Vec<ParameterElement>,
    /// Enum constants in declaration order.
    pub constants: Vec<String>,
    pub annotations: Vec<AnnotationElement>,
    pub methods: Vec<MethodElement>,
    pub assisted_inject: bool,
}

impl Declaration {
    pub fn canonical_name(&self) -> String {
        self.name.canonical_name()
    }

    pub fn simple_name(&self) -> &str {
        self.name.simple_name()
    }

    /// Simple name of the enclosing type, or of the declaration itself.
    pub fn enclosing_or_simple_name(&self) -> &str {
        self.enclosing
            .as_ref()
            .map(ClassName::simple_name)
            .unwrap_or_else(|| self.simple_name())
    }

    pub fn is_companion(&self) -> bool {
        self.type_kind == TypeKind::CompanionObject
    }

    pub fn is_interface(&self) -> bool {
        self.type_kind == TypeKind::Interface
    }

    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }

    /// The declaration as a type, parameterized by its own type variables.
    pub fn type_name(&self) -> TypeName {
        TypeName::parameterized(
            self.name.clone(),
            self.type_parameters
                .iter()
                .cloned()
                .map(TypeName::Variable)
                .collect(),
        )
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_defaulted_parameter(&self) -> bool {
        self.constructor.iter().any(|p| p.has_default)
    }

    /// Annotations worth repeating on generated bindings: neither marker
    /// annotations nor compiler metadata.
    pub fn carried_annotations(&self) -> impl Iterator<Item = &AnnotationElement> {
        self.annotations.iter().filter(|a| {
            let name = a.ty.canonical_name();
            name != KOTLIN_METADATA && !MarkerKind::ALL.iter().any(|k| k.annotation_name() == name)
        })
    }
}

pub const KOTLIN_METADATA: &str = "kotlin.Metadata";
