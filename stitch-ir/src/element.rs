//! Declarations as the host sees them.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{ClassName, Marker, MarkerKind, TypeName};

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    /// A singleton `object` declaration.
    Object,
    /// The companion object of an enclosing class.
    CompanionObject,
    Annotation,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Object => "object",
            Self::CompanionObject => "companion-object",
            Self::Annotation => "annotation",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "class" => Self::Class,
            "interface" => Self::Interface,
            "enum" => Self::Enum,
            "object" => Self::Object,
            "companion-object" => Self::CompanionObject,
            "annotation" => Self::Annotation,
            _ => return None,
        })
    }

    /// Valid values, for error messages.
    pub const ALL: &'static [&'static str] = &[
        "class",
        "interface",
        "enum",
        "object",
        "companion-object",
        "annotation",
    ];
}

/// A value inside an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    /// A string literal (unquoted, unescaped).
    Str(String),
    /// A class literal, rendered `Type.class`.
    Class(TypeName),
    /// An enum constant.
    Enum { ty: ClassName, constant: String },
    /// Any other literal (numbers, booleans), rendered verbatim.
    Literal(String),
    Array(Vec<AnnotationValue>),
}

/// An annotation present on a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationElement {
    pub ty: ClassName,
    pub members: IndexMap<String, AnnotationValue>,
}

impl AnnotationElement {
    pub fn new(ty: ClassName) -> Self {
        Self {
            ty,
            members: IndexMap::new(),
        }
    }

    pub fn member(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.members.insert(name.into(), value);
        self
    }
}

/// A property declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyElement {
    pub name: String,
    pub ty: TypeName,
    pub nullable: bool,
    pub transient: bool,
    /// Marked as a composed field: its type's properties are flattened into
    /// the parent's serialized form.
    pub composed: bool,
    pub mutable: bool,
    /// Member property declared with an initializer.
    pub initializer: bool,
    /// Serialized name override.
    pub json_name: Option<String>,
}

/// A constructor or method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterElement {
    pub name: String,
    pub ty: TypeName,
    pub nullable: bool,
    pub has_default: bool,
}

/// An abstract method, as declared on a factory interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodElement {
    pub name: String,
    pub returns: TypeName,
    pub params: Vec<ParameterElement>,
}

/// One type visible to a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeElement {
    pub name: ClassName,
    pub kind: TypeKind,
    pub superclass: Option<TypeName>,
    pub interfaces: Vec<TypeName>,
    pub type_parameters: Vec<String>,
    /// Enum constants in declaration order.
    pub constants: Vec<String>,
    pub annotations: Vec<AnnotationElement>,
    pub properties: Vec<PropertyElement>,
    /// Primary constructor parameters; `None` when the type has none.
    pub constructor: Option<Vec<ParameterElement>>,
    pub methods: Vec<MethodElement>,
    pub markers: Vec<Marker>,
    /// The primary constructor is annotated `@AssistedInject`.
    pub assisted_inject: bool,
}

impl TypeElement {
    /// A bare element with no members.
    pub fn new(name: ClassName, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            superclass: None,
            interfaces: Vec::new(),
            type_parameters: Vec::new(),
            constants: Vec::new(),
            annotations: Vec::new(),
            properties: Vec::new(),
            constructor: None,
            methods: Vec::new(),
            markers: Vec::new(),
            assisted_inject: false,
        }
    }

    pub fn marker(&self, kind: MarkerKind) -> Option<&Marker> {
        self.markers.iter().find(|m| m.kind == kind)
    }

    pub fn has_markers(&self) -> bool {
        !self.markers.is_empty()
    }

    pub fn canonical_name(&self) -> String {
        self.name.canonical_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_kind_round_trips_names() {
        for name in TypeKind::ALL {
            let kind = TypeKind::parse(name).unwrap();
            assert_eq!(kind.as_str(), *name);
        }
        assert!(TypeKind::parse("record").is_none());
    }

    #[test]
    fn test_marker_lookup() {
        let mut element = TypeElement::new(ClassName::get("com.example", "Foo"), TypeKind::Class);
        assert!(!element.has_markers());
        element.markers.push(Marker::new(MarkerKind::JsonClass));
        assert!(element.marker(MarkerKind::JsonClass).is_some());
        assert!(element.marker(MarkerKind::NetworkService).is_none());
    }
}
