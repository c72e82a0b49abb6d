//! Declaration-scoped failures.
//!
//! None of these abort a round on their own. The pipeline turns them into
//! [`Diagnostic`](crate::pipeline::Diagnostic)s located at the declaration
//! and skips whatever the failure invalidates.

use thiserror::Error;

/// A failure that invalidates one declaration or one of its sub-artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("{declaration} implements multiple interfaces. Please specify valid bound")]
    AmbiguousBoundType {
        declaration: String,
        interfaces: Vec<String>,
    },

    #[error("{declaration} has no {searched} to infer a bound type from. Please specify valid bound")]
    MissingBoundType {
        declaration: String,
        searched: &'static str,
    },

    #[error("No property for required constructor parameter {parameter} in {declaration}")]
    MissingPropertyForRequiredParameter {
        declaration: String,
        parameter: String,
    },

    #[error("Composed field type can not have default values. {property} in {declaration} has default value")]
    ComposedFieldCannotHaveDefault {
        declaration: String,
        property: String,
    },

    #[error("Composed fields form a cycle: {}", .path.join(" -> "))]
    ComposedCycle { declaration: String, path: Vec<String> },

    #[error("Composed field {property} in {declaration} has type {ty}, which is not a class known to this round")]
    UnresolvedComposedType {
        declaration: String,
        property: String,
        ty: String,
    },

    #[error("Transient property {property} in {declaration} backs constructor parameter without default value")]
    TransientParameterWithoutDefault {
        declaration: String,
        property: String,
    },

    #[error("Serialized name '{json_name}' is used by more than one property of {declaration}")]
    DuplicateJsonName {
        declaration: String,
        json_name: String,
    },

    #[error("Invalid JsonEnumWithFallback configuration. {declaration} does not have any enum constant {fallback}")]
    FallbackConstantNotFound {
        declaration: String,
        fallback: String,
    },

    #[error("JsonEnumWithFallback is only applicable for enums. Found it declared on unsupported type \"{declaration}\"")]
    NotAnEnum { declaration: String },

    #[error("@JsonClass can't be applied to {declaration}: must be a class, found {kind}")]
    NotAClass { declaration: String, kind: String },

    #[error("{declaration} is annotated with NetworkService and has invalid scope {scope}. Supported scopes are [{}]", .supported.join(", "))]
    InvalidScopeValue {
        declaration: String,
        scope: String,
        supported: Vec<String>,
    },

    #[error("{declaration} is annotated with {marker} but {reference} is not an interface")]
    InvalidInterfaceReference {
        declaration: String,
        marker: String,
        reference: String,
    },

    #[error("Invalid {marker} parameter '{parameter}' on {declaration}: {reason}")]
    InvalidMarkerParameter {
        declaration: String,
        marker: String,
        parameter: String,
        reason: String,
    },

    #[error("{declaration} is not known to this round")]
    UnknownDeclaration { declaration: String },

    #[error("{identity} would be generated for both {first} and {declaration}")]
    DuplicateOutput {
        declaration: String,
        identity: String,
        first: String,
    },
}

impl CodegenError {
    /// Stable identifier used in diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AmbiguousBoundType { .. } => "ambiguous_bound_type",
            Self::MissingBoundType { .. } => "missing_bound_type",
            Self::MissingPropertyForRequiredParameter { .. } => {
                "missing_property_for_required_parameter"
            }
            Self::ComposedFieldCannotHaveDefault { .. } => "composed_field_cannot_have_default",
            Self::ComposedCycle { .. } => "composed_cycle",
            Self::UnresolvedComposedType { .. } => "unresolved_composed_type",
            Self::TransientParameterWithoutDefault { .. } => {
                "transient_parameter_without_default"
            }
            Self::DuplicateJsonName { .. } => "duplicate_json_name",
            Self::FallbackConstantNotFound { .. } => "fallback_constant_not_found",
            Self::NotAnEnum { .. } => "not_an_enum",
            Self::NotAClass { .. } => "not_a_class",
            Self::InvalidScopeValue { .. } => "invalid_scope_value",
            Self::InvalidInterfaceReference { .. } => "invalid_interface_reference",
            Self::InvalidMarkerParameter { .. } => "invalid_marker_parameter",
            Self::UnknownDeclaration { .. } => "unknown_declaration",
            Self::DuplicateOutput { .. } => "duplicate_output",
        }
    }

    /// Canonical name of the declaration the failure belongs to.
    pub fn declaration(&self) -> &str {
        match self {
            Self::AmbiguousBoundType { declaration, .. }
            | Self::MissingBoundType { declaration, .. }
            | Self::MissingPropertyForRequiredParameter { declaration, .. }
            | Self::ComposedFieldCannotHaveDefault { declaration, .. }
            | Self::ComposedCycle { declaration, .. }
            | Self::UnresolvedComposedType { declaration, .. }
            | Self::TransientParameterWithoutDefault { declaration, .. }
            | Self::DuplicateJsonName { declaration, .. }
            | Self::FallbackConstantNotFound { declaration, .. }
            | Self::NotAnEnum { declaration }
            | Self::NotAClass { declaration, .. }
            | Self::InvalidScopeValue { declaration, .. }
            | Self::InvalidInterfaceReference { declaration, .. }
            | Self::InvalidMarkerParameter { declaration, .. }
            | Self::UnknownDeclaration { declaration }
            | Self::DuplicateOutput { declaration, .. } => declaration,
        }
    }
}
