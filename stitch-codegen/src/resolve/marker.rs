//! Typed marker parameters.
//!
//! Type-valued parameters may name a type that is still being compiled in
//! the same batch. Lookup first tries the round's universe and falls back
//! to a symbolic handle carrying only the name and arity. The fallback is a
//! normal result, not an error.

use serde::Serialize;
use stitch_ir::{ClassName, Marker, MarkerKind, MarkerValue, TypeElement, TypeKind, TypeName, parse_type};

use crate::{error::CodegenError, model::Universe};

/// A type reference read from a marker parameter.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TypeHandle {
    /// The type is visible to the round.
    Resolved { ty: TypeName, kind: TypeKind },
    /// Known by name only.
    Symbolic { ty: TypeName, arity: usize },
}

impl TypeHandle {
    /// Look `ty` up in the universe, recovering symbolically on a miss.
    pub fn resolve(ty: TypeName, universe: &Universe) -> Self {
        match universe.kind_of(&ty) {
            Some(kind) => Self::Resolved { ty, kind },
            None => {
                let arity = match &ty {
                    TypeName::Parameterized { args, .. } => args.len(),
                    _ => 0,
                };
                Self::Symbolic { ty, arity }
            }
        }
    }

    pub fn type_name(&self) -> &TypeName {
        match self {
            Self::Resolved { ty, .. } | Self::Symbolic { ty, .. } => ty,
        }
    }

    /// Raw class of the referenced type.
    pub fn class_name(&self) -> Option<&ClassName> {
        self.type_name().raw_class()
    }

    pub fn kind(&self) -> Option<TypeKind> {
        match self {
            Self::Resolved { kind, .. } => Some(*kind),
            Self::Symbolic { .. } => None,
        }
    }

    /// Symbolic handles are given the benefit of the doubt.
    pub fn may_be_interface(&self) -> bool {
        self.kind().is_none_or(|k| k == TypeKind::Interface)
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbolic { .. })
    }
}

/// A bound type. Two references are equal when they name the same class.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct BoundTypeRef(pub TypeHandle);

impl BoundTypeRef {
    pub fn type_name(&self) -> &TypeName {
        self.0.type_name()
    }

    pub fn canonical_name(&self) -> String {
        self.0
            .class_name()
            .map(ClassName::canonical_name)
            .unwrap_or_else(|| self.type_name().to_string())
    }

    pub fn simple_name(&self) -> &str {
        self.0.class_name().map(ClassName::simple_name).unwrap_or_default()
    }
}

impl PartialEq for BoundTypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_name() == other.canonical_name()
    }
}

impl Eq for BoundTypeRef {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MultibindingKind {
    Map,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributorKind {
    /// The declaration is injected as a parameter.
    Binder,
    /// The declaration's singleton instance is returned.
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NetworkScope {
    #[serde(rename = "loggedIn")]
    LoggedIn,
    #[serde(rename = "loggedOut")]
    LoggedOut,
}

impl NetworkScope {
    pub const SUPPORTED: [&'static str; 2] = ["loggedIn", "loggedOut"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoggedIn => "loggedIn",
            Self::LoggedOut => "loggedOut",
        }
    }

    /// Scope names are matched exactly.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "loggedIn" => Some(Self::LoggedIn),
            "loggedOut" => Some(Self::LoggedOut),
            _ => None,
        }
    }
}

/// Interpreted parameters of one marker.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "marker", rename_all = "snake_case")]
pub enum MarkerInstance {
    InternalBinding {
        scope: Option<TypeHandle>,
        /// Empty means infer.
        bound_types: Vec<BoundTypeRef>,
        exclude_qualifier: bool,
    },
    Multibinding {
        binding_kind: MultibindingKind,
        bound_types: Vec<BoundTypeRef>,
        contributor: ContributorKind,
    },
    ViewModel {
        scope: Option<TypeHandle>,
        interface: TypeHandle,
        additional: Vec<TypeHandle>,
    },
    AssistedFactory {
        scope: Option<TypeHandle>,
        implementation: TypeHandle,
    },
    JsonClass {
        generate_adapter: bool,
        generator: String,
    },
    JsonEnumWithFallback {
        fallback: String,
    },
    NetworkService {
        scope: NetworkScope,
    },
}

impl MarkerInstance {
    pub fn kind(&self) -> MarkerKind {
        match self {
            Self::InternalBinding { .. } => MarkerKind::ContributesInternalBinding,
            Self::Multibinding { .. } => MarkerKind::ContributesMultibinding,
            Self::ViewModel { .. } => MarkerKind::ContributesViewModel,
            Self::AssistedFactory { .. } => MarkerKind::AssistedFactory,
            Self::JsonClass { .. } => MarkerKind::JsonClass,
            Self::JsonEnumWithFallback { .. } => MarkerKind::JsonEnumWithFallback,
            Self::NetworkService { .. } => MarkerKind::NetworkService,
        }
    }
}

/// Reads marker parameters against one round's universe.
pub struct MarkerResolver<'a> {
    universe: &'a Universe,
}

impl<'a> MarkerResolver<'a> {
    pub fn new(universe: &'a Universe) -> Self {
        Self { universe }
    }

    pub fn resolve(
        &self,
        element: &TypeElement,
        marker: &Marker,
    ) -> Result<MarkerInstance, CodegenError> {
        let params = Params {
            declaration: element.canonical_name(),
            marker,
            universe: self.universe,
        };

        Ok(match marker.kind {
            MarkerKind::ContributesInternalBinding => MarkerInstance::InternalBinding {
                scope: params.optional_type("scope")?,
                bound_types: params.bound_types()?,
                exclude_qualifier: params.bool("exclude_qualifier", false)?,
            },
            MarkerKind::ContributesMultibinding => MarkerInstance::Multibinding {
                binding_kind: match params.optional_str("binding_type")? {
                    None => MultibindingKind::Map,
                    Some(s) if s.eq_ignore_ascii_case("map") => MultibindingKind::Map,
                    Some(s) if s.eq_ignore_ascii_case("set") => MultibindingKind::Set,
                    Some(s) => return Err(params.invalid("binding_type", format!("'{s}' is not one of map, set"))),
                },
                bound_types: params.bound_types()?,
                contributor: match params.optional_str("contributor_type")? {
                    Some(s) if s.eq_ignore_ascii_case("binder") => ContributorKind::Binder,
                    Some(s) if s.eq_ignore_ascii_case("object") => ContributorKind::Object,
                    Some(s) => {
                        return Err(params.invalid(
                            "contributor_type",
                            format!("'{s}' is not one of binder, object"),
                        ));
                    }
                    None => return Err(params.invalid("contributor_type", "is required")),
                },
            },
            MarkerKind::ContributesViewModel => MarkerInstance::ViewModel {
                scope: params.optional_type("scope")?,
                interface: params
                    .optional_type("view_model_interface")?
                    .ok_or_else(|| params.invalid("view_model_interface", "is required"))?,
                additional: params.type_list("additional_interfaces")?,
            },
            MarkerKind::AssistedFactory => MarkerInstance::AssistedFactory {
                scope: params.optional_type("scope")?,
                implementation: params
                    .optional_type("view_model_implementation")?
                    .ok_or_else(|| params.invalid("view_model_implementation", "is required"))?,
            },
            MarkerKind::JsonClass => MarkerInstance::JsonClass {
                generate_adapter: params.bool("generate_adapter", true)?,
                generator: params.optional_str("generator")?.unwrap_or_default().to_string(),
            },
            MarkerKind::JsonEnumWithFallback => MarkerInstance::JsonEnumWithFallback {
                fallback: params
                    .optional_str("fallback")?
                    .ok_or_else(|| params.invalid("fallback", "is required"))?
                    .to_string(),
            },
            MarkerKind::NetworkService => {
                let scope = params.optional_str("scope")?.unwrap_or_default();
                MarkerInstance::NetworkService {
                    scope: NetworkScope::parse(scope).ok_or_else(|| {
                        CodegenError::InvalidScopeValue {
                            declaration: params.declaration.clone(),
                            scope: scope.to_string(),
                            supported: NetworkScope::SUPPORTED.map(String::from).to_vec(),
                        }
                    })?,
                }
            }
        })
    }
}

struct Params<'a> {
    declaration: String,
    marker: &'a Marker,
    universe: &'a Universe,
}

impl Params<'_> {
    fn invalid(&self, parameter: &str, reason: impl Into<String>) -> CodegenError {
        CodegenError::InvalidMarkerParameter {
            declaration: self.declaration.clone(),
            marker: self.marker.kind.key().to_string(),
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }

    fn optional_str(&self, name: &str) -> Result<Option<&str>, CodegenError> {
        match self.marker.get(name) {
            None => Ok(None),
            Some(MarkerValue::Str(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.invalid(name, "expected a string")),
        }
    }

    fn bool(&self, name: &str, default: bool) -> Result<bool, CodegenError> {
        match self.marker.get(name) {
            None => Ok(default),
            Some(MarkerValue::Bool(b)) => Ok(*b),
            Some(_) => Err(self.invalid(name, "expected a boolean")),
        }
    }

    fn handle(&self, name: &str, raw: &str) -> Result<TypeHandle, CodegenError> {
        let (ty, _) = parse_type(raw, &[]).map_err(|e| self.invalid(name, e.reason))?;
        if ty.raw_class().is_none() {
            return Err(self.invalid(name, format!("'{raw}' is not a class type")));
        }
        Ok(TypeHandle::resolve(ty, self.universe))
    }

    fn optional_type(&self, name: &str) -> Result<Option<TypeHandle>, CodegenError> {
        self.optional_str(name)?
            .map(|raw| self.handle(name, raw))
            .transpose()
    }

    fn type_list(&self, name: &str) -> Result<Vec<TypeHandle>, CodegenError> {
        match self.marker.get(name) {
            None => Ok(Vec::new()),
            Some(MarkerValue::List(items)) => {
                items.iter().map(|raw| self.handle(name, raw)).collect()
            }
            Some(MarkerValue::Str(raw)) => Ok(vec![self.handle(name, raw)?]),
            Some(MarkerValue::Bool(_)) => Err(self.invalid(name, "expected a list of types")),
        }
    }

    fn bound_types(&self) -> Result<Vec<BoundTypeRef>, CodegenError> {
        Ok(self
            .type_list("bound_types")?
            .into_iter()
            .map(BoundTypeRef)
            .collect())
    }
}
