//! Raw marker parameters, as written at the use site.

use indexmap::IndexMap;
use serde::Serialize;

/// The markers the engine reacts to, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    ContributesInternalBinding,
    ContributesMultibinding,
    ContributesViewModel,
    AssistedFactory,
    JsonClass,
    JsonEnumWithFallback,
    NetworkService,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 7] = [
        Self::ContributesInternalBinding,
        Self::ContributesMultibinding,
        Self::ContributesViewModel,
        Self::AssistedFactory,
        Self::JsonClass,
        Self::JsonEnumWithFallback,
        Self::NetworkService,
    ];

    /// Key used in round files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ContributesInternalBinding => "contributes_internal_binding",
            Self::ContributesMultibinding => "contributes_multibinding",
            Self::ContributesViewModel => "contributes_view_model",
            Self::AssistedFactory => "assisted_factory",
            Self::JsonClass => "json_class",
            Self::JsonEnumWithFallback => "json_enum_with_fallback",
            Self::NetworkService => "network_service",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Canonical name of the annotation that carries this marker in source.
    pub fn annotation_name(&self) -> &'static str {
        match self {
            Self::ContributesInternalBinding => {
                "com.personatech.customannotations.ContributesInternalBinding"
            }
            Self::ContributesMultibinding => {
                "com.personatech.customannotations.ContributesMultibinding"
            }
            Self::ContributesViewModel => "com.personatech.customannotations.ContributesViewModel",
            Self::AssistedFactory => "com.personatech.customannotations.PradarshanAssistedFactory",
            Self::JsonClass => "com.squareup.moshi.JsonClass",
            Self::JsonEnumWithFallback => "com.personatech.customannotations.JsonEnumWithFallback",
            Self::NetworkService => "com.personatech.customannotations.NetworkService",
        }
    }

    /// Parameter names accepted for this marker.
    pub fn parameters(&self) -> &'static [&'static str] {
        match self {
            Self::ContributesInternalBinding => &["scope", "bound_types", "exclude_qualifier"],
            Self::ContributesMultibinding => &["binding_type", "bound_types", "contributor_type"],
            Self::ContributesViewModel => {
                &["scope", "view_model_interface", "additional_interfaces"]
            }
            Self::AssistedFactory => &["scope", "view_model_implementation"],
            Self::JsonClass => &["generate_adapter", "generator"],
            Self::JsonEnumWithFallback => &["fallback"],
            Self::NetworkService => &["scope"],
        }
    }
}

/// A raw marker parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MarkerValue {
    Bool(bool),
    Str(String),
    List(Vec<String>),
}

/// A marker with its parameters, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub params: IndexMap<String, MarkerValue>,
}

impl Marker {
    pub fn new(kind: MarkerKind) -> Self {
        Self {
            kind,
            params: IndexMap::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: MarkerValue) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&MarkerValue> {
        self.params.get(name)
    }
}
