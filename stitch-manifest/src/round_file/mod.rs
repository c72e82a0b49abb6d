//! Round files: the declarations visible to one processing round.

mod parse;

use indexmap::IndexMap;
use serde::Deserialize;

/// Root of a round file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoundFile {
    #[serde(default)]
    pub round: RoundHeader,

    /// Every type visible to the round, in file order.
    #[serde(default, rename = "type")]
    pub types: Vec<TypeEntry>,
}

/// `[round]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoundHeader {
    /// An error was raised in the previous round.
    #[serde(default)]
    pub error_raised: bool,
}

/// `[[type]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    #[serde(default)]
    pub package: String,
    /// Dotted simple-name chain (`Outer.Inner`).
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub constants: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,
    /// Primary constructor parameters; absent when the type has none.
    pub constructor: Option<Vec<ParamEntry>>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
    #[serde(default)]
    pub assisted_inject: bool,
    /// Marker key → parameters.
    #[serde(default)]
    pub markers: IndexMap<String, MarkerEntry>,
}

fn default_kind() -> String {
    "class".to_string()
}

impl TypeEntry {
    /// Canonical name as written (`package.Outer.Inner`).
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

/// Parameters of one marker, uninterpreted.
pub type MarkerEntry = IndexMap<String, RawMarkerValue>;

/// A marker parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawMarkerValue {
    Bool(bool),
    Str(String),
    List(Vec<String>),
}

/// `[[type.properties]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub transient: bool,
    #[serde(default)]
    pub composed: bool,
    #[serde(default)]
    pub mutable: bool,
    #[serde(default)]
    pub initializer: bool,
    pub json_name: Option<String>,
}

/// A constructor or method parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub default: bool,
}

/// `[[type.methods]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodEntry {
    pub name: String,
    pub returns: String,
    #[serde(default)]
    pub params: Vec<ParamEntry>,
}

/// An annotation on a type: `{ type = "javax.inject.Named", value = "primary" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationEntry {
    #[serde(rename = "type")]
    pub ty: String,
    /// Shorthand for the `value` member.
    pub value: Option<RawAnnotationValue>,
    #[serde(default)]
    pub members: IndexMap<String, RawAnnotationValue>,
}

impl AnnotationEntry {
    /// Members in order, with the `value` shorthand first.
    pub fn all_members(&self) -> impl Iterator<Item = (&str, &RawAnnotationValue)> {
        self.value
            .iter()
            .map(|v| ("value", v))
            .chain(self.members.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

/// An annotation member value.
///
/// Plain strings are string literals; class literals and enum constants use
/// a one-key table (`{ class = "com.example.Foo" }`, `{ enum = "com.example.Kind.A" }`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAnnotationValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Str(String),
    Array(Vec<RawAnnotationValue>),
    Tagged(TaggedAnnotationValue),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum TaggedAnnotationValue {
    Class(String),
    Enum(String),
    Literal(String),
}
