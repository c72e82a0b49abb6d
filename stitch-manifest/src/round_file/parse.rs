//! Round file parsing and validation.

use std::{collections::HashMap, path::Path, str::FromStr};

use stitch_ir::{ClassName, MarkerKind, TypeKind};

use super::{AnnotationEntry, RawAnnotationValue, RoundFile, TaggedAnnotationValue, TypeEntry};
use crate::{
    Error, Result,
    error::SourceContext,
    validate::{ParseContext, find_value_span},
};

impl FromStr for RoundFile {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_round_file(s, "round.toml")
    }
}

impl RoundFile {
    /// Parse a round file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_round_file(&content, &path.display().to_string())
    }

    /// Parse a round file from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_round_file(content, filename)
    }

    /// Types carrying at least one marker.
    pub fn processed(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.iter().filter(|t| !t.markers.is_empty())
    }
}

fn parse_round_file(content: &str, filename: &str) -> Result<RoundFile> {
    let source = SourceContext::new(content, filename);
    let file: RoundFile = toml::from_str(content).map_err(|e| source.parse_error(e))?;
    validate_round_file(&file, &source)?;
    Ok(file)
}

fn validate_round_file(file: &RoundFile, source: &SourceContext) -> Result<()> {
    let ctx = ParseContext::new(source);
    let mut seen: HashMap<String, usize> = HashMap::new();

    for entry in &file.types {
        let qualified = entry.qualified_name();
        if let Some(count) = seen.get_mut(&qualified) {
            *count += 1;
            return Err(duplicate_type(source, entry, *count));
        }
        seen.insert(qualified.clone(), 0);

        let type_ctx = ctx.push(qualified);
        validate_type_entry(entry, &type_ctx)?;
    }
    Ok(())
}

fn duplicate_type(source: &SourceContext, entry: &TypeEntry, occurrence: usize) -> Box<Error> {
    let first = find_value_span(source.src(), &entry.name, 0);
    let second = find_value_span(source.src(), &entry.name, occurrence);
    match (first, second) {
        (Some(first), Some(second)) => {
            source.duplicate_type_error(entry.qualified_name(), first, second)
        }
        _ => source.validation_error(
            format!("type '{}' is declared twice", entry.qualified_name()),
            None,
        ),
    }
}

fn validate_type_entry(entry: &TypeEntry, ctx: &ParseContext<'_>) -> Result<()> {
    let source = ctx.source();
    ctx.validate_package(&entry.package)?;
    for simple in entry.name.split('.') {
        ctx.validate_name(simple, "type")?;
    }

    let kind = TypeKind::parse(&entry.kind)
        .ok_or_else(|| source.unknown_kind_error(&entry.kind, ctx.find_span(&entry.kind)))?;
    if kind == TypeKind::CompanionObject && !entry.name.contains('.') {
        return Err(source.validation_error(
            format!(
                "companion object '{}' must be nested in its enclosing class",
                entry.qualified_name()
            ),
            ctx.find_span(&entry.name),
        ));
    }

    for param in &entry.type_parameters {
        ctx.validate_name(param, "type parameter")?;
    }
    let vars = entry.type_parameters.as_slice();

    if let Some(superclass) = &entry.superclass {
        ctx.validate_type(superclass, vars)?;
    }
    for interface in &entry.interfaces {
        ctx.validate_type(interface, vars)?;
    }
    for constant in &entry.constants {
        ctx.validate_name(constant, "enum constant")?;
    }

    let props_ctx = ctx.push("properties");
    for property in &entry.properties {
        props_ctx.validate_name(&property.name, "property")?;
        props_ctx.validate_type(&property.ty, vars)?;
    }

    if let Some(params) = &entry.constructor {
        let ctor_ctx = ctx.push("constructor");
        for param in params {
            ctor_ctx.validate_name(&param.name, "constructor parameter")?;
            ctor_ctx.validate_type(&param.ty, vars)?;
        }
    }

    for method in &entry.methods {
        let method_ctx = ctx.push(method.name.clone());
        method_ctx.validate_name(&method.name, "method")?;
        method_ctx.validate_type(&method.returns, vars)?;
        for param in &method.params {
            method_ctx.validate_name(&param.name, "parameter")?;
            method_ctx.validate_type(&param.ty, vars)?;
        }
    }

    for annotation in &entry.annotations {
        validate_annotation(annotation, ctx)?;
    }

    for (key, params) in &entry.markers {
        let marker = MarkerKind::from_key(key)
            .ok_or_else(|| source.unknown_marker_error(key, find_value_span(source.src(), key, 0)))?;
        for name in params.keys() {
            if !marker.parameters().contains(&name.as_str()) {
                return Err(source.validation_error(
                    format!(
                        "unknown parameter '{}' for marker '{}' (expected one of: {})",
                        name,
                        key,
                        marker.parameters().join(", ")
                    ),
                    find_value_span(source.src(), name, 0),
                ));
            }
        }
    }

    Ok(())
}

fn validate_annotation(annotation: &AnnotationEntry, ctx: &ParseContext<'_>) -> Result<()> {
    let source = ctx.source();
    let class_name = |value: &str| {
        ClassName::best_guess(value).ok_or_else(|| {
            source.invalid_type_error(value, "not a qualified class name", ctx.find_span(value))
        })
    };

    class_name(&annotation.ty)?;
    for (name, value) in annotation.all_members() {
        ctx.validate_name(name, "annotation member")?;
        validate_annotation_value(value, ctx, &class_name)?;
    }
    Ok(())
}

fn validate_annotation_value(
    value: &RawAnnotationValue,
    ctx: &ParseContext<'_>,
    class_name: &dyn Fn(&str) -> Result<ClassName>,
) -> Result<()> {
    match value {
        RawAnnotationValue::Tagged(TaggedAnnotationValue::Class(ty)) => {
            ctx.validate_type(ty, &[])?;
        }
        RawAnnotationValue::Tagged(TaggedAnnotationValue::Enum(constant)) => {
            let (ty, name) = constant.rsplit_once('.').ok_or_else(|| {
                ctx.source().invalid_type_error(
                    constant,
                    "enum values are written as 'com.example.Kind.CONSTANT'",
                    ctx.find_span(constant),
                )
            })?;
            class_name(ty)?;
            ctx.validate_name(name, "enum constant")?;
        }
        RawAnnotationValue::Array(items) => {
            for item in items {
                validate_annotation_value(item, ctx, class_name)?;
            }
        }
        _ => {}
    }
    Ok(())
}
