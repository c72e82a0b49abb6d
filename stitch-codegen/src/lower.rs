//! Lowering of a parsed round file into a [`Round`].

use eyre::{Context, Result, eyre};
use stitch_ir::{
    AnnotationElement, AnnotationValue, ClassName, Marker, MarkerKind, MarkerValue,
    MethodElement, ParameterElement, PropertyElement, Round, TypeElement, TypeKind, parse_type,
};
use stitch_manifest::{
    AnnotationEntry, ParamEntry, RawAnnotationValue, RawMarkerValue, RoundFile,
    TaggedAnnotationValue, TypeEntry,
};

/// Lower a validated round file.
///
/// Types keep file order; markers are ordered by [`MarkerKind`].
pub fn lower_round(file: &RoundFile) -> Result<Round> {
    let elements = file
        .types
        .iter()
        .map(|entry| {
            lower_type(entry).wrap_err_with(|| format!("failed to lower {}", entry.qualified_name()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Round {
        error_raised: file.round.error_raised,
        elements,
    })
}

fn lower_type(entry: &TypeEntry) -> Result<TypeElement> {
    let vars = entry.type_parameters.as_slice();
    let kind = TypeKind::parse(&entry.kind).ok_or_else(|| eyre!("unknown kind '{}'", entry.kind))?;
    let mut element = TypeElement::new(ClassName::get(&entry.package, &entry.name), kind);

    element.superclass = entry
        .superclass
        .as_deref()
        .map(|s| parse_type(s, vars).map(|(ty, _)| ty))
        .transpose()?;
    element.interfaces = entry
        .interfaces
        .iter()
        .map(|s| parse_type(s, vars).map(|(ty, _)| ty))
        .collect::<std::result::Result<_, _>>()?;
    element.type_parameters = entry.type_parameters.clone();
    element.constants = entry.constants.clone();
    element.assisted_inject = entry.assisted_inject;

    element.annotations = entry
        .annotations
        .iter()
        .map(lower_annotation)
        .collect::<Result<_>>()?;

    element.properties = entry
        .properties
        .iter()
        .map(|p| {
            let (ty, nullable) = parse_type(&p.ty, vars)?;
            Ok(PropertyElement {
                name: p.name.clone(),
                ty,
                nullable,
                transient: p.transient,
                composed: p.composed,
                mutable: p.mutable,
                initializer: p.initializer,
                json_name: p.json_name.clone(),
            })
        })
        .collect::<Result<_>>()?;

    element.constructor = entry
        .constructor
        .as_ref()
        .map(|params| lower_params(params, vars))
        .transpose()?;

    element.methods = entry
        .methods
        .iter()
        .map(|m| {
            Ok(MethodElement {
                name: m.name.clone(),
                returns: parse_type(&m.returns, vars)?.0,
                params: lower_params(&m.params, vars)?,
            })
        })
        .collect::<Result<_>>()?;

    let mut markers: Vec<Marker> = entry
        .markers
        .iter()
        .map(|(key, params)| {
            let kind =
                MarkerKind::from_key(key).ok_or_else(|| eyre!("unknown marker '{key}'"))?;
            let mut marker = Marker::new(kind);
            for (name, value) in params {
                marker = marker.param(name.clone(), lower_marker_value(value));
            }
            Ok(marker)
        })
        .collect::<Result<_>>()?;
    markers.sort_by_key(|m| m.kind);
    element.markers = markers;

    Ok(element)
}

fn lower_params(params: &[ParamEntry], vars: &[String]) -> Result<Vec<ParameterElement>> {
    params
        .iter()
        .map(|p| {
            let (ty, nullable) = parse_type(&p.ty, vars)?;
            Ok(ParameterElement {
                name: p.name.clone(),
                ty,
                nullable,
                has_default: p.default,
            })
        })
        .collect()
}

fn lower_marker_value(value: &RawMarkerValue) -> MarkerValue {
    match value {
        RawMarkerValue::Bool(b) => MarkerValue::Bool(*b),
        RawMarkerValue::Str(s) => MarkerValue::Str(s.clone()),
        RawMarkerValue::List(items) => MarkerValue::List(items.clone()),
    }
}

fn lower_annotation(entry: &AnnotationEntry) -> Result<AnnotationElement> {
    let ty = ClassName::best_guess(&entry.ty)
        .ok_or_else(|| eyre!("'{}' is not a qualified class name", entry.ty))?;
    let mut annotation = AnnotationElement::new(ty);
    for (name, value) in entry.all_members() {
        annotation = annotation.member(name, lower_annotation_value(value)?);
    }
    Ok(annotation)
}

fn lower_annotation_value(value: &RawAnnotationValue) -> Result<AnnotationValue> {
    Ok(match value {
        RawAnnotationValue::Bool(b) => AnnotationValue::Literal(b.to_string()),
        RawAnnotationValue::Integer(i) => AnnotationValue::Literal(i.to_string()),
        RawAnnotationValue::Float(f) => AnnotationValue::Literal(format!("{f:?}")),
        RawAnnotationValue::Str(s) => AnnotationValue::Str(s.clone()),
        RawAnnotationValue::Array(items) => AnnotationValue::Array(
            items
                .iter()
                .map(lower_annotation_value)
                .collect::<Result<_>>()?,
        ),
        RawAnnotationValue::Tagged(TaggedAnnotationValue::Class(ty)) => {
            AnnotationValue::Class(parse_type(ty, &[])?.0)
        }
        RawAnnotationValue::Tagged(TaggedAnnotationValue::Enum(constant)) => {
            let (ty, name) = constant
                .rsplit_once('.')
                .ok_or_else(|| eyre!("'{constant}' is not an enum constant"))?;
            AnnotationValue::Enum {
                ty: ClassName::best_guess(ty)
                    .ok_or_else(|| eyre!("'{ty}' is not a qualified class name"))?,
                constant: name.to_string(),
            }
        }
        RawAnnotationValue::Tagged(TaggedAnnotationValue::Literal(code)) => {
            AnnotationValue::Literal(code.clone())
        }
    })
}
