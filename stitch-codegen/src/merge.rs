//! Composed-Property Merger.
//!
//! A composed property's own properties are flattened into the owning
//! declaration's serialized form. Expansion walks an explicit stack so a
//! composed type that reaches itself is reported instead of recursing
//! forever.

use std::{collections::HashSet, sync::Arc};

use serde::Serialize;
use stitch_ir::TypeKind;

use crate::{
    error::CodegenError,
    extract::{DeclarationExtractor, Purpose},
    model::{Declaration, ModelCache, Property, Universe},
};

/// Properties flattened in from one composed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedGroup {
    /// Composed field names from the root, outermost first.
    pub path: Vec<String>,
    /// The composed property in the owning declaration.
    pub owner: Property,
    pub declaration: Arc<Declaration>,
    /// The composed type's properties, constructor-backed first.
    pub properties: Vec<Property>,
}

impl ComposedGroup {
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// A property in serialization order, with the group it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct FlatProperty<'a> {
    /// Index into [`AdapterModel::composed`]; `None` for the root.
    pub group: Option<usize>,
    pub property: &'a Property,
}

/// Everything the class adapter needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterModel {
    pub declaration: Arc<Declaration>,
    /// Root properties, constructor-backed first in parameter order, then
    /// members in declaration order. Transient properties are excluded.
    pub sorted_properties: Vec<Property>,
    /// Composed groups in depth-first order, parents before children.
    pub composed: Vec<ComposedGroup>,
}

impl AdapterModel {
    pub fn group(&self, path: &[String]) -> Option<(usize, &ComposedGroup)> {
        self.composed
            .iter()
            .enumerate()
            .find(|(_, g)| g.path == path)
    }

    /// Serialized leaf properties, composed fields expanded in place.
    pub fn flattened(&self) -> Vec<FlatProperty<'_>> {
        let mut out = Vec::new();
        self.flatten_into(&self.sorted_properties, None, &[], &mut out);
        out
    }

    fn flatten_into<'a>(
        &'a self,
        properties: &'a [Property],
        group: Option<usize>,
        path: &[String],
        out: &mut Vec<FlatProperty<'a>>,
    ) {
        for property in properties {
            if property.composed {
                let mut child_path = path.to_vec();
                child_path.push(property.name.clone());
                if let Some((index, child)) = self.group(&child_path) {
                    self.flatten_into(&child.properties, Some(index), &child_path, out);
                }
            } else {
                out.push(FlatProperty { group, property });
            }
        }
    }
}

/// Constructor-backed properties first, by position; then members, stable.
pub fn sort_properties(properties: &[Property]) -> Vec<Property> {
    let mut sorted: Vec<Property> = properties.iter().filter(|p| p.is_parameter()).cloned().collect();
    sorted.sort_by_key(|p| p.parameter_index());
    sorted.extend(properties.iter().filter(|p| !p.is_parameter()).cloned());
    sorted
}

struct Frame {
    /// Canonical names from the root to the owner of `property`.
    chain: Vec<String>,
    path: Vec<String>,
    owner: Arc<Declaration>,
    property: Property,
}

pub struct ComposedPropertyMerger<'a> {
    universe: &'a Universe,
    extractor: DeclarationExtractor<'a>,
}

impl<'a> ComposedPropertyMerger<'a> {
    pub fn new(universe: &'a Universe) -> Self {
        Self {
            universe,
            extractor: DeclarationExtractor::new(universe),
        }
    }

    pub fn merge(
        &self,
        declaration: Arc<Declaration>,
        cache: &mut ModelCache,
    ) -> Result<AdapterModel, CodegenError> {
        let sorted = sort_properties(&declaration.properties);

        let mut groups = Vec::new();
        let mut stack: Vec<Frame> = composed_frames(
            &declaration,
            &sorted,
            vec![declaration.canonical_name()],
            &[],
        );
        while let Some(frame) = stack.pop() {
            let group = self.expand(&frame, cache)?;
            let mut chain = frame.chain;
            chain.push(group.declaration.canonical_name());
            stack.extend(composed_frames(
                &group.declaration,
                &group.properties,
                chain,
                &group.path,
            ));
            groups.push(group);
        }

        let model = exclude_transient(AdapterModel {
            declaration,
            sorted_properties: sorted,
            composed: groups,
        });
        check_json_names(&model)?;
        Ok(model)
    }

    fn expand(&self, frame: &Frame, cache: &mut ModelCache) -> Result<ComposedGroup, CodegenError> {
        let owner = frame.owner.canonical_name();
        let property = &frame.property;
        if property.has_default {
            return Err(CodegenError::ComposedFieldCannotHaveDefault {
                declaration: owner,
                property: property.name.clone(),
            });
        }

        let unresolved = || CodegenError::UnresolvedComposedType {
            declaration: owner.clone(),
            property: property.name.clone(),
            ty: property.ty.to_string(),
        };
        let element = property
            .ty
            .raw_class()
            .and_then(|c| self.universe.get(c))
            .ok_or_else(unresolved)?;
        if element.kind != TypeKind::Class {
            return Err(unresolved());
        }

        let canonical = element.canonical_name();
        if frame.chain.contains(&canonical) {
            let mut path = frame.chain.clone();
            path.push(canonical);
            return Err(CodegenError::ComposedCycle {
                declaration: frame.chain[0].clone(),
                path,
            });
        }

        let declaration = self
            .extractor
            .extract(cache, &canonical, Purpose::Serialization)?;
        let mut path = frame.path.clone();
        path.push(property.name.clone());
        Ok(ComposedGroup {
            path,
            owner: property.clone(),
            properties: sort_properties(&declaration.properties),
            declaration,
        })
    }
}

/// Frames for the composed properties of one owner, reversed so they pop in
/// declaration order.
fn composed_frames(
    owner: &Arc<Declaration>,
    properties: &[Property],
    chain: Vec<String>,
    path: &[String],
) -> Vec<Frame> {
    properties
        .iter()
        .filter(|p| p.composed)
        .rev()
        .map(|p| Frame {
            chain: chain.clone(),
            path: path.to_vec(),
            owner: owner.clone(),
            property: p.clone(),
        })
        .collect()
}

/// Drop transient properties, and groups owned (directly or not) by a
/// transient field. Runs after the merge so siblings are unaffected.
fn exclude_transient(mut model: AdapterModel) -> AdapterModel {
    let dropped: Vec<Vec<String>> = model
        .composed
        .iter()
        .filter(|g| g.owner.transient)
        .map(|g| g.path.clone())
        .collect();
    model
        .composed
        .retain(|g| !dropped.iter().any(|d| g.path.starts_with(d)));
    model.sorted_properties.retain(|p| !p.transient);
    for group in &mut model.composed {
        group.properties.retain(|p| !p.transient);
    }
    model
}

fn check_json_names(model: &AdapterModel) -> Result<(), CodegenError> {
    let mut seen = HashSet::new();
    for flat in model.flattened() {
        let name = flat.property.json_name();
        if !seen.insert(name) {
            return Err(CodegenError::DuplicateJsonName {
                declaration: model.declaration.canonical_name(),
                json_name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use stitch_ir::{ClassName, ParameterElement, PropertyElement, Round, TypeElement, TypeName};

    use super::*;
    use crate::model::PropertySource;

    fn string() -> TypeName {
        TypeName::class(ClassName::get("java.lang", "String"))
    }

    fn prop(name: &str, ty: TypeName) -> PropertyElement {
        PropertyElement {
            name: name.into(),
            ty,
            nullable: false,
            transient: false,
            composed: false,
            mutable: false,
            initializer: false,
            json_name: None,
        }
    }

    fn composed(name: &str, class: &str) -> PropertyElement {
        PropertyElement {
            composed: true,
            ..prop(name, TypeName::class(ClassName::get("com.example", class)))
        }
    }

    fn class(name: &str, properties: Vec<PropertyElement>) -> TypeElement {
        let mut element = TypeElement::new(ClassName::get("com.example", name), TypeKind::Class);
        element.constructor = Some(
            properties
                .iter()
                .map(|p| ParameterElement {
                    name: p.name.clone(),
                    ty: p.ty.clone(),
                    nullable: p.nullable,
                    has_default: false,
                })
                .collect(),
        );
        element.properties = properties;
        element
    }

    fn merge(round: Vec<TypeElement>) -> Result<AdapterModel, CodegenError> {
        let universe = Universe::from_round(&Round::new(round));
        let mut cache = ModelCache::new();
        let root = DeclarationExtractor::new(&universe)
            .extract(&mut cache, "com.example.User", Purpose::Serialization)?;
        ComposedPropertyMerger::new(&universe).merge(root, &mut cache)
    }

    #[test]
    fn test_sorted_properties_put_parameters_first() {
        let mut user = class("User", vec![prop("b", string()), prop("a", string())]);
        user.properties.insert(0, PropertyElement { mutable: true, ..prop("note", string()) });
        // Constructor order differs from property order.
        user.constructor.as_mut().unwrap().reverse();

        let model = merge(vec![user]).unwrap();
        let names: Vec<_> = model.sorted_properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "note"]);
        assert_eq!(model.sorted_properties[2].source, PropertySource::Member);
    }

    #[test]
    fn test_nested_groups_flatten_in_place() {
        let user = class(
            "User",
            vec![prop("id", string()), composed("address", "Address"), prop("name", string())],
        );
        let address = class("Address", vec![prop("street", string()), composed("geo", "Geo")]);
        let geo = class("Geo", vec![prop("lat", string())]);

        let model = merge(vec![user, address, geo]).unwrap();
        let paths: Vec<_> = model.composed.iter().map(|g| g.path.join(".")).collect();
        assert_eq!(paths, ["address", "address.geo"]);

        let flat: Vec<_> = model
            .flattened()
            .iter()
            .map(|f| (f.group, f.property.name.as_str()))
            .collect();
        assert_eq!(
            flat,
            [
                (None, "id"),
                (Some(0), "street"),
                (Some(1), "lat"),
                (None, "name")
            ]
        );
    }

    #[test]
    fn test_composed_default_is_rejected() {
        let mut user = class("User", vec![composed("address", "Address")]);
        user.constructor.as_mut().unwrap()[0].has_default = true;
        let address = class("Address", vec![prop("street", string())]);

        let err = merge(vec![user, address]).unwrap_err();
        assert_eq!(
            err,
            CodegenError::ComposedFieldCannotHaveDefault {
                declaration: "com.example.User".into(),
                property: "address".into(),
            }
        );
    }

    #[test]
    fn test_cycle_is_reported() {
        let user = class("User", vec![composed("a", "A")]);
        let a = class("A", vec![composed("b", "B")]);
        let b = class("B", vec![composed("a", "A")]);

        let err = merge(vec![user, a, b]).unwrap_err();
        let CodegenError::ComposedCycle { path, .. } = err else {
            panic!("expected a cycle");
        };
        assert_eq!(
            path,
            ["com.example.User", "com.example.A", "com.example.B", "com.example.A"]
        );
    }

    #[test]
    fn test_unknown_composed_type() {
        let user = class("User", vec![composed("address", "Address")]);
        let err = merge(vec![user]).unwrap_err();
        assert_eq!(err.code(), "unresolved_composed_type");
    }

    #[test]
    fn test_transient_filter_runs_after_merge() {
        let user = class("User", vec![composed("address", "Address"), prop("id", string())]);
        let mut address = class("Address", vec![prop("street", string()), prop("cache", string())]);
        address.properties[1].transient = true;
        address.constructor.as_mut().unwrap()[1].has_default = true;

        let model = merge(vec![user, address]).unwrap();
        let names: Vec<_> = model.composed[0].properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["street"]);
    }

    #[test]
    fn test_duplicate_json_name_across_groups() {
        let user = class("User", vec![prop("street", string()), composed("address", "Address")]);
        let address = class("Address", vec![prop("street", string())]);
        let err = merge(vec![user, address]).unwrap_err();
        assert_eq!(err.code(), "duplicate_json_name");
    }

    #[test]
    fn test_merge_is_deterministic() {
        let round = || {
            vec![
                class("User", vec![composed("address", "Address")]),
                class("Address", vec![prop("street", string())]),
            ]
        };
        assert_eq!(merge(round()).unwrap(), merge(round()).unwrap());
    }
}
