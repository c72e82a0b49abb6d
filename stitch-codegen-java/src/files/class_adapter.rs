//! `{SimpleNames_}JsonAdapter` for classes.
//!
//! Reading collects every serialized property into a boxed local, builds
//! composed objects innermost first, then the declaration itself. When a
//! defaulted constructor parameter was not read, the declaration is built
//! through its synthetic defaults constructor with one bit per parameter in
//! the `int` masks; a cleared bit means "value supplied".

use std::collections::{HashMap, HashSet};

use stitch_codegen::{
    ArtifactKind, EngineConfig, KeepRules,
    keep_rules::mask_count,
    merge::AdapterModel,
    model::{Declaration, Property},
};
use stitch_core::{capitalize, decapitalize, getter_name, setter_name};
use stitch_ir::{ClassName, ParameterElement, Primitive, TypeName, WildcardBound};

use super::{JavaSource, known, stamp};
use crate::ast::{
    AnnotationSpec, Arg, CodeBlock, FieldSpec, JavaFile, MethodSpec, Modifier, ParameterSpec,
    TypeSpec,
};

/// Names generated code declares itself; properties get a `_` suffix
/// instead.
const RESERVED: &[&str] = &[
    "reader",
    "writer",
    "value",
    "result",
    "options",
    "moshi",
    "types",
    "localConstructor",
    "constructorRef",
    "e",
];

#[derive(Debug, Default)]
struct Namer {
    taken: HashSet<String>,
}

impl Namer {
    fn reserve(&mut self, name: String) {
        self.taken.insert(name);
    }

    fn allocate(&mut self, wanted: &str) -> String {
        let base = if RESERVED.contains(&wanted) {
            format!("{wanted}_")
        } else {
            wanted.to_string()
        };
        let mut name = base.clone();
        let mut n = 2;
        while !self.taken.insert(name.clone()) {
            name = format!("{base}{n}");
            n += 1;
        }
        name
    }
}

/// A delegate adapter field, one per distinct (type, nullability).
#[derive(Debug)]
struct Delegate {
    field: String,
    ty: TypeName,
    nullable: bool,
    /// First property read through it, reported by Moshi on failure.
    property: String,
}

/// One serialized property.
#[derive(Debug)]
struct Slot<'a> {
    group: Option<usize>,
    property: &'a Property,
    local: String,
    delegate: usize,
    /// Member properties are assigned only when read.
    set_flag: Option<String>,
}

impl Slot<'_> {
    fn is_required(&self) -> bool {
        let p = self.property;
        // Composed objects are built with every constructor argument, so
        // their defaults cannot apply.
        !p.nullable && ((self.group.is_some() && p.is_parameter()) || !p.has_default)
    }

    /// `(mask index, value after clearing this parameter's bit)`
    fn mask_update(&self) -> Option<(usize, String)> {
        let index = self.property.parameter_index()?;
        (self.group.is_none() && self.property.has_default)
            .then(|| (index / 32, format!("0x{:08x}", !(1u32 << (index % 32)))))
    }
}

#[derive(Debug)]
struct Plan<'a> {
    slots: Vec<Slot<'a>>,
    delegates: Vec<Delegate>,
    group_locals: Vec<String>,
    masks: usize,
}

impl Plan<'_> {
    fn slot(&self, group: Option<usize>, name: &str) -> Option<&Slot<'_>> {
        self.slots
            .iter()
            .find(|s| s.group == group && s.property.name == name)
    }
}

/// Serialization adapter built from an [`AdapterModel`].
pub struct ClassAdapter<'a> {
    pub model: &'a AdapterModel,
    pub config: &'a EngineConfig,
}

impl<'a> ClassAdapter<'a> {
    pub fn class_name(&self) -> ClassName {
        let declaration = &self.model.declaration.name;
        declaration.peer(format!("{}JsonAdapter", declaration.simple_names().join("_")))
    }

    pub fn keep_rules(&self) -> KeepRules {
        KeepRules::for_adapter(self.model, self.class_name())
    }

    fn declaration(&self) -> &Declaration {
        &self.model.declaration
    }

    fn plan(&self) -> Plan<'a> {
        let model = self.model;
        let mut namer = Namer::default();
        let masks = if model.declaration.has_defaulted_parameter() {
            mask_count(model.declaration.constructor.len())
        } else {
            0
        };
        for k in 0..masks {
            namer.reserve(format!("mask{k}"));
        }

        // Member-only properties without a setter cannot be restored.
        let leaves: Vec<_> = model
            .flattened()
            .into_iter()
            .filter(|flat| flat.property.is_parameter() || flat.property.mutable)
            .collect();

        let mut delegates: Vec<Delegate> = Vec::new();
        let mut by_type: HashMap<(TypeName, bool), usize> = HashMap::new();
        let mut slot_delegates = Vec::with_capacity(leaves.len());
        for flat in &leaves {
            let p = flat.property;
            let index = *by_type.entry((p.ty.clone(), p.nullable)).or_insert_with(|| {
                let base = variable_name(&p.ty);
                let wanted = if p.nullable {
                    format!("nullable{}Adapter", capitalize(&base))
                } else {
                    format!("{base}Adapter")
                };
                delegates.push(Delegate {
                    field: namer.allocate(&wanted),
                    ty: p.ty.clone(),
                    nullable: p.nullable,
                    property: p.name.clone(),
                });
                delegates.len() - 1
            });
            slot_delegates.push(index);
        }

        let mut slots: Vec<Slot<'a>> = leaves
            .iter()
            .zip(slot_delegates)
            .map(|(flat, delegate)| Slot {
                group: flat.group,
                property: flat.property,
                local: namer.allocate(&flat.property.name),
                delegate,
                set_flag: None,
            })
            .collect();
        let group_locals = model
            .composed
            .iter()
            .map(|g| namer.allocate(&g.owner.name))
            .collect();
        for slot in &mut slots {
            if !slot.property.is_parameter() {
                slot.set_flag = Some(namer.allocate(&format!("{}Set", slot.local)));
            }
        }

        Plan {
            slots,
            delegates,
            group_locals,
            masks,
        }
    }

    /// Expression for a `java.lang.reflect.Type` of `ty`.
    fn type_expr(&self, ty: &TypeName, nullable: bool) -> CodeBlock {
        match ty {
            TypeName::Primitive(p) if nullable => CodeBlock::of("$T.class", [p.boxed().into()]),
            TypeName::Primitive(_) | TypeName::Class(_) => {
                CodeBlock::of("$T.class", [Arg::ty(ty.clone())])
            }
            TypeName::Parameterized { raw, args } => {
                let mut parts = vec![CodeBlock::of("$T.class", [raw.clone().into()])];
                parts.extend(args.iter().map(|a| self.type_expr(a, false)));
                CodeBlock::of(
                    "$T.newParameterizedType($L)",
                    [known::moshi_types().into(), CodeBlock::join(parts, ", ").into()],
                )
            }
            TypeName::Array(_) if !ty.has_type_variable() => {
                CodeBlock::of("$T.class", [Arg::ty(ty.clone())])
            }
            TypeName::Array(component) => CodeBlock::of(
                "$T.arrayOf($L)",
                [
                    known::moshi_types().into(),
                    self.type_expr(component, false).into(),
                ],
            ),
            TypeName::Variable(name) => {
                match self
                    .declaration()
                    .type_parameters
                    .iter()
                    .position(|t| t == name)
                {
                    Some(index) => CodeBlock::of("types[$L]", [Arg::lit(index)]),
                    None => CodeBlock::of("$T.class", [known::object().into()]),
                }
            }
            TypeName::Wildcard(WildcardBound::Any) => CodeBlock::of(
                "$T.subtypeOf($T.class)",
                [known::moshi_types().into(), known::object().into()],
            ),
            TypeName::Wildcard(WildcardBound::Extends(bound)) => CodeBlock::of(
                "$T.subtypeOf($L)",
                [known::moshi_types().into(), self.type_expr(bound, false).into()],
            ),
            TypeName::Wildcard(WildcardBound::Super(bound)) => CodeBlock::of(
                "$T.supertypeOf($L)",
                [known::moshi_types().into(), self.type_expr(bound, false).into()],
            ),
        }
    }

    fn constructor(&self, plan: &Plan<'_>) -> MethodSpec {
        let declaration = self.declaration();
        let mut method = MethodSpec::constructor()
            .modifiers([Modifier::Public])
            .param(ParameterSpec::new("moshi", known::moshi()));

        if declaration.is_generic() {
            let count = declaration.type_parameters.len();
            method = method.param(ParameterSpec::new(
                "types",
                TypeName::Array(Box::new(TypeName::Class(known::reflect_type()))),
            ));
            method
                .push_begin_flow("if (types.length != $L)", [Arg::lit(count)])
                .push_statement(
                    "throw new $T($S + types.length)",
                    [
                        known::illegal_argument_exception().into(),
                        Arg::str(format!(
                            "TypeVariable mismatch: Expecting {count} {} for generic type variables [{}], but received ",
                            if count == 1 { "type" } else { "types" },
                            declaration.type_parameters.join(", ")
                        )),
                    ],
                )
                .push_end_flow();
        }

        for delegate in &plan.delegates {
            method.push_statement(
                "this.$N = moshi.adapter($L, $T.emptySet(), $S)",
                [
                    Arg::name(&delegate.field),
                    self.type_expr(&delegate.ty, delegate.nullable).into(),
                    known::collections().into(),
                    Arg::str(&delegate.property),
                ],
            );
        }
        method
    }

    fn to_string_method(&self) -> MethodSpec {
        MethodSpec::method("toString")
            .annotation(AnnotationSpec::new(known::override_()))
            .modifiers([Modifier::Public])
            .returns(known::string())
            .statement(
                "return $S",
                [Arg::str(format!(
                    "GeneratedJsonAdapter({})",
                    self.declaration().name.simple_names().join(".")
                ))],
            )
    }

    /// Arguments for a constructor, in parameter order.
    fn constructor_args(
        &self,
        plan: &Plan<'_>,
        group: Option<usize>,
        params: &[ParameterElement],
        properties: &[Property],
        synthetic: bool,
    ) -> CodeBlock {
        let args = params.iter().enumerate().map(|(i, param)| {
            let property = properties.iter().find(|p| p.parameter_index() == Some(i));
            match property {
                Some(p) if p.composed => match self.child_group(plan, group, &p.name) {
                    Some(local) => CodeBlock::of("$N", [Arg::name(local)]),
                    None => default_value(param),
                },
                Some(p) => match plan.slot(group, &p.name) {
                    Some(slot) if synthetic && p.has_default && p.ty.is_primitive() && !p.nullable => {
                        let zero = match &p.ty {
                            TypeName::Primitive(primitive) => primitive.zero_literal(),
                            _ => "null",
                        };
                        CodeBlock::of(
                            "$N == null ? $L : $N",
                            [Arg::name(&slot.local), Arg::lit(zero), Arg::name(&slot.local)],
                        )
                    }
                    Some(slot) => CodeBlock::of("$N", [Arg::name(&slot.local)]),
                    None => default_value(param),
                },
                None => default_value(param),
            }
        });
        CodeBlock::join(args.collect::<Vec<_>>(), ", ")
    }

    /// Local holding the composed object `name` owned by `group`.
    fn child_group<'p>(&self, plan: &'p Plan<'_>, group: Option<usize>, name: &str) -> Option<&'p str> {
        let mut path = group
            .map(|g| self.model.composed[g].path.clone())
            .unwrap_or_default();
        path.push(name.to_string());
        let (index, _) = self.model.group(&path)?;
        plan.group_locals.get(index).map(String::as_str)
    }

    /// Member assignments after `object` was constructed.
    fn assign_members(
        &self,
        method: &mut MethodSpec,
        plan: &Plan<'_>,
        object: &str,
        group: Option<usize>,
        properties: &[Property],
    ) {
        for p in properties.iter().filter(|p| !p.is_parameter()) {
            if p.composed {
                if let Some(child) = self.child_group(plan, group, &p.name) {
                    method.push_statement(
                        "$N.$N($N)",
                        [Arg::name(object), Arg::name(setter_name(&p.name)), Arg::name(child)],
                    );
                }
            } else if let Some(slot) = plan.slot(group, &p.name) {
                if let Some(flag) = &slot.set_flag {
                    method
                        .push_begin_flow("if ($N)", [Arg::name(flag)])
                        .push_statement(
                            "$N.$N($N)",
                            [
                                Arg::name(object),
                                Arg::name(setter_name(&p.name)),
                                Arg::name(&slot.local),
                            ],
                        )
                        .push_end_flow();
                }
            }
        }
    }

    fn from_json(&self, plan: &Plan<'_>) -> MethodSpec {
        let declaration = self.declaration();
        let util = known::moshi_util();
        let mut method = MethodSpec::method("fromJson")
            .annotation(AnnotationSpec::new(known::override_()))
            .modifiers([Modifier::Public])
            .returns(declaration.type_name())
            .param(ParameterSpec::new("reader", known::json_reader()))
            .throws(known::io_exception());

        for slot in &plan.slots {
            method.push_statement(
                "$T $N = null",
                [Arg::ty(slot.property.ty.boxed()), Arg::name(&slot.local)],
            );
        }
        for k in 0..plan.masks {
            method.push_statement("int mask$L = -1", [Arg::lit(k)]);
        }
        for flag in plan.slots.iter().filter_map(|s| s.set_flag.as_ref()) {
            method.push_statement("boolean $N = false", [Arg::name(flag)]);
        }

        method
            .push_statement("reader.beginObject()", [])
            .push_begin_flow("while (reader.hasNext())", [])
            .push_begin_flow("switch (reader.selectName(options))", []);
        for (i, slot) in plan.slots.iter().enumerate() {
            let p = slot.property;
            method
                .push_line("case $L:", [Arg::lit(i)])
                .push_indent()
                .push_statement(
                    "$N = $N.fromJson(reader)",
                    [
                        Arg::name(&slot.local),
                        Arg::name(&plan.delegates[slot.delegate].field),
                    ],
                );
            if !p.nullable {
                method
                    .push_begin_flow("if ($N == null)", [Arg::name(&slot.local)])
                    .push_statement(
                        "throw $T.unexpectedNull($S, $S, reader)",
                        [util.clone().into(), Arg::str(&p.name), Arg::str(p.json_name())],
                    )
                    .push_end_flow();
            }
            if let Some((mask, value)) = slot.mask_update() {
                method.push_statement("mask$L &= $L", [Arg::lit(mask), Arg::lit(value)]);
            }
            if let Some(flag) = &slot.set_flag {
                method.push_statement("$N = true", [Arg::name(flag)]);
            }
            method.push_statement("break", []).push_dedent();
        }
        method
            .push_line("case -1:", [])
            .push_indent()
            .push_statement("reader.skipName()", [])
            .push_statement("reader.skipValue()", [])
            .push_statement("break", [])
            .push_dedent()
            .push_end_flow()
            .push_end_flow()
            .push_statement("reader.endObject()", []);

        for slot in plan.slots.iter().filter(|s| s.is_required()) {
            method
                .push_begin_flow("if ($N == null)", [Arg::name(&slot.local)])
                .push_statement(
                    "throw $T.missingProperty($S, $S, reader)",
                    [
                        util.clone().into(),
                        Arg::str(&slot.property.name),
                        Arg::str(slot.property.json_name()),
                    ],
                )
                .push_end_flow();
        }

        for (index, group) in self.model.composed.iter().enumerate().rev() {
            let local = &plan.group_locals[index];
            let args = self.constructor_args(
                plan,
                Some(index),
                &group.declaration.constructor,
                &group.properties,
                false,
            );
            method.push_statement(
                "$T $N = new $T($L)",
                [
                    Arg::ty(group.owner.ty.clone()),
                    Arg::name(local),
                    Arg::ty(group.owner.ty.clone()),
                    args.into(),
                ],
            );
            self.assign_members(&mut method, plan, local, Some(index), &group.properties);
        }

        self.construct_root(&mut method, plan);
        self.assign_members(
            &mut method,
            plan,
            "result",
            None,
            &self.model.sorted_properties,
        );
        method.push_statement("return result", []);
        method
    }

    fn construct_root(&self, method: &mut MethodSpec, plan: &Plan<'_>) {
        let declaration = self.declaration();
        let ty = declaration.type_name();
        let properties = &self.model.sorted_properties;
        let direct = |synthetic| {
            self.constructor_args(plan, None, &declaration.constructor, properties, synthetic)
        };

        if plan.masks == 0 {
            method.push_statement(
                "$T result = new $T($L)",
                [Arg::ty(ty.clone()), Arg::ty(ty), direct(false).into()],
            );
            return;
        }

        // Merging rejects composed fields with defaults, so only plain
        // properties carry mask bits.
        debug_assert!(!properties.iter().any(|p| p.composed && p.has_default));
        method.push_statement("$T result", [Arg::ty(ty.clone())]);

        let defaulted: Vec<usize> = declaration
            .constructor
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_default)
            .map(|(i, _)| i)
            .collect();
        let all_readable = defaulted.iter().all(|&i| {
            properties
                .iter()
                .find(|p| p.parameter_index() == Some(i))
                .is_some_and(|p| plan.slot(None, &p.name).is_some())
        });

        if all_readable {
            let conditions: Vec<CodeBlock> = (0..plan.masks)
                .filter_map(|k| {
                    let bits = defaulted
                        .iter()
                        .filter(|&&i| i / 32 == k)
                        .fold(0u32, |acc, &i| acc | (1 << (i % 32)));
                    (bits != 0).then(|| {
                        CodeBlock::of(
                            "mask$L == $L",
                            [Arg::lit(k), Arg::lit(format!("0x{:08x}", !bits))],
                        )
                    })
                })
                .collect();
            method
                .push_begin_flow("if ($L)", [CodeBlock::join(conditions, " && ").into()])
                .push_statement("result = new $T($L)", [Arg::ty(ty.clone()), direct(false).into()])
                .push_next_flow("else", []);
        }

        let constructor_ty = TypeName::parameterized(known::constructor(), vec![ty.clone()]);
        let mut parameter_types: Vec<CodeBlock> = declaration
            .constructor
            .iter()
            .map(|p| CodeBlock::of("$T.class", [Arg::ty(erasure(&p.ty, p.nullable))]))
            .collect();
        parameter_types.extend((0..plan.masks).map(|_| CodeBlock::text("int.class")));
        parameter_types.push(CodeBlock::of(
            "$T.DEFAULT_CONSTRUCTOR_MARKER",
            [known::moshi_util().into()],
        ));
        let lookup = CodeBlock::of(
            "$T.class.getDeclaredConstructor($L)",
            [
                declaration.name.clone().into(),
                CodeBlock::join(parameter_types, ", ").into(),
            ],
        );
        let lookup = if declaration.is_generic() {
            CodeBlock::of(
                "($T) ($T) $L",
                [
                    Arg::ty(constructor_ty.clone()),
                    Arg::ty(TypeName::parameterized(
                        known::constructor(),
                        vec![TypeName::Wildcard(WildcardBound::Any)],
                    )),
                    lookup.into(),
                ],
            )
        } else {
            lookup
        };

        let mut args = vec![direct(true)];
        args.extend((0..plan.masks).map(|k| CodeBlock::of("mask$L", [Arg::lit(k)])));
        args.push(CodeBlock::text("null"));
        let args: Vec<CodeBlock> = args.into_iter().filter(|a| !a.is_empty()).collect();

        method
            .push_begin_flow("try", [])
            .push_statement(
                "$T localConstructor = this.constructorRef",
                [Arg::ty(constructor_ty)],
            )
            .push_begin_flow("if (localConstructor == null)", [])
            .push_statement("localConstructor = $L", [lookup.into()])
            .push_statement("this.constructorRef = localConstructor", [])
            .push_end_flow()
            .push_statement(
                "result = localConstructor.newInstance($L)",
                [CodeBlock::join(args, ", ").into()],
            )
            .push_next_flow("catch ($T e)", [known::reflective_operation_exception().into()])
            .push_statement("throw new $T(e)", [known::runtime_exception().into()])
            .push_end_flow();

        if all_readable {
            method.push_end_flow();
        }
    }

    fn to_json(&self, plan: &Plan<'_>) -> MethodSpec {
        let mut method = MethodSpec::method("toJson")
            .annotation(AnnotationSpec::new(known::override_()))
            .modifiers([Modifier::Public])
            .param(ParameterSpec::new("writer", known::json_writer()))
            .param(ParameterSpec::new("value", self.declaration().type_name()))
            .throws(known::io_exception())
            .begin_flow("if (value == null)", [])
            .statement(
                "throw new $T($S)",
                [
                    known::null_pointer_exception().into(),
                    Arg::str("value was null! Wrap in .nullSafe() to write nullable values."),
                ],
            )
            .end_flow()
            .statement("writer.beginObject()", []);

        for slot in &plan.slots {
            let mut access = String::from("value");
            if let Some(group) = slot.group {
                for owner in &self.model.composed[group].path {
                    access.push_str(&format!(".{}()", getter_name(owner)));
                }
            }
            access.push_str(&format!(".{}()", getter_name(&slot.property.name)));

            method
                .push_statement("writer.name($S)", [Arg::str(slot.property.json_name())])
                .push_statement(
                    "$N.toJson(writer, $L)",
                    [
                        Arg::name(&plan.delegates[slot.delegate].field),
                        Arg::lit(access),
                    ],
                );
        }
        method.push_statement("writer.endObject()", []);
        method
    }
}

impl JavaSource for ClassAdapter<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ClassAdapter
    }

    fn originating(&self) -> &ClassName {
        &self.model.declaration.name
    }

    fn java_file(&self) -> JavaFile {
        let declaration = self.declaration();
        let plan = self.plan();
        let name = self.class_name();

        let options = known::json_reader_options();
        let json_names: Vec<CodeBlock> = plan
            .slots
            .iter()
            .map(|s| CodeBlock::of("$S", [Arg::str(s.property.json_name())]))
            .collect();

        let mut ty = TypeSpec::class(name.simple_name())
            .modifiers([Modifier::Public, Modifier::Final])
            .type_variables(declaration.type_parameters.iter().cloned())
            .superclass(TypeName::parameterized(
                known::json_adapter(),
                vec![declaration.type_name()],
            ))
            .field(
                FieldSpec::new("options", options.clone())
                    .modifiers([Modifier::Private, Modifier::Final])
                    .initializer(CodeBlock::of(
                        "$T.of($L)",
                        [options.into(), CodeBlock::join(json_names, ", ").into()],
                    )),
            );
        for delegate in &plan.delegates {
            ty = ty.field(
                FieldSpec::new(
                    delegate.field.clone(),
                    TypeName::parameterized(known::json_adapter(), vec![delegate.ty.boxed()]),
                )
                .modifiers([Modifier::Private, Modifier::Final]),
            );
        }
        if plan.masks > 0 {
            ty = ty.field(
                FieldSpec::new(
                    "constructorRef",
                    TypeName::parameterized(known::constructor(), vec![declaration.type_name()]),
                )
                .modifiers([Modifier::Private, Modifier::Volatile]),
            );
        }

        let ty = ty
            .method(self.constructor(&plan))
            .method(self.to_string_method())
            .method(self.from_json(&plan))
            .method(self.to_json(&plan));

        JavaFile::new(declaration.name.package(), stamp(ty, self.config))
    }
}

/// Stem for a delegate field: `string`, `listOfString`, `intArray`.
fn variable_name(ty: &TypeName) -> String {
    match ty {
        TypeName::Primitive(p) => p.keyword().to_string(),
        TypeName::Class(name) => decapitalize(name.simple_name()),
        TypeName::Parameterized { raw, args } => {
            let args: String = args.iter().map(|a| capitalize(&variable_name(a))).collect();
            format!("{}Of{args}", decapitalize(raw.simple_name()))
        }
        TypeName::Array(component) => format!("{}Array", variable_name(component)),
        TypeName::Variable(name) => decapitalize(name),
        TypeName::Wildcard(WildcardBound::Any) => "star".to_string(),
        TypeName::Wildcard(WildcardBound::Extends(bound) | WildcardBound::Super(bound)) => {
            variable_name(bound)
        }
    }
}

/// Erased parameter type, as passed to `getDeclaredConstructor`.
fn erasure(ty: &TypeName, nullable: bool) -> TypeName {
    match ty {
        TypeName::Primitive(p) if nullable && *p != Primitive::Void => TypeName::Class(p.boxed()),
        TypeName::Parameterized { raw, .. } => TypeName::Class(raw.clone()),
        TypeName::Array(component) => TypeName::Array(Box::new(erasure(component, false))),
        TypeName::Variable(_) | TypeName::Wildcard(_) => TypeName::Class(known::object()),
        other => other.clone(),
    }
}

/// Value passed for a parameter nothing was read for.
fn default_value(param: &ParameterElement) -> CodeBlock {
    match &param.ty {
        TypeName::Primitive(p) if !param.nullable => CodeBlock::text(p.zero_literal()),
        _ => CodeBlock::text("null"),
    }
}
