//! Class and interface declarations.

use std::collections::BTreeSet;

use stitch_codegen::builder::CodeBuilder;
use stitch_ir::TypeName;

use super::{AnnotationSpec, FieldSpec, MethodSpec, Modifier, Names, modifier};

/// A top-level class or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    name: String,
    interface: bool,
    modifiers: BTreeSet<Modifier>,
    annotations: Vec<AnnotationSpec>,
    type_variables: Vec<String>,
    superclass: Option<TypeName>,
    superinterfaces: Vec<TypeName>,
    fields: Vec<FieldSpec>,
    methods: Vec<MethodSpec>,
}

impl TypeSpec {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interface: false,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            type_variables: Vec::new(),
            superclass: None,
            superinterfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            interface: true,
            ..Self::class(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_interface(&self) -> bool {
        self.interface
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Prepend an annotation, e.g. a generated marker that must come first.
    pub fn first_annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.insert(0, annotation);
        self
    }

    pub fn type_variables(mut self, variables: impl IntoIterator<Item = String>) -> Self {
        self.type_variables.extend(variables);
        self
    }

    pub fn superclass(mut self, ty: impl Into<TypeName>) -> Self {
        self.superclass = Some(ty.into());
        self
    }

    /// `implements` for classes, `extends` for interfaces.
    pub fn superinterface(mut self, ty: impl Into<TypeName>) -> Self {
        self.superinterfaces.push(ty.into());
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    pub fn methods(&self) -> &[MethodSpec] {
        &self.methods
    }

    pub fn collect(&self, names: &mut Names) {
        for annotation in &self.annotations {
            annotation.collect(names);
        }
        if let Some(superclass) = &self.superclass {
            names.register_type(superclass);
        }
        for ty in &self.superinterfaces {
            names.register_type(ty);
        }
        for field in &self.fields {
            field.collect(names);
        }
        for method in self.ordered_methods() {
            method.collect(names);
        }
    }

    pub fn render(&self, names: &Names) -> String {
        let mut builder = CodeBuilder::java();
        for annotation in &self.annotations {
            builder.push_lines(&annotation.render(names, false));
        }

        let mut header = modifier::prefix(&self.modifiers);
        header.push_str(if self.interface { "interface " } else { "class " });
        header.push_str(&self.name);
        if !self.type_variables.is_empty() {
            header.push_str(&format!("<{}>", self.type_variables.join(", ")));
        }
        if let Some(superclass) = &self.superclass {
            header.push_str(&format!(" extends {}", names.type_name(superclass)));
        }
        if !self.superinterfaces.is_empty() {
            let keyword = if self.interface { "extends" } else { "implements" };
            let list: Vec<String> = self
                .superinterfaces
                .iter()
                .map(|ty| names.type_name(ty))
                .collect();
            header.push_str(&format!(" {keyword} {}", list.join(", ")));
        }
        builder.push_line(&format!("{header} {{")).push_indent();

        let mut first = true;
        for field in &self.fields {
            if !first {
                builder.push_blank();
            }
            first = false;
            builder.push_lines(&field.render(names));
        }
        for method in self.ordered_methods() {
            if !first {
                builder.push_blank();
            }
            first = false;
            method.render(&mut builder, names, &self.name, self.interface);
        }

        builder.push_dedent().push_line("}");
        builder.build()
    }

    /// Constructors first, otherwise in insertion order.
    fn ordered_methods(&self) -> impl Iterator<Item = &MethodSpec> {
        self.methods
            .iter()
            .filter(|m| m.is_constructor())
            .chain(self.methods.iter().filter(|m| !m.is_constructor()))
    }
}
