//! Fields.

use std::collections::BTreeSet;

use stitch_ir::TypeName;

use super::{AnnotationSpec, CodeBlock, Modifier, Names, modifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub ty: TypeName,
    pub modifiers: BTreeSet<Modifier>,
    pub annotations: Vec<AnnotationSpec>,
    pub initializer: Option<CodeBlock>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            initializer: None,
        }
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn initializer(mut self, code: CodeBlock) -> Self {
        self.initializer = Some(code);
        self
    }

    pub fn collect(&self, names: &mut Names) {
        for annotation in &self.annotations {
            annotation.collect(names);
        }
        names.register_type(&self.ty);
        if let Some(init) = &self.initializer {
            init.collect(names);
        }
    }

    pub fn render(&self, names: &Names) -> String {
        let mut out = String::new();
        for annotation in &self.annotations {
            out.push_str(&annotation.render(names, false));
            out.push('\n');
        }
        out.push_str(&modifier::prefix(&self.modifiers));
        out.push_str(&names.type_name(&self.ty));
        out.push(' ');
        out.push_str(&self.name);
        if let Some(init) = &self.initializer {
            out.push_str(" = ");
            out.push_str(&init.render(names));
        }
        out.push(';');
        out
    }
}
