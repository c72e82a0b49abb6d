//! Method and constructor parameters.

use stitch_ir::TypeName;

use super::{AnnotationSpec, Names};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: TypeName,
    pub annotations: Vec<AnnotationSpec>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            annotations: Vec::new(),
        }
    }

    pub fn annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn collect(&self, names: &mut Names) {
        for annotation in &self.annotations {
            annotation.collect(names);
        }
        names.register_type(&self.ty);
    }

    pub fn render(&self, names: &Names) -> String {
        let mut out = String::new();
        for annotation in &self.annotations {
            out.push_str(&annotation.render(names, true));
            out.push(' ');
        }
        out.push_str(&names.type_name(&self.ty));
        out.push(' ');
        out.push_str(&self.name);
        out
    }
}
