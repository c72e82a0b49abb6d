//! `{Bound}{Declaration}BindingModule`

use stitch_codegen::{ArtifactKind, EngineConfig, model::Declaration, resolve::BoundTypeRef};
use stitch_ir::ClassName;

use super::{JavaSource, carried_annotations, dagger_module, known, raw_type, stamp};
use crate::ast::{AnnotationSpec, JavaFile, MethodSpec, Modifier, ParameterSpec, TypeSpec};

/// Binds a declaration to one bound type with `@Binds`.
pub struct BindingModule<'a> {
    pub declaration: &'a Declaration,
    pub bound: &'a BoundTypeRef,
    /// Drop `@Named` from the carried annotations.
    pub exclude_qualifier: bool,
    pub config: &'a EngineConfig,
}

impl BindingModule<'_> {
    pub fn simple_name(&self) -> String {
        format!(
            "{}{}BindingModule",
            self.bound.simple_name(),
            self.declaration.simple_name()
        )
    }

    fn carried(&self) -> Vec<AnnotationSpec> {
        let named = known::named();
        carried_annotations(self.declaration)
            .filter(|a| !(self.exclude_qualifier && *a.ty() == named))
            .collect()
    }
}

impl JavaSource for BindingModule<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::BindingModule
    }

    fn originating(&self) -> &ClassName {
        &self.declaration.name
    }

    fn java_file(&self) -> JavaFile {
        let method = MethodSpec::method(format!("bind{}", self.declaration.simple_name()))
            .annotation(AnnotationSpec::new(known::binds()))
            .annotations(self.carried())
            .modifiers([Modifier::Public, Modifier::Abstract])
            .returns(self.bound.type_name().clone())
            .param(ParameterSpec::new("impl", raw_type(self.declaration)));

        let ty = TypeSpec::interface(self.simple_name())
            .modifiers([Modifier::Public])
            .method(method);
        let ty = dagger_module(stamp(ty, self.config), self.config);
        JavaFile::new(self.declaration.name.package(), ty)
    }
}
