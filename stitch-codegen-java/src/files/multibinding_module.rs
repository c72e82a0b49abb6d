//! `{Bound}{EnclosingOrDeclaration}MultiBindingModule`

use stitch_codegen::{
    ArtifactKind, EngineConfig,
    model::Declaration,
    resolve::{BoundTypeRef, ContributorKind, MultibindingKind},
};
use stitch_ir::ClassName;

use super::{JavaSource, carried_annotations, dagger_module, known, raw_type, stamp};
use crate::ast::{AnnotationSpec, Arg, JavaFile, MethodSpec, Modifier, ParameterSpec, TypeSpec};

/// Contributes a declaration into a map or set multibinding.
pub struct MultibindingModule<'a> {
    pub declaration: &'a Declaration,
    pub bound: &'a BoundTypeRef,
    pub binding_kind: MultibindingKind,
    pub contributor: ContributorKind,
    pub config: &'a EngineConfig,
}

impl MultibindingModule<'_> {
    pub fn simple_name(&self) -> String {
        format!(
            "{}{}MultiBindingModule",
            self.bound.simple_name(),
            self.declaration.enclosing_or_simple_name()
        )
    }

    fn method(&self) -> MethodSpec {
        let into = match self.binding_kind {
            MultibindingKind::Map => known::into_map(),
            MultibindingKind::Set => known::into_set(),
        };
        let method = |name: String| {
            MethodSpec::method(name)
                .annotation(AnnotationSpec::new(known::provides()))
                .annotation(AnnotationSpec::new(into.clone()))
                .annotations(carried_annotations(self.declaration))
                .modifiers([Modifier::Public, Modifier::Static])
                .returns(self.bound.type_name().clone())
        };

        let bound = self.bound.simple_name();
        match self.contributor {
            ContributorKind::Binder => method(format!("bind{bound}"))
                .param(ParameterSpec::new("impl", raw_type(self.declaration)))
                .statement("return impl", []),
            // A companion is reached through its enclosing class's static field.
            ContributorKind::Object if self.declaration.is_companion() => {
                method(format!("provide{bound}"))
                    .statement("return $T", [Arg::ty(raw_type(self.declaration))])
            }
            ContributorKind::Object => method(format!("provide{bound}"))
                .statement("return $T.INSTANCE", [Arg::ty(raw_type(self.declaration))]),
        }
    }
}

impl JavaSource for MultibindingModule<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::MultibindingModule
    }

    fn originating(&self) -> &ClassName {
        &self.declaration.name
    }

    fn java_file(&self) -> JavaFile {
        let ty = TypeSpec::interface(self.simple_name())
            .modifiers([Modifier::Public])
            .method(self.method());
        let ty = dagger_module(stamp(ty, self.config), self.config);
        JavaFile::new(self.declaration.name.package(), ty)
    }
}
