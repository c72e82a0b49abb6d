//! View-model class mappings and binding module.

use stitch_codegen::{ArtifactKind, EngineConfig, model::Declaration, resolve::TypeHandle};
use stitch_ir::{ClassName, TypeName, WildcardBound};

use super::{JavaSource, class_annotation, class_literal, dagger_module, known, raw_type, stamp};
use crate::ast::{AnnotationSpec, JavaFile, MethodSpec, Modifier, ParameterSpec, TypeSpec};

/// `{Declaration}_{Interface}_ClassMappingModule`: maps a view-model
/// interface to the implementing class.
pub struct ViewModelClassMapping<'a> {
    pub declaration: &'a Declaration,
    pub interface: &'a TypeHandle,
    pub config: &'a EngineConfig,
}

impl ViewModelClassMapping<'_> {
    pub fn simple_name(&self) -> String {
        let interface = self
            .interface
            .class_name()
            .map(ClassName::simple_name)
            .unwrap_or_default();
        format!("{}_{interface}_ClassMappingModule", self.declaration.simple_name())
    }
}

impl JavaSource for ViewModelClassMapping<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ViewModelClassMapping
    }

    fn originating(&self) -> &ClassName {
        &self.declaration.name
    }

    fn java_file(&self) -> JavaFile {
        let runtime = &self.config.runtime;
        let mut method = MethodSpec::method("bind")
            .annotation(AnnotationSpec::new(known::into_map()))
            .annotation(AnnotationSpec::new(known::provides()));
        if let Some(interface) = self.interface.class_name() {
            method = method.annotation(class_annotation(
                runtime.view_model_interface_key.clone(),
                interface,
            ));
        }
        let method = method
            .modifiers([Modifier::Public, Modifier::Static])
            .returns(TypeName::parameterized(
                known::class(),
                vec![TypeName::Wildcard(WildcardBound::Extends(Box::new(
                    TypeName::Class(runtime.view_model.clone()),
                )))],
            ))
            .statement("return $L", [class_literal(&self.declaration.name).into()]);

        let ty = TypeSpec::class(self.simple_name())
            .modifiers([Modifier::Public])
            .method(method);
        let ty = dagger_module(stamp(ty, self.config), self.config);
        JavaFile::new(self.declaration.name.package(), ty)
    }
}

/// `{Declaration}ViewModelModule`: binds the implementation into the
/// view-model map.
pub struct ViewModelModule<'a> {
    pub declaration: &'a Declaration,
    pub config: &'a EngineConfig,
}

impl ViewModelModule<'_> {
    pub fn simple_name(&self) -> String {
        format!("{}ViewModelModule", self.declaration.simple_name())
    }
}

impl JavaSource for ViewModelModule<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ViewModelModule
    }

    fn originating(&self) -> &ClassName {
        &self.declaration.name
    }

    fn java_file(&self) -> JavaFile {
        let runtime = &self.config.runtime;
        let method = MethodSpec::method("bind")
            .annotation(AnnotationSpec::new(known::into_map()))
            .annotation(AnnotationSpec::new(known::binds()))
            .annotation(class_annotation(
                runtime.view_model_key.clone(),
                &self.declaration.name,
            ))
            .modifiers([Modifier::Public, Modifier::Abstract])
            .returns(runtime.view_model.clone())
            .param(ParameterSpec::new("impl", raw_type(self.declaration)));

        let ty = TypeSpec::interface(self.simple_name())
            .modifiers([Modifier::Public])
            .method(method);
        let ty = dagger_module(stamp(ty, self.config), self.config);
        JavaFile::new(self.declaration.name.package(), ty)
    }
}
