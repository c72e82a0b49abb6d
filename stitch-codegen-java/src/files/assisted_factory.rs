//! Assisted view-model factories.

use stitch_codegen::{ArtifactKind, EngineConfig, model::Declaration, resolve::TypeHandle};
use stitch_ir::{ClassName, ParameterElement, TypeName};

use super::{JavaSource, class_annotation, dagger_module, known, stamp};
use crate::ast::{AnnotationSpec, Arg, CodeBlock, JavaFile, MethodSpec, Modifier, ParameterSpec, TypeSpec};

/// Map key under which assisted factories are collected.
pub const ASSISTED_FACTORIES: &str = "assistedFactories";

fn factory_name(declaration: &Declaration) -> ClassName {
    declaration.name.peer(format!("Dagger{}", declaration.simple_name()))
}

fn parameter(param: &ParameterElement) -> ParameterSpec {
    let ty = if param.nullable {
        param.ty.boxed()
    } else {
        param.ty.clone()
    };
    ParameterSpec::new(param.name.clone(), ty)
}

/// `Dagger{Declaration}`: an `@AssistedFactory` extending the declared
/// factory interface, each method returning the implementation.
pub struct DaggerAssistedFactory<'a> {
    pub declaration: &'a Declaration,
    pub implementation: &'a TypeHandle,
    pub config: &'a EngineConfig,
}

impl DaggerAssistedFactory<'_> {
    pub fn class_name(&self) -> ClassName {
        factory_name(self.declaration)
    }
}

impl JavaSource for DaggerAssistedFactory<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::AssistedFactory
    }

    fn originating(&self) -> &ClassName {
        &self.declaration.name
    }

    fn java_file(&self) -> JavaFile {
        let implementation: TypeName = self.implementation.type_name().clone();
        let mut ty = TypeSpec::interface(self.class_name().simple_name())
            .annotation(AnnotationSpec::new(known::assisted_factory()))
            .modifiers([Modifier::Public])
            .superinterface(self.declaration.type_name());

        for method in &self.declaration.methods {
            let spec = method
                .params
                .iter()
                .fold(MethodSpec::method(method.name.clone()), |spec, p| {
                    spec.param(parameter(p))
                })
                .annotation(AnnotationSpec::new(known::override_()))
                .modifiers([Modifier::Public, Modifier::Abstract])
                .returns(implementation.clone());
            ty = ty.method(spec);
        }

        JavaFile::new(self.declaration.name.package(), stamp(ty, self.config))
    }
}

/// `{Declaration}DaggerFactoryClassMappingModule`: puts the generated
/// factory into the assisted-factory map, keyed by the declared interface.
pub struct AssistedFactoryMapping<'a> {
    pub declaration: &'a Declaration,
    pub config: &'a EngineConfig,
}

impl AssistedFactoryMapping<'_> {
    pub fn simple_name(&self) -> String {
        format!("{}DaggerFactoryClassMappingModule", self.declaration.simple_name())
    }
}

impl JavaSource for AssistedFactoryMapping<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::AssistedFactoryMapping
    }

    fn originating(&self) -> &ClassName {
        &self.declaration.name
    }

    fn java_file(&self) -> JavaFile {
        let method = MethodSpec::method("bind")
            .annotation(AnnotationSpec::new(known::into_map()))
            .annotation(AnnotationSpec::new(known::provides()))
            .annotation(
                AnnotationSpec::new(known::named())
                    .value(CodeBlock::of("$S", [Arg::str(ASSISTED_FACTORIES)])),
            )
            .annotation(class_annotation(
                self.config.runtime.assisted_factory_key.clone(),
                &self.declaration.name,
            ))
            .modifiers([Modifier::Public, Modifier::Static])
            .returns(known::object())
            .param(ParameterSpec::new("impl", factory_name(self.declaration)))
            .statement("return impl", []);

        let ty = TypeSpec::class(self.simple_name())
            .modifiers([Modifier::Public])
            .method(method);
        let ty = dagger_module(stamp(ty, self.config), self.config);
        JavaFile::new(self.declaration.name.package(), ty)
    }
}
