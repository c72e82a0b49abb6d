//! `{Declaration}NetworkServiceProviderModule`

use stitch_codegen::{ArtifactKind, EngineConfig, model::Declaration, resolve::NetworkScope};
use stitch_ir::{ClassName, TypeName, WildcardBound};

use super::{JavaSource, carried_annotations, dagger_module, known, raw_type, stamp};
use crate::ast::{AnnotationSpec, Arg, CodeBlock, JavaFile, MethodSpec, Modifier, ParameterSpec, TypeSpec};

/// Provides a lazily created network service, fetched on the IO dispatcher.
pub struct NetworkServiceModule<'a> {
    pub declaration: &'a Declaration,
    pub scope: NetworkScope,
    pub config: &'a EngineConfig,
}

impl NetworkServiceModule<'_> {
    pub fn simple_name(&self) -> String {
        format!(
            "{}NetworkServiceProviderModule",
            self.declaration.simple_name()
        )
    }

    fn provider_body(&self) -> CodeBlock {
        let service = raw_type(self.declaration);
        let provider = TypeName::parameterized(
            self.config.runtime.network_service_provider.clone(),
            vec![service.clone()],
        );
        let continuation = TypeName::parameterized(
            known::continuation(),
            vec![TypeName::Wildcard(WildcardBound::Super(Box::new(
                service.clone(),
            )))],
        );
        let function = TypeName::parameterized(
            known::function2(),
            vec![
                TypeName::Class(known::coroutine_scope()),
                continuation.clone(),
                service.clone(),
            ],
        );

        CodeBlock::of(
            "return new $T() {\n\
             \x20 @$T\n\
             \x20 public $T get(@$T $T continuation) {\n\
             \x20   return ($T) $T.withContext(($T) $T.getIO(), new $T() {\n\
             \x20     @$T\n\
             \x20     public $T invoke($T coroutineScope, $T continuation) {\n\
             \x20       return ($T) generator.get($T.class, continuation);\n\
             \x20     }\n\
             \x20   }, continuation);\n\
             \x20 }\n\
             }",
            [
                Arg::ty(provider),
                known::override_().into(),
                Arg::ty(service.clone()),
                known::non_null().into(),
                Arg::ty(continuation.clone()),
                Arg::ty(service.clone()),
                known::builders_kt().into(),
                known::coroutine_context().into(),
                known::dispatchers().into(),
                Arg::ty(function),
                known::override_().into(),
                Arg::ty(service.clone()),
                known::coroutine_scope().into(),
                Arg::ty(continuation),
                Arg::ty(service.clone()),
                Arg::ty(service),
            ],
        )
    }
}

impl JavaSource for NetworkServiceModule<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::NetworkServiceModule
    }

    fn originating(&self) -> &ClassName {
        &self.declaration.name
    }

    fn java_file(&self) -> JavaFile {
        let runtime = &self.config.runtime;
        let generator = ParameterSpec::new("generator", runtime.network_service_generator.clone())
            .annotation(
                AnnotationSpec::new(known::named())
                    .value(CodeBlock::of("$S", [Arg::str(self.scope.as_str())])),
            );

        let method = MethodSpec::method("provide")
            .annotation(AnnotationSpec::new(known::suppress_warnings()).value(CodeBlock::of(
                "{ $S, $S }",
                [Arg::str("Convert2Lambda"), Arg::str("Convert2Diamond")],
            )))
            .annotation(AnnotationSpec::new(known::provides()))
            .annotation(AnnotationSpec::new(known::singleton()))
            .annotations(carried_annotations(self.declaration))
            .modifiers([Modifier::Public, Modifier::Static])
            .returns(TypeName::parameterized(
                runtime.network_service_provider.clone(),
                vec![raw_type(self.declaration)],
            ))
            .param(generator)
            .statement("$L", [self.provider_body().into()]);

        let ty = TypeSpec::interface(self.simple_name())
            .modifiers([Modifier::Public])
            .method(method);
        let ty = dagger_module(stamp(ty, self.config), self.config);
        JavaFile::new(self.declaration.name.package(), ty)
    }
}
