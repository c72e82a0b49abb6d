//! `{EnclosingOrDeclaration}JsonAdapter` for enums with a fallback constant.

use stitch_codegen::{ArtifactKind, EngineConfig, model::Declaration};
use stitch_ir::{
    AnnotationElement, AnnotationValue, ClassName, Marker, MarkerKind, MarkerValue, TypeElement,
    TypeKind, TypeName, WildcardBound,
};

use super::{JavaSource, class_literal, known, raw_type, stamp};
use crate::ast::{AnnotationSpec, Arg, CodeBlock, JavaFile, MethodSpec, Modifier, TypeSpec};

/// Extends the runtime's enum adapter with the fallback constant and
/// registers itself into the adapter multibinding.
pub struct EnumAdapter<'a> {
    pub declaration: &'a Declaration,
    pub fallback: &'a str,
    pub config: &'a EngineConfig,
}

impl EnumAdapter<'_> {
    pub fn class_name(&self) -> ClassName {
        self.declaration
            .name
            .peer(format!("{}JsonAdapter", self.declaration.enclosing_or_simple_name()))
    }

    /// The adapter as the next round sees it: a class carrying the
    /// multibinding marker, so its binding module is generated there.
    pub fn generated_element(&self) -> TypeElement {
        let runtime = &self.config.runtime;
        let mut element = TypeElement::new(self.class_name(), TypeKind::Class);
        element.superclass = Some(TypeName::parameterized(
            runtime.enum_json_adapter.clone(),
            vec![raw_type(self.declaration)],
        ));
        element.interfaces = vec![TypeName::Class(runtime.json_adapter_interface.clone())];
        element.constructor = Some(Vec::new());
        element.annotations = vec![
            AnnotationElement::new(runtime.json_adapter_key.clone())
                .member("type", AnnotationValue::Class(raw_type(self.declaration))),
        ];
        element.markers = vec![
            Marker::new(MarkerKind::ContributesMultibinding)
                .param("binding_type", MarkerValue::Str("map".into()))
                .param(
                    "bound_types",
                    MarkerValue::List(vec![runtime.json_adapter_interface.canonical_name()]),
                )
                .param("contributor_type", MarkerValue::Str("binder".into())),
        ];
        element
    }
}

impl JavaSource for EnumAdapter<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::EnumAdapter
    }

    fn originating(&self) -> &ClassName {
        &self.declaration.name
    }

    fn java_file(&self) -> JavaFile {
        let runtime = &self.config.runtime;
        let declaration = &self.declaration.name;
        let name = self.class_name();

        let constructor = MethodSpec::constructor()
            .annotation(AnnotationSpec::new(known::inject()))
            .modifiers([Modifier::Public])
            .statement(
                "super($T.class, $T.$N, true)",
                [
                    declaration.clone().into(),
                    declaration.clone().into(),
                    Arg::name(self.fallback),
                ],
            );

        let provide = MethodSpec::method("provideAdapter")
            .annotation(AnnotationSpec::new(known::override_()))
            .annotation(AnnotationSpec::new(known::not_null()))
            .modifiers([Modifier::Public])
            .returns(TypeName::parameterized(
                known::json_adapter(),
                vec![TypeName::Wildcard(WildcardBound::Any)],
            ))
            .statement("return this.nullSafe()", []);

        let ty = TypeSpec::class(name.simple_name())
            .annotation(
                AnnotationSpec::new(runtime.json_adapter_key.clone())
                    .member("type", class_literal(declaration)),
            )
            .annotation(
                AnnotationSpec::new(known::contributes_multibinding())
                    .member(
                        "boundTypes",
                        CodeBlock::of(
                            "{ $T.class }",
                            [runtime.json_adapter_interface.clone().into()],
                        ),
                    )
                    .member(
                        "contributorType",
                        CodeBlock::of("$T.Binder", [known::contributor_type().into()]),
                    ),
            )
            .modifiers([Modifier::Public])
            .superclass(TypeName::parameterized(
                runtime.enum_json_adapter.clone(),
                vec![raw_type(self.declaration)],
            ))
            .superinterface(runtime.json_adapter_interface.clone())
            .method(constructor)
            .method(provide);

        JavaFile::new(declaration.package(), stamp(ty, self.config))
    }
}
