//! One synthesis strategy per artifact kind.
//!
//! Every strategy is a pure function of a validated model and the engine
//! configuration; rendering the same input twice yields identical text.

use stitch_codegen::{ArtifactKind, EngineConfig, FileIdentity, GeneratedArtifact, model::Declaration};
use stitch_ir::{ClassName, TypeName};

use crate::ast::{AnnotationSpec, Arg, CodeBlock, JavaFile, TypeSpec};

/// Homepage stamped into `@Generated` comments.
pub const GENERATED_COMMENTS: &str = "https://github.com/personatech/stitch";

/// Generator name stamped into `@Generated` values.
pub const GENERATOR_NAME: &str = "stitch";

/// A synthesized Java source file.
pub trait JavaSource {
    fn kind(&self) -> ArtifactKind;

    /// The declaration the file was derived from.
    fn originating(&self) -> &ClassName;

    fn java_file(&self) -> JavaFile;

    fn artifact(&self) -> GeneratedArtifact {
        let file = self.java_file();
        GeneratedArtifact::new(
            self.kind(),
            FileIdentity::source(&file.class_name()),
            self.originating().clone(),
            file.render(),
        )
    }
}

/// Class names referenced by generated code.
pub mod known {
    use stitch_ir::ClassName;

    macro_rules! names {
        ($($fn_name:ident => $package:literal, $simple:literal;)*) => {
            $(
                pub fn $fn_name() -> ClassName {
                    ClassName::get($package, $simple)
                }
            )*
        };
    }

    names! {
        module => "dagger", "Module";
        binds => "dagger", "Binds";
        provides => "dagger", "Provides";
        into_map => "dagger.multibindings", "IntoMap";
        into_set => "dagger.multibindings", "IntoSet";
        install_in => "dagger.hilt", "InstallIn";
        assisted_factory => "dagger.assisted", "AssistedFactory";
        named => "javax.inject", "Named";
        inject => "javax.inject", "Inject";
        singleton => "javax.inject", "Singleton";
        override_ => "java.lang", "Override";
        suppress_warnings => "java.lang", "SuppressWarnings";
        object => "java.lang", "Object";
        class => "java.lang", "Class";
        string => "java.lang", "String";
        illegal_argument_exception => "java.lang", "IllegalArgumentException";
        null_pointer_exception => "java.lang", "NullPointerException";
        runtime_exception => "java.lang", "RuntimeException";
        reflective_operation_exception => "java.lang", "ReflectiveOperationException";
        io_exception => "java.io", "IOException";
        constructor => "java.lang.reflect", "Constructor";
        reflect_type => "java.lang.reflect", "Type";
        collections => "java.util", "Collections";
        not_null => "org.jetbrains.annotations", "NotNull";
        non_null => "androidx.annotation", "NonNull";
        contributes_multibinding => "com.personatech.customannotations", "ContributesMultibinding";
        contributor_type => "com.personatech.customannotations", "ContributorType";
        json_adapter => "com.squareup.moshi", "JsonAdapter";
        json_reader => "com.squareup.moshi", "JsonReader";
        json_reader_options => "com.squareup.moshi", "JsonReader.Options";
        json_writer => "com.squareup.moshi", "JsonWriter";
        moshi => "com.squareup.moshi", "Moshi";
        moshi_types => "com.squareup.moshi", "Types";
        moshi_util => "com.squareup.moshi.internal", "Util";
        continuation => "kotlin.coroutines", "Continuation";
        coroutine_context => "kotlin.coroutines", "CoroutineContext";
        function2 => "kotlin.jvm.functions", "Function2";
        builders_kt => "kotlinx.coroutines", "BuildersKt";
        dispatchers => "kotlinx.coroutines", "Dispatchers";
        coroutine_scope => "kotlinx.coroutines", "CoroutineScope";
    }
}

/// `@Generated(value = "stitch", comments = "...")` as the first annotation,
/// when configured.
pub(crate) fn stamp(ty: TypeSpec, config: &EngineConfig) -> TypeSpec {
    match &config.generated {
        Some(generated) => ty.first_annotation(
            AnnotationSpec::new(generated.clone())
                .member("value", CodeBlock::of("$S", [Arg::str(GENERATOR_NAME)]))
                .member("comments", CodeBlock::of("$S", [Arg::str(GENERATED_COMMENTS)])),
        ),
        None => ty,
    }
}

/// `@Module` and `@InstallIn(Component.class)`.
pub(crate) fn dagger_module(ty: TypeSpec, config: &EngineConfig) -> TypeSpec {
    ty.annotation(AnnotationSpec::new(known::module()))
        .annotation(class_annotation(known::install_in(), &config.runtime.install_in))
}

/// `@Ty(Value.class)`
pub(crate) fn class_annotation(ty: ClassName, value: &ClassName) -> AnnotationSpec {
    AnnotationSpec::new(ty).value(class_literal(value))
}

pub(crate) fn class_literal(name: &ClassName) -> CodeBlock {
    CodeBlock::of("$T.class", [name.clone().into()])
}

/// Declaration annotations repeated on generated bindings.
pub(crate) fn carried_annotations(declaration: &Declaration) -> impl Iterator<Item = AnnotationSpec> + '_ {
    declaration.carried_annotations().map(AnnotationSpec::from_element)
}

/// The declaration as a raw class type.
pub(crate) fn raw_type(declaration: &Declaration) -> TypeName {
    TypeName::Class(declaration.name.clone())
}

mod assisted_factory;
mod binding_module;
mod class_adapter;
mod enum_adapter;
mod keep_rules;
mod multibinding_module;
mod network_service;
mod view_model;

pub use assisted_factory::{AssistedFactoryMapping, DaggerAssistedFactory};
pub use binding_module::BindingModule;
pub use class_adapter::ClassAdapter;
pub use enum_adapter::EnumAdapter;
pub use keep_rules::KeepRulesFile;
pub use multibinding_module::MultibindingModule;
pub use network_service::NetworkServiceModule;
pub use view_model::{ViewModelClassMapping, ViewModelModule};
