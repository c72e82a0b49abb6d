//! Snapshot tests for Java source synthesis.
//!
//! Each test runs a full round through the engine and checks the rendered
//! files. Run `cargo insta review` to update snapshots when making
//! intentional changes.

use stitch_codegen::{
    ArtifactKind, ArtifactWriter, EngineConfig, MemoryWriter, RoundOutcome,
    testing::{
        TypeBuilder, class_name, internal_binding, json_class, json_enum, multibinding, round,
        view_model,
    },
};
use stitch_codegen_java::engine;
use stitch_ir::TypeElement;

fn process(elements: Vec<TypeElement>) -> RoundOutcome {
    process_with(EngineConfig::default(), elements)
}

fn process_with(config: EngineConfig, elements: Vec<TypeElement>) -> RoundOutcome {
    engine(config)
        .process_round(round(elements))
        .expect("round should not fail fatally")
}

fn file(outcome: &RoundOutcome, kind: ArtifactKind) -> &str {
    outcome
        .artifacts
        .iter()
        .find(|a| a.kind == kind)
        .map(|a| a.contents.as_str())
        .unwrap_or_else(|| panic!("no {kind:?} artifact"))
}

#[test]
fn test_binding_module() {
    let outcome = process(vec![
        TypeBuilder::interface("com.example.domain.UserRepository").build(),
        TypeBuilder::class("com.example.data.UserRepositoryImpl")
            .implements("com.example.domain.UserRepository")
            .marker(internal_binding())
            .build(),
    ]);

    assert!(!outcome.has_errors());
    assert_eq!(outcome.artifacts.len(), 1);
    insta::assert_snapshot!(file(&outcome, ArtifactKind::BindingModule), @r"
package com.example.data;

import com.example.domain.UserRepository;
import dagger.Binds;
import dagger.Module;
import dagger.hilt.InstallIn;
import dagger.hilt.components.SingletonComponent;

@Module
@InstallIn(SingletonComponent.class)
public interface UserRepositoryUserRepositoryImplBindingModule {
  @Binds
  UserRepository bindUserRepositoryImpl(UserRepositoryImpl impl);
}
");
}

#[test]
fn test_class_adapter() {
    let outcome = process(vec![
        TypeBuilder::class("com.example.User")
            .property("id", "java.lang.String")
            .property("age", "int")
            .marker(json_class())
            .build(),
    ]);

    assert!(!outcome.has_errors());
    insta::assert_snapshot!(file(&outcome, ArtifactKind::ClassAdapter), @r#"
package com.example;

import com.squareup.moshi.JsonAdapter;
import com.squareup.moshi.JsonReader;
import com.squareup.moshi.JsonWriter;
import com.squareup.moshi.Moshi;
import com.squareup.moshi.internal.Util;
import java.io.IOException;
import java.util.Collections;

public final class UserJsonAdapter extends JsonAdapter<User> {
  private final JsonReader.Options options = JsonReader.Options.of("id", "age");

  private final JsonAdapter<String> stringAdapter;

  private final JsonAdapter<Integer> intAdapter;

  public UserJsonAdapter(Moshi moshi) {
    this.stringAdapter = moshi.adapter(String.class, Collections.emptySet(), "id");
    this.intAdapter = moshi.adapter(int.class, Collections.emptySet(), "age");
  }

  @Override
  public String toString() {
    return "GeneratedJsonAdapter(User)";
  }

  @Override
  public User fromJson(JsonReader reader) throws IOException {
    String id = null;
    Integer age = null;
    reader.beginObject();
    while (reader.hasNext()) {
      switch (reader.selectName(options)) {
        case 0:
          id = stringAdapter.fromJson(reader);
          if (id == null) {
            throw Util.unexpectedNull("id", "id", reader);
          }
          break;
        case 1:
          age = intAdapter.fromJson(reader);
          if (age == null) {
            throw Util.unexpectedNull("age", "age", reader);
          }
          break;
        case -1:
          reader.skipName();
          reader.skipValue();
          break;
      }
    }
    reader.endObject();
    if (id == null) {
      throw Util.missingProperty("id", "id", reader);
    }
    if (age == null) {
      throw Util.missingProperty("age", "age", reader);
    }
    User result = new User(id, age);
    return result;
  }

  @Override
  public void toJson(JsonWriter writer, User value) throws IOException {
    if (value == null) {
      throw new NullPointerException("value was null! Wrap in .nullSafe() to write nullable values.");
    }
    writer.beginObject();
    writer.name("id");
    stringAdapter.toJson(writer, value.getId());
    writer.name("age");
    intAdapter.toJson(writer, value.getAge());
    writer.endObject();
  }
}
"#);
}

#[test]
fn test_class_adapter_keep_rules() {
    let outcome = process(vec![
        TypeBuilder::class("com.example.User")
            .property("id", "java.lang.String")
            .marker(json_class())
            .build(),
    ]);

    let rules = outcome
        .artifacts
        .iter()
        .find(|a| a.kind == ArtifactKind::KeepRules)
        .expect("keep rules should be generated by default");
    assert_eq!(
        rules.identity.relative_path().to_string_lossy(),
        "META-INF/proguard/moshi-com.example.User.pro"
    );
    assert!(rules.contents.contains("-keep class com.example.UserJsonAdapter {"));

    let config = EngineConfig {
        generate_keep_rules: false,
        ..EngineConfig::default()
    };
    let outcome = process_with(
        config,
        vec![
            TypeBuilder::class("com.example.User")
                .property("id", "java.lang.String")
                .marker(json_class())
                .build(),
        ],
    );
    assert!(outcome.artifacts.iter().all(|a| a.kind != ArtifactKind::KeepRules));
}

#[test]
fn test_class_adapter_with_defaults_uses_synthetic_constructor() {
    let outcome = process(vec![
        TypeBuilder::class("com.example.Settings")
            .property("name", "java.lang.String")
            .defaulted("retries", "int")
            .marker(json_class())
            .build(),
    ]);

    let source = file(&outcome, ArtifactKind::ClassAdapter);
    assert!(source.contains("private volatile Constructor<Settings> constructorRef;"));
    assert!(source.contains("int mask0 = -1;"));
    assert!(source.contains("mask0 &= 0xfffffffd;"));
    assert!(source.contains("if (mask0 == 0xfffffffd) {"));
    assert!(source.contains(
        "localConstructor = Settings.class.getDeclaredConstructor(String.class, int.class, int.class, Util.DEFAULT_CONSTRUCTOR_MARKER);"
    ));
    assert!(source.contains(
        "result = localConstructor.newInstance(name, retries == null ? 0 : retries, mask0, null);"
    ));
    // Defaulted properties may be absent.
    assert!(!source.contains("missingProperty(\"retries\""));
}

#[test]
fn test_composed_field_never_takes_a_mask_bit() {
    let outcome = process(vec![
        TypeBuilder::class("com.example.Limits")
            .property("max", "int")
            .build(),
        TypeBuilder::class("com.example.Settings")
            .property("name", "java.lang.String")
            .property("limits", "com.example.Limits")
            .composed("limits")
            .defaulted("retries", "int")
            .marker(json_class())
            .build(),
    ]);

    assert!(!outcome.has_errors());
    let source = file(&outcome, ArtifactKind::ClassAdapter);
    // Only `retries` (parameter 2) may be left to its default.
    assert_eq!(source.matches("mask0 &= ").count(), 1);
    assert!(source.contains("mask0 &= 0xfffffffb;"));
    assert!(source.contains("if (mask0 == 0xfffffffb) {"));
    assert!(source.contains(
        "Settings.class.getDeclaredConstructor(String.class, Limits.class, int.class, int.class, Util.DEFAULT_CONSTRUCTOR_MARKER);"
    ));
}

#[test]
fn test_generic_class_adapter_checks_type_arguments() {
    let outcome = process(vec![
        TypeBuilder::class("com.example.Page")
            .type_parameter("T")
            .property("items", "java.util.List<T>")
            .marker(json_class())
            .build(),
    ]);

    let source = file(&outcome, ArtifactKind::ClassAdapter);
    assert!(source.contains("public final class PageJsonAdapter<T> extends JsonAdapter<Page<T>> {"));
    assert!(source.contains("public PageJsonAdapter(Moshi moshi, Type[] types) {"));
    assert!(source.contains(
        "\"TypeVariable mismatch: Expecting 1 type for generic type variables [T], but received \" + types.length"
    ));
    assert!(source.contains("Types.newParameterizedType(List.class, types[0])"));
}

#[test]
fn test_enum_adapter_feeds_next_round() {
    let outcome = process(vec![
        TypeBuilder::enumeration("com.example.Status", &["ACTIVE", "UNKNOWN"])
            .marker(json_enum("UNKNOWN"))
            .build(),
    ]);

    assert!(!outcome.has_errors());
    let source = file(&outcome, ArtifactKind::EnumAdapter);
    assert!(source.contains(
        "public class StatusJsonAdapter extends EnumJsonAdapter<Status> implements PradarshanMoshiAdapter {"
    ));
    assert!(source.contains("super(Status.class, Status.UNKNOWN, true);"));
    assert!(source.contains("@JsonAdapterKey(type = Status.class)"));

    assert_eq!(outcome.generated_elements.len(), 1);
    assert_eq!(
        outcome.generated_elements[0].name,
        class_name("com.example.StatusJsonAdapter")
    );

    // The generated adapter contributes itself as a multibinding next round.
    let mut elements = outcome.generated_elements;
    elements.push(TypeBuilder::interface("com.personatech.core.di.PradarshanMoshiAdapter").build());
    let next = process(elements);
    assert!(!next.has_errors());
    let module = file(&next, ArtifactKind::MultibindingModule);
    assert!(module.contains("public interface PradarshanMoshiAdapterStatusJsonAdapterMultiBindingModule {"));
    assert!(module.contains("@IntoMap"));
}

#[test]
fn test_view_model_emits_mapping_and_module() {
    let outcome = process(vec![
        TypeBuilder::interface("com.example.ProfileContract").build(),
        TypeBuilder::class("com.example.ProfileViewModel")
            .superclass("androidx.lifecycle.ViewModel")
            .implements("com.example.ProfileContract")
            .marker(view_model("com.example.ProfileContract", &[]))
            .build(),
    ]);

    assert!(!outcome.has_errors());
    let kinds: Vec<_> = outcome.artifacts.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        [ArtifactKind::ViewModelClassMapping, ArtifactKind::ViewModelModule]
    );
    let mapping = file(&outcome, ArtifactKind::ViewModelClassMapping);
    assert!(mapping.contains("public class ProfileViewModel_ProfileContract_ClassMappingModule {"));
    assert!(mapping.contains("@ViewModelInterfaceKey(ProfileContract.class)"));
    assert!(mapping.contains("public static Class<? extends ViewModel> bind() {"));
    assert!(mapping.contains("return ProfileViewModel.class;"));
}

#[test]
fn test_multibinding_set_of_binder() {
    let outcome = process(vec![
        TypeBuilder::interface("com.example.Plugin").build(),
        TypeBuilder::class("com.example.LoggingPlugin")
            .implements("com.example.Plugin")
            .marker(multibinding("set", "binder"))
            .build(),
    ]);

    assert!(!outcome.has_errors());
    let module = file(&outcome, ArtifactKind::MultibindingModule);
    assert!(module.contains("public interface PluginLoggingPluginMultiBindingModule {"));
    assert!(module.contains("@IntoSet"));
    assert!(module.contains("static Plugin bindPlugin(LoggingPlugin impl) {"));
    assert!(module.contains("return impl;"));
}

#[test]
fn test_generated_annotation_is_stamped_when_configured() {
    let config = EngineConfig {
        generated: Some(class_name("javax.annotation.processing.Generated")),
        ..EngineConfig::default()
    };
    let outcome = process_with(
        config,
        vec![
            TypeBuilder::class("com.example.User")
                .property("id", "java.lang.String")
                .marker(json_class())
                .build(),
        ],
    );

    let source = file(&outcome, ArtifactKind::ClassAdapter);
    assert!(source.contains("import javax.annotation.processing.Generated;"));
    assert!(source.contains(
        "@Generated(\n    value = \"stitch\",\n    comments = \"https://github.com/personatech/stitch\"\n)\npublic final class UserJsonAdapter"
    ));
}

#[test]
fn test_colliding_adapter_names_drop_only_the_later_declaration() {
    let outcome = process(vec![
        TypeBuilder::enumeration("com.example.Order.Status", &["OPEN", "UNKNOWN"])
            .marker(json_enum("UNKNOWN"))
            .build(),
        TypeBuilder::class("com.example.Order")
            .property("id", "java.lang.String")
            .marker(json_class())
            .build(),
        TypeBuilder::interface("com.example.Clock").build(),
        TypeBuilder::class("com.example.SystemClock")
            .implements("com.example.Clock")
            .marker(internal_binding())
            .build(),
    ]);

    assert!(outcome.has_errors());
    assert_eq!(outcome.diagnostics.len(), 1);
    let diag = &outcome.diagnostics[0];
    assert_eq!(diag.code.as_deref(), Some("duplicate_output"));
    assert_eq!(diag.location.as_deref(), Some("com.example.Order"));
    assert_eq!(
        diag.message,
        "com.example.OrderJsonAdapter would be generated for both com.example.Order.Status and com.example.Order"
    );

    // The class adapter and its keep rules go; the enum adapter and the
    // unrelated binding stay.
    let kinds: Vec<_> = outcome.artifacts.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, [ArtifactKind::EnumAdapter, ArtifactKind::BindingModule]);
    assert_eq!(outcome.generated_elements.len(), 1);

    let mut writer = MemoryWriter::new();
    let results = outcome.write(&mut writer).expect("survivors should be written");
    assert_eq!(results.len(), 2);
    assert_eq!(
        writer
            .originating_index()
            .get("com.example.OrderJsonAdapter")
            .map(String::as_str),
        Some("com.example.Order.Status")
    );
}

#[test]
fn test_repeated_view_model_interface_drops_only_the_repeat() {
    let outcome = process(vec![
        TypeBuilder::interface("com.example.HomeVm").build(),
        TypeBuilder::class("com.example.HomeViewModel")
            .superclass("androidx.lifecycle.ViewModel")
            .implements("com.example.HomeVm")
            .marker(view_model("com.example.HomeVm", &["com.example.HomeVm"]))
            .build(),
    ]);

    assert!(outcome.has_errors());
    assert_eq!(outcome.diagnostics.len(), 1);
    let diag = &outcome.diagnostics[0];
    assert_eq!(diag.code.as_deref(), Some("duplicate_output"));
    assert_eq!(diag.location.as_deref(), Some("com.example.HomeViewModel"));

    let kinds: Vec<_> = outcome.artifacts.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        [ArtifactKind::ViewModelClassMapping, ArtifactKind::ViewModelModule]
    );

    let mut writer = MemoryWriter::new();
    outcome.write(&mut writer).expect("survivors should be written");
    assert!(writer.get("com.example.HomeViewModel_HomeVm_ClassMappingModule").is_some());
}
