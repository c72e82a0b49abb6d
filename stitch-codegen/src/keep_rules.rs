//! Keep-Rule Synthesizer.
//!
//! Rules keep a serialized class's name and its generated adapter's
//! constructor alive through shrinking, plus the synthetic defaults
//! constructor when the class has defaulted parameters.

use serde::Serialize;
use stitch_ir::{ClassName, Primitive, TypeName};

use crate::merge::AdapterModel;

const MOSHI: &str = "com.squareup.moshi.Moshi";
const TYPE_ARRAY: &str = "java.lang.reflect.Type[]";
const DEFAULT_CONSTRUCTOR_MARKER: &str = "kotlin.jvm.internal.DefaultConstructorMarker";

/// Retention rules for one adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeepRules {
    pub target: ClassName,
    pub adapter: ClassName,
    /// Erased types of the adapter's constructor parameters.
    pub adapter_constructor_params: Vec<String>,
    /// Erased types of the target's constructor parameters; set only when
    /// the target has defaulted parameters.
    pub target_constructor_params: Option<Vec<String>>,
}

impl KeepRules {
    pub fn for_adapter(model: &AdapterModel, adapter: ClassName) -> Self {
        let declaration = &model.declaration;
        let mut adapter_constructor_params = vec![MOSHI.to_string()];
        if declaration.is_generic() {
            adapter_constructor_params.push(TYPE_ARRAY.to_string());
        }

        let target_constructor_params = declaration.has_defaulted_parameter().then(|| {
            declaration
                .constructor
                .iter()
                .map(|p| erased_name(&p.ty, p.nullable))
                .collect()
        });

        Self {
            target: declaration.name.clone(),
            adapter,
            adapter_constructor_params,
            target_constructor_params,
        }
    }

    /// `META-INF/proguard/moshi-{target}.pro`
    pub fn path(&self) -> String {
        format!("META-INF/proguard/moshi-{}.pro", self.target.canonical_name())
    }

    pub fn render(&self) -> String {
        let target = self.target.reflection_name();
        let mut out = String::new();
        let mut line = |s: &str| {
            out.push_str(s);
            out.push('\n');
        };

        line(&format!("-if class {target}"));
        line(&format!("-keepnames class {target}"));
        line(&format!("-if class {target}"));
        line(&format!("-keep class {} {{", self.adapter.reflection_name()));
        line(&format!(
            "    public <init>({});",
            self.adapter_constructor_params.join(",")
        ));
        line("}");

        if let Some(params) = &self.target_constructor_params {
            let mut all = params.clone();
            all.extend(std::iter::repeat_n("int".to_string(), mask_count(params.len())));
            all.push(DEFAULT_CONSTRUCTOR_MARKER.to_string());

            line(&format!("-if class {target}"));
            line(&format!("-keepnames class {DEFAULT_CONSTRUCTOR_MARKER}"));
            line(&format!("-if class {target}"));
            line(&format!("-keepclassmembers class {target} {{"));
            line(&format!("    public synthetic <init>({});", all.join(",")));
            line("}");
        }

        out
    }
}

/// Number of `int` masks the synthetic constructor takes.
pub fn mask_count(parameter_count: usize) -> usize {
    parameter_count.div_ceil(32)
}

/// Nullable primitives are boxed on the JVM.
fn erased_name(ty: &TypeName, nullable: bool) -> String {
    match ty {
        TypeName::Primitive(p) if nullable && *p != Primitive::Void => p.boxed().reflection_name(),
        other => other.erased_reflection_name(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use stitch_ir::{ParameterElement, TypeElement, TypeKind};

    use super::*;
    use crate::{
        extract::{Purpose, extract_element},
        merge::AdapterModel,
    };

    fn model(element: TypeElement) -> AdapterModel {
        let declaration = Arc::new(extract_element(&element, Purpose::Binding).unwrap());
        AdapterModel {
            declaration,
            sorted_properties: Vec::new(),
            composed: Vec::new(),
        }
    }

    fn param(name: &str, ty: TypeName, nullable: bool, has_default: bool) -> ParameterElement {
        ParameterElement {
            name: name.into(),
            ty,
            nullable,
            has_default,
        }
    }

    #[test]
    fn test_rules_without_defaults() {
        let mut element = TypeElement::new(ClassName::get("com.example", "User"), TypeKind::Class);
        element.constructor = Some(vec![param(
            "id",
            TypeName::class(ClassName::get("java.lang", "String")),
            false,
            false,
        )]);
        let rules = KeepRules::for_adapter(
            &model(element),
            ClassName::get("com.example", "UserJsonAdapter"),
        );

        assert_eq!(rules.path(), "META-INF/proguard/moshi-com.example.User.pro");
        assert_eq!(
            rules.render(),
            "-if class com.example.User\n\
             -keepnames class com.example.User\n\
             -if class com.example.User\n\
             -keep class com.example.UserJsonAdapter {\n\
             \x20   public <init>(com.squareup.moshi.Moshi);\n\
             }\n"
        );
    }

    #[test]
    fn test_rules_with_defaults_keep_synthetic_constructor() {
        let mut element =
            TypeElement::new(ClassName::get("com.example", "Outer.Page"), TypeKind::Class);
        element.type_parameters = vec!["T".into()];
        element.constructor = Some(vec![
            param("size", TypeName::Primitive(Primitive::Int), false, true),
            param("total", TypeName::Primitive(Primitive::Long), true, false),
            param("items", TypeName::Variable("T".into()), false, false),
        ]);
        let rules = KeepRules::for_adapter(
            &model(element),
            ClassName::get("com.example", "Outer_PageJsonAdapter"),
        );

        assert_eq!(
            rules.render(),
            "-if class com.example.Outer$Page\n\
             -keepnames class com.example.Outer$Page\n\
             -if class com.example.Outer$Page\n\
             -keep class com.example.Outer_PageJsonAdapter {\n\
             \x20   public <init>(com.squareup.moshi.Moshi,java.lang.reflect.Type[]);\n\
             }\n\
             -if class com.example.Outer$Page\n\
             -keepnames class kotlin.jvm.internal.DefaultConstructorMarker\n\
             -if class com.example.Outer$Page\n\
             -keepclassmembers class com.example.Outer$Page {\n\
             \x20   public synthetic <init>(int,java.lang.Long,java.lang.Object,int,kotlin.jvm.internal.DefaultConstructorMarker);\n\
             }\n"
        );
        assert_eq!(rules.path(), "META-INF/proguard/moshi-com.example.Outer.Page.pro");
    }

    #[test]
    fn test_mask_count() {
        assert_eq!(mask_count(0), 0);
        assert_eq!(mask_count(1), 1);
        assert_eq!(mask_count(32), 1);
        assert_eq!(mask_count(33), 2);
    }
}
