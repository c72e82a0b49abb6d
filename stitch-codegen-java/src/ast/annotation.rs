//! Annotations on generated declarations.

use indexmap::IndexMap;
use stitch_ir::{AnnotationElement, AnnotationValue, ClassName, TypeName};

use super::{Arg, CodeBlock, Names};

const MEMBER_INDENT: &str = "    ";

/// An annotation with its member values.
///
/// A member holds one or more values; several values render as an array
/// initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpec {
    ty: ClassName,
    members: IndexMap<String, Vec<CodeBlock>>,
}

impl AnnotationSpec {
    pub fn new(ty: ClassName) -> Self {
        Self {
            ty,
            members: IndexMap::new(),
        }
    }

    pub fn ty(&self) -> &ClassName {
        &self.ty
    }

    /// Add a value to `name`.
    pub fn member(mut self, name: &str, value: CodeBlock) -> Self {
        self.members.entry(name.to_string()).or_default().push(value);
        self
    }

    /// `@Ty(value)`
    pub fn value(self, value: CodeBlock) -> Self {
        self.member("value", value)
    }

    /// Carry an annotation found on a declaration.
    pub fn from_element(element: &AnnotationElement) -> Self {
        let mut spec = Self::new(element.ty.clone());
        for (name, value) in &element.members {
            let values = match value {
                AnnotationValue::Array(items) => items.iter().map(value_block).collect(),
                single => vec![value_block(single)],
            };
            spec.members.insert(name.clone(), values);
        }
        spec
    }

    pub fn collect(&self, names: &mut Names) {
        names.register(&self.ty);
        for value in self.members.values().flatten() {
            value.collect(names);
        }
    }

    /// Annotations on parameters render `inline`; elsewhere members with
    /// names other than `value` go one per line.
    pub fn render(&self, names: &Names, inline: bool) -> String {
        let ty = names.class(&self.ty);
        if self.members.is_empty() {
            return format!("@{ty}");
        }
        if self.members.len() == 1 {
            if let Some(values) = self.members.get("value") {
                return format!("@{ty}({})", render_values(values, names, inline));
            }
        }

        let entries: Vec<String> = self
            .members
            .iter()
            .map(|(name, values)| format!("{name} = {}", render_values(values, names, inline)))
            .collect();
        if inline {
            format!("@{ty}({})", entries.join(", "))
        } else {
            let body: Vec<String> = entries.iter().map(|e| indent(e)).collect();
            format!("@{ty}(\n{}\n)", body.join(",\n"))
        }
    }
}

fn render_values(values: &[CodeBlock], names: &Names, inline: bool) -> String {
    if let [single] = values {
        return single.render(names);
    }
    let rendered: Vec<String> = values.iter().map(|v| v.render(names)).collect();
    if inline {
        format!("{{{}}}", rendered.join(", "))
    } else {
        let body: Vec<String> = rendered.iter().map(|v| indent(v)).collect();
        format!("{{\n{}\n}}", body.join(",\n"))
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("{MEMBER_INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn value_block(value: &AnnotationValue) -> CodeBlock {
    match value {
        AnnotationValue::Str(s) => CodeBlock::of("$S", [Arg::str(s)]),
        AnnotationValue::Class(ty) => {
            let raw = ty.raw_class().cloned().map(TypeName::Class).unwrap_or_else(|| ty.clone());
            CodeBlock::of("$T.class", [Arg::ty(raw)])
        }
        AnnotationValue::Enum { ty, constant } => {
            CodeBlock::of("$T.$L", [ty.clone().into(), Arg::lit(constant)])
        }
        AnnotationValue::Literal(literal) => CodeBlock::text(literal.clone()),
        AnnotationValue::Array(items) => {
            let inner = CodeBlock::join(items.iter().map(value_block), ", ");
            CodeBlock::of("{$L}", [inner.into()])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(spec: &AnnotationSpec, inline: bool) -> String {
        let mut names = Names::new("com.example", "Module");
        spec.collect(&mut names);
        spec.render(&names, inline)
    }

    #[test]
    fn test_marker_annotation() {
        let spec = AnnotationSpec::new(ClassName::get("dagger", "Binds"));
        assert_eq!(render(&spec, false), "@Binds");
    }

    #[test]
    fn test_single_value_stays_on_one_line() {
        let spec = AnnotationSpec::new(ClassName::get("javax.inject", "Named"))
            .value(CodeBlock::of("$S", [Arg::str("assistedFactories")]));
        assert_eq!(render(&spec, false), r#"@Named("assistedFactories")"#);
    }

    #[test]
    fn test_named_members_go_one_per_line() {
        let spec = AnnotationSpec::new(ClassName::get("javax.annotation.processing", "Generated"))
            .member("value", CodeBlock::of("$S", [Arg::str("stitch")]))
            .member("comments", CodeBlock::of("$S", [Arg::str("https://example.com")]));
        assert_eq!(
            render(&spec, false),
            "@Generated(\n    value = \"stitch\",\n    comments = \"https://example.com\"\n)"
        );
        assert_eq!(
            render(&spec, true),
            r#"@Generated(value = "stitch", comments = "https://example.com")"#
        );
    }

    #[test]
    fn test_from_element() {
        let element = AnnotationElement::new(ClassName::get("com.example", "Tags"))
            .member(
                "value",
                AnnotationValue::Array(vec![
                    AnnotationValue::Str("a".into()),
                    AnnotationValue::Str("b".into()),
                ]),
            );
        let spec = AnnotationSpec::from_element(&element);
        assert_eq!(render(&spec, true), r#"@Tags({"a", "b"})"#);
        assert_eq!(render(&spec, false), "@Tags({\n    \"a\",\n    \"b\"\n})");
    }

    #[test]
    fn test_class_and_enum_values() {
        let element = AnnotationElement::new(ClassName::get("com.example", "Key"))
            .member(
                "type",
                AnnotationValue::Class(TypeName::class(ClassName::get("com.example.model", "User"))),
            )
            .member(
                "mode",
                AnnotationValue::Enum {
                    ty: ClassName::get("com.example", "Mode"),
                    constant: "FAST".into(),
                },
            );
        let spec = AnnotationSpec::from_element(&element);
        assert_eq!(
            render(&spec, false),
            "@Key(\n    type = User.class,\n    mode = Mode.FAST\n)"
        );
    }
}
