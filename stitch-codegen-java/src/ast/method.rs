//! Methods and constructors.

use std::collections::BTreeSet;

use stitch_codegen::builder::CodeBuilder;
use stitch_ir::TypeName;

use super::{AnnotationSpec, Arg, CodeBlock, Modifier, Names, ParameterSpec, modifier};

#[derive(Debug, Clone, PartialEq, Eq)]
enum BodyItem {
    /// Terminated with `;`.
    Statement(CodeBlock),
    /// `code {`, then indent.
    BeginFlow(CodeBlock),
    /// `} code {`
    NextFlow(CodeBlock),
    EndFlow,
    /// Emitted as is.
    Line(CodeBlock),
    Indent,
    Dedent,
}

/// A method or constructor.
///
/// Builder methods come in two flavors: consuming ones for chaining and
/// `push_` ones for filling a body in loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    name: String,
    constructor: bool,
    modifiers: BTreeSet<Modifier>,
    annotations: Vec<AnnotationSpec>,
    returns: Option<TypeName>,
    params: Vec<ParameterSpec>,
    exceptions: Vec<TypeName>,
    body: Vec<BodyItem>,
}

impl MethodSpec {
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructor: false,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            returns: None,
            params: Vec::new(),
            exceptions: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn constructor() -> Self {
        Self {
            constructor: true,
            ..Self::method("<init>")
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_constructor(&self) -> bool {
        self.constructor
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&Modifier::Abstract)
    }

    pub fn annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn annotations(mut self, annotations: impl IntoIterator<Item = AnnotationSpec>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn returns(mut self, ty: impl Into<TypeName>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    pub fn param(mut self, param: ParameterSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn throws(mut self, ty: impl Into<TypeName>) -> Self {
        self.exceptions.push(ty.into());
        self
    }

    pub fn statement(mut self, format: &str, args: impl IntoIterator<Item = Arg>) -> Self {
        self.push_statement(format, args);
        self
    }

    pub fn begin_flow(mut self, format: &str, args: impl IntoIterator<Item = Arg>) -> Self {
        self.push_begin_flow(format, args);
        self
    }

    pub fn end_flow(mut self) -> Self {
        self.push_end_flow();
        self
    }

    pub fn push_statement(&mut self, format: &str, args: impl IntoIterator<Item = Arg>) -> &mut Self {
        self.body.push(BodyItem::Statement(CodeBlock::of(format, args)));
        self
    }

    pub fn push_begin_flow(&mut self, format: &str, args: impl IntoIterator<Item = Arg>) -> &mut Self {
        self.body.push(BodyItem::BeginFlow(CodeBlock::of(format, args)));
        self
    }

    pub fn push_next_flow(&mut self, format: &str, args: impl IntoIterator<Item = Arg>) -> &mut Self {
        self.body.push(BodyItem::NextFlow(CodeBlock::of(format, args)));
        self
    }

    pub fn push_end_flow(&mut self) -> &mut Self {
        self.body.push(BodyItem::EndFlow);
        self
    }

    pub fn push_line(&mut self, format: &str, args: impl IntoIterator<Item = Arg>) -> &mut Self {
        self.body.push(BodyItem::Line(CodeBlock::of(format, args)));
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.body.push(BodyItem::Indent);
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.body.push(BodyItem::Dedent);
        self
    }

    pub fn collect(&self, names: &mut Names) {
        for annotation in &self.annotations {
            annotation.collect(names);
        }
        if let Some(returns) = &self.returns {
            names.register_type(returns);
        }
        for param in &self.params {
            param.collect(names);
        }
        for exception in &self.exceptions {
            names.register_type(exception);
        }
        for item in &self.body {
            match item {
                BodyItem::Statement(code)
                | BodyItem::BeginFlow(code)
                | BodyItem::NextFlow(code)
                | BodyItem::Line(code) => code.collect(names),
                BodyItem::EndFlow | BodyItem::Indent | BodyItem::Dedent => {}
            }
        }
    }

    /// Render into `builder`. Interface members drop the implied
    /// `public` and `abstract`.
    pub fn render(&self, builder: &mut CodeBuilder, names: &Names, owner: &str, in_interface: bool) {
        for annotation in &self.annotations {
            builder.push_lines(&annotation.render(names, false));
        }

        let modifiers = self
            .modifiers
            .iter()
            .filter(|m| !in_interface || !matches!(m, Modifier::Public | Modifier::Abstract));
        let mut signature = modifier::prefix(modifiers);
        if self.constructor {
            signature.push_str(owner);
        } else {
            let returns = self
                .returns
                .as_ref()
                .map(|ty| names.type_name(ty))
                .unwrap_or_else(|| "void".to_string());
            signature.push_str(&format!("{returns} {}", self.name));
        }
        let params: Vec<String> = self.params.iter().map(|p| p.render(names)).collect();
        signature.push_str(&format!("({})", params.join(", ")));
        if !self.exceptions.is_empty() {
            let exceptions: Vec<String> =
                self.exceptions.iter().map(|e| names.type_name(e)).collect();
            signature.push_str(&format!(" throws {}", exceptions.join(", ")));
        }

        if self.is_abstract() {
            builder.push_line(&format!("{signature};"));
            return;
        }

        builder.push_line(&format!("{signature} {{")).push_indent();
        for item in &self.body {
            match item {
                BodyItem::Statement(code) => {
                    builder.push_lines(&format!("{};", code.render(names)));
                }
                BodyItem::BeginFlow(code) => {
                    builder
                        .push_lines(&format!("{} {{", code.render(names)))
                        .push_indent();
                }
                BodyItem::NextFlow(code) => {
                    builder
                        .push_dedent()
                        .push_lines(&format!("}} {} {{", code.render(names)))
                        .push_indent();
                }
                BodyItem::EndFlow => {
                    builder.push_dedent().push_line("}");
                }
                BodyItem::Line(code) => {
                    builder.push_lines(&code.render(names));
                }
                BodyItem::Indent => {
                    builder.push_indent();
                }
                BodyItem::Dedent => {
                    builder.push_dedent();
                }
            }
        }
        builder.push_dedent().push_line("}");
    }
}

#[cfg(test)]
mod tests {
    use stitch_ir::{ClassName, Primitive};

    use super::*;

    fn render(method: &MethodSpec, in_interface: bool) -> String {
        let mut names = Names::new("com.example", "Owner");
        method.collect(&mut names);
        let mut builder = CodeBuilder::java();
        method.render(&mut builder, &names, "Owner", in_interface);
        builder.build()
    }

    #[test]
    fn test_abstract_interface_method() {
        let method = MethodSpec::method("bindFoo")
            .annotation(AnnotationSpec::new(ClassName::get("dagger", "Binds")))
            .modifiers([Modifier::Public, Modifier::Abstract])
            .returns(ClassName::get("com.example", "Bar"))
            .param(ParameterSpec::new("impl", ClassName::get("com.example", "Foo")));
        assert_eq!(render(&method, true), "@Binds\nBar bindFoo(Foo impl);\n");
    }

    #[test]
    fn test_flow_control() {
        let mut method = MethodSpec::method("check")
            .modifiers([Modifier::Public])
            .returns(Primitive::Int)
            .param(ParameterSpec::new("x", ClassName::get("java.lang", "Integer")))
            .throws(ClassName::get("java.io", "IOException"));
        method
            .push_begin_flow("if (x == null)", [])
            .push_statement("return 0", [])
            .push_next_flow("else", [])
            .push_statement("return x", [])
            .push_end_flow();

        assert_eq!(
            render(&method, false),
            "public int check(Integer x) throws IOException {\n  if (x == null) {\n    return 0;\n  } else {\n    return x;\n  }\n}\n"
        );
    }

    #[test]
    fn test_constructor_uses_owner_name() {
        let method = MethodSpec::constructor()
            .modifiers([Modifier::Public])
            .statement("super()", []);
        assert_eq!(render(&method, false), "public Owner() {\n  super();\n}\n");
    }
}
