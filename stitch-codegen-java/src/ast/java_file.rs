//! A complete Java compilation unit.

use stitch_ir::ClassName;

use super::{Names, TypeSpec};

/// One type in one package, rendered with its imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    package: String,
    ty: TypeSpec,
}

impl JavaFile {
    pub fn new(package: impl Into<String>, ty: TypeSpec) -> Self {
        Self {
            package: package.into(),
            ty,
        }
    }

    pub fn class_name(&self) -> ClassName {
        ClassName::get(&self.package, self.ty.name())
    }

    pub fn type_spec(&self) -> &TypeSpec {
        &self.ty
    }

    pub fn render(&self) -> String {
        let mut names = Names::new(&self.package, self.ty.name());
        self.ty.collect(&mut names);

        let mut out = String::new();
        if !self.package.is_empty() {
            out.push_str(&format!("package {};\n\n", self.package));
        }
        let imports = names.imports();
        for import in &imports {
            out.push_str(&format!("import {import};\n"));
        }
        if !imports.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.ty.render(&names));
        out
    }
}

#[cfg(test)]
mod tests {
    use stitch_ir::TypeName;

    use super::*;
    use crate::ast::{AnnotationSpec, Arg, FieldSpec, MethodSpec, Modifier, ParameterSpec};

    #[test]
    fn test_empty_class() {
        let file = JavaFile::new("com.example", TypeSpec::class("Empty").modifiers([Modifier::Public]));
        assert_eq!(file.render(), "package com.example;\n\npublic class Empty {\n}\n");
        assert_eq!(file.class_name().canonical_name(), "com.example.Empty");
    }

    #[test]
    fn test_members_are_separated_by_blank_lines() {
        let string = ClassName::get("java.lang", "String");
        let ty = TypeSpec::class("Holder")
            .modifiers([Modifier::Public, Modifier::Final])
            .superinterface(ClassName::get("java.io", "Serializable"))
            .field(FieldSpec::new("a", string.clone()).modifiers([Modifier::Private]))
            .field(FieldSpec::new("b", string.clone()).modifiers([Modifier::Private]))
            .method(
                MethodSpec::method("get")
                    .modifiers([Modifier::Public])
                    .returns(string.clone())
                    .statement("return a", []),
            )
            .method(
                MethodSpec::constructor()
                    .modifiers([Modifier::Public])
                    .param(ParameterSpec::new("a", string))
                    .statement("this.a = a", []),
            );

        insta::assert_snapshot!(JavaFile::new("com.example", ty).render(), @r"
package com.example;

import java.io.Serializable;

public final class Holder implements Serializable {
  private String a;

  private String b;

  public Holder(String a) {
    this.a = a;
  }

  public String get() {
    return a;
  }
}
");
    }

    #[test]
    fn test_multi_line_statements_keep_relative_indent() {
        let provider = ClassName::get("com.example.api", "Provider");
        let method = MethodSpec::method("provide")
            .modifiers([Modifier::Static])
            .returns(provider.clone())
            .annotation(AnnotationSpec::new(ClassName::get("dagger", "Provides")))
            .statement(
                "return new $T() {\n  @Override\n  public void run() {\n  }\n}",
                [Arg::ty(TypeName::class(provider))],
            );
        let ty = TypeSpec::interface("ProviderModule")
            .modifiers([Modifier::Public])
            .method(method);

        insta::assert_snapshot!(JavaFile::new("com.example", ty).render(), @r"
package com.example;

import com.example.api.Provider;
import dagger.Provides;

public interface ProviderModule {
  @Provides
  static Provider provide() {
    return new Provider() {
      @Override
      public void run() {
      }
    };
  }
}
");
    }
}
