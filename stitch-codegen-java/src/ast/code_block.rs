//! Code fragments with type references left symbolic until rendering.

use stitch_core::escape_java_string;
use stitch_ir::{ClassName, TypeName};

use super::Names;

/// An argument substituted into a [`CodeBlock`] format string.
#[derive(Debug, Clone)]
pub enum Arg {
    /// `$T`: a type, spelled according to the file's imports.
    Type(TypeName),
    /// `$L`: emitted verbatim.
    Literal(String),
    /// `$S`: a quoted, escaped string literal.
    Str(String),
    /// `$N`: a name (field, method or local).
    Name(String),
    /// `$L` with a nested block.
    Code(CodeBlock),
}

impl Arg {
    pub fn ty(ty: impl Into<TypeName>) -> Self {
        Self::Type(ty.into())
    }

    pub fn lit(value: impl ToString) -> Self {
        Self::Literal(value.to_string())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }
}

impl From<ClassName> for Arg {
    fn from(name: ClassName) -> Self {
        Self::Type(TypeName::Class(name))
    }
}

impl From<TypeName> for Arg {
    fn from(ty: TypeName) -> Self {
        Self::Type(ty)
    }
}

impl From<CodeBlock> for Arg {
    fn from(code: CodeBlock) -> Self {
        Self::Code(code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    Type(TypeName),
}

/// A piece of Java code.
///
/// Built from a format string in which `$T`, `$L`, `$S` and `$N` consume
/// the next argument and `$$` is a literal dollar sign. Text may span
/// several lines; continuation lines are indented relative to the line
/// the block starts on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    parts: Vec<Part>,
}

impl CodeBlock {
    pub fn of(format: &str, args: impl IntoIterator<Item = Arg>) -> Self {
        let mut block = Self::default();
        let mut args = args.into_iter();
        let mut text = String::new();
        let mut chars = format.chars();

        while let Some(c) = chars.next() {
            if c != '$' {
                text.push(c);
                continue;
            }
            match chars.next() {
                Some('$') => text.push('$'),
                Some('T' | 'L' | 'S' | 'N') => {
                    if let Some(arg) = args.next() {
                        block.push_arg(&mut text, arg);
                    }
                }
                Some(other) => {
                    text.push('$');
                    text.push(other);
                }
                None => text.push('$'),
            }
        }
        block.push_text(text);
        block
    }

    /// Plain text, no placeholders.
    pub fn text(text: impl Into<String>) -> Self {
        let mut block = Self::default();
        block.push_text(text.into());
        block
    }

    /// `blocks` separated by `separator`.
    pub fn join(blocks: impl IntoIterator<Item = CodeBlock>, separator: &str) -> Self {
        let mut joined = Self::default();
        for (i, block) in blocks.into_iter().enumerate() {
            if i > 0 {
                joined.push_text(separator.to_string());
            }
            joined.append(block);
        }
        joined
    }

    pub fn append(&mut self, other: CodeBlock) {
        for part in other.parts {
            match part {
                Part::Text(text) => self.push_text(text),
                Part::Type(ty) => self.parts.push(Part::Type(ty)),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Register every referenced class with `names`.
    pub fn collect(&self, names: &mut Names) {
        for part in &self.parts {
            if let Part::Type(ty) = part {
                names.register_type(ty);
            }
        }
    }

    pub fn render(&self, names: &Names) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => text.clone(),
                Part::Type(ty) => names.type_name(ty),
            })
            .collect()
    }

    fn push_arg(&mut self, text: &mut String, arg: Arg) {
        match arg {
            Arg::Type(ty) => {
                self.push_text(std::mem::take(text));
                self.parts.push(Part::Type(ty));
            }
            Arg::Literal(value) | Arg::Name(value) => text.push_str(&value),
            Arg::Str(value) => {
                text.push('"');
                text.push_str(&escape_java_string(&value));
                text.push('"');
            }
            Arg::Code(code) => {
                self.push_text(std::mem::take(text));
                self.append(code);
            }
        }
    }

    fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        match self.parts.last_mut() {
            Some(Part::Text(last)) => last.push_str(&text),
            _ => self.parts.push(Part::Text(text)),
        }
    }
}
