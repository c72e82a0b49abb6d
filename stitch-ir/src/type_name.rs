//! Java type references and their textual syntax.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::class_name::{ClassName, is_identifier};

/// Java primitive types (plus `void`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Void,
}

impl Primitive {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "char" => Self::Char,
            "float" => Self::Float,
            "double" => Self::Double,
            "void" => Self::Void,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }

    /// The `java.lang` wrapper class.
    pub fn boxed(&self) -> ClassName {
        let simple = match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Char => "Character",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Void => "Void",
        };
        ClassName::get("java.lang", simple)
    }

    /// Java literal of the zero value.
    pub fn zero_literal(&self) -> &'static str {
        match self {
            Self::Boolean => "false",
            Self::Byte => "(byte) 0",
            Self::Short => "(short) 0",
            Self::Int => "0",
            Self::Long => "0L",
            Self::Char => "'\\u0000'",
            Self::Float => "0f",
            Self::Double => "0.0",
            Self::Void => "null",
        }
    }
}

/// Bound of a wildcard type argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    /// `?`
    Any,
    /// `? extends T`
    Extends(Box<TypeName>),
    /// `? super T`
    Super(Box<TypeName>),
}

/// A reference to a Java type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Primitive(Primitive),
    Class(ClassName),
    Parameterized { raw: ClassName, args: Vec<TypeName> },
    Array(Box<TypeName>),
    Variable(String),
    Wildcard(WildcardBound),
}

impl TypeName {
    pub fn class(name: ClassName) -> Self {
        Self::Class(name)
    }

    pub fn parameterized(raw: ClassName, args: Vec<TypeName>) -> Self {
        if args.is_empty() {
            Self::Class(raw)
        } else {
            Self::Parameterized { raw, args }
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(p) if *p != Primitive::Void)
    }

    /// The raw class of a class or parameterized type.
    pub fn raw_class(&self) -> Option<&ClassName> {
        match self {
            Self::Class(name) | Self::Parameterized { raw: name, .. } => Some(name),
            _ => None,
        }
    }

    /// Primitive types become their wrapper class; everything else is unchanged.
    pub fn boxed(&self) -> TypeName {
        match self {
            Self::Primitive(p) => Self::Class(p.boxed()),
            other => other.clone(),
        }
    }

    /// Whether any type variable occurs in this type.
    pub fn has_type_variable(&self) -> bool {
        match self {
            Self::Variable(_) => true,
            Self::Parameterized { args, .. } => args.iter().any(TypeName::has_type_variable),
            Self::Array(component) => component.has_type_variable(),
            Self::Wildcard(WildcardBound::Extends(t) | WildcardBound::Super(t)) => {
                t.has_type_variable()
            }
            _ => false,
        }
    }

    /// Erased binary name as written in keep rules (`int`, `java.util.List`,
    /// `com.example.Outer$Inner[]`).
    pub fn erased_reflection_name(&self) -> String {
        match self {
            Self::Primitive(p) => p.keyword().to_string(),
            Self::Class(name) | Self::Parameterized { raw: name, .. } => name.reflection_name(),
            Self::Array(component) => format!("{}[]", component.erased_reflection_name()),
            Self::Variable(_) | Self::Wildcard(_) => "java.lang.Object".to_string(),
        }
    }

    /// Every class name mentioned by this type, outermost first.
    pub fn referenced_classes(&self) -> Vec<&ClassName> {
        let mut out = Vec::new();
        self.collect_classes(&mut out);
        out
    }

    fn collect_classes<'a>(&'a self, out: &mut Vec<&'a ClassName>) {
        match self {
            Self::Class(name) => out.push(name),
            Self::Parameterized { raw, args } => {
                out.push(raw);
                for arg in args {
                    arg.collect_classes(out);
                }
            }
            Self::Array(component) => component.collect_classes(out),
            Self::Wildcard(WildcardBound::Extends(t) | WildcardBound::Super(t)) => {
                t.collect_classes(out)
            }
            _ => {}
        }
    }
}

impl From<ClassName> for TypeName {
    fn from(name: ClassName) -> Self {
        Self::Class(name)
    }
}

impl From<Primitive> for TypeName {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.keyword()),
            Self::Class(name) => write!(f, "{name}"),
            Self::Parameterized { raw, args } => {
                write!(f, "{raw}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            Self::Array(component) => write!(f, "{component}[]"),
            Self::Variable(name) => f.write_str(name),
            Self::Wildcard(WildcardBound::Any) => f.write_str("?"),
            Self::Wildcard(WildcardBound::Extends(t)) => write!(f, "? extends {t}"),
            Self::Wildcard(WildcardBound::Super(t)) => write!(f, "? super {t}"),
        }
    }
}

impl Serialize for TypeName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A type string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type '{input}': {reason}")]
pub struct TypeParseError {
    pub input: String,
    pub reason: String,
}

/// Parse a type string such as `java.util.Map<java.lang.String, int[]>?`.
///
/// A trailing `?` marks the top-level type nullable; the flag is returned
/// alongside the type. Bare identifiers listed in `type_variables` become
/// type variables. Nullability marks on type arguments are accepted and
/// dropped, since Java erases them.
pub fn parse_type(
    input: &str,
    type_variables: &[String],
) -> Result<(TypeName, bool), TypeParseError> {
    let trimmed = input.trim();
    let (body, nullable) = match trimmed.strip_suffix('?') {
        Some(rest) if !rest.is_empty() => (rest, true),
        _ => (trimmed, false),
    };
    let mut parser = Parser {
        input,
        chars: body.chars().collect(),
        pos: 0,
        type_variables,
    };
    let ty = parser.parse()?;
    parser.skip_ws();
    if parser.pos != parser.chars.len() {
        return Err(parser.error("unexpected trailing characters"));
    }
    if matches!(ty, TypeName::Wildcard(_)) {
        return Err(parser.error("wildcards are only allowed as type arguments"));
    }
    Ok((ty, nullable))
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
    type_variables: &'a [String],
}

impl Parser<'_> {
    fn error(&self, reason: &str) -> TypeParseError {
        TypeParseError {
            input: self.input.to_string(),
            reason: reason.to_string(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn dotted_name(&mut self) -> String {
        self.skip_ws();
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.')
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn parse(&mut self) -> Result<TypeName, TypeParseError> {
        if self.eat('?') {
            return self.wildcard();
        }
        let name = self.dotted_name();
        if name.is_empty() {
            return Err(self.error("expected a type name"));
        }
        let mut ty = if let Some(primitive) = Primitive::from_keyword(&name) {
            TypeName::Primitive(primitive)
        } else if self.type_variables.iter().any(|v| *v == name) {
            TypeName::Variable(name)
        } else {
            let class = if is_identifier(&name) {
                ClassName::new("", vec![name])
            } else {
                ClassName::best_guess(&name)
                    .ok_or_else(|| self.error("not a qualified class name"))?
            };
            if self.eat('<') {
                let args = self.arguments()?;
                TypeName::parameterized(class, args)
            } else {
                TypeName::Class(class)
            }
        };
        while self.eat('[') {
            if !self.eat(']') {
                return Err(self.error("expected ']'"));
            }
            ty = TypeName::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn arguments(&mut self) -> Result<Vec<TypeName>, TypeParseError> {
        let mut args = Vec::new();
        loop {
            let arg = self.parse()?;
            if matches!(arg, TypeName::Primitive(_)) {
                return Err(self.error("primitive types cannot be type arguments"));
            }
            args.push(arg);
            // nullable type argument
            self.eat('?');
            if self.eat(',') {
                continue;
            }
            if self.eat('>') {
                return Ok(args);
            }
            return Err(self.error("expected ',' or '>'"));
        }
    }

    fn wildcard(&mut self) -> Result<TypeName, TypeParseError> {
        self.skip_ws();
        let save = self.pos;
        let keyword = self.dotted_name();
        let bound = match keyword.as_str() {
            "extends" => WildcardBound::Extends(Box::new(self.parse()?)),
            "super" => WildcardBound::Super(Box::new(self.parse()?)),
            _ => {
                self.pos = save;
                WildcardBound::Any
            }
        };
        Ok(TypeName::Wildcard(bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> TypeName {
        parse_type(s, &[]).unwrap().0
    }

    #[test]
    fn test_parse_primitive_and_class() {
        assert_eq!(parse("int"), TypeName::Primitive(Primitive::Int));
        assert_eq!(
            parse("java.lang.String"),
            TypeName::Class(ClassName::get("java.lang", "String"))
        );
    }

    #[test]
    fn test_parse_nullable_flag() {
        let (ty, nullable) = parse_type("int?", &[]).unwrap();
        assert_eq!(ty, TypeName::Primitive(Primitive::Int));
        assert!(nullable);
        assert!(!parse_type("int", &[]).unwrap().1);
    }

    #[test]
    fn test_parse_generics_and_arrays() {
        let ty = parse("java.util.Map<java.lang.String, java.util.List<com.example.Item?>>[]");
        assert_eq!(
            ty.to_string(),
            "java.util.Map<java.lang.String, java.util.List<com.example.Item>>[]"
        );
        assert_eq!(ty.erased_reflection_name(), "java.util.Map[]");
    }

    #[test]
    fn test_parse_wildcards() {
        let ty = parse("java.lang.Class<? extends androidx.lifecycle.ViewModel>");
        assert_eq!(
            ty.to_string(),
            "java.lang.Class<? extends androidx.lifecycle.ViewModel>"
        );
        assert_eq!(parse("java.util.List<?>").to_string(), "java.util.List<?>");
    }

    #[test]
    fn test_parse_type_variables() {
        let vars = vec!["T".to_string()];
        let (ty, _) = parse_type("java.util.List<T>", &vars).unwrap();
        assert!(ty.has_type_variable());
        assert_eq!(parse_type("T", &vars).unwrap().0.erased_reflection_name(), "java.lang.Object");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_type("", &[]).is_err());
        assert!(parse_type("java.util.List<int>", &[]).is_err());
        assert!(parse_type("java.util.List<java.lang.String", &[]).is_err());
        assert!(parse_type("com.example", &[]).is_err());
        assert!(parse_type("?", &[]).is_err());
    }

    #[test]
    fn test_referenced_classes() {
        let ty = parse("java.util.Map<java.lang.String, com.example.Item>");
        let names: Vec<String> = ty.referenced_classes().iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            ["java.util.Map", "java.lang.String", "com.example.Item"]
        );
    }

    #[test]
    fn test_nested_erasure() {
        let ty = parse("com.example.Outer.Inner");
        assert_eq!(ty.erased_reflection_name(), "com.example.Outer$Inner");
    }
}
