//! Validation utilities for Java identifiers and type strings.

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Validation context that carries source information and the current
/// position inside the file (e.g. `com.example.Foo.properties`).
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: &'a SourceContext,
    path: Vec<String>,
}

impl<'a> ParseContext<'a> {
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            source,
            path: Vec::new(),
        }
    }

    pub fn source(&self) -> &'a SourceContext {
        self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(segment.into());
        Self {
            source: self.source,
            path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Describe `kind` at the current position, e.g. "property in 'com.example.Foo'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Span of a quoted string value in the source.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), value, 0)
    }

    /// Validate a name used as a Java identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_java_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }
        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }
        Ok(())
    }

    /// Validate a dotted package name; empty means the default package.
    pub fn validate_package(&self, package: &str) -> Result<()> {
        if package.is_empty() {
            return Ok(());
        }
        for segment in package.split('.') {
            if is_java_keyword(segment) {
                return Err(self.source.reserved_keyword_error(
                    segment,
                    self.context_for("package"),
                    self.find_span(package),
                ));
            }
            if let Some(reason) = validate_identifier(segment) {
                return Err(self.source.invalid_identifier_error(
                    package,
                    self.context_for("package"),
                    reason,
                    self.find_span(package),
                ));
            }
        }
        Ok(())
    }

    /// Validate a type string, returning the parsed type.
    pub fn validate_type(
        &self,
        input: &str,
        type_variables: &[String],
    ) -> Result<(stitch_ir::TypeName, bool)> {
        stitch_ir::parse_type(input, type_variables).map_err(|e| {
            self.source
                .invalid_type_error(input, e.reason, self.find_span(input))
        })
    }
}

/// Java reserved words, including literals and contextual keywords that
/// cannot name a class or member.
pub(crate) const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while",
    // Literals
    "true", "false", "null",
    // Contextual
    "var", "yield", "record", "_",
];

pub(crate) fn is_java_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

/// Find the span of the `occurrence`-th (0-based) quoted `value` in the source.
///
/// Falls back to an unquoted match when the value never appears quoted.
pub(crate) fn find_value_span(src: &str, value: &str, occurrence: usize) -> Option<SourceSpan> {
    let quoted = format!("\"{value}\"");
    if let Some((pos, _)) = src.match_indices(&quoted).nth(occurrence) {
        // +1 to skip the opening quote
        return Some(SourceSpan::from((pos + 1, value.len())));
    }
    if value.is_empty() {
        return None;
    }
    src.match_indices(value)
        .nth(occurrence)
        .map(|(pos, _)| SourceSpan::from((pos, value.len())))
}

/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        Some(_) => return Some("name must start with a letter, '_' or '$'"),
    }
    if chars.any(|c| !(c.is_alphanumeric() || c == '_' || c == '$')) {
        return Some("name must contain only letters, digits, '_' and '$'");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_keywords() {
        assert!(is_java_keyword("class"));
        assert!(is_java_keyword("null"));
        assert!(!is_java_keyword("klass"));
    }

    #[test]
    fn test_validate_identifier() {
        assert_eq!(validate_identifier("userId"), None);
        assert_eq!(validate_identifier("$tmp"), None);
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("1st").is_some());
        assert!(validate_identifier("user-id").is_some());
    }

    #[test]
    fn test_find_value_span_occurrences() {
        let src = "name = \"Foo\"\nname = \"Foo\"\n";
        let first = find_value_span(src, "Foo", 0).unwrap();
        let second = find_value_span(src, "Foo", 1).unwrap();
        assert_eq!(first.offset(), 8);
        assert_eq!(second.offset(), 21);
        assert!(find_value_span(src, "Foo", 2).is_none());
    }

    #[test]
    fn test_context_for_nested_path() {
        let source = SourceContext::new("", "round.toml");
        let ctx = ParseContext::new(&source).push("com.example.Foo");
        assert_eq!(ctx.context_for("property"), "property in 'com.example.Foo'");
        assert_eq!(ParseContext::new(&source).context_for("type"), "type");
    }

    #[test]
    fn test_validate_name_reports_keyword() {
        let source = SourceContext::new("name = \"class\"", "round.toml");
        let err = ParseContext::new(&source)
            .validate_name("class", "property")
            .unwrap_err();
        assert!(matches!(*err, crate::Error::ReservedKeyword { .. }));
    }
}
