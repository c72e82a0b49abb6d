//! Code builder utility for generating properly indented code.

use super::Indent;

/// Line buffer with a current indentation level.
///
/// # Example
///
/// ```
/// use stitch_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::java();
/// builder.push_line("class Foo {").push_indent().push_line("int x;").push_dedent().push_line("}");
///
/// assert_eq!(builder.build(), "class Foo {\n  int x;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// 2-space indentation.
    pub fn java() -> Self {
        Self::new(Indent::JAVA)
    }

    /// Add a line with current indentation. Empty lines get no indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.write_indent();
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
        self
    }

    /// Add each line of a multi-line string at the current indentation.
    pub fn push_lines(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.push_line(line);
        }
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::java()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut builder = CodeBuilder::java();
        builder
            .push_line("void run() {")
            .push_indent()
            .push_line("go();")
            .push_dedent()
            .push_line("}");

        assert_eq!(builder.build(), "void run() {\n  go();\n}\n");
    }

    #[test]
    fn test_empty_line_has_no_indent() {
        let mut builder = CodeBuilder::java();
        builder.push_indent().push_line("a").push_line("").push_line("b");
        assert_eq!(builder.build(), "  a\n\n  b\n");
    }

    #[test]
    fn test_push_lines_indents_each_line() {
        let mut builder = CodeBuilder::java();
        builder.push_indent().push_lines("new Foo() {\n  int x;\n}");
        assert_eq!(builder.build(), "  new Foo() {\n    int x;\n  }\n");
    }

    #[test]
    fn test_dedent_stops_at_zero() {
        let mut builder = CodeBuilder::new(Indent::Tab);
        builder.push_dedent().push_line("a").push_indent().push_line("b");
        assert_eq!(builder.build(), "a\n\tb\n");
    }
}
