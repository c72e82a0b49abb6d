//! Rendering targets for reports.

use stitch_core::WriteResult;

/// How a generated file is marked in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMark {
    /// Written or would be written.
    New,
    /// Already on disk with identical contents.
    Unchanged,
    /// Left alone by the overwrite policy.
    Skipped,
}

impl FileMark {
    pub fn symbol(self) -> char {
        match self {
            FileMark::New => '+',
            FileMark::Unchanged => '=',
            FileMark::Skipped => '~',
        }
    }
}

impl From<WriteResult> for FileMark {
    fn from(result: WriteResult) -> Self {
        match result {
            WriteResult::Written => FileMark::New,
            WriteResult::Unchanged => FileMark::Unchanged,
            WriteResult::Skipped => FileMark::Skipped,
        }
    }
}

/// Where reports go.
///
/// Reports say what to show; the target decides the layout and the stream.
pub trait Output {
    /// Underlined heading.
    fn heading(&mut self, text: &str);

    fn section(&mut self, name: &str);

    /// `key: value`, indented by `depth` levels.
    fn field(&mut self, depth: usize, key: &str, value: &str);

    /// Ordered entry, such as a pipeline phase.
    fn step(&mut self, index: usize, text: &str);

    /// Unordered entry, such as a declaration.
    fn entry(&mut self, text: &str);

    /// A generated file with its write status.
    fn file(&mut self, mark: FileMark, text: &str);

    /// A diagnostic. Errors and warnings go to stderr.
    fn diagnostic(&mut self, severity: &str, text: &str);

    /// Labelled separator ahead of a preview.
    fn divider(&mut self, label: &str);

    /// Verbatim text.
    fn text(&mut self, text: &str);

    fn blank(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain terminal output.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn heading(&mut self, text: &str) {
        println!("{text}");
        println!("{}", "=".repeat(text.chars().count()));
    }

    fn section(&mut self, name: &str) {
        println!("{name}:");
    }

    fn field(&mut self, depth: usize, key: &str, value: &str) {
        println!("{}{key}: {value}", "  ".repeat(depth));
    }

    fn step(&mut self, index: usize, text: &str) {
        println!("  {index}. {text}");
    }

    fn entry(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn file(&mut self, mark: FileMark, text: &str) {
        println!("  {} {text}", mark.symbol());
    }

    fn diagnostic(&mut self, severity: &str, text: &str) {
        if severity == "info" {
            println!("{text}");
        } else {
            eprintln!("{text}");
        }
    }

    fn divider(&mut self, label: &str) {
        println!("── {label} ──");
    }

    fn text(&mut self, text: &str) {
        println!("{text}");
    }

    fn blank(&mut self) {
        println!();
    }
}

/// Collects rendered lines for report tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct BufferOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for BufferOutput {
    fn heading(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn section(&mut self, name: &str) {
        self.lines.push(format!("{name}:"));
    }

    fn field(&mut self, depth: usize, key: &str, value: &str) {
        self.lines.push(format!("{}{key}: {value}", "  ".repeat(depth)));
    }

    fn step(&mut self, index: usize, text: &str) {
        self.lines.push(format!("  {index}. {text}"));
    }

    fn entry(&mut self, text: &str) {
        self.lines.push(format!("  - {text}"));
    }

    fn file(&mut self, mark: FileMark, text: &str) {
        self.lines.push(format!("  {} {text}", mark.symbol()));
    }

    fn diagnostic(&mut self, _severity: &str, text: &str) {
        self.lines.push(text.to_string());
    }

    fn divider(&mut self, label: &str) {
        self.lines.push(format!("-- {label} --"));
    }

    fn text(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }
}
