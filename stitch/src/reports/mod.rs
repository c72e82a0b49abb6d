//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod explain;
mod output;
mod process;

pub use check::{CheckReport, RoundCheck};
pub use explain::{DeclarationInfo, ExplainReport, PhaseInfo};
pub use output::{Output, Report, TerminalOutput};
pub use process::{PreviewFile, ProcessReport, RoundReport, WrittenFile};

/// One diagnostic, ready to print.
#[derive(Debug, Clone)]
pub struct DiagnosticLine {
    /// `error`, `warning` or `info`.
    pub severity: &'static str,
    pub message: String,
    pub location: Option<String>,
}

impl DiagnosticLine {
    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }

    /// `error: message` plus an optional `  --> location` line.
    pub fn render(&self, out: &mut dyn Output) {
        let text = match &self.location {
            Some(location) => format!("{}: {}\n  --> {}", self.severity, self.message, location),
            None => format!("{}: {}", self.severity, self.message),
        };
        out.diagnostic(self.severity, &text);
    }
}
