//! Core operations.
//!
//! This module contains the business logic for stitch commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod explain;
pub mod process;

pub use check::check;
pub use explain::explain;
pub use process::{ProcessOptions, process};

use stitch_codegen::pipeline::Diagnostic;

use crate::reports::DiagnosticLine;

/// Flatten diagnostics into printable lines.
pub(crate) fn diagnostic_lines(diagnostics: &[Diagnostic]) -> Vec<DiagnosticLine> {
    diagnostics
        .iter()
        .map(|diag| DiagnosticLine {
            severity: diag.severity.as_str(),
            message: match &diag.code {
                Some(code) => format!("[{code}] {}", diag.message),
                None => diag.message.clone(),
            },
            location: diag.location.clone(),
        })
        .collect()
}
