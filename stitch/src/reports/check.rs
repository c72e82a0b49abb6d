//! Check command report data structures.

use std::path::PathBuf;

use super::{
    DiagnosticLine,
    output::{Output, Report},
};

/// Analysis of one round file.
#[derive(Debug)]
pub struct RoundCheck {
    pub path: PathBuf,
    /// Declarations carrying at least one marker.
    pub processed: usize,
    pub targets: usize,
    pub adapters: usize,
    pub diagnostics: Vec<DiagnosticLine>,
}

/// Report data from round validation.
#[derive(Debug)]
pub struct CheckReport {
    pub rounds: Vec<RoundCheck>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self
            .rounds
            .iter()
            .flat_map(|r| &r.diagnostics)
            .any(DiagnosticLine::is_error)
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for round in &self.rounds {
            for diagnostic in &round.diagnostics {
                diagnostic.render(out);
            }
            if !round.diagnostics.is_empty() {
                out.blank();
            }

            let errors = round.diagnostics.iter().filter(|d| d.is_error()).count();
            let mark = if errors == 0 { "✓" } else { "✗" };
            out.text(&format!("{mark} {}", round.path.display()));
            out.field(1, "declarations", &round.processed.to_string());
            out.field(1, "targets", &round.targets.to_string());
            out.field(1, "adapters", &round.adapters.to_string());
            if errors > 0 {
                out.field(1, "errors", &errors.to_string());
            }
        }
    }
}
