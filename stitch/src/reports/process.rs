//! Process command report data structures.

use std::path::PathBuf;

use stitch_core::WriteResult;

use super::{
    DiagnosticLine,
    output::{Output, Report},
};

/// A file handed to the writer.
#[derive(Debug)]
pub struct WrittenFile {
    pub identity: String,
    /// Canonical name of the declaration it came from.
    pub originating: String,
    pub result: WriteResult,
}

/// A file rendered in dry-run mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

/// What one round produced.
#[derive(Debug)]
pub struct RoundReport {
    pub path: PathBuf,
    pub files: Vec<WrittenFile>,
    pub previews: Vec<PreviewFile>,
    pub diagnostics: Vec<DiagnosticLine>,
    /// Artifacts dropped because the round aborted on error.
    pub withheld: usize,
    /// Synthesized types passed on to the next round.
    pub carried: usize,
}

/// Report data from processing a sequence of rounds.
#[derive(Debug)]
pub struct ProcessReport {
    pub output: PathBuf,
    pub dry_run: bool,
    pub rounds: Vec<RoundReport>,
}

impl ProcessReport {
    pub fn has_errors(&self) -> bool {
        self.rounds
            .iter()
            .flat_map(|r| &r.diagnostics)
            .any(DiagnosticLine::is_error)
    }

    fn file_count(&self) -> usize {
        self.rounds.iter().map(|r| r.files.len()).sum()
    }
}

impl Report for ProcessReport {
    fn render(&self, out: &mut dyn Output) {
        for round in &self.rounds {
            for diagnostic in &round.diagnostics {
                diagnostic.render(out);
            }

            for preview in &round.previews {
                out.divider(&preview.path);
                out.text(&preview.content);
            }

            if !self.dry_run && !round.files.is_empty() {
                out.section(&round.path.display().to_string());
                for file in &round.files {
                    let text = format!("{} (from {})", file.identity, file.originating);
                    out.file(file.result.into(), &text);
                }
            }
            if round.withheld > 0 {
                out.field(1, "withheld", &round.withheld.to_string());
            }
            if round.carried > 0 {
                out.field(1, "carried to next round", &round.carried.to_string());
            }
        }

        if self.dry_run {
            out.divider("Summary");
            out.text(&format!("{} files would be generated", self.file_count()));
        } else {
            out.blank();
            out.text(&format!(
                "Generated {} files in {}",
                self.file_count(),
                self.output.display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_lists_files_and_diagnostics() {
        let report = ProcessReport {
            output: PathBuf::from("out"),
            dry_run: false,
            rounds: vec![RoundReport {
                path: PathBuf::from("round-1.toml"),
                files: vec![WrittenFile {
                    identity: "com.example.UserJsonAdapter".into(),
                    originating: "com.example.User".into(),
                    result: WriteResult::Written,
                }],
                previews: Vec::new(),
                diagnostics: vec![DiagnosticLine {
                    severity: "error",
                    message: "[not_an_enum] com.example.Mode is not an enum".into(),
                    location: Some("com.example.Mode".into()),
                }],
                withheld: 0,
                carried: 0,
            }],
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(report.has_errors());
        assert_eq!(
            out.lines,
            [
                "error: [not_an_enum] com.example.Mode is not an enum\n  --> com.example.Mode",
                "round-1.toml:",
                "  + com.example.UserJsonAdapter (from com.example.User)",
                "",
                "Generated 1 files in out",
            ]
        );
    }
}
