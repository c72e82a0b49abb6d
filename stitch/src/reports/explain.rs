//! Explain command report data structures.

use std::path::PathBuf;

use super::{
    DiagnosticLine,
    output::{FileMark, Output, Report},
};

/// A pipeline phase.
#[derive(Debug)]
pub struct PhaseInfo {
    pub name: String,
    pub description: String,
}

/// A processed declaration and the files it would produce.
#[derive(Debug)]
pub struct DeclarationInfo {
    pub name: String,
    pub kind: String,
    pub markers: Vec<String>,
    /// Output paths relative to the output root.
    pub outputs: Vec<String>,
}

/// Report data from the explain command.
#[derive(Debug)]
pub struct ExplainReport {
    pub input: PathBuf,
    /// Types visible to the round, marked or not.
    pub elements: usize,
    pub phases: Vec<PhaseInfo>,
    pub declarations: Vec<DeclarationInfo>,
    pub diagnostics: Vec<DiagnosticLine>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.heading("Stitch Pipeline Explanation");
        out.blank();

        out.field(0, "Input", &self.input.display().to_string());
        out.field(1, "Types", &self.elements.to_string());
        out.field(1, "Processed", &self.declarations.len().to_string());
        out.blank();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.step(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.blank();

        out.section("Declarations");
        for declaration in &self.declarations {
            out.entry(&format!(
                "{} ({}) [{}]",
                declaration.name,
                declaration.kind,
                declaration.markers.join(", ")
            ));
            for output in &declaration.outputs {
                out.file(FileMark::New, &format!("  {output}"));
            }
        }

        if !self.diagnostics.is_empty() {
            out.blank();
            for diagnostic in &self.diagnostics {
                diagnostic.render(out);
            }
        }
    }
}
