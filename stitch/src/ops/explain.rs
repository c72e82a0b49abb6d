//! Explain operation - pipeline overview and per-declaration outputs.

use std::path::Path;

use eyre::{Context, Result};
use stitch_codegen::EngineConfig;
use stitch_ir::Round;

use super::diagnostic_lines;
use crate::reports::{DeclarationInfo, ExplainReport, PhaseInfo};

/// Execute the explain operation.
///
/// Runs the full pipeline in memory and groups the resulting file
/// identities by the declaration they came from.
pub fn explain(path: &Path, round: Round, config: EngineConfig) -> Result<ExplainReport> {
    let pipeline = stitch_codegen_java::pipeline();
    let phases = pipeline
        .phases()
        .into_iter()
        .map(|phase| PhaseInfo {
            name: phase.name.to_string(),
            description: phase.description.to_string(),
        })
        .collect();

    let mut declarations: Vec<DeclarationInfo> = round
        .processed()
        .map(|element| DeclarationInfo {
            name: element.canonical_name(),
            kind: element.kind.as_str().to_string(),
            markers: element.markers.iter().map(|m| m.kind.key().to_string()).collect(),
            outputs: Vec::new(),
        })
        .collect();
    let elements = round.elements.len();

    let ctx = pipeline
        .run(round, config)
        .wrap_err_with(|| format!("failed to run {}", path.display()))?;

    for artifact in &ctx.artifacts {
        let originating = artifact.originating.canonical_name();
        if let Some(declaration) = declarations.iter_mut().find(|d| d.name == originating) {
            declaration
                .outputs
                .push(artifact.identity.relative_path().display().to_string());
        }
    }

    Ok(ExplainReport {
        input: path.to_path_buf(),
        elements,
        phases,
        declarations,
        diagnostics: diagnostic_lines(&ctx.diagnostics),
    })
}
