//! Check operation - analysis without synthesis.

use std::path::PathBuf;

use eyre::{Context, Result};
use stitch_codegen::{EngineConfig, pipeline::Pipeline};
use stitch_ir::Round;

use super::diagnostic_lines;
use crate::reports::{CheckReport, RoundCheck};

/// Execute the check operation.
///
/// Runs the analysis phases over every round and returns their diagnostics.
/// Rounds are checked independently; nothing is generated or carried over.
pub fn check(rounds: Vec<(PathBuf, Round)>, config: &EngineConfig) -> Result<CheckReport> {
    let pipeline = Pipeline::new();
    let mut checked = Vec::with_capacity(rounds.len());

    for (path, round) in rounds {
        let processed = round.processed().count();
        let ctx = pipeline
            .run(round, config.clone())
            .wrap_err_with(|| format!("failed to analyze {}", path.display()))?;

        checked.push(RoundCheck {
            path,
            processed,
            targets: ctx.targets.len(),
            adapters: ctx.adapters.len(),
            diagnostics: diagnostic_lines(&ctx.diagnostics),
        });
    }

    Ok(CheckReport { rounds: checked })
}
