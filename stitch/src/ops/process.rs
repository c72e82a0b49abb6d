//! Process operation - runs rounds in order and writes their artifacts.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use stitch_codegen::{
    ArtifactWriter, Engine, EngineConfig, FsWriter, MemoryWriter, pipeline::SnapshotPlugin,
};
use stitch_core::WriteResult;
use stitch_ir::{Round, TypeElement};
use tracing::info;

use super::diagnostic_lines;
use crate::reports::{PreviewFile, ProcessReport, RoundReport, WrittenFile};

/// Settings for one `process` run.
#[derive(Debug)]
pub struct ProcessOptions {
    pub config: EngineConfig,
    pub output: PathBuf,
    pub dry_run: bool,
    pub snapshot: Option<PathBuf>,
}

/// Execute the process operation.
///
/// Rounds run sequentially. The error flag and the types synthesized by one
/// round are handed to the next, the way a compiler feeds generated sources
/// back into annotation processing.
pub fn process(rounds: Vec<(PathBuf, Round)>, options: &ProcessOptions) -> Result<ProcessReport> {
    let mut writer: Box<dyn ArtifactWriter> = if options.dry_run {
        Box::new(MemoryWriter::new())
    } else {
        Box::new(FsWriter::new(&options.output))
    };

    let mut error_raised = false;
    let mut carried: Vec<TypeElement> = Vec::new();
    let mut reports = Vec::with_capacity(rounds.len());

    for (index, (path, mut round)) in rounds.into_iter().enumerate() {
        round.error_raised |= error_raised;
        round.elements.append(&mut carried);

        let engine = engine(options, index);
        let outcome = engine
            .process_round(round)
            .wrap_err_with(|| format!("round {} failed", path.display()))?;
        error_raised = outcome.error_raised;
        carried = outcome.generated_elements.clone();

        let results = outcome.write(writer.as_mut())?;
        let files = outcome
            .artifacts
            .iter()
            .zip(results)
            .map(|(artifact, result)| WrittenFile {
                identity: artifact.identity.to_string(),
                originating: artifact.originating.canonical_name(),
                result,
            })
            .collect::<Vec<_>>();
        let previews = if options.dry_run {
            outcome
                .artifacts
                .iter()
                .map(|artifact| PreviewFile {
                    path: artifact.identity.relative_path().display().to_string(),
                    content: artifact.contents.clone(),
                })
                .collect()
        } else {
            Vec::new()
        };

        info!(
            round = %path.display(),
            written = files.iter().filter(|f| f.result == WriteResult::Written).count(),
            "round written"
        );
        reports.push(RoundReport {
            path,
            files,
            previews,
            diagnostics: diagnostic_lines(&outcome.diagnostics),
            withheld: outcome.withheld,
            carried: outcome.generated_elements.len(),
        });
    }

    Ok(ProcessReport {
        output: options.output.clone(),
        dry_run: options.dry_run,
        rounds: reports,
    })
}

fn engine(options: &ProcessOptions, index: usize) -> Engine {
    let mut pipeline = stitch_codegen_java::pipeline();
    if let Some(dir) = &options.snapshot {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(round_dir(dir, index)));
    }
    Engine::new(options.config.clone(), pipeline)
}

fn round_dir(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("round-{}", index + 1))
}

#[cfg(test)]
mod tests {
    use stitch_codegen::testing::{TypeBuilder, json_enum, round};
    use tempfile::TempDir;

    use super::*;

    fn options(output: &Path, dry_run: bool) -> ProcessOptions {
        ProcessOptions {
            config: EngineConfig::default(),
            output: output.to_path_buf(),
            dry_run,
            snapshot: None,
        }
    }

    fn enum_round() -> Round {
        round([
            TypeBuilder::interface("com.personatech.core.di.PradarshanMoshiAdapter").build(),
            TypeBuilder::enumeration("com.example.Status", &["ACTIVE", "UNKNOWN"])
                .marker(json_enum("UNKNOWN"))
                .build(),
        ])
    }

    #[test]
    fn test_generated_types_feed_the_next_round() {
        let temp = TempDir::new().unwrap();
        let rounds = vec![
            (PathBuf::from("round-1.toml"), enum_round()),
            (PathBuf::from("round-2.toml"), Round::new(Vec::new())),
        ];

        let report = process(rounds, &options(temp.path(), false)).unwrap();

        assert!(!report.has_errors());
        assert_eq!(report.rounds[0].carried, 1);
        // The enum adapter is a multibinding contributor in round two.
        let second: Vec<_> = report.rounds[1].files.iter().map(|f| f.identity.as_str()).collect();
        assert_eq!(
            second,
            ["com.example.PradarshanMoshiAdapterStatusJsonAdapterMultiBindingModule"]
        );
        assert!(
            temp.path()
                .join("java/com/example/StatusJsonAdapter.java")
                .exists()
        );
        assert!(temp.path().join("stitch-originating.json").exists());
    }

    #[test]
    fn test_error_flag_is_threaded_between_rounds() {
        let temp = TempDir::new().unwrap();
        let broken = round([TypeBuilder::enumeration("com.example.Status", &["ACTIVE"])
            .marker(json_enum("MISSING"))
            .build()]);
        let rounds = vec![
            (PathBuf::from("round-1.toml"), broken),
            (PathBuf::from("round-2.toml"), enum_round()),
        ];

        let report = process(rounds, &options(temp.path(), true)).unwrap();

        assert!(report.has_errors());
        assert_eq!(report.rounds[0].diagnostics.len(), 1);
        assert!(report.rounds[1].files.is_empty());
        assert!(report.rounds[1].diagnostics.is_empty());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let rounds = vec![(PathBuf::from("round-1.toml"), enum_round())];

        let report = process(rounds, &options(temp.path(), true)).unwrap();

        assert_eq!(report.rounds[0].previews.len(), 1);
        assert_eq!(
            report.rounds[0].previews[0].path,
            "java/com/example/StatusJsonAdapter.java"
        );
        assert!(!temp.path().join("java").exists());
    }
}
