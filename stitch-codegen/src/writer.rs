//! Artifact Writer.
//!
//! Each file identity may be written once per round. Writers remember which
//! declaration every output came from so incremental builds can invalidate
//! exactly the outputs of a changed declaration.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use stitch_core::{File, GeneratedFile, WriteResult};
use thiserror::Error;
use tracing::debug;

use crate::artifact::{FileIdentity, GeneratedArtifact};

/// Name of the originating-declaration index below the output root.
pub const ORIGINATING_INDEX: &str = "stitch-originating.json";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("{identity} was generated twice in one round (from {first} and {second})")]
    DuplicateArtifact {
        identity: String,
        first: String,
        second: String,
    },
}

/// Persists artifacts.
pub trait ArtifactWriter {
    /// Persist one artifact.
    ///
    /// # Errors
    ///
    /// Fails with [`WriteError::DuplicateArtifact`] when the identity was
    /// already written this round, or on I/O failure.
    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<WriteResult>;

    /// Called between rounds.
    fn finish_round(&mut self) -> Result<()> {
        Ok(())
    }

    /// `file identity → originating declaration`, sorted.
    fn originating_index(&self) -> &BTreeMap<String, String>;
}

/// Per-round duplicate detection plus the cumulative originating index.
#[derive(Debug, Default)]
struct Ledger {
    round: HashSet<FileIdentity>,
    index: BTreeMap<String, String>,
}

impl Ledger {
    fn record(&mut self, artifact: &GeneratedArtifact) -> Result<()> {
        let key = artifact.identity.to_string();
        let originating = artifact.originating.canonical_name();
        if !self.round.insert(artifact.identity.clone()) {
            let first = self.index.get(&key).cloned().unwrap_or_default();
            return Err(WriteError::DuplicateArtifact {
                identity: key,
                first,
                second: originating,
            }
            .into());
        }
        self.index.insert(key, originating);
        Ok(())
    }

    fn next_round(&mut self) {
        self.round.clear();
    }
}

/// Writes below an output directory.
#[derive(Debug)]
pub struct FsWriter {
    root: PathBuf,
    ledger: Ledger,
}

impl FsWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ledger: Ledger::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactWriter for FsWriter {
    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<WriteResult> {
        self.ledger.record(artifact)?;
        let result = artifact
            .write(&self.root)
            .wrap_err_with(|| format!("failed to write {}", artifact.identity))?;
        debug!(identity = %artifact.identity, ?result, "artifact written");
        Ok(result)
    }

    fn finish_round(&mut self) -> Result<()> {
        self.ledger.next_round();
        let json = serde_json::to_string_pretty(&self.ledger.index)
            .wrap_err("failed to serialize originating index")?;
        File::new(self.root.join(ORIGINATING_INDEX), json + "\n").write()?;
        Ok(())
    }

    fn originating_index(&self) -> &BTreeMap<String, String> {
        &self.ledger.index
    }
}

/// Keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    artifacts: Vec<GeneratedArtifact>,
    ledger: Ledger,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> &[GeneratedArtifact] {
        &self.artifacts
    }

    pub fn get(&self, identity: &str) -> Option<&GeneratedArtifact> {
        self.artifacts
            .iter()
            .find(|a| a.identity.to_string() == identity)
    }
}

impl ArtifactWriter for MemoryWriter {
    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<WriteResult> {
        self.ledger.record(artifact)?;
        self.artifacts.push(artifact.clone());
        Ok(WriteResult::Written)
    }

    fn finish_round(&mut self) -> Result<()> {
        self.ledger.next_round();
        Ok(())
    }

    fn originating_index(&self) -> &BTreeMap<String, String> {
        &self.ledger.index
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use stitch_ir::ClassName;
    use tempfile::TempDir;

    use super::*;
    use crate::artifact::ArtifactKind;

    fn artifact(name: &str, origin: &str) -> GeneratedArtifact {
        GeneratedArtifact::new(
            ArtifactKind::BindingModule,
            FileIdentity::source(&ClassName::get("com.example", name)),
            ClassName::get("com.example", origin),
            format!("interface {name} {{}}\n"),
        )
    }

    #[test]
    fn test_duplicate_identity_in_one_round() {
        let mut writer = MemoryWriter::new();
        writer.write(&artifact("BarFooBindingModule", "Foo")).unwrap();
        let err = writer
            .write(&artifact("BarFooBindingModule", "Other"))
            .unwrap_err();
        let err = err.downcast::<WriteError>().unwrap();
        assert!(matches!(
            err,
            WriteError::DuplicateArtifact { ref first, ref second, .. }
                if first == "com.example.Foo" && second == "com.example.Other"
        ));
        assert_eq!(writer.artifacts().len(), 1);
    }

    #[test]
    fn test_same_identity_allowed_in_next_round() {
        let mut writer = MemoryWriter::new();
        writer.write(&artifact("BarFooBindingModule", "Foo")).unwrap();
        writer.finish_round().unwrap();
        assert!(writer.write(&artifact("BarFooBindingModule", "Foo")).is_ok());
    }

    #[test]
    fn test_fs_writer_writes_sources_and_index() {
        let temp = TempDir::new().unwrap();
        let mut writer = FsWriter::new(temp.path());

        let result = writer.write(&artifact("BarFooBindingModule", "Foo")).unwrap();
        assert_eq!(result, WriteResult::Written);
        writer.write(&artifact("BazFooBindingModule", "Foo")).unwrap();
        writer.finish_round().unwrap();

        let source = temp
            .path()
            .join("java/com/example/BarFooBindingModule.java");
        assert_eq!(
            fs::read_to_string(source).unwrap(),
            "interface BarFooBindingModule {}\n"
        );

        let index = fs::read_to_string(temp.path().join(ORIGINATING_INDEX)).unwrap();
        assert_eq!(
            index,
            "{\n  \"com.example.BarFooBindingModule\": \"com.example.Foo\",\n  \"com.example.BazFooBindingModule\": \"com.example.Foo\"\n}\n"
        );
    }

    #[test]
    fn test_fs_writer_reports_unchanged_on_rewrite() {
        let temp = TempDir::new().unwrap();
        let mut writer = FsWriter::new(temp.path());
        writer.write(&artifact("BarFooBindingModule", "Foo")).unwrap();
        writer.finish_round().unwrap();

        let result = writer.write(&artifact("BarFooBindingModule", "Foo")).unwrap();
        assert_eq!(result, WriteResult::Unchanged);
    }
}
