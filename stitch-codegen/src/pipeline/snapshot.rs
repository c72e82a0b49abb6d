//! Pipeline snapshot plugin for debugging.
//!
//! This module provides a plugin that captures the round state after each
//! phase, so the intermediate models can be inspected as JSON.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use eyre::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;

use super::{Diagnostic, Plugin, RoundContext};
use crate::{
    artifact::FileIdentity, merge::AdapterModel, model::Declaration, resolve::GenerationTarget,
};

/// A snapshot of the round state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// Extracted models (available after "extract").
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub models: IndexMap<String, Declaration>,

    /// Generation targets (available after "resolve").
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<GenerationTarget>,

    /// Adapter models (available after "merge").
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub adapters: IndexMap<String, AdapterModel>,

    /// Identities of synthesized artifacts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<FileIdentity>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl PhaseSnapshot {
    fn capture(phase: &str, ctx: &RoundContext) -> Self {
        Self {
            phase: phase.to_string(),
            models: ctx
                .models
                .iter()
                .map(|(name, model)| (name.clone(), model.as_ref().clone()))
                .collect(),
            targets: ctx.targets.clone(),
            adapters: ctx.adapters.clone(),
            artifacts: ctx.artifacts.iter().map(|a| a.identity.clone()).collect(),
            diagnostics: ctx.diagnostics.clone(),
        }
    }
}

/// A plugin that captures round state after each phase.
///
/// Use this plugin with the `--snapshot` flag to dump intermediate models
/// for debugging.
///
/// # Example
///
/// ```ignore
/// let snapshot_plugin = SnapshotPlugin::with_output_dir(".stitch/debug");
/// let pipeline = Pipeline::new().plugin(snapshot_plugin);
/// let ctx = pipeline.run(round, config)?;
/// ```
pub struct SnapshotPlugin {
    /// Collected snapshots.
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Output directory for snapshots.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that writes to a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.read().clone()
    }

    /// Write all snapshots to a directory.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        for snapshot in self.read().iter() {
            write_snapshot(dir.as_ref(), snapshot)?;
        }
        Ok(())
    }

    // Pushes are atomic; a poisoned list is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Vec<PhaseSnapshot>> {
        self.snapshots.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<PhaseSnapshot>> {
        self.snapshots.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut RoundContext) -> Result<()> {
        let snapshot = PhaseSnapshot::capture(phase, ctx);

        // If output directory is configured, write immediately
        if let Some(ref dir) = self.output_dir {
            write_snapshot(dir, &snapshot)?;
        }

        self.write().push(snapshot);
        Ok(())
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
