//! Round pipeline.
//!
//! This module provides a [`Pipeline`] orchestrator that manages the phases
//! of one processing round. The pipeline provides:
//!
//! - Explicit phase boundaries (extract → resolve → merge → synthesis)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//! - Round-scoped state via [`RoundContext`]
//!
//! # Example
//!
//! ```ignore
//! use stitch_codegen::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::new();
//! let ctx = pipeline.run(round, config)?;
//!
//! for diag in ctx.errors() {
//!     eprintln!("{diag}");
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::RoundContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
