//! Built-in pipeline phases.
//!
//! This module provides the standard phases that run in every round:
//!
//! - [`ExtractPhase`] - builds declaration models for processed types
//! - [`ResolvePhase`] - turns markers into generation targets
//! - [`MergePhase`] - expands composed properties of adapter targets

mod extract;
mod merge;
mod resolve;

pub use extract::ExtractPhase;
pub use merge::MergePhase;
pub use resolve::ResolvePhase;
