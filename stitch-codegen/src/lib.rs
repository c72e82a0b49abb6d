//! Declaration analysis and round pipeline for the stitch code synthesis
//! engine.
//!
//! This crate turns one processing round into generation targets and
//! adapter models. Rendering them into source files is left to a language
//! backend (e.g., `stitch-codegen-java`) registered as a pipeline phase.
//!
//! # Module Organization
//!
//! - [`model`] - Declaration models, the round's type universe, the model cache
//! - [`extract`] - Declaration Model Extractor
//! - [`resolve`] - Marker parameters, bound types and generation targets
//! - [`merge`] - Composed-property expansion for serialization adapters
//! - [`keep_rules`] - Shrinker keep rules for generated adapters
//! - [`artifact`] / [`writer`] - Synthesized files and where they go
//! - [`pipeline`] - Phases, plugins, diagnostics and snapshots
//! - [`engine`] - Round driver
//! - [`builder`] - Indented text building blocks for backends
//! - [`testing`] - Test utilities (feature-gated)

pub mod artifact;
pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod keep_rules;
pub mod lower;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod resolve;
pub mod writer;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use artifact::{ArtifactKind, FileIdentity, GeneratedArtifact};
pub use config::{EngineConfig, RuntimeNames};
pub use engine::{Engine, RoundOutcome};
pub use error::CodegenError;
pub use keep_rules::KeepRules;
pub use lower::lower_round;
pub use merge::{AdapterModel, ComposedGroup};
pub use writer::{ArtifactWriter, FsWriter, MemoryWriter};
