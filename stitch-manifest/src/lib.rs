//! TOML surfaces of the stitch engine.
//!
//! Two files are understood here:
//!
//! - a *round file* describing every declaration visible to one processing
//!   round ([`RoundFile`]), and
//! - the optional engine configuration `stitch.toml` ([`EngineConfigFile`]).
//!
//! Both are parsed with `serde` and validated eagerly. Errors carry the
//! source text and a span so they render as `miette` reports.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod round_file;
mod validate;

pub use config::{EngineConfigFile, GENERATED_ANNOTATIONS, OptionsSection, RuntimeSection};
pub use error::{Error, Result, SourceContext};
pub use round_file::{
    AnnotationEntry, MarkerEntry, MethodEntry, ParamEntry, PropertyEntry, RawAnnotationValue,
    RawMarkerValue, RoundFile, RoundHeader, TaggedAnnotationValue, TypeEntry,
};
