//! Java backend for the stitch code synthesis engine.
//!
//! [`ast`] is a small JavaPoet-style model of Java source files, [`files`]
//! holds one synthesis strategy per artifact kind, and [`SynthesizePhase`]
//! wires them into the round pipeline.

mod synthesize;

pub mod ast;
pub mod files;

use stitch_codegen::{Engine, EngineConfig, pipeline::Pipeline};

pub use ast::{AnnotationSpec, Arg, CodeBlock, FieldSpec, JavaFile, MethodSpec, Modifier, TypeSpec};
pub use files::{GENERATED_COMMENTS, GENERATOR_NAME, JavaSource};
pub use synthesize::SynthesizePhase;

/// The built-in phases followed by Java synthesis.
pub fn pipeline() -> Pipeline {
    Pipeline::new().phase(SynthesizePhase)
}

/// An engine that renders Java sources.
pub fn engine(config: EngineConfig) -> Engine {
    Engine::new(config, pipeline())
}
