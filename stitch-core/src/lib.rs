//! Core utilities and types for the stitch code synthesis engine.
//!
//! This crate provides the generated-file abstraction and the string
//! helpers shared by the engine and its Java backend.

mod file;
mod utils;

// File operations
pub use file::{File, FileRules, GeneratedFile, Overwrite, WriteResult};
// String utilities
pub use utils::{
    capitalize, decapitalize, escape_java_string, getter_name, setter_name, to_pascal_case,
};
