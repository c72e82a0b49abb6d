//! Language-neutral text building used by the source backends.
//!
//! Backends render their AST nodes line by line into a [`CodeBuilder`],
//! which owns the indentation.

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
