//! Java source model.
//!
//! Types are kept as [`TypeName`](stitch_ir::TypeName)s until a
//! [`JavaFile`] renders, so imports can be decided once per file.

mod annotation;
mod code_block;
mod field;
mod java_file;
mod method;
mod modifier;
mod names;
mod parameter;
mod type_spec;

pub use annotation::AnnotationSpec;
pub use code_block::{Arg, CodeBlock};
pub use field::FieldSpec;
pub use java_file::JavaFile;
pub use method::MethodSpec;
pub use modifier::Modifier;
pub use names::Names;
pub use parameter::ParameterSpec;
pub use type_spec::TypeSpec;
