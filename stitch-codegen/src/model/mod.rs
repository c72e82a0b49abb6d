//! Round-scoped models: extracted declarations, the type universe and the
//! extraction cache.

mod cache;
mod declaration;
mod universe;

pub use cache::ModelCache;
pub use declaration::{Declaration, DeclarationKind, KOTLIN_METADATA, Property, PropertySource};
pub use universe::Universe;
