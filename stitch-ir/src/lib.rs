//! Declaration input types for the stitch code synthesis engine.
//!
//! This crate holds what a host hands to one processing round: the
//! annotated declarations, the rest of the visible classpath, and the raw
//! marker parameters exactly as they were written.
//!
//! # Architecture
//!
//! ```text
//! round.toml → stitch-manifest (parsing) → stitch-ir (raw round) → stitch-codegen
//! ```
//!
//! Nothing here is validated beyond syntax. Interpretation (marker
//! parameter resolution, binding inference, property merging) belongs to
//! `stitch-codegen`.

mod class_name;
mod element;
mod marker;
mod round;
mod type_name;

pub use class_name::ClassName;
pub use element::{
    AnnotationElement, AnnotationValue, MethodElement, ParameterElement, PropertyElement,
    TypeElement, TypeKind,
};
pub use marker::{Marker, MarkerKind, MarkerValue};
pub use round::Round;
pub use type_name::{Primitive, TypeName, TypeParseError, WildcardBound, parse_type};
