//! Marker Parameter Resolver, Binding Resolver and target selection.

mod binding;
mod marker;
mod target;

pub use binding::{Inference, resolve_bindings};
pub use marker::{
    BoundTypeRef, ContributorKind, MarkerInstance, MarkerResolver, MultibindingKind,
    NetworkScope, TypeHandle,
};
pub use target::{GenerationTarget, Resolution, TargetResolver};
