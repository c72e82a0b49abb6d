//! One processing round.

use serde::Serialize;

use crate::{ClassName, TypeElement};

/// Everything visible to one round: the marked declarations plus the
/// surrounding classpath.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Round {
    /// An error was raised in the previous round.
    pub error_raised: bool,
    pub elements: Vec<TypeElement>,
}

impl Round {
    pub fn new(elements: Vec<TypeElement>) -> Self {
        Self {
            error_raised: false,
            elements,
        }
    }

    /// Elements carrying at least one marker, in input order.
    pub fn processed(&self) -> impl Iterator<Item = &TypeElement> {
        self.elements.iter().filter(|e| e.has_markers())
    }

    pub fn find(&self, name: &ClassName) -> Option<&TypeElement> {
        self.elements.iter().find(|e| e.name == *name)
    }
}
