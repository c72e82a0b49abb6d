use indexmap::IndexMap;
use stitch_ir::{ClassName, Round, TypeElement, TypeKind, TypeName};

/// Every type visible to a round, keyed by canonical name.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    types: IndexMap<String, TypeElement>,
}

impl Universe {
    pub fn from_round(round: &Round) -> Self {
        Self {
            types: round
                .elements
                .iter()
                .map(|e| (e.canonical_name(), e.clone()))
                .collect(),
        }
    }

    pub fn get(&self, name: &ClassName) -> Option<&TypeElement> {
        self.types.get(&name.canonical_name())
    }

    pub fn get_canonical(&self, canonical: &str) -> Option<&TypeElement> {
        self.types.get(canonical)
    }

    /// Kind of the raw class behind a type reference, when known.
    pub fn kind_of(&self, ty: &TypeName) -> Option<TypeKind> {
        ty.raw_class().and_then(|c| self.get(c)).map(|e| e.kind)
    }

    /// Types carrying at least one marker, in round order.
    pub fn processed(&self) -> impl Iterator<Item = &TypeElement> {
        self.types.values().filter(|e| e.has_markers())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
