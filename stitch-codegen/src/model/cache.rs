use std::{collections::HashMap, sync::Arc};

use super::Declaration;
use crate::{error::CodegenError, extract::Purpose};

type Entry = Result<Arc<Declaration>, CodegenError>;

/// Memoized extraction results for one round, failures included.
///
/// Created with the round context and dropped with it.
#[derive(Debug, Default)]
pub struct ModelCache {
    entries: HashMap<(String, Purpose), Entry>,
    hits: usize,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for `canonical`, computing it on a miss.
    pub fn get_or_insert_with(
        &mut self,
        canonical: &str,
        purpose: Purpose,
        compute: impl FnOnce() -> Entry,
    ) -> Entry {
        let key = (canonical.to_string(), purpose);
        if let Some(entry) = self.entries.get(&key) {
            self.hits += 1;
            return entry.clone();
        }
        let entry = compute();
        self.entries.insert(key, entry.clone());
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_are_cached() {
        let mut cache = ModelCache::new();
        let err = CodegenError::UnknownDeclaration {
            declaration: "com.example.Gone".into(),
        };
        let first = cache.get_or_insert_with("com.example.Gone", Purpose::Binding, || {
            Err(err.clone())
        });
        let second = cache.get_or_insert_with("com.example.Gone", Purpose::Binding, || {
            panic!("should not recompute")
        });
        assert_eq!(first, Err(err.clone()));
        assert_eq!(second, Err(err));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }
}
