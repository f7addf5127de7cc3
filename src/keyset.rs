//! Distinct string key collection.
//!
//! Used to deduplicate template identifiers ahead of a batched lookup and to
//! produce a deterministic, sorted rendering for diagnostics.

use std::collections::HashSet;
use std::fmt;

/// A set of distinct string keys.
///
/// Plain in-memory set semantics. Not synchronized: callers sharing an
/// instance across concurrent writers must provide their own locking.
#[derive(Debug, Clone, Default)]
pub struct UniqueKeySet {
    keys: HashSet<String>,
}

impl UniqueKeySet {
    /// Create an empty key set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single key. Inserting an existing key is a no-op.
    pub fn insert(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    /// Insert any number of keys.
    pub fn add<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            self.keys.insert(key.into());
        }
    }

    /// Whether any key has been collected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// The collected keys, in no particular order.
    pub fn values(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }
}

impl fmt::Display for UniqueKeySet {
    /// Lexicographically sorted, comma-joined rendering. Diagnostics only,
    /// never used for wire framing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = self.values();
        keys.sort();
        f.write_str(&keys.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_deduplicates() {
        let mut set = UniqueKeySet::new();
        set.add(["b", "a", "b", "c", "a"]);

        assert_eq!(set.len(), 3);

        let mut values = set.values();
        values.sort();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_is_empty() {
        let mut set = UniqueKeySet::new();
        assert!(set.is_empty());

        set.insert("key");
        assert!(!set.is_empty());
    }

    #[test]
    fn test_display_is_sorted() {
        let mut set = UniqueKeySet::new();
        set.add(["zeta", "alpha", "mid"]);

        assert_eq!(set.to_string(), "alpha,mid,zeta");
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(UniqueKeySet::new().to_string(), "");
    }
}
