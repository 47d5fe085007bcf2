//! Known type names
//!
//! An identifier is only treated as a type in `(T)x` and `sizeof (T)` when it
//! is listed here. Every parse starts from the standard library typedefs.

use std::collections::HashSet;

/// Standard typedef names, one per line
const STDDEF: &str = include_str!("stddef.txt");

/// Set of identifiers that name types
#[derive(Debug, Clone, Default)]
pub struct TypedefTable {
    names: HashSet<String>,
}

impl TypedefTable {
    /// An empty table: every identifier is an ordinary name
    pub fn new() -> Self {
        Self::default()
    }

    /// A table seeded with the standard library typedef names
    pub fn standard() -> Self {
        let mut table = Self::new();
        for name in STDDEF.lines().map(str::trim).filter(|l| !l.is_empty()) {
            table.add(name);
        }
        table
    }

    pub fn add(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for TypedefTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.add(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_knows_common_typedefs() {
        let table = TypedefTable::standard();
        assert!(table.contains("size_t"));
        assert!(table.contains("uint8_t"));
        assert!(table.contains("FILE"));
        assert!(!table.contains("foo"));
        assert!(!table.contains(""));
    }

    #[test]
    fn test_extend_adds_names() {
        let mut table = TypedefTable::new();
        assert!(table.is_empty());
        table.extend(["foo_t", "bar_t"]);
        assert_eq!(table.len(), 2);
        assert!(table.contains("bar_t"));
    }
}
