//! Insertion-ordered key/value storage shared by the `.env` and manifest parsers.

use serde::Serialize;
use std::collections::HashMap;

/// A single key/value assignment with the 1-based line it was last set on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

/// Ordered key/value map where the last assignment of a key wins.
///
/// A key keeps the position of its first occurrence; later assignments only
/// replace the value and line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key = value`, returning the previous value if the key was already set.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        line: usize,
    ) -> Option<String> {
        let key = key.into();
        let value = value.into();

        if let Some(&idx) = self.index.get(&key) {
            let entry = &mut self.entries[idx];
            entry.line = line;
            return Some(std::mem::replace(&mut entry.value, value));
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(Entry { key, value, line });
        None
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key).map(|e| e.value.as_str())
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.index.get(key).map(|&idx| &self.entries[idx])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Entries {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut entries = Entries::new();
        assert!(entries.insert("A", "1", 1).is_none());
        assert_eq!(entries.get("A"), Some("1"));
        assert_eq!(entries.get("B"), None);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_last_write_wins_keeps_first_position() {
        let mut entries = Entries::new();
        entries.insert("A", "1", 1);
        entries.insert("B", "2", 2);
        let previous = entries.insert("A", "3", 3);

        assert_eq!(previous.as_deref(), Some("1"));
        assert_eq!(entries.get("A"), Some("3"));
        assert_eq!(entries.entry("A").unwrap().line, 3);
        assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_empty() {
        let entries = Entries::new();
        assert!(entries.is_empty());
        assert_eq!(entries.iter().count(), 0);
        assert!(!entries.contains_key("A"));
    }

    #[test]
    fn test_into_iterator() {
        let mut entries = Entries::new();
        entries.insert("x", "y", 4);
        let collected: Vec<_> = (&entries).into_iter().map(|e| e.line).collect();
        assert_eq!(collected, vec![4]);
    }
}
