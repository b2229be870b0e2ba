//! Parsed `.env` file.

use crate::parser::parse_dotenv;
use layerconf_core::{Entries, Entry, Result, read_optional};
use std::path::Path;

/// Ordered `KEY=VALUE` pairs from a `.env` file. Keys are unique; the last
/// assignment of a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotEnvFile {
    entries: Entries,
}

impl DotEnvFile {
    /// Reads and parses the file at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let Some(content) = read_optional(path)? else {
            return Ok(None);
        };

        tracing::debug!("Loading .env from {}", path.display());
        Ok(Some(parse_dotenv(&content)))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.entry(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys()
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

    pub(crate) fn entries_mut(&mut self) -> &mut Entries {
        &mut self.entries
    }
}

impl<'a> IntoIterator for &'a DotEnvFile {
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
    fn test_load_existing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "GPR_USER=someone\n").unwrap();

        let env = DotEnvFile::load(&path).unwrap().unwrap();
        assert_eq!(env.get("GPR_USER"), Some("someone"));
    }

    #[test]
    fn test_load_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(".env");

        assert!(DotEnvFile::load(&path).unwrap().is_none());
    }

    #[test]
    fn test_iteration_order() {
        let env = parse_dotenv("Z=1\nA=2\nM=3");
        let keys: Vec<_> = env.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
        assert_eq!((&env).into_iter().count(), 3);
    }
}
