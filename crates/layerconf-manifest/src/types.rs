//! Parsed manifest document and its sections.

use crate::parser::parse_manifest;
use layerconf_core::{Entries, Entry, Result, read_optional};
use std::collections::HashMap;
use std::path::Path;

/// A named `[section]` and its `key = value` assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSection {
    name: String,
    /// 1-based line of the first header for this section.
    line: usize,
    entries: Entries,
}

impl ManifestSection {
    fn new(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            line,
            entries: Entries::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.entry(key)
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

/// Sections of a manifest in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDocument {
    sections: Vec<ManifestSection>,
    index: HashMap<String, usize>,
}

impl ManifestDocument {
    /// Reads and parses the manifest at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let Some(content) = read_optional(path)? else {
            return Ok(None);
        };

        tracing::debug!("Loading manifest from {}", path.display());
        Ok(Some(parse_manifest(&content)))
    }

    pub fn section(&self, name: &str) -> Option<&ManifestSection> {
        self.index.get(name).map(|&idx| &self.sections[idx])
    }

    /// Looks up `key` in `section`. Missing section and missing key both yield `None`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    pub fn sections(&self) -> std::slice::Iter<'_, ManifestSection> {
        self.sections.iter()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the index of `name`, creating the section if absent.
    pub(crate) fn open_section(&mut self, name: &str, line: usize) -> usize {
        if let Some(&idx) = self.index.get(name) {
            tracing::trace!("Line {}: reopening section [{}]", line, name);
            return idx;
        }

        let idx = self.sections.len();
        self.sections.push(ManifestSection::new(name, line));
        self.index.insert(name.to_string(), idx);
        idx
    }

    pub(crate) fn section_at_mut(&mut self, idx: usize) -> &mut ManifestSection {
        &mut self.sections[idx]
    }
}
