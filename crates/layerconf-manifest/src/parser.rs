//! Scan-based parser for sectioned manifests.
//!
//! A section runs from its `[name]` header to the next line starting with
//! `[` or the end of the file. A repeated header reopens the existing
//! section; later assignments win.

use crate::types::ManifestDocument;
use regex::Regex;
use std::sync::LazyLock;

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\[\]]+)\]\s*(?:#.*)?$").expect("Invalid regex"));

/// `key = "value"`, optionally followed by a comment.
static QUOTED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(\w[\w.-]*)\s*=\s*"(.*?)"\s*(?:#.*)?$"#).expect("Invalid regex")
});

/// `key = 'value'` (TOML literal string), optionally followed by a comment.
static LITERAL_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\w[\w.-]*)\s*=\s*'([^']*)'\s*(?:#.*)?$").expect("Invalid regex")
});

/// `key = value` with the raw value running to end of line.
static BARE_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w[\w.-]*)\s*=\s*(.*?)\s*$").expect("Invalid regex"));

enum Line<'a> {
    Header(&'a str),
    /// A `[`-line that is not a single valid header (e.g. `[[bundles]]`).
    Unsupported,
    Entry(&'a str, &'a str),
    Other,
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();

    if trimmed.starts_with('[') {
        return match SECTION_HEADER.captures(trimmed) {
            Some(caps) => match caps.get(1).map(|m| m.as_str().trim()) {
                Some(name) if !name.is_empty() => Line::Header(name),
                _ => Line::Unsupported,
            },
            None => Line::Unsupported,
        };
    }

    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Line::Other;
    }

    for re in [&*QUOTED_ENTRY, &*LITERAL_ENTRY, &*BARE_ENTRY] {
        if let Some(caps) = re.captures(line)
            && let (Some(key), Some(value)) = (caps.get(1), caps.get(2))
        {
            return Line::Entry(key.as_str(), value.as_str());
        }
    }

    Line::Other
}

/// Parses a sectioned manifest. Never fails; unrecognised lines are skipped.
pub fn parse_manifest(content: &str) -> ManifestDocument {
    let mut doc = ManifestDocument::default();
    let mut current: Option<usize> = None;

    for (line_idx, line) in content.lines().enumerate() {
        let line_no = line_idx + 1;

        match classify(line) {
            Line::Header(name) => {
                current = Some(doc.open_section(name, line_no));
            }
            Line::Unsupported => {
                tracing::trace!(
                    "Line {}: unsupported table header {:?}, skipping its body",
                    line_no,
                    line.trim()
                );
                current = None;
            }
            Line::Entry(key, value) => match current {
                Some(idx) => {
                    doc.section_at_mut(idx)
                        .entries_mut()
                        .insert(key, value, line_no);
                }
                None => {
                    tracing::trace!("Line {}: assignment outside a section, skipping", line_no);
                }
            },
            Line::Other => {
                if !line.trim().is_empty() {
                    tracing::trace!("Line {}: skipping {:?}", line_no, line);
                }
            }
        }
    }

    tracing::debug!("Parsed manifest: {} sections", doc.len());
    doc
}
