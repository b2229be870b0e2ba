//! Provenance types: where a value came from, and why a source missed.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A configuration source consulted during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    /// Caller-supplied override, named for diagnostics (e.g. a CLI flag or property name).
    Override { name: String },
    /// Process environment variable used as an override.
    EnvVar { var: String },
    /// `.env`-style file.
    EnvFile { path: PathBuf },
    /// Section of a sectioned manifest file.
    Manifest { path: PathBuf, section: String },
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override { name } => write!(f, "override `{name}`"),
            Self::EnvVar { var } => write!(f, "environment variable `{var}`"),
            Self::EnvFile { path } => write!(f, "env file {}", path.display()),
            Self::Manifest { path, section } => {
                write!(f, "manifest {} [{section}]", path.display())
            }
        }
    }
}

/// Why a source did not yield a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Miss {
    /// Override was not provided, or the environment variable is unset.
    Unset,
    /// Override was provided but empty.
    Empty,
    /// The file does not exist.
    FileMissing,
    /// The manifest exists but has no such section.
    SectionMissing,
    /// The file (and section) exist but the key does not.
    KeyMissing { key: String },
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("not set"),
            Self::Empty => f.write_str("empty"),
            Self::FileMissing => f.write_str("file not found"),
            Self::SectionMissing => f.write_str("section not found"),
            Self::KeyMissing { key } => write!(f, "key `{key}` not found"),
        }
    }
}

/// One source consulted without success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub source: Source,
    pub miss: Miss,
}

impl Attempt {
    pub fn new(source: Source, miss: Miss) -> Self {
        Self { source, miss }
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.miss)
    }
}

/// A resolved configuration value tagged with the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedValue {
    /// Logical key that was requested.
    pub key: String,
    pub value: String,
    pub source: Source,
    /// 1-based line within the file, for file-backed sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ResolvedValue {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
