//! Resolution requests: the key to resolve and the sources to consult.

use layerconf_core::{DOTENV_FILE_NAME, FileLocator, Source};
use std::path::PathBuf;

/// A caller-supplied value that takes precedence over file-derived values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    /// Explicit value, e.g. a build property or CLI flag. `None` means "not given".
    Value { name: String, value: Option<String> },
    /// Process environment variable, read when the request is resolved.
    EnvVar { var: String },
}

impl Override {
    pub fn value(name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self::Value {
            name: name.into(),
            value: value.map(Into::into),
        }
    }

    pub fn env(var: impl Into<String>) -> Self {
        Self::EnvVar { var: var.into() }
    }

    pub fn source(&self) -> Source {
        match self {
            Self::Value { name, .. } => Source::Override { name: name.clone() },
            Self::EnvVar { var } => Source::EnvVar { var: var.clone() },
        }
    }
}

/// A `.env` file to consult, optionally under a key other than the logical one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFileSource {
    pub path: PathBuf,
    pub key: Option<String>,
}

impl EnvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: None,
        }
    }

    /// Searches for `.env` with `locator`.
    ///
    /// When no file is found the source points at the primary candidate, so
    /// resolution reports it as missing there.
    pub fn located(locator: &FileLocator) -> Self {
        let path = locator
            .locate_dotenv()
            .unwrap_or_else(|| locator.primary().join(DOTENV_FILE_NAME));
        Self::new(path)
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// A section of a manifest file to consult, optionally under a different key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSource {
    pub path: PathBuf,
    pub section: String,
    pub key: Option<String>,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>, section: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            section: section.into(),
            key: None,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// What to resolve and where to look.
///
/// Sources are always consulted in this order: each override in insertion
/// order, then the env file, then the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub key: String,
    pub overrides: Vec<Override>,
    pub env_file: Option<EnvFileSource>,
    pub manifest: Option<ManifestSource>,
}

impl ResolutionRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            overrides: Vec::new(),
            env_file: None,
            manifest: None,
        }
    }

    #[must_use]
    pub fn with_override(
        mut self,
        name: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> Self {
        self.overrides.push(Override::value(name, value));
        self
    }

    #[must_use]
    pub fn with_env_override(mut self, var: impl Into<String>) -> Self {
        self.overrides.push(Override::env(var));
        self
    }

    #[must_use]
    pub fn with_env_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_env_file_source(EnvFileSource::new(path))
    }

    /// Uses the `.env` found by `locator` (primary directory, then fallback).
    #[must_use]
    pub fn with_located_env_file(self, locator: &FileLocator) -> Self {
        self.with_env_file_source(EnvFileSource::located(locator))
    }

    #[must_use]
    pub fn with_env_file_source(mut self, source: EnvFileSource) -> Self {
        self.env_file = Some(source);
        self
    }

    #[must_use]
    pub fn with_manifest(self, path: impl Into<PathBuf>, section: impl Into<String>) -> Self {
        self.with_manifest_source(ManifestSource::new(path, section))
    }

    #[must_use]
    pub fn with_manifest_source(mut self, source: ManifestSource) -> Self {
        self.manifest = Some(source);
        self
    }

    /// Key to look up in the env file.
    pub fn env_key(&self) -> &str {
        self.env_file
            .as_ref()
            .and_then(|s| s.key.as_deref())
            .unwrap_or(&self.key)
    }

    /// Key to look up in the manifest section.
    pub fn manifest_key(&self) -> &str {
        self.manifest
            .as_ref()
            .and_then(|s| s.key.as_deref())
            .unwrap_or(&self.key)
    }
}
