//! Locating a named file in a primary directory with a fallback directory.

use std::path::{Path, PathBuf};

/// Conventional name of the env file searched by [`FileLocator::locate_dotenv`].
pub const DOTENV_FILE_NAME: &str = ".env";

/// Searches `{primary}/{name}` first, then `{fallback}/{name}`.
///
/// The fallback defaults to the parent of the primary directory, so a
/// project directory picks up a file placed one level above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocator {
    primary: PathBuf,
    fallback: Option<PathBuf>,
}

impl FileLocator {
    pub fn new(primary: impl Into<PathBuf>) -> Self {
        let primary = primary.into();
        // `Path::new(".").parent()` is the empty path, so relative
        // directories are made absolute before taking the parent.
        let fallback = std::path::absolute(&primary)
            .ok()
            .and_then(|abs| abs.parent().map(Path::to_path_buf));
        Self { primary, fallback }
    }

    /// Replaces the default (parent) fallback directory.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<PathBuf>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Disables the fallback directory.
    #[must_use]
    pub fn without_fallback(mut self) -> Self {
        self.fallback = None;
        self
    }

    pub fn primary(&self) -> &Path {
        &self.primary
    }

    pub fn fallback(&self) -> Option<&Path> {
        self.fallback.as_deref()
    }

    /// Candidate paths in search order.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        std::iter::once(self.primary.as_path())
            .chain(self.fallback.as_deref())
            .map(|dir| dir.join(name))
            .collect()
    }

    /// Returns the first candidate that exists as a regular file.
    ///
    /// `None` means the file is absent from both directories; callers decide
    /// whether that is fatal.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        for candidate in self.candidates(name) {
            if candidate.is_file() {
                tracing::debug!("Located {} at {}", name, candidate.display());
                return Some(candidate);
            }
            tracing::trace!("{} not found at {}", name, candidate.display());
        }

        tracing::debug!(
            "{} not found in {} or its fallback",
            name,
            self.primary.display()
        );
        None
    }

    pub fn locate_dotenv(&self) -> Option<PathBuf> {
        self.locate(DOTENV_FILE_NAME)
    }
}
