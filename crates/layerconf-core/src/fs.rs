//! Reading configuration files that may or may not exist.

use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Maximum accepted file size in bytes (10MB).
///
/// `.env` files and manifests are hand-authored and tiny; anything larger is
/// rejected rather than read into memory.
pub const MAX_FILE_SIZE: u64 = 10_000_000;

/// Reads `path` to a string, returning `Ok(None)` when the file does not exist.
///
/// A file that exists but cannot be read, is not valid UTF-8 or exceeds
/// [`MAX_FILE_SIZE`] is an error.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("File not found: {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    let size = metadata.len();
    if size > MAX_FILE_SIZE {
        tracing::error!(
            "File exceeds maximum size: {} ({} bytes, limit: {} bytes)",
            path.display(),
            size,
            MAX_FILE_SIZE
        );
        return Err(Error::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_FILE_SIZE,
        });
    }

    match std::fs::read_to_string(path) {
        Ok(content) => {
            tracing::trace!("Read {} ({} bytes)", path.display(), content.len());
            Ok(Some(content))
        }
        // Removed between the metadata call and the read
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
