//! Core abstractions for layerconf.
//!
//! Shared by the format crates and the resolver:
//! - [`Error`] and the [`Result`] alias
//! - [`Source`], [`Attempt`] and [`ResolvedValue`] for provenance
//! - [`Entries`], an insertion-ordered key/value map with line tracking
//! - [`FileLocator`] and [`read_optional`] for optional files on disk

pub mod entries;
pub mod error;
pub mod fs;
pub mod locator;
pub mod source;

pub use entries::{Entries, Entry};
pub use error::{Error, Result};
pub use fs::{MAX_FILE_SIZE, read_optional};
pub use locator::{DOTENV_FILE_NAME, FileLocator};
pub use source::{Attempt, Miss, ResolvedValue, Source};
