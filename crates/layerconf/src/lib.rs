//! Layered configuration resolution.
//!
//! A value is looked up, in order, in caller-supplied overrides, a `.env`
//! file and a section of a sectioned manifest. The first source that has a
//! value wins; if none does, [`resolve`] returns [`Error::NotFound`] listing
//! every source it tried.
//!
//! ```no_run
//! use layerconf::{ResolutionRequest, resolve};
//!
//! # fn example() -> layerconf::Result<()> {
//! let request = ResolutionRequest::new("common")
//!     .with_override("commonVersion", std::env::args().nth(1))
//!     .with_env_override("COMMON_VERSION")
//!     .with_env_file(".env")
//!     .with_manifest("gradle/rumpus.versions.toml", "versions");
//!
//! let resolved = resolve(&request)?;
//! println!("{} (from {})", resolved.value, resolved.source);
//! # Ok(())
//! # }
//! ```

pub mod request;
pub mod resolver;

// Re-export from layerconf-core
pub use layerconf_core::{
    Attempt, DOTENV_FILE_NAME, Error, FileLocator, Miss, ResolvedValue, Result, Source,
};

// Re-export parsers
pub use layerconf_dotenv::{DotEnvFile, parse_dotenv};
pub use layerconf_manifest::{ManifestDocument, ManifestSection, parse_manifest};

pub use request::{EnvFileSource, ManifestSource, Override, ResolutionRequest};
pub use resolver::{resolve, resolve_optional};
