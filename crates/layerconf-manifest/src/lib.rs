//! Sectioned manifest support for layerconf.
//!
//! Parses flat, hand-authored TOML-like documents such as
//! `gradle/libs.versions.toml`:
//!
//! ```text
//! [versions]
//! common = "1.2.3"
//!
//! [plugins]
//! publish = 'com.example.publish'
//! ```
//!
//! Only `[section]` headers and one `key = value` assignment per line are
//! understood. Nested tables, arrays and multi-line strings are not
//! supported; such lines are skipped.

pub mod parser;
pub mod types;

pub use parser::parse_manifest;
pub use types::{ManifestDocument, ManifestSection};
