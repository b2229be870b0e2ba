//! `.env` file support for layerconf.
//!
//! Parses `KEY=VALUE` lines into an ordered [`DotEnvFile`]. Parsing never
//! fails: blank lines, `#` comments and lines without `=` are skipped.

pub mod parser;
pub mod types;

pub use parser::parse_dotenv;
pub use types::DotEnvFile;
