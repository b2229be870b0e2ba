//! Error taxonomy for layerconf.
//!
//! Parsers never fail: malformed lines are skipped. The only errors are a
//! resolver that exhausted every source ([`Error::NotFound`]) and a file that
//! exists but cannot be read.

use crate::source::Attempt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Every configured source was consulted without yielding a value.
    #[error("no value for `{key}`: {}", describe_attempts(.attempts))]
    NotFound { key: String, attempts: Vec<Attempt> },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is too large: {size} bytes (max: {limit} bytes)", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn not_found(key: impl Into<String>, attempts: Vec<Attempt>) -> Self {
        Self::NotFound {
            key: key.into(),
            attempts,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The last source consulted before giving up, for `NotFound` errors.
    pub fn last_attempt(&self) -> Option<&Attempt> {
        match self {
            Self::NotFound { attempts, .. } => attempts.last(),
            _ => None,
        }
    }
}

fn describe_attempts(attempts: &[Attempt]) -> String {
    match attempts {
        [] => "no sources configured".to_string(),
        [only] => only.to_string(),
        [.., last] => format!("{last} ({} sources tried)", attempts.len()),
    }
}
