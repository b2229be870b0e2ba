//! Override -> env file -> manifest resolution.
//!
//! Each call reads the files afresh; nothing is cached between calls, so a
//! file edited between two resolutions is always seen.

use crate::request::{EnvFileSource, ManifestSource, Override, ResolutionRequest};
use layerconf_core::{Attempt, Error, Miss, ResolvedValue, Result, Source};
use layerconf_dotenv::DotEnvFile;
use layerconf_manifest::ManifestDocument;

enum Lookup {
    Found { value: String, line: Option<usize> },
    Missed(Miss),
}

/// Resolves `request.key`, consulting each source only if the previous ones
/// yielded nothing.
///
/// Fails with [`Error::NotFound`] when every source misses. Its attempts list
/// names each source tried and why it missed; the message names the last
/// one. A file that exists but cannot be read fails with [`Error::Io`].
pub fn resolve(request: &ResolutionRequest) -> Result<ResolvedValue> {
    let mut attempts = Vec::new();

    for ov in &request.overrides {
        let source = ov.source();
        match lookup_override(ov) {
            Lookup::Found { value, line } => return Ok(found(request, value, source, line)),
            Lookup::Missed(miss) => record(&mut attempts, source, miss),
        }
    }

    if let Some(env_file) = &request.env_file {
        let source = Source::EnvFile {
            path: env_file.path.clone(),
        };
        match lookup_env_file(env_file, request.env_key())? {
            Lookup::Found { value, line } => return Ok(found(request, value, source, line)),
            Lookup::Missed(miss) => record(&mut attempts, source, miss),
        }
    }

    if let Some(manifest) = &request.manifest {
        let source = Source::Manifest {
            path: manifest.path.clone(),
            section: manifest.section.clone(),
        };
        match lookup_manifest(manifest, request.manifest_key())? {
            Lookup::Found { value, line } => return Ok(found(request, value, source, line)),
            Lookup::Missed(miss) => record(&mut attempts, source, miss),
        }
    }

    tracing::debug!(
        "No value for {} after {} sources",
        request.key,
        attempts.len()
    );
    Err(Error::not_found(&request.key, attempts))
}

/// Like [`resolve`], but a value that is found nowhere is `Ok(None)`.
///
/// For optional settings such as credentials that may legitimately be absent.
pub fn resolve_optional(request: &ResolutionRequest) -> Result<Option<ResolvedValue>> {
    match resolve(request) {
        Ok(resolved) => Ok(Some(resolved)),
        Err(Error::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

fn found(
    request: &ResolutionRequest,
    value: String,
    source: Source,
    line: Option<usize>,
) -> ResolvedValue {
    tracing::debug!("Resolved {} from {}", request.key, source);
    ResolvedValue {
        key: request.key.clone(),
        value,
        source,
        line,
    }
}

fn record(attempts: &mut Vec<Attempt>, source: Source, miss: Miss) {
    tracing::trace!("{}: {}", source, miss);
    attempts.push(Attempt::new(source, miss));
}

fn lookup_override(ov: &Override) -> Lookup {
    let value = match ov {
        Override::Value { value, .. } => value.clone(),
        Override::EnvVar { var } => match std::env::var(var) {
            Ok(v) => Some(v),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::debug!("Ignoring non-UTF-8 environment variable {}", var);
                None
            }
        },
    };

    match value {
        Some(v) if !v.is_empty() => Lookup::Found {
            value: v,
            line: None,
        },
        Some(_) => Lookup::Missed(Miss::Empty),
        None => Lookup::Missed(Miss::Unset),
    }
}

fn lookup_env_file(source: &EnvFileSource, key: &str) -> Result<Lookup> {
    let Some(env) = DotEnvFile::load(&source.path)? else {
        return Ok(Lookup::Missed(Miss::FileMissing));
    };

    Ok(match env.entry(key) {
        Some(entry) => Lookup::Found {
            value: entry.value.clone(),
            line: Some(entry.line),
        },
        None => Lookup::Missed(Miss::KeyMissing {
            key: key.to_string(),
        }),
    })
}

fn lookup_manifest(source: &ManifestSource, key: &str) -> Result<Lookup> {
    let Some(doc) = ManifestDocument::load(&source.path)? else {
        return Ok(Lookup::Missed(Miss::FileMissing));
    };

    let Some(section) = doc.section(&source.section) else {
        return Ok(Lookup::Missed(Miss::SectionMissing));
    };

    Ok(match section.entry(key) {
        Some(entry) => Lookup::Found {
            value: entry.value.clone(),
            line: Some(entry.line),
        },
        None => Lookup::Missed(Miss::KeyMissing {
            key: key.to_string(),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    struct Fixture {
        _dir: tempfile::TempDir,
        env_path: PathBuf,
        manifest_path: PathBuf,
    }

    impl Fixture {
        fn new(env: Option<&str>, manifest: Option<&str>) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let env_path = dir.path().join(".env");
            let manifest_path = dir.path().join("versions.toml");
            if let Some(content) = env {
                std::fs::write(&env_path, content).unwrap();
            }
            if let Some(content) = manifest {
                std::fs::write(&manifest_path, content).unwrap();
            }
            Self {
                _dir: dir,
                env_path,
                manifest_path,
            }
        }

        fn request(&self, override_value: Option<&str>) -> ResolutionRequest {
            ResolutionRequest::new("common")
                .with_override("commonVersion", override_value)
                .with_env_file(&self.env_path)
                .with_manifest(&self.manifest_path, "versions")
        }
    }

    fn manifest_source(path: &Path) -> Source {
        Source::Manifest {
            path: path.to_path_buf(),
            section: "versions".into(),
        }
    }

    #[test]
    fn test_override_wins() {
        let fx = Fixture::new(Some("common=EV"), Some("[versions]\ncommon = \"MV\""));
        let resolved = resolve(&fx.request(Some("OV"))).unwrap();
        assert_eq!(resolved.value, "OV");
        assert_eq!(
            resolved.source,
            Source::Override {
                name: "commonVersion".into()
            }
        );
        assert_eq!(resolved.line, None);
    }

    #[test]
    fn test_env_file_when_no_override() {
        let fx = Fixture::new(Some("# creds\ncommon=EV"), Some("[versions]\ncommon = \"MV\""));
        let resolved = resolve(&fx.request(None)).unwrap();
        assert_eq!(resolved.value, "EV");
        assert_eq!(
            resolved.source,
            Source::EnvFile {
                path: fx.env_path.clone()
            }
        );
        assert_eq!(resolved.line, Some(2));
    }

    #[test]
    fn test_manifest_when_env_file_lacks_key() {
        let fx = Fixture::new(Some("OTHER=1"), Some("[versions]\ncommon = \"MV\""));
        let resolved = resolve(&fx.request(None)).unwrap();
        assert_eq!(resolved.value, "MV");
        assert_eq!(resolved.source, manifest_source(&fx.manifest_path));
        assert_eq!(resolved.line, Some(2));
    }

    #[test]
    fn test_manifest_when_env_file_missing() {
        let fx = Fixture::new(None, Some("[versions]\ncommon = \"MV\""));
        let resolved = resolve(&fx.request(None)).unwrap();
        assert_eq!(resolved.value, "MV");
    }

    #[test]
    fn test_empty_override_is_skipped() {
        let fx = Fixture::new(Some("common=EV"), None);
        let resolved = resolve(&fx.request(Some(""))).unwrap();
        assert_eq!(resolved.value, "EV");
    }

    #[test]
    fn test_not_found_when_all_sources_empty() {
        let fx = Fixture::new(Some("OTHER=1"), Some("[versions]\nguava = \"33\""));
        let err = resolve(&fx.request(None)).unwrap_err();

        let Error::NotFound { key, attempts } = &err else {
            panic!("expected NotFound, got {err:?}");
        };
        assert_eq!(key, "common");
        assert_eq!(attempts.len(), 3);
        assert_eq!(attempts[0].miss, Miss::Unset);
        assert_eq!(
            attempts[1].miss,
            Miss::KeyMissing {
                key: "common".into()
            }
        );
        assert_eq!(attempts[2].source, manifest_source(&fx.manifest_path));
        assert_eq!(
            attempts[2].miss,
            Miss::KeyMissing {
                key: "common".into()
            }
        );
    }

    #[test]
    fn test_not_found_distinguishes_missing_manifest() {
        let fx = Fixture::new(None, None);
        let err = resolve(&fx.request(None)).unwrap_err();
        assert_eq!(err.last_attempt().unwrap().miss, Miss::FileMissing);
        assert!(err.to_string().ends_with("file not found (3 sources tried)"));
    }

    #[test]
    fn test_not_found_distinguishes_missing_section() {
        let fx = Fixture::new(None, Some("[libraries]\ncommon = \"x\""));
        let err = resolve(&fx.request(None)).unwrap_err();
        assert_eq!(err.last_attempt().unwrap().miss, Miss::SectionMissing);
    }

    #[test]
    fn test_no_sources_is_not_found() {
        let err = resolve(&ResolutionRequest::new("anything")).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.last_attempt().is_none());
    }

    #[test]
    fn test_overrides_consulted_in_order() {
        let request = ResolutionRequest::new("k")
            .with_override("first", None::<String>)
            .with_override("second", Some("2"))
            .with_override("third", Some("3"));
        let resolved = resolve(&request).unwrap();
        assert_eq!(resolved.value, "2");
        assert_eq!(resolved.source, Source::Override { name: "second".into() });
    }

    #[test]
    fn test_env_var_override() {
        let Ok(path) = std::env::var("PATH") else {
            return;
        };
        let request = ResolutionRequest::new("path").with_env_override("PATH");
        let resolved = resolve(&request).unwrap();
        assert_eq!(resolved.value, path);
        assert_eq!(resolved.source, Source::EnvVar { var: "PATH".into() });
    }

    #[test]
    fn test_unset_env_var_override_falls_through() {
        let fx = Fixture::new(Some("common=EV"), None);
        let request = ResolutionRequest::new("common")
            .with_env_override("LAYERCONF_TEST_UNSET_VARIABLE_7F3A")
            .with_env_file(&fx.env_path);
        assert_eq!(resolve(&request).unwrap().value, "EV");
    }

    #[test]
    fn test_per_source_key_names() {
        let fx = Fixture::new(
            Some("COMMON_VERSION=from-env"),
            Some("[versions]\ncommon = \"from-manifest\""),
        );
        let request = ResolutionRequest::new("common").with_env_file_source(
            crate::request::EnvFileSource::new(&fx.env_path).with_key("COMMON_VERSION"),
        );
        assert_eq!(resolve(&request).unwrap().value, "from-env");

        let request = ResolutionRequest::new("commonVersion").with_manifest_source(
            crate::request::ManifestSource::new(&fx.manifest_path, "versions").with_key("common"),
        );
        let resolved = resolve(&request).unwrap();
        assert_eq!(resolved.key, "commonVersion");
        assert_eq!(resolved.value, "from-manifest");
    }

    #[test]
    fn test_idempotent() {
        let fx = Fixture::new(Some("common=EV"), Some("[versions]\ncommon = \"MV\""));
        let request = fx.request(None);
        assert_eq!(resolve(&request).unwrap(), resolve(&request).unwrap());
    }

    #[test]
    fn test_file_changes_are_seen() {
        let fx = Fixture::new(Some("common=EV1"), None);
        let request = fx.request(None);
        assert_eq!(resolve(&request).unwrap().value, "EV1");

        std::fs::write(&fx.env_path, "common=EV2").unwrap();
        assert_eq!(resolve(&request).unwrap().value, "EV2");
    }

    #[test]
    fn test_unreadable_env_file_is_io_error() {
        let fx = Fixture::new(None, Some("[versions]\ncommon = \"MV\""));
        std::fs::write(&fx.env_path, b"\xff\xfe").unwrap();
        let err = resolve(&fx.request(None)).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_resolve_optional() {
        let fx = Fixture::new(None, None);
        assert!(resolve_optional(&fx.request(None)).unwrap().is_none());
        assert_eq!(
            resolve_optional(&fx.request(Some("OV")))
                .unwrap()
                .unwrap()
                .value,
            "OV"
        );
    }
}
