//! Override asset registry.
//!
//! # Responsibilities
//! - Expand configured glob patterns into concrete filesystem matches
//! - Classify each match as a single file or a directory mount
//! - Fail fast on unreadable entries so the route table is never partial
//!
//! # Design Decisions
//! - Built once, before the listening socket is bound; immutable for
//!   process lifetime
//! - A pattern matching nothing yields zero rules and is not an error
//! - A literal path that exists is just a pattern with one match
//! - Duplicate public names are allowed here; the router decides which
//!   registration wins

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// How an override rule is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Exact route, gated by the rate limiter.
    File,
    /// Static subtree mount, not rate-limited.
    Directory,
}

/// A single override mapping from public name to filesystem location.
#[derive(Debug, Clone)]
pub struct AssetRule {
    /// First request path segment this rule answers for; derived from the
    /// base name of the matched path.
    pub public_name: String,

    /// Backing filesystem entry.
    pub source_path: PathBuf,

    pub kind: RuleKind,
}

/// Error type for registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid override pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to read a match for override pattern {pattern:?}: {source}")]
    Expand {
        pattern: String,
        source: glob::GlobError,
    },

    #[error("failed to inspect override entry {path:?}: {source}")]
    Inspect {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("override entry {path:?} has no usable file name")]
    NoName { path: PathBuf },

    #[error("override entry {path:?} has a name that cannot be routed: {name:?}")]
    UnroutableName { path: PathBuf, name: String },
}

/// Expand override patterns into concrete asset rules, in pattern order.
pub fn register(patterns: &[String]) -> Result<Vec<AssetRule>, RegistryError> {
    let mut rules = Vec::new();

    for pattern in patterns {
        let matches = glob::glob(pattern).map_err(|source| RegistryError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        for entry in matches {
            let path = entry.map_err(|source| RegistryError::Expand {
                pattern: pattern.clone(),
                source,
            })?;

            let metadata = fs::metadata(&path).map_err(|source| RegistryError::Inspect {
                path: path.clone(),
                source,
            })?;

            let public_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
                .ok_or_else(|| RegistryError::NoName { path: path.clone() })?;

            // Braces are route-parameter syntax; registering such a name
            // would panic deep inside the router instead of aborting
            // startup with a descriptive error.
            if public_name.contains(['{', '}']) {
                return Err(RegistryError::UnroutableName {
                    path: path.clone(),
                    name: public_name,
                });
            }

            let kind = if metadata.is_dir() {
                RuleKind::Directory
            } else {
                RuleKind::File
            };

            tracing::debug!(
                name = %public_name,
                path = %path.display(),
                kind = ?kind,
                "Registered override asset"
            );

            rules.push(AssetRule {
                public_name,
                source_path: path,
                kind,
            });
        }
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn classifies_files_and_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("logo.png"), b"png").unwrap();
        fs::create_dir(dir.path().join("fonts")).unwrap();
        fs::write(dir.path().join("fonts/a.woff"), b"woff").unwrap();

        let pattern = format!("{}/*", dir.path().display());
        let mut rules = register(&[pattern]).unwrap();
        rules.sort_by(|a, b| a.public_name.cmp(&b.public_name));

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].public_name, "fonts");
        assert_eq!(rules[0].kind, RuleKind::Directory);
        assert_eq!(rules[1].public_name, "logo.png");
        assert_eq!(rules[1].kind, RuleKind::File);
    }

    #[test]
    fn literal_path_yields_one_rule() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favicon.ico");
        fs::write(&path, b"ico").unwrap();

        let rules = register(&[path.display().to_string()]).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].public_name, "favicon.ico");
        assert_eq!(rules[0].kind, RuleKind::File);
        assert_eq!(rules[0].source_path, path);
    }

    #[test]
    fn unmatched_pattern_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/no-such-*", dir.path().display());
        let rules = register(&[pattern]).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn invalid_pattern_is_fatal() {
        let err = register(&["[".to_string()]).unwrap_err();
        assert!(matches!(err, RegistryError::Pattern { .. }));
    }

    #[test]
    fn braces_in_names_are_rejected_at_startup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo{v2}.png");
        fs::write(&path, b"png").unwrap();

        let err = register(&[path.display().to_string()]).unwrap_err();
        match err {
            RegistryError::UnroutableName { name, .. } => {
                assert_eq!(name, "logo{v2}.png")
            }
            other => panic!("expected UnroutableName, got {other:?}"),
        }
    }

    #[test]
    fn pattern_order_is_preserved() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(dir.path().join("b.txt"), b"b").unwrap();

        let rules = register(&[
            format!("{}/b.txt", dir.path().display()),
            format!("{}/a.txt", dir.path().display()),
        ])
        .unwrap();

        assert_eq!(rules[0].public_name, "b.txt");
        assert_eq!(rules[1].public_name, "a.txt");
    }
}
