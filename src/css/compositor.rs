//! Stylesheet composition.

use std::path::PathBuf;

use thiserror::Error;

use crate::css::rtl;

/// Error type for a failed composition.
///
/// A missing or unreadable stylesheet fails the whole composition; partial
/// CSS would produce a misleadingly-styled page.
#[derive(Debug, Error)]
pub enum CssError {
    #[error("failed to read stylesheet {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("composed stylesheet is not valid UTF-8, cannot apply the RTL transform: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Ordered stylesheet sources: the mandatory base file first, then zero or
/// more custom files. Immutable after startup.
#[derive(Debug, Clone)]
pub struct CssCompositor {
    base: PathBuf,
    custom: Vec<PathBuf>,
}

impl CssCompositor {
    pub fn new(base: impl Into<PathBuf>, custom: Vec<PathBuf>) -> Self {
        Self {
            base: base.into(),
            custom,
        }
    }

    /// Concatenate the base and custom stylesheets in configured order,
    /// separated by newlines. Byte-level; no parsing, minification, or
    /// validation, and no encoding requirement.
    ///
    /// Sources are re-read on every call, so edits to custom stylesheets
    /// show up on the next request without a restart.
    pub async fn compose(&self) -> Result<Vec<u8>, CssError> {
        let mut out = Vec::new();
        for (i, path) in std::iter::once(&self.base).chain(self.custom.iter()).enumerate() {
            let contents = tokio::fs::read(path).await.map_err(|source| CssError::Read {
                path: path.clone(),
                source,
            })?;
            if i > 0 {
                out.push(b'\n');
            }
            out.extend_from_slice(&contents);
        }
        Ok(out)
    }

    /// The composed stylesheet with the left/right mirror applied.
    ///
    /// The mirror is a text transform, so this path alone requires the
    /// composed result to be valid UTF-8.
    pub async fn compose_rtl(&self) -> Result<String, CssError> {
        let css = String::from_utf8(self.compose().await?)?;
        Ok(rtl::transform(&css))
    }
}
