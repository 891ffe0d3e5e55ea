//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that configured asset locations actually exist
//! - Check the redirect base is a real URL and the CORS origin is a
//!   legal header value
//! - Reject degenerate rate-limit settings
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before the listening socket is bound (fail fast)
//! - Custom stylesheets are deliberately NOT checked here: they are
//!   re-read on every request, so their failure mode is per-request

use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::ServerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{role} not found at {path:?}")]
    MissingFile { role: &'static str, path: PathBuf },

    #[error("static root {path:?} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("noscript redirect base {value:?} is not a valid URL: {reason}")]
    InvalidRedirectBase { value: String, reason: String },

    #[error("CORS origin {value:?} is not a valid header value")]
    InvalidCorsOrigin { value: String },

    #[error("rate limit window and max requests must both be non-zero")]
    DegenerateRateLimit,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_file(&mut errors, "shell template", &config.paths.shell);
    check_file(&mut errors, "base stylesheet", &config.paths.base_css);

    if !config.paths.static_root.is_dir() {
        errors.push(ValidationError::NotADirectory {
            path: config.paths.static_root.clone(),
        });
    }

    if let Some(base) = &config.noscript_redirect_base {
        if let Err(e) = Url::parse(base) {
            errors.push(ValidationError::InvalidRedirectBase {
                value: base.clone(),
                reason: e.to_string(),
            });
        }
    }

    if let Some(origin) = &config.cors_allow {
        if HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::InvalidCorsOrigin {
                value: origin.clone(),
            });
        }
    }

    if config.rate_limit.window_secs == 0 || config.rate_limit.max_requests == 0 {
        errors.push(ValidationError::DegenerateRateLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_file(errors: &mut Vec<ValidationError>, role: &'static str, path: &std::path::Path) {
    if !path.is_file() {
        errors.push(ValidationError::MissingFile {
            role,
            path: path.to_path_buf(),
        });
    }
}
