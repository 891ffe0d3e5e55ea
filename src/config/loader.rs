//! Configuration loading from disk and environment.

use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {name}: {value:?}")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
///
/// With no file and no environment the defaults stand; validation still
/// runs so a broken deployment never reaches the listener.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let mut config = match path {
        Some(p) => toml::from_str(&std::fs::read_to_string(p)?)?,
        None => ServerConfig::default(),
    };

    apply_env(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Environment variables recognized on top of the config file.
///
/// `CUSTOM_ASSETS` and `CUSTOM_CSS` are whitespace-separated lists; empty
/// entries are dropped.
fn apply_env(config: &mut ServerConfig) -> Result<(), ConfigError> {
    if let Ok(port) = env::var("PORT") {
        config.port = port.parse().map_err(|_| ConfigError::Env {
            name: "PORT",
            value: port.clone(),
        })?;
    }
    if let Ok(origin) = env::var("CORS_ALLOW") {
        config.cors_allow = Some(origin);
    }
    if let Ok(base) = env::var("NOSCRIPT_REDIR_BASE") {
        config.noscript_redirect_base = Some(base);
    }
    if let Ok(patterns) = env::var("CUSTOM_ASSETS") {
        config.asset_patterns = split_list(&patterns);
    }
    if let Ok(css) = env::var("CUSTOM_CSS") {
        config.custom_css = split_list(&css).into_iter().map(PathBuf::from).collect();
    }
    Ok(())
}

/// Split a whitespace-separated list, dropping empty entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_empty_entries() {
        assert_eq!(
            split_list("  a.css   b.css \t c.css "),
            vec!["a.css", "b.css", "c.css"]
        );
        assert!(split_list("").is_empty());
        assert!(split_list("   ").is_empty());
    }

    #[test]
    fn toml_round_trip_with_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            port = 8080
            cors_allow = "https://app.example.com"
            asset_patterns = ["custom/*"]

            [rate_limit]
            max_requests = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_allow.as_deref(), Some("https://app.example.com"));
        assert_eq!(config.asset_patterns, vec!["custom/*"]);
        assert_eq!(config.rate_limit.max_requests, 10);
        // Unspecified fields keep their defaults.
        assert_eq!(config.rate_limit.window_secs, 900);
        assert_eq!(config.paths.static_root, PathBuf::from("www"));
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, 5000);
        assert!(config.asset_patterns.is_empty());
        assert!(config.custom_css.is_empty());
        assert!(config.cors_allow.is_none());
    }
}
