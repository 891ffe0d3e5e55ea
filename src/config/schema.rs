//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the asset
//! server. All types derive Serde traits for deserialization from config
//! files; environment variables are applied on top by the loader.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the asset server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening port.
    pub port: u16,

    /// Filesystem locations of the bundled application assets.
    pub paths: PathsConfig,

    /// Fixed CORS origin applied to every response when set.
    pub cors_allow: Option<String>,

    /// Base URL for the no-script redirect, triggered by the `nojs`
    /// query marker.
    pub noscript_redirect_base: Option<String>,

    /// Glob patterns or literal paths for override assets.
    pub asset_patterns: Vec<String>,

    /// Additional stylesheet files appended to the base stylesheet,
    /// in order.
    pub custom_css: Vec<PathBuf>,

    /// Rate limiting for single-file override routes.
    pub rate_limit: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            paths: PathsConfig::default(),
            cors_allow: None,
            noscript_redirect_base: None,
            asset_patterns: Vec::new(),
            custom_css: Vec::new(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Locations of the application's bundled assets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// HTML shell returned for `/` and as the SPA fallback.
    pub shell: PathBuf,

    /// Compiled client bundle, produced by the external bundler.
    pub bundle: PathBuf,

    /// Base stylesheet, always first in composition order.
    pub base_css: PathBuf,

    /// Default static asset root, consulted after override rules.
    pub static_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("client/index.html"),
            bundle: PathBuf::from("client/app.js"),
            base_css: PathBuf::from("www/style.css"),
            static_root: PathBuf::from("www"),
        }
    }
}

/// Rate limiting configuration for single-file override routes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window duration in seconds.
    pub window_secs: u64,

    /// Maximum requests per window per client IP.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            // 100 requests per 15 minutes
            window_secs: 15 * 60,
            max_requests: 100,
        }
    }
}
