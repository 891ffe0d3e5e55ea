//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file (optional, via --config)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: PORT, CORS_ALLOW,
//!       NOSCRIPT_REDIR_BASE, CUSTOM_ASSETS, CUSTOM_CSS)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc into the router state
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so the server runs with no config at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::PathsConfig;
pub use schema::RateLimitConfig;
pub use schema::ServerConfig;
