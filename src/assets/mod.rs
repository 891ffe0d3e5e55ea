//! Override asset subsystem.
//!
//! # Data Flow
//! ```text
//! Configured patterns (CUSTOM_ASSETS / asset_patterns)
//!     → registry.rs (glob expansion + file/directory classification)
//!     → Vec<AssetRule> (immutable for process lifetime)
//!     → consumed by the router when the route table is built
//! ```
//!
//! # Design Decisions
//! - Expansion happens entirely at startup; serving never re-reads the
//!   pattern list
//! - A filesystem failure during expansion aborts startup rather than
//!   serving a partial registry

pub mod registry;

pub use registry::{AssetRule, RegistryError, RuleKind};
