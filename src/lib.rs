//! SPA asset server library.

pub mod assets;
pub mod config;
pub mod css;
pub mod http;
pub mod security;

pub use config::ServerConfig;
pub use http::HttpServer;
