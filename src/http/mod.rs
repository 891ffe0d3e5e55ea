//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware pipeline)
//!     → middleware/ (CORS header, no-script redirect)
//!     → resolution tiers (dynamic routes → overrides → static root → shell)
//!     → response.rs (file bytes + content type)
//!     → Send to client
//! ```

pub mod middleware;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer, StartupError};
