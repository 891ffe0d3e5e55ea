//! Request-shaping middleware stages.
//!
//! Ordered pipeline in front of the resolver: CORS header injection, then
//! the no-script redirect, then per-route rate limiting (which lives in
//! the security subsystem). Each stage either short-circuits with a
//! response or passes the request through.

pub mod cors;
pub mod noscript;
