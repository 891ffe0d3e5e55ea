//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Request for a single-file override route:
//!     → rate_limit.rs (fixed-window check per client IP)
//!     → Allowed: pass through, attach quota headers to the response
//!     → Denied: 429 with Retry-After, request never reaches the handler
//! ```
//!
//! # Design Decisions
//! - Only single-file override routes are gated; directory mounts and the
//!   default static root are not (behavior carried over from the source
//!   deployment)
//! - Every request counts toward the quota, successful or not

pub mod rate_limit;

pub use rate_limit::{Decision, FixedWindowLimiter};
