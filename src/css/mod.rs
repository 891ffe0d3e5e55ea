//! Stylesheet composition subsystem.
//!
//! # Data Flow
//! ```text
//! GET /style.css
//!     → compositor.rs (re-read base + custom files, join with \n)
//!     → response bytes
//!
//! GET /style-rtl.css
//!     → compositor.rs (same concatenation)
//!     → rtl.rs (left/right mirror)
//!     → response bytes
//! ```
//!
//! # Design Decisions
//! - No caching: every request re-reads the sources so stylesheet edits
//!   show up without a restart
//! - A missing or unreadable source fails the whole request; partial CSS
//!   is never served

pub mod compositor;
pub mod rtl;

pub use compositor::{CssCompositor, CssError};
