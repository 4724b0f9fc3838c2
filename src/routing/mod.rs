//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query)
//!     → rewrite.rs (classify against the public prefix)
//!     → Return: Preflight | Forward(target) | Fallback
//!
//! Forward target (pure computation):
//!     origin + (path with the public prefix stripped) + original query
//! ```
//!
//! # Design Decisions
//! - Classification is a pure function of (method, URI, upstream settings);
//!   no request ever mutates shared state
//! - Prefix matching only, no regex
//! - Preflight is checked before the prefix, so OPTIONS short-circuits on
//!   every path
//! - Non-matching paths are a defined fallback, not an error

pub mod rewrite;

pub use rewrite::{classify, RouteDecision, Upstream};
