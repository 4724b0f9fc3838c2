//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init metrics → Bind listener → Serve
//!
//! Shutdown:
//!     SIGTERM/SIGINT (signals.rs)
//!     → Shutdown coordinator (shutdown.rs)
//!     → server stops accepting, drains in-flight requests, exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
