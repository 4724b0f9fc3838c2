//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! proxy handler produces:
//!     → tracing events (structured fields, request ID)
//!     → metrics.rs (request counter, latency histogram)
//!
//! Consumers:
//!     → Log output (stdout, filtered via EnvFilter)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a request
//! - Metric updates are cheap (atomic increments)
//! - The exporter is optional and bound on its own address

pub mod metrics;
