//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! forward handler and host:
//!     → logging.rs (structured log events, pretty or JSON)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout / log aggregation
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! Per-request spans come from tower-http's `TraceLayer`, wired in
//! `http::server`.

pub mod logging;
pub mod metrics;
