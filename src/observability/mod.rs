//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and background tasks produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and histograms via the metrics facade)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Prometheus scrape endpoint (when enabled)
//! ```
//!
//! Request ids assigned in `http::request` are attached to log lines that
//! concern a single request.

pub mod logging;
pub mod metrics;
