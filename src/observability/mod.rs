//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! exchange / dispatch produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the trace span, not through the exchange
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
