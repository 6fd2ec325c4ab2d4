//! CallMate Telemetry
//!
//! Persistence and monitoring around the suggestion pipeline.
//!
//! Provides:
//! - An append-only JSON-lines feedback store
//! - A hash-chained consent log for tamper detection
//! - Request metrics, mirrored to the `metrics` facade for Prometheus

pub mod consent;
pub mod feedback;
pub mod metrics;

mod jsonl;

pub use consent::ConsentLog;
pub use feedback::{FeedbackCounts, FeedbackStore};
pub use metrics::{MetricsCollector, MetricsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::consent::ConsentLog;
    pub use crate::feedback::{FeedbackCounts, FeedbackStore};
    pub use crate::metrics::MetricsCollector;
}
