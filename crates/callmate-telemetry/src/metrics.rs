//! Metrics collection and reporting
//!
//! [`MetricsCollector`] keeps in-process counters for `/stats` and mirrors
//! every update to the `metrics` facade, which the server exports to
//! Prometheus.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector for assistant activity
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    suggestions: AtomicU64,
    escalations: AtomicU64,
    redactions: AtomicU64,
    failures: AtomicU64,
    summaries: AtomicU64,
    feedback: AtomicU64,
    consents: AtomicU64,
    total_latency_ms: AtomicU64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    /// Record a completed suggestion
    pub fn record_suggestion(&self, escalated: bool, pii_redacted: bool, latency_ms: u64) {
        self.inner.suggestions.fetch_add(1, Ordering::Relaxed);
        self.inner
            .total_latency_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
        ::metrics::counter!("callmate_suggestions_total").increment(1);
        ::metrics::histogram!("callmate_suggest_latency_ms").record(latency_ms as f64);

        if escalated {
            self.inner.escalations.fetch_add(1, Ordering::Relaxed);
            ::metrics::counter!("callmate_escalations_total").increment(1);
        }
        if pii_redacted {
            self.inner.redactions.fetch_add(1, Ordering::Relaxed);
            ::metrics::counter!("callmate_redactions_total").increment(1);
        }
    }

    /// Record a request that failed inside the pipeline or a store
    pub fn record_failure(&self, route: &'static str) {
        self.inner.failures.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!("callmate_failures_total", "route" => route).increment(1);
    }

    pub fn record_summary(&self) {
        self.inner.summaries.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!("callmate_summaries_total").increment(1);
    }

    pub fn record_feedback(&self, helpful: bool) {
        self.inner.feedback.fetch_add(1, Ordering::Relaxed);
        let label = if helpful { "helpful" } else { "not_helpful" };
        ::metrics::counter!("callmate_feedback_total", "verdict" => label).increment(1);
    }

    pub fn record_consent(&self) {
        self.inner.consents.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!("callmate_consents_total").increment(1);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            suggestions: self.inner.suggestions.load(Ordering::Relaxed),
            escalations: self.inner.escalations.load(Ordering::Relaxed),
            redactions: self.inner.redactions.load(Ordering::Relaxed),
            failures: self.inner.failures.load(Ordering::Relaxed),
            summaries: self.inner.summaries.load(Ordering::Relaxed),
            feedback: self.inner.feedback.load(Ordering::Relaxed),
            consents: self.inner.consents.load(Ordering::Relaxed),
            total_latency_ms: self.inner.total_latency_ms.load(Ordering::Relaxed),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub suggestions: u64,
    pub escalations: u64,
    pub redactions: u64,
    pub failures: u64,
    pub summaries: u64,
    pub feedback: u64,
    pub consents: u64,
    pub total_latency_ms: u64,
}

impl MetricsSnapshot {
    /// Average suggestion latency
    pub fn avg_latency_ms(&self) -> u64 {
        if self.suggestions == 0 {
            0
        } else {
            self.total_latency_ms / self.suggestions
        }
    }

    /// Share of suggestions that recommended escalation
    pub fn escalation_rate(&self) -> f64 {
        if self.suggestions == 0 {
            0.0
        } else {
            self.escalations as f64 / self.suggestions as f64
        }
    }
}
