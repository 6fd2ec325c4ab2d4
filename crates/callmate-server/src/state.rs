use crate::config::CallmateConfig;
use callmate_classifiers::AssistantPipeline;
use callmate_core::Result;
use callmate_telemetry::{ConsentLog, FeedbackStore, MetricsCollector};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Redaction and suggestion pipeline, owning the context store
    pub pipeline: Arc<AssistantPipeline>,

    pub feedback: Arc<FeedbackStore>,

    pub consent: Arc<ConsentLog>,

    /// In-process counters for `/stats`
    pub metrics: MetricsCollector,

    /// Prometheus renderer; absent when no recorder is installed
    pub prometheus: Option<PrometheusHandle>,

    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(config: &CallmateConfig, prometheus: Option<PrometheusHandle>) -> Result<Self> {
        let pipeline = AssistantPipeline::builder()
            .agents(config.agents.clone())
            .redaction(config.redaction.clone())
            .summary(config.summary.clone())
            .context_config(config.context.clone())
            .build()?;

        Self::with_pipeline(pipeline, config, prometheus)
    }

    /// Build state around an already-configured pipeline
    pub fn with_pipeline(
        pipeline: AssistantPipeline,
        config: &CallmateConfig,
        prometheus: Option<PrometheusHandle>,
    ) -> Result<Self> {
        Ok(Self {
            pipeline: Arc::new(pipeline),
            feedback: Arc::new(FeedbackStore::open(config.storage.feedback_path())?),
            consent: Arc::new(ConsentLog::open(config.storage.consent_path())?),
            metrics: MetricsCollector::new(),
            prometheus,
            request_timeout: config.server.request_timeout(),
        })
    }
}
