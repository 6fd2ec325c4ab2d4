//! Sensitive-term compliance agent
//!
//! Runs on redacted text and still flags sensitive terms, so a masked card
//! number (`[CARD]`) or a spoken "cvv" is flagged even when the digits are gone.

use crate::classifier::{ClassificationResult, Classifier, ClassifierKind};
use crate::config::AgentConfig;
use crate::patterns::KeywordMatcher;
use crate::scorer::ConfidenceScorer;
use callmate_core::{Compliance, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub struct ComplianceAgent {
    name: String,
    sensitive: KeywordMatcher,
    latency: Duration,
    scorer: Arc<dyn ConfidenceScorer>,
}

impl ComplianceAgent {
    pub fn new(config: &AgentConfig, scorer: Arc<dyn ConfidenceScorer>) -> Result<Self> {
        Ok(Self {
            name: "compliance".to_string(),
            sensitive: KeywordMatcher::new(config.sensitive_terms.iter().cloned())?,
            latency: config.compliance_latency(),
            scorer,
        })
    }

    pub fn compliance(&self, text: &str) -> Compliance {
        let hits = self.sensitive.matched(text);
        if hits.is_empty() {
            Compliance::Clean
        } else {
            tracing::debug!(terms = ?hits, "sensitive terms present");
            Compliance::Flagged
        }
    }
}

#[async_trait::async_trait]
impl Classifier for ComplianceAgent {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let start = Instant::now();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let compliance = self.compliance(text);
        let confidence = self.scorer.score(ClassifierKind::Compliance, text);

        Ok(
            ClassificationResult::new(ClassifierKind::Compliance, compliance.as_str(), confidence)
                .with_latency_us(start.elapsed().as_micros() as u64),
        )
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ClassifierKind {
        ClassifierKind::Compliance
    }
}
