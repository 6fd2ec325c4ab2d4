//! Suggestion pipeline
//!
//! Per utterance: redact, append to the context window, fan the redacted
//! text out to the sentiment, knowledge and compliance classifiers, join,
//! and derive the escalation. Per conversation: recap the context window and
//! roll its signals up into one decision.
//!
//! A classifier error fails the whole request. No decision is ever built
//! from a subset of the three classifiers.

use crate::classifier::{ClassificationResult, Classifier, ClassifierKind};
use crate::compliance::ComplianceAgent;
use crate::config::{AgentConfig, ContextConfig, RedactionConfig, SummaryConfig};
use crate::context::ContextStore;
use crate::knowledge::KnowledgeAgent;
use crate::patterns::KeywordMatcher;
use crate::pii::PiiRedactor;
use crate::scorer::{ConfidenceScorer, RandomScorer};
use crate::sentiment::SentimentAgent;
use crate::summarizer::Summarizer;
use callmate_core::{Compliance, Error, Escalation, Result, Sentiment};
use serde::Serialize;
use std::sync::Arc;
use tokio::time::Instant;

/// Per-classifier confidences reported with a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Confidences {
    pub sentiment: f32,
    pub knowledge: f32,
    pub compliance: f32,
}

/// Result of one `suggest` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestResult {
    pub suggestion: String,
    pub sentiment: Sentiment,
    pub compliance: Compliance,
    pub confidence: Confidences,
    pub escalation: Escalation,
    pub pii_redacted: bool,
    pub redacted_text: String,
    pub latency_ms: u64,
}

/// Result of one `summary` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub summary: String,
    pub sentiment_overall: Sentiment,
    pub compliance_overall: Compliance,
    pub escalation: Escalation,
    pub utterances: Vec<String>,
}

/// Heuristics the conversation rollup re-applies to every buffered utterance
struct RollupHeuristics {
    negative: KeywordMatcher,
    sensitive: KeywordMatcher,
}

impl RollupHeuristics {
    fn from_config(config: &AgentConfig) -> Result<Self> {
        Ok(Self {
            negative: KeywordMatcher::new(config.negative_keywords.iter().cloned())?,
            sensitive: KeywordMatcher::new(config.sensitive_terms.iter().cloned())?,
        })
    }

    fn signals(&self, text: &str) -> (Sentiment, Compliance) {
        let sentiment = if self.negative.is_match(text) {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };
        let compliance = if self.sensitive.is_match(text) {
            Compliance::Flagged
        } else {
            Compliance::Clean
        };
        (sentiment, compliance)
    }
}

/// Redaction + multi-agent suggestion pipeline
pub struct AssistantPipeline {
    redactor: PiiRedactor,
    sentiment: Arc<dyn Classifier>,
    knowledge: Arc<dyn Classifier>,
    compliance: Arc<dyn Classifier>,
    summarizer: Summarizer,
    rollup: RollupHeuristics,
    context: Arc<ContextStore>,
}

impl AssistantPipeline {
    /// Start building a pipeline from default configuration
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Redact, remember, classify concurrently and decide
    pub async fn suggest(&self, text: &str, conversation_id: &str) -> Result<SuggestResult> {
        let start = Instant::now();

        let utterance = self.redactor.redact_utterance(conversation_id, text);
        self.context
            .append_utterance(conversation_id, utterance.redacted_text.clone());

        let redacted = utterance.redacted_text.as_str();
        let (sentiment, knowledge, compliance) = futures::try_join!(
            self.sentiment.classify(redacted),
            self.knowledge.classify(redacted),
            self.compliance.classify(redacted),
        )
        .map_err(|e| {
            tracing::warn!(conversation_id, error = %e, "classifier failed; rejecting request");
            e
        })?;

        expect_kind(&sentiment, ClassifierKind::Sentiment)?;
        expect_kind(&knowledge, ClassifierKind::Knowledge)?;
        expect_kind(&compliance, ClassifierKind::Compliance)?;

        tracing::debug!(
            conversation_id,
            sentiment_us = sentiment.latency_us,
            knowledge_us = knowledge.latency_us,
            compliance_us = compliance.latency_us,
            "classifiers joined"
        );

        let sentiment_label: Sentiment = sentiment.label.parse()?;
        let compliance_label: Compliance = compliance.label.parse()?;
        let decision = callmate_policy::decide(sentiment_label, compliance_label);

        let result = SuggestResult {
            suggestion: knowledge.label,
            sentiment: decision.sentiment,
            compliance: decision.compliance,
            confidence: Confidences {
                sentiment: sentiment.confidence,
                knowledge: knowledge.confidence,
                compliance: compliance.confidence,
            },
            escalation: decision.escalation,
            pii_redacted: utterance.pii_redacted(),
            redacted_text: utterance.redacted_text,
            latency_ms: start.elapsed().as_millis() as u64,
        };

        tracing::debug!(
            conversation_id,
            sentiment = %result.sentiment,
            compliance = %result.compliance,
            escalation = %result.escalation,
            latency_ms = result.latency_ms,
            "suggestion ready"
        );
        Ok(result)
    }

    /// Recap the conversation and roll up its signals
    pub async fn summary(&self, conversation_id: &str) -> Result<SummaryResult> {
        let utterances = self.context.get_context(conversation_id);
        let summary = self.summarizer.summarize(&utterances).await;

        let rollup =
            callmate_policy::rollup(utterances.iter().map(|text| self.rollup.signals(text)));

        Ok(SummaryResult {
            summary,
            sentiment_overall: rollup.decision.sentiment,
            compliance_overall: rollup.decision.compliance,
            escalation: rollup.decision.escalation,
            utterances,
        })
    }

    /// The context store this pipeline writes to
    pub fn context(&self) -> &Arc<ContextStore> {
        &self.context
    }
}

fn expect_kind(result: &ClassificationResult, expected: ClassifierKind) -> Result<()> {
    if result.kind == expected {
        Ok(())
    } else {
        Err(Error::classifier(format!(
            "expected a {expected} result, got {}",
            result.kind
        )))
    }
}

/// Builder for [`AssistantPipeline`]
///
/// Classifiers default to the keyword agents built from the agent
/// configuration; any of them can be replaced, e.g. by a real model.
pub struct PipelineBuilder {
    agents: AgentConfig,
    redaction: RedactionConfig,
    summary: SummaryConfig,
    context_config: ContextConfig,
    context: Option<Arc<ContextStore>>,
    scorer: Option<Arc<dyn ConfidenceScorer>>,
    sentiment: Option<Arc<dyn Classifier>>,
    knowledge: Option<Arc<dyn Classifier>>,
    compliance: Option<Arc<dyn Classifier>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            agents: AgentConfig::default(),
            redaction: RedactionConfig::default(),
            summary: SummaryConfig::default(),
            context_config: ContextConfig::default(),
            context: None,
            scorer: None,
            sentiment: None,
            knowledge: None,
            compliance: None,
        }
    }

    pub fn agents(mut self, config: AgentConfig) -> Self {
        self.agents = config;
        self
    }

    pub fn redaction(mut self, config: RedactionConfig) -> Self {
        self.redaction = config;
        self
    }

    pub fn summary(mut self, config: SummaryConfig) -> Self {
        self.summary = config;
        self
    }

    pub fn context_config(mut self, config: ContextConfig) -> Self {
        self.context_config = config;
        self
    }

    /// Share an existing context store instead of creating one
    pub fn context_store(mut self, store: Arc<ContextStore>) -> Self {
        self.context = Some(store);
        self
    }

    pub fn scorer(mut self, scorer: Arc<dyn ConfidenceScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn sentiment(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.sentiment = Some(classifier);
        self
    }

    pub fn knowledge(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.knowledge = Some(classifier);
        self
    }

    pub fn compliance(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.compliance = Some(classifier);
        self
    }

    pub fn build(self) -> Result<AssistantPipeline> {
        self.agents.validate()?;
        self.redaction.validate()?;
        self.summary.validate()?;
        self.context_config.validate()?;

        let scorer: Arc<dyn ConfidenceScorer> = match self.scorer {
            Some(scorer) => scorer,
            None => Arc::new(RandomScorer::new(
                self.agents.confidence_min,
                self.agents.confidence_max,
            )),
        };

        let sentiment: Arc<dyn Classifier> = match self.sentiment {
            Some(classifier) => classifier,
            None => Arc::new(SentimentAgent::new(&self.agents, Arc::clone(&scorer))?),
        };
        let knowledge: Arc<dyn Classifier> = match self.knowledge {
            Some(classifier) => classifier,
            None => Arc::new(KnowledgeAgent::new(&self.agents, Arc::clone(&scorer))?),
        };
        let compliance: Arc<dyn Classifier> = match self.compliance {
            Some(classifier) => classifier,
            None => Arc::new(ComplianceAgent::new(&self.agents, Arc::clone(&scorer))?),
        };

        let context = self
            .context
            .unwrap_or_else(|| Arc::new(ContextStore::new(self.context_config.capacity)));

        tracing::info!(
            sentiment = sentiment.name(),
            knowledge = knowledge.name(),
            compliance = compliance.name(),
            context_capacity = context.capacity(),
            "assistant pipeline ready"
        );

        Ok(AssistantPipeline {
            redactor: PiiRedactor::new(&self.redaction.known_names)?,
            sentiment,
            knowledge,
            compliance,
            summarizer: Summarizer::new(&self.summary),
            rollup: RollupHeuristics::from_config(&self.agents)?,
            context,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::FixedScorer;

    fn pipeline() -> AssistantPipeline {
        AssistantPipeline::builder()
            .agents(AgentConfig::without_latency())
            .summary(SummaryConfig {
                latency_ms: 0,
                ..SummaryConfig::default()
            })
            .scorer(Arc::new(FixedScorer(0.9)))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_unhappy_card_holder_escalates() {
        let result = pipeline()
            .suggest("I am not happy, my card number is 4111111111111111", "call-1")
            .await
            .unwrap();

        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.compliance, Compliance::Flagged);
        assert_eq!(result.escalation, Escalation::Recommended);
        assert!(result.pii_redacted);
        assert_eq!(result.redacted_text, "I am not happy, my card number is [CARD]");
        assert_eq!(result.confidence.knowledge, 0.9);
    }

    #[tokio::test]
    async fn test_happy_customer_not_escalated() {
        let result = pipeline()
            .suggest("thank you, that was great", "call-2")
            .await
            .unwrap();

        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.compliance, Compliance::Clean);
        assert_eq!(result.escalation, Escalation::NotNeeded);
        assert!(!result.pii_redacted);
        assert_eq!(
            result.suggestion,
            "Thank the customer and offer help with anything else."
        );
    }

    #[tokio::test]
    async fn test_context_holds_redacted_text_only() {
        let pipeline = pipeline();
        pipeline
            .suggest("mail me at jane@example.com", "call-3")
            .await
            .unwrap();

        assert_eq!(pipeline.context().get_context("call-3"), vec!["mail me at [EMAIL]"]);
    }

    #[tokio::test]
    async fn test_empty_summary() {
        let summary = pipeline().summary("never-seen").await.unwrap();

        assert_eq!(summary.summary, "No conversation to summarise.");
        assert_eq!(summary.sentiment_overall, Sentiment::Neutral);
        assert_eq!(summary.compliance_overall, Compliance::Clean);
        assert_eq!(summary.escalation, Escalation::NotNeeded);
        assert!(summary.utterances.is_empty());
    }

    #[tokio::test]
    async fn test_summary_rolls_up_history() {
        let pipeline = pipeline();
        pipeline.suggest("hello, that was great", "call-4").await.unwrap();
        pipeline.suggest("this is the worst service", "call-4").await.unwrap();
        pipeline.suggest("thank you anyway", "call-4").await.unwrap();

        let summary = pipeline.summary("call-4").await.unwrap();
        assert_eq!(summary.utterances.len(), 3);
        assert_eq!(summary.sentiment_overall, Sentiment::Negative);
        assert_eq!(summary.compliance_overall, Compliance::Clean);
        assert_eq!(summary.escalation, Escalation::Recommended);
        assert!(summary.summary.starts_with("3 utterances"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = AssistantPipeline::builder()
            .context_config(ContextConfig { capacity: 0 })
            .build();
        assert!(result.is_err());
    }
}
