//! Canned-response knowledge agent
//!
//! Picks a response template by topic keyword. Independent of sentiment.

use crate::classifier::{ClassificationResult, Classifier, ClassifierKind};
use crate::config::AgentConfig;
use crate::patterns::KeywordMatcher;
use crate::scorer::ConfidenceScorer;
use callmate_core::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

struct Topic {
    name: String,
    matcher: KeywordMatcher,
    response: String,
}

pub struct KnowledgeAgent {
    name: String,
    topics: Vec<Topic>,
    default_response: String,
    latency: Duration,
    scorer: Arc<dyn ConfidenceScorer>,
}

impl KnowledgeAgent {
    pub fn new(config: &AgentConfig, scorer: Arc<dyn ConfidenceScorer>) -> Result<Self> {
        let topics = config
            .topics
            .iter()
            .map(|topic| -> Result<Topic> {
                Ok(Topic {
                    name: topic.name.clone(),
                    matcher: KeywordMatcher::new(topic.keywords.iter().cloned())?,
                    response: topic.response.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: "knowledge".to_string(),
            topics,
            default_response: config.default_response.clone(),
            latency: config.knowledge_latency(),
            scorer,
        })
    }

    /// Suggested response for `text`; first matching topic wins
    pub fn suggest(&self, text: &str) -> &str {
        match self.topics.iter().find(|topic| topic.matcher.is_match(text)) {
            Some(topic) => {
                tracing::debug!(topic = %topic.name, "knowledge topic matched");
                &topic.response
            }
            None => &self.default_response,
        }
    }
}

#[async_trait::async_trait]
impl Classifier for KnowledgeAgent {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let start = Instant::now();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let suggestion = self.suggest(text);
        let confidence = self.scorer.score(ClassifierKind::Knowledge, text);

        Ok(ClassificationResult::new(ClassifierKind::Knowledge, suggestion, confidence)
            .with_latency_us(start.elapsed().as_micros() as u64))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ClassifierKind {
        ClassifierKind::Knowledge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::FixedScorer;

    fn agent() -> KnowledgeAgent {
        KnowledgeAgent::new(&AgentConfig::without_latency(), Arc::new(FixedScorer(0.85))).unwrap()
    }

    #[test]
    fn test_refund_topic() {
        assert_eq!(
            agent().suggest("I want a refund"),
            "Apologize for the inconvenience and assure quick resolution."
        );
    }

    #[test]
    fn test_delay_topic() {
        assert_eq!(
            agent().suggest("my order is three days late"),
            "Apologize for the delay and assure action on the order."
        );
    }

    #[tokio::test]
    async fn test_generic_fallback() {
        let result = agent().classify("hello there").await.unwrap();
        assert_eq!(result.label, "Thank the customer and offer help with anything else.");
        assert_eq!(result.confidence, 0.85);

        let result = agent().classify("").await.unwrap();
        assert_eq!(result.label, "Thank the customer and offer help with anything else.");
    }

    #[test]
    fn test_refund_listed_first_wins_over_delay() {
        assert_eq!(
            agent().suggest("refund me, the delivery was late"),
            "Apologize for the inconvenience and assure quick resolution."
        );
    }
}
