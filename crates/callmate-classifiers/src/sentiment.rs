//! Keyword sentiment agent
//!
//! Negative keywords take precedence: a refund complaint that also says
//! "thank you" is still negative.

use crate::classifier::{ClassificationResult, Classifier, ClassifierKind};
use crate::config::AgentConfig;
use crate::patterns::KeywordMatcher;
use crate::scorer::ConfidenceScorer;
use callmate_core::{Result, Sentiment};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub struct SentimentAgent {
    name: String,
    negative: KeywordMatcher,
    positive: KeywordMatcher,
    latency: Duration,
    scorer: Arc<dyn ConfidenceScorer>,
}

impl SentimentAgent {
    pub fn new(config: &AgentConfig, scorer: Arc<dyn ConfidenceScorer>) -> Result<Self> {
        Ok(Self {
            name: "sentiment".to_string(),
            negative: KeywordMatcher::new(config.negative_keywords.iter().cloned())?,
            positive: KeywordMatcher::new(config.positive_keywords.iter().cloned())?,
            latency: config.sentiment_latency(),
            scorer,
        })
    }

    /// Classify without the simulated latency
    pub fn sentiment(&self, text: &str) -> Sentiment {
        if self.negative.is_match(text) {
            Sentiment::Negative
        } else if self.positive.is_match(text) {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }
}

#[async_trait::async_trait]
impl Classifier for SentimentAgent {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let start = Instant::now();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let sentiment = self.sentiment(text);
        let confidence = self.scorer.score(ClassifierKind::Sentiment, text);

        Ok(
            ClassificationResult::new(ClassifierKind::Sentiment, sentiment.as_str(), confidence)
                .with_latency_us(start.elapsed().as_micros() as u64),
        )
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ClassifierKind {
        ClassifierKind::Sentiment
    }
}
