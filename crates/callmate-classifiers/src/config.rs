//! Configuration for the agents, redactor, summarizer and context window

use callmate_core::{Error, PiiKind, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Keyword agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Simulated sentiment latency (milliseconds)
    pub sentiment_latency_ms: u64,

    /// Simulated knowledge-lookup latency (milliseconds)
    pub knowledge_latency_ms: u64,

    /// Simulated compliance latency (milliseconds)
    pub compliance_latency_ms: u64,

    /// Lower bound for reported confidence
    pub confidence_min: f32,

    /// Upper bound for reported confidence
    pub confidence_max: f32,

    /// Checked first; any hit makes the utterance negative
    pub negative_keywords: Vec<String>,

    /// Checked only when no negative keyword matched
    pub positive_keywords: Vec<String>,

    /// Terms that flag an utterance for compliance review
    pub sensitive_terms: Vec<String>,

    /// Knowledge topics, first match wins
    pub topics: Vec<TopicConfig>,

    /// Suggestion used when no topic matches
    pub default_response: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            sentiment_latency_ms: 200,
            knowledge_latency_ms: 300,
            compliance_latency_ms: 200,
            confidence_min: 0.80,
            confidence_max: 0.97,
            negative_keywords: strings(&["not happy", "bad", "worst", "angry", "refund"]),
            positive_keywords: strings(&["great", "awesome", "thank you"]),
            sensitive_terms: strings(&["card", "cvv", "account number", "password"]),
            topics: vec![
                TopicConfig {
                    name: "refund".to_string(),
                    keywords: strings(&["refund"]),
                    response: "Apologize for the inconvenience and assure quick resolution."
                        .to_string(),
                },
                TopicConfig {
                    name: "delay".to_string(),
                    keywords: strings(&["delay", "late", "waiting", "still not"]),
                    response: "Apologize for the delay and assure action on the order.".to_string(),
                },
            ],
            default_response: "Thank the customer and offer help with anything else.".to_string(),
        }
    }
}

impl AgentConfig {
    /// Agent configuration with all simulated latencies set to zero
    pub fn without_latency() -> Self {
        Self {
            sentiment_latency_ms: 0,
            knowledge_latency_ms: 0,
            compliance_latency_ms: 0,
            ..Self::default()
        }
    }

    pub fn sentiment_latency(&self) -> Duration {
        Duration::from_millis(self.sentiment_latency_ms)
    }

    pub fn knowledge_latency(&self) -> Duration {
        Duration::from_millis(self.knowledge_latency_ms)
    }

    pub fn compliance_latency(&self) -> Duration {
        Duration::from_millis(self.compliance_latency_ms)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("confidence_min", self.confidence_min),
            ("confidence_max", self.confidence_max),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!("{name} must be within [0, 1], got {value}")));
            }
        }
        if self.confidence_min > self.confidence_max {
            return Err(Error::config("confidence_min must not exceed confidence_max"));
        }
        if self.default_response.trim().is_empty() {
            return Err(Error::config("default_response must not be empty"));
        }
        for topic in &self.topics {
            if topic.keywords.is_empty() {
                return Err(Error::config(format!("topic '{}' has no keywords", topic.name)));
            }
        }
        Ok(())
    }
}

/// One knowledge-base topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicConfig {
    pub name: String,
    pub keywords: Vec<String>,
    pub response: String,
}

/// Redactor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    /// Exact-match names to mask. A placeholder, not named-entity recognition.
    pub known_names: Vec<String>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            known_names: strings(&["Rajat Shinde"]),
        }
    }
}

impl RedactionConfig {
    pub fn validate(&self) -> Result<()> {
        for name in &self.known_names {
            let normalized = name.split_whitespace().collect::<Vec<_>>().join(" ");
            if normalized.is_empty() {
                return Err(Error::config("known_names must not contain empty entries"));
            }
            if PiiKind::ALL
                .iter()
                .any(|kind| kind.label().eq_ignore_ascii_case(&normalized))
            {
                return Err(Error::config(format!(
                    "known name '{name}' collides with a redaction token"
                )));
            }
        }
        Ok(())
    }
}

/// Summarizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Characters of the first/last utterance quoted in a recap
    pub preview_chars: usize,

    /// Simulated summarization latency (milliseconds)
    pub latency_ms: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            preview_chars: 40,
            latency_ms: 150,
        }
    }
}

impl SummaryConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.preview_chars == 0 {
            return Err(Error::config("summary preview_chars must be at least 1"));
        }
        Ok(())
    }
}

/// Context window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Utterances kept per conversation
    pub capacity: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self { capacity: 5 }
    }
}

impl ContextConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::config("context capacity must be at least 1"));
        }
        Ok(())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
