//! Classifier trait and common types

use async_trait::async_trait;
use callmate_core::Result;
use serde::Serialize;
use std::fmt;

/// Trait for the agents fanned out per utterance.
///
/// Implementations must be pure functions of the redacted text: no shared
/// mutable state and no dependency on conversation history, so the pipeline
/// can run them concurrently in any order.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given (already redacted) text
    async fn classify(&self, text: &str) -> Result<ClassificationResult>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Which signal this classifier produces
    fn kind(&self) -> ClassifierKind;
}

/// Signal produced by a classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    Sentiment,
    Knowledge,
    Compliance,
}

impl ClassifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Knowledge => "knowledge",
            Self::Compliance => "compliance",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// Which classifier produced this
    pub kind: ClassifierKind,

    /// Label (sentiment / compliance) or suggestion text (knowledge)
    pub label: String,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl ClassificationResult {
    /// Create a new classification result, clamping confidence into [0, 1]
    pub fn new(kind: ClassifierKind, label: impl Into<String>, confidence: f32) -> Self {
        Self {
            kind,
            label: label.into(),
            confidence: clamp_confidence(confidence),
            latency_us: 0,
        }
    }

    pub fn with_latency_us(mut self, latency_us: u64) -> Self {
        self.latency_us = latency_us;
        self
    }
}

/// Clamp a raw score into [0, 1]; NaN becomes 0
pub fn clamp_confidence(score: f32) -> f32 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
