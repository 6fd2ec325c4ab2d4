//! CallMate Classifiers
//!
//! The redaction and multi-signal pipeline behind each suggestion:
//! - PII redaction with fixed-priority regex patterns
//! - Keyword agents for sentiment, knowledge suggestions and compliance
//! - A bounded context window per conversation
//! - A summarizer for the post-call report
//! - [`AssistantPipeline`], which composes all of the above
//!
//! Agents sleep for a configurable latency to stand in for model calls and
//! report confidences from a pluggable [`ConfidenceScorer`].

pub mod classifier;
pub mod compliance;
pub mod config;
pub mod context;
pub mod knowledge;
pub mod patterns;
pub mod pii;
pub mod pipeline;
pub mod scorer;
pub mod sentiment;
pub mod summarizer;

pub use classifier::{ClassificationResult, Classifier, ClassifierKind};
pub use compliance::ComplianceAgent;
pub use config::{AgentConfig, ContextConfig, RedactionConfig, SummaryConfig, TopicConfig};
pub use context::ContextStore;
pub use knowledge::KnowledgeAgent;
pub use patterns::KeywordMatcher;
pub use pii::{PiiRedactor, Redaction};
pub use pipeline::{AssistantPipeline, Confidences, PipelineBuilder, SuggestResult, SummaryResult};
pub use scorer::{ConfidenceScorer, FixedScorer, RandomScorer};
pub use sentiment::SentimentAgent;
pub use summarizer::{Summarizer, EMPTY_SUMMARY};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationResult, Classifier, ClassifierKind};
    pub use crate::context::ContextStore;
    pub use crate::pii::PiiRedactor;
    pub use crate::pipeline::{AssistantPipeline, SuggestResult, SummaryResult};
    pub use crate::scorer::{ConfidenceScorer, FixedScorer, RandomScorer};
}
