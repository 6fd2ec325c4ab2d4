//! CallMate Core
//!
//! Core types and error handling shared across CallMate components.
//!
//! This crate provides:
//! - The error type and `Result` alias used by every crate
//! - Signal enums produced by the agents (sentiment, compliance, escalation)
//! - Utterance, feedback and consent records passed between components

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    AggregatedDecision, Compliance, ConsentRecord, Escalation, FeedbackRecord, PiiKind, Sentiment,
    Utterance,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{AggregatedDecision, Compliance, Escalation, PiiKind, Sentiment, Utterance};
}
