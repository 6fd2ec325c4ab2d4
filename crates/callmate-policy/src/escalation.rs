//! Escalation policy

use callmate_core::{AggregatedDecision, Compliance, Escalation, Sentiment};

/// Escalate iff sentiment is negative or compliance is flagged.
pub fn aggregate(sentiment: Sentiment, compliance: Compliance) -> Escalation {
    if sentiment == Sentiment::Negative || compliance == Compliance::Flagged {
        Escalation::Recommended
    } else {
        Escalation::NotNeeded
    }
}

/// Bundle the two signals with the escalation derived from them
pub fn decide(sentiment: Sentiment, compliance: Compliance) -> AggregatedDecision {
    let escalation = aggregate(sentiment, compliance);
    if escalation.is_recommended() {
        tracing::debug!(%sentiment, %compliance, "escalation recommended");
    }

    AggregatedDecision {
        sentiment,
        compliance,
        escalation,
    }
}
