//! Conversation-level rollup for the post-call report

use callmate_core::{AggregatedDecision, Compliance, Sentiment};
use serde::Serialize;

use crate::escalation::decide;

/// Result of rolling up every buffered utterance of one conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversationRollup {
    /// Rolled-up decision; sentiment is only ever `Negative` or `Neutral`
    #[serde(flatten)]
    pub decision: AggregatedDecision,

    /// Number of utterances that went into the rollup
    pub utterance_count: usize,
}

/// Roll up per-utterance signals.
///
/// Overall sentiment is negative if any utterance was negative, otherwise
/// neutral. Overall compliance is flagged if any utterance was flagged.
/// An empty conversation rolls up to neutral / clean / not needed.
pub fn rollup<I>(signals: I) -> ConversationRollup
where
    I: IntoIterator<Item = (Sentiment, Compliance)>,
{
    let mut any_negative = false;
    let mut any_flagged = false;
    let mut utterance_count = 0;

    for (sentiment, compliance) in signals {
        utterance_count += 1;
        any_negative |= sentiment == Sentiment::Negative;
        any_flagged |= compliance == Compliance::Flagged;
    }

    let sentiment = if any_negative {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };
    let compliance = if any_flagged {
        Compliance::Flagged
    } else {
        Compliance::Clean
    };

    ConversationRollup {
        decision: decide(sentiment, compliance),
        utterance_count,
    }
}
