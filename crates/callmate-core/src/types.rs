//! Core types for CallMate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Kind of personally identifiable information the redactor recognises.
///
/// Variant order is the order in which the redactor applies its patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PiiKind {
    Email,
    Card,
    Phone,
    Number,
    Name,
}

impl PiiKind {
    /// All kinds, in redaction priority order
    pub const ALL: [PiiKind; 5] = [
        PiiKind::Email,
        PiiKind::Card,
        PiiKind::Phone,
        PiiKind::Number,
        PiiKind::Name,
    ];

    /// Upper-case label used inside the replacement token
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Card => "CARD",
            Self::Phone => "PHONE",
            Self::Number => "NUMBER",
            Self::Name => "NAME",
        }
    }

    /// Bracketed replacement token, e.g. `[EMAIL]`
    pub fn token(&self) -> &'static str {
        match self {
            Self::Email => "[EMAIL]",
            Self::Card => "[CARD]",
            Self::Phone => "[PHONE]",
            Self::Number => "[NUMBER]",
            Self::Name => "[NAME]",
        }
    }
}

impl fmt::Display for PiiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Customer sentiment signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(Error::classifier(format!("unknown sentiment label: {other}"))),
        }
    }
}

/// Compliance signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compliance {
    Clean,
    Flagged,
}

impl Compliance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Flagged => "flagged",
        }
    }
}

impl fmt::Display for Compliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compliance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clean" => Ok(Self::Clean),
            "flagged" => Ok(Self::Flagged),
            other => Err(Error::classifier(format!("unknown compliance label: {other}"))),
        }
    }
}

/// Whether a supervisor should take over the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Escalation {
    Recommended,
    NotNeeded,
}

impl Escalation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::NotNeeded => "not_needed",
        }
    }

    pub fn is_recommended(&self) -> bool {
        matches!(self, Self::Recommended)
    }
}

impl fmt::Display for Escalation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined risk signals for one utterance or one conversation.
///
/// `escalation` is `Recommended` iff `sentiment` is `Negative` or
/// `compliance` is `Flagged`; build it through the escalation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedDecision {
    pub sentiment: Sentiment,
    pub compliance: Compliance,
    pub escalation: Escalation,
}

/// A customer utterance after redaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Utterance {
    pub conversation_id: String,

    /// Never serialized; only the redacted form leaves the process
    #[serde(skip)]
    pub raw_text: String,

    pub redacted_text: String,

    pub pii_found: BTreeSet<PiiKind>,
}

impl Utterance {
    /// Whether redaction changed the text
    pub fn pii_redacted(&self) -> bool {
        self.raw_text != self.redacted_text
    }
}

/// Human feedback on a shown suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: String,
    #[serde(alias = "call_id")]
    pub conversation_id: String,
    pub text: String,
    pub helpful: bool,
    pub timestamp: DateTime<Utc>,
}

/// Recording-consent decision for a conversation, hash-chained in the consent log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub id: String,
    #[serde(alias = "call_id")]
    pub conversation_id: String,
    pub consent: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}
