//! CallMate Policy
//!
//! Deterministic rules that turn classifier signals into decisions:
//! - Escalation: negative sentiment or a compliance flag recommends a supervisor
//! - Rollup: conversation-level sentiment and compliance over buffered utterances
//!
//! Knowledge suggestions never feed into either rule.

pub mod escalation;
pub mod rollup;

pub use escalation::{aggregate, decide};
pub use rollup::{rollup, ConversationRollup};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::escalation::{aggregate, decide};
    pub use crate::rollup::{rollup, ConversationRollup};
}
