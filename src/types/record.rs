//! Structured mirror of a fired transition

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::SentinelState;

/// One row of the transition table as it fired, for hosts that want
/// structure instead of the wire lines. The Angry self-loop rebuke shows up
/// here too, with `from == to`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Wall-clock stamp, metadata only; core timing never reads it
    pub timestamp: DateTime<Utc>,
    /// State before the tick
    pub from: SentinelState,
    /// State after the tick
    pub to: SentinelState,
    /// Post-transition anger level
    pub anger: u8,
    /// Patience window sampled at the moment of transition (ms)
    pub patience_ms: u64,
    /// The phrase that went out on the message line
    pub message: String,
    /// Monotonic device time of the transition (ms)
    pub at_ms: u64,
}

impl TransitionRecord {
    pub fn new(
        from: SentinelState,
        to: SentinelState,
        anger: u8,
        patience_ms: u64,
        message: &str,
        at_ms: u64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            from,
            to,
            anger,
            patience_ms,
            message: message.to_string(),
            at_ms,
        }
    }
}
