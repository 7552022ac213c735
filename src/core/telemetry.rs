//! Wire-line formatting for the one-way telemetry stream
//!
//! Two line kinds, emitted as a pair once per transition:
//!
//! ```text
//! [<STATE>] <message text>
//! @STAT state=<STATE> anger=<int> patienceMs=<int>
//! ```
//!
//! Pure formatting over current state machine data; cannot fail. Parsing and
//! rendering belong to the host-side viewer.

use crate::types::SentinelState;

/// Human-readable line: `[ALERT] Hey. I felt that.`
pub fn message_line(state: SentinelState, text: &str) -> String {
    format!("[{}] {}", state, text)
}

/// Machine-readable stat line with the post-transition anger level and the
/// patience window sampled at transition time.
pub fn stat_line(state: SentinelState, anger: u8, patience_ms: u64) -> String {
    format!("@STAT state={} anger={} patienceMs={}", state, anger, patience_ms)
}

// =============================================================================
// TESTS
// =============================================================================
