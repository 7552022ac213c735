//! Sentinel state definitions

use serde::{Deserialize, Serialize};
use crate::{TILT_DB_IDLE_MS, TILT_DB_OTHER_MS};
use crate::types::IndicatorPattern;

/// The six possible states of the sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentinelState {
    /// At rest, watching for disturbance
    Idle,
    /// Disturbed once, waiting for it to stop or repeat
    Alert,
    /// Repeated disturbance, anger accumulating, blink/beep pattern active
    Angry,
    /// Coming down from Angry, still touchy
    Cooldown,
    /// Earned by leaving the device alone for the full patience window
    Reward,
    /// Hard lockout, exits only on the manual hold gesture
    Locked,
}

impl SentinelState {
    /// Tilt debounce window for this state: Idle wakes easy, the rest
    /// demand a steadier reading
    pub fn tilt_debounce_ms(&self) -> u64 {
        match self {
            SentinelState::Idle => TILT_DB_IDLE_MS,
            _ => TILT_DB_OTHER_MS,
        }
    }

    /// Base indicator pattern applied on entry to this state
    pub fn base_indicator(&self) -> IndicatorPattern {
        match self {
            SentinelState::Idle => IndicatorPattern::READY,
            SentinelState::Alert | SentinelState::Cooldown => IndicatorPattern::WARNING,
            SentinelState::Reward => IndicatorPattern::READY_AND_WARNING,
            SentinelState::Angry | SentinelState::Locked => IndicatorPattern::ALARM,
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            SentinelState::Idle => "\x1b[32m",     // Green
            SentinelState::Alert => "\x1b[33m",    // Yellow
            SentinelState::Angry => "\x1b[31m",    // Red
            SentinelState::Cooldown => "\x1b[33m", // Yellow
            SentinelState::Reward => "\x1b[36m",   // Cyan
            SentinelState::Locked => "\x1b[35m",   // Magenta
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for SentinelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SentinelState::Idle => "IDLE",
            SentinelState::Alert => "ALERT",
            SentinelState::Angry => "ANGRY",
            SentinelState::Cooldown => "COOLDOWN",
            SentinelState::Reward => "REWARD",
            SentinelState::Locked => "LOCKED",
        };
        write!(f, "{}", name)
    }
}
