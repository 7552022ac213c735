//! Platform actions returned by the core
//!
//! The core never touches hardware. Every tick it returns an ordered list of
//! actions; the hosting platform (device firmware loop or the terminal
//! simulator) applies them to the real indicator bank, buzzer, and serial
//! port.

use serde::{Deserialize, Serialize};
use crate::types::TransitionRecord;

/// Desired level of each lamp in the three-lamp indicator bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorPattern {
    pub ready: bool,
    pub warning: bool,
    pub alarm: bool,
}

impl IndicatorPattern {
    /// Idle: ready lamp only
    pub const READY: Self = Self { ready: true, warning: false, alarm: false };
    /// Alert / Cooldown: warning lamp only
    pub const WARNING: Self = Self { ready: false, warning: true, alarm: false };
    /// Reward: ready and warning together
    pub const READY_AND_WARNING: Self = Self { ready: true, warning: true, alarm: false };
    /// Angry / Locked: alarm lamp only
    pub const ALARM: Self = Self { ready: false, warning: false, alarm: true };
    /// Blink-off phase of the Angry pattern
    pub const DARK: Self = Self { ready: false, warning: false, alarm: false };
}

/// One platform command, in application order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write the indicator bank
    SetIndicator(IndicatorPattern),
    /// Sound a one-shot tone
    StartTone { hz: u16, duration_ms: u64 },
    /// Sound a tone until StopTone (the Locked alarm)
    StartContinuousTone { hz: u16 },
    /// Silence the buzzer
    StopTone,
    /// Write one telemetry line to the stream
    EmitLine(String),
}

/// Everything one call to `SentinelEngine::step` asks of the platform
#[derive(Debug, Default)]
pub struct TickEffects {
    /// Platform commands, to be applied in order
    pub actions: Vec<Action>,
    /// Present exactly when a transition-table row fired this tick
    pub transition: Option<TransitionRecord>,
}

impl TickEffects {
    pub fn set_indicator(&mut self, pattern: IndicatorPattern) {
        self.actions.push(Action::SetIndicator(pattern));
    }

    pub fn emit_line(&mut self, line: String) {
        self.actions.push(Action::EmitLine(line));
    }
}
