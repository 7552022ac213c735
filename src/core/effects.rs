//! Angry-state blink/beep pattern
//!
//! Two independent periodic timers, both re-anchored to "now" on every state
//! entry: the alarm lamp toggles every ANGRY_BLINK_MS and a short fixed beep
//! sounds every ANGRY_BEEP_MS. The engine only ticks this while Angry; entry
//! into any other state re-arms the anchors and overwrites the lamp, which
//! is all the cleanup the pattern needs.

use crate::types::{Action, IndicatorPattern, TickEffects};
use crate::{ANGRY_BEEP_DURATION_MS, ANGRY_BEEP_HZ, ANGRY_BEEP_MS, ANGRY_BLINK_MS};

/// Periodic blink/beep scheduler, active only while Angry
#[derive(Debug)]
pub struct EffectsScheduler {
    /// Next alarm-lamp toggle (ms)
    next_blink_ms: u64,
    /// Next beep (ms)
    next_beep_ms: u64,
    /// Current phase of the alarm lamp
    alarm_lit: bool,
}

impl EffectsScheduler {
    pub fn new(now: u64) -> Self {
        let mut s = Self {
            next_blink_ms: 0,
            next_beep_ms: 0,
            alarm_lit: true,
        };
        s.arm(now);
        s
    }

    /// Re-anchor both timers to `now`. Called on every state entry.
    pub fn arm(&mut self, now: u64) {
        self.next_blink_ms = now + ANGRY_BLINK_MS;
        self.next_beep_ms = now + ANGRY_BEEP_MS;
        self.alarm_lit = true;
    }

    /// One tick of the pattern. Anchors re-base on `now` rather than
    /// accumulating, so a slow driver tick cannot queue a burst of stale
    /// blinks.
    pub fn tick(&mut self, now: u64, fx: &mut TickEffects) {
        if now >= self.next_blink_ms {
            self.alarm_lit = !self.alarm_lit;
            self.next_blink_ms = now + ANGRY_BLINK_MS;
            fx.set_indicator(if self.alarm_lit {
                IndicatorPattern::ALARM
            } else {
                IndicatorPattern::DARK
            });
        }
        if now >= self.next_beep_ms {
            self.next_beep_ms = now + ANGRY_BEEP_MS;
            fx.actions.push(Action::StartTone {
                hz: ANGRY_BEEP_HZ,
                duration_ms: ANGRY_BEEP_DURATION_MS,
            });
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
