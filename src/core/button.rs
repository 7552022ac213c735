//! Button debouncer: classic stable-value filter
//!
//! A press event is reported when the raw level has held steady for
//! BUTTON_DB_MS and the newly accepted stable value is the pressed level.
//! Unlike the tilt detector this state survives machine transitions; a press
//! straddling a transition still lands.

use log::debug;
use crate::BUTTON_DB_MS;

/// Stable-value debouncer for the panel button
#[derive(Debug)]
pub struct ButtonDebouncer {
    /// Accepted stable pressed value
    stable_pressed: bool,
    /// Most recent raw pressed sample
    last_raw: bool,
    /// When the raw value last changed (ms)
    last_change_ms: u64,
}

impl ButtonDebouncer {
    /// Create a debouncer synchronized to the current raw level
    pub fn new(level: bool, now: u64) -> Self {
        let pressed = Self::pressed(level);
        Self {
            stable_pressed: pressed,
            last_raw: pressed,
            last_change_ms: now,
        }
    }

    /// Pull-up wiring: the line idles high and a press pulls it low
    fn pressed(level: bool) -> bool {
        !level
    }

    /// One tick: feed the raw digital level, get back whether a clean press
    /// event fired this tick.
    pub fn poll_press(&mut self, level: bool, now: u64) -> bool {
        let raw = Self::pressed(level);

        if raw != self.last_raw {
            self.last_raw = raw;
            self.last_change_ms = now;
        }

        if raw != self.stable_pressed
            && now.saturating_sub(self.last_change_ms) >= BUTTON_DB_MS
        {
            self.stable_pressed = raw;
            if raw {
                debug!("button press at {}ms", now);
                return true;
            }
        }
        false
    }

    /// Unfiltered raw read, for the deliberate long-hold unlock gesture
    /// where debounce nuance is unnecessary.
    pub fn is_held(&self) -> bool {
        self.last_raw
    }
}

// =============================================================================
// TESTS
// =============================================================================
