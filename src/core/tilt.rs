//! Tilt edge detector: debounce + re-arm
//!
//! Turns a chattering tilt switch into at most one event per qualifying
//! disturbance. The raw level must hold steady for the state-dependent
//! debounce window before it is trusted; a trusted active reading fires only
//! while armed, and firing disarms. Re-arming requires TILT_REARM_MS of
//! continuous stable inactivity, so a held-over sensor cannot retrigger
//! until it has genuinely settled.

use log::debug;
use crate::TILT_REARM_MS;

/// Edge-triggered tilt detector with re-arm
#[derive(Debug)]
pub struct TiltEdgeDetector {
    /// Last observed active value (polarity already applied)
    last_active: bool,
    /// When the raw value last changed (ms)
    last_change_ms: u64,
    /// Whether the next stable-active reading may fire
    armed: bool,
    /// Start of the current stretch of stable inactivity, if any (ms)
    inactive_since: Option<u64>,
}

impl TiltEdgeDetector {
    /// Create a detector synchronized to the current raw level, disarmed
    pub fn new(level: bool, now: u64) -> Self {
        Self {
            last_active: Self::active(level),
            last_change_ms: now,
            armed: false,
            inactive_since: None,
        }
    }

    /// Switch polarity: the contact sits closed at rest, so a high level
    /// means "moving"
    fn active(level: bool) -> bool {
        !level
    }

    /// One tick: feed the raw digital level, get back whether a tilt event
    /// fired. `debounce_ms` is the current state's window.
    pub fn poll(&mut self, level: bool, debounce_ms: u64, now: u64) -> bool {
        let active = Self::active(level);

        if active != self.last_active {
            self.last_active = active;
            self.last_change_ms = now;
        }

        // Not stable yet: no reading to act on
        if now.saturating_sub(self.last_change_ms) < debounce_ms {
            return false;
        }

        if !self.last_active {
            // Stably inactive: inactivity started at the last raw change
            let since = *self.inactive_since.get_or_insert(self.last_change_ms);
            if !self.armed && now.saturating_sub(since) >= TILT_REARM_MS {
                self.armed = true;
                debug!("tilt re-armed after {}ms inactive", now - since);
            }
            return false;
        }

        self.inactive_since = None;
        if self.armed {
            // Fire once, then stay quiet until re-armed
            self.armed = false;
            debug!("tilt event at {}ms", now);
            return true;
        }
        false
    }

    /// Called on every state entry: disarm, forget inactivity tracking, and
    /// resynchronize to the current raw level so a stale edge from the
    /// previous state cannot fire into the new one.
    pub fn reset(&mut self, level: bool, now: u64) {
        self.last_active = Self::active(level);
        self.last_change_ms = now;
        self.armed = false;
        self.inactive_since = None;
    }

    /// Whether the detector could fire on the next stable-active reading
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DB: u64 = 14;

    /// Detector that has seen enough stable inactivity to be armed
    fn armed_detector(now: &mut u64) -> TiltEdgeDetector {
        let mut det = TiltEdgeDetector::new(true, *now);
        *now += TILT_REARM_MS + DB + 1;
        assert!(!det.poll(true, DB, *now));
        assert!(det.is_armed());
        det
    }

    /// Register an active edge, then poll again after the debounce window.
    /// Returns whether the second poll fired.
    fn disturb(det: &mut TiltEdgeDetector, now: &mut u64) -> bool {
        *now += 1;
        det.poll(false, DB, *now);
        *now += DB;
        det.poll(false, DB, *now)
    }

    /// Release to inactive and hold for `hold_ms`
    fn release(det: &mut TiltEdgeDetector, now: &mut u64, hold_ms: u64) {
        *now += 1;
        det.poll(true, DB, *now);
        *now += hold_ms;
        det.poll(true, DB, *now);
    }

    #[test]
    fn test_starts_disarmed() {
        let mut det = TiltEdgeDetector::new(true, 0);
        // Immediately active, but never armed: no event
        assert!(!det.poll(false, DB, 1));
        assert!(!det.poll(false, DB, 100));
    }

    #[test]
    fn test_arms_after_rearm_window() {
        let mut det = TiltEdgeDetector::new(true, 0);
        assert!(!det.poll(true, DB, TILT_REARM_MS - 1));
        assert!(!det.is_armed());
        assert!(!det.poll(true, DB, TILT_REARM_MS));
        assert!(det.is_armed());
    }

    #[test]
    fn test_fires_once_per_disturbance() {
        let mut now = 0;
        let mut det = armed_detector(&mut now);

        assert!(disturb(&mut det, &mut now));

        // Held active: no second event
        now += 50;
        assert!(!det.poll(false, DB, now));
        now += 500;
        assert!(!det.poll(false, DB, now));
    }

    #[test]
    fn test_bounce_within_window_fires_at_most_once() {
        let mut now = 0;
        let mut det = armed_detector(&mut now);

        // Chatter: every raw flip restarts the debounce clock
        let mut fired = 0;
        for i in 0..10 {
            now += 2;
            if det.poll(i % 2 == 0, DB, now) {
                fired += 1;
            }
        }
        // Settle active and let the window elapse
        now += DB + 1;
        if det.poll(false, DB, now) {
            fired += 1;
        }
        assert_eq!(fired, 1, "a single bounce burst must yield one event");
    }

    #[test]
    fn test_rearm_requires_continuous_inactivity() {
        let mut now = 0;
        let mut det = armed_detector(&mut now);
        assert!(disturb(&mut det, &mut now));

        // Release for less than the re-arm window
        release(&mut det, &mut now, TILT_REARM_MS / 2);
        assert!(!det.is_armed());
        assert!(!disturb(&mut det, &mut now), "must not fire before re-arm");

        // A full quiet stretch re-arms; the next disturbance fires
        release(&mut det, &mut now, TILT_REARM_MS + 1);
        assert!(det.is_armed());
        assert!(disturb(&mut det, &mut now));
    }

    #[test]
    fn test_reset_swallows_stale_edge() {
        let mut now = 0;
        let mut det = armed_detector(&mut now);
        assert!(disturb(&mut det, &mut now));

        // State entry happens while the sensor is still active
        det.reset(false, now);

        // Still active long after reset: must not fire in the new state
        now += 500;
        assert!(!det.poll(false, DB, now));
        assert!(!det.is_armed());
    }

    #[test]
    fn test_idle_window_reads_faster() {
        // Same 8ms pulse, two windows: only the short window trusts it
        let pulse = 8;

        let mut now = 0;
        let mut det = armed_detector(&mut now);
        now += 1;
        det.poll(false, 5, now);
        now += pulse;
        assert!(det.poll(false, 5, now), "8ms pulse passes the 5ms window");

        let mut now2 = 0;
        let mut det2 = armed_detector(&mut now2);
        now2 += 1;
        det2.poll(false, 14, now2);
        now2 += pulse;
        assert!(!det2.poll(false, 14, now2), "8ms pulse fails the 14ms window");
    }
}
