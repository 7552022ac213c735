//! Sentinel: device core for a tilt-reactive escalation toy
//!
//! The core is a single-owner state machine driven by an external tick loop:
//! sample raw levels → SentinelEngine::step(inputs, now) → apply the returned
//! platform actions. No wall clock, no blocking, no I/O inside the core.

pub mod core;
pub mod types;

// =============================================================================
// STATE MACHINE TIMING
// =============================================================================

/// Escalation counter ceiling
pub const MAX_ANGER: u8 = 3;

/// Anti-thrash floor: minimum dwell before any transition is evaluated (ms)
pub const MIN_STATE_MS: u64 = 200;

/// Alert gives up and returns to Idle after this dwell (ms)
pub const ALERT_TIMEOUT_MS: u64 = 10_000;

/// Angry calms into Cooldown after this dwell (ms)
pub const ANGRY_CALM_MS: u64 = 15_000;

/// Minimum Angry dwell before maxed-out anger can lock (ms)
pub const ANGRY_LOCK_DWELL_MS: u64 = 1_200;

/// Cooldown drains back to Idle after this dwell (ms)
pub const COOLDOWN_MS: u64 = 10_000;

/// Reward lap length before the cycle completes (ms)
pub const REWARD_MS: u64 = 8_000;

/// Continuous button hold required to leave Locked (ms)
pub const UNLOCK_HOLD_MS: u64 = 2_000;

// =============================================================================
// PATIENCE KNOB
// =============================================================================

/// Shortest undisturbed Idle stretch that earns Reward (ms)
pub const IDLE_REWARD_MIN_MS: u64 = 5_000;

/// Longest undisturbed Idle stretch that earns Reward (ms)
pub const IDLE_REWARD_MAX_MS: u64 = 20_000;

/// Full-scale reading of the 10-bit potentiometer channel
pub const ANALOG_MAX: u16 = 1023;

// =============================================================================
// INPUT FILTERS
// =============================================================================

/// Tilt debounce window while Idle (ms) - wake easy
pub const TILT_DB_IDLE_MS: u64 = 5;

/// Tilt debounce window in every other state (ms) - rage harder
pub const TILT_DB_OTHER_MS: u64 = 14;

/// Continuous stable inactivity required to re-arm the tilt detector (ms)
pub const TILT_REARM_MS: u64 = 140;

/// Button stable-value debounce window (ms)
pub const BUTTON_DB_MS: u64 = 25;

// =============================================================================
// EFFECTS: ANGRY BLINK/BEEP PATTERN
// =============================================================================

/// Alarm lamp toggle period while Angry (ms)
pub const ANGRY_BLINK_MS: u64 = 200;

/// Beep period while Angry (ms)
pub const ANGRY_BEEP_MS: u64 = 120;

/// Angry beep pitch (Hz)
pub const ANGRY_BEEP_HZ: u16 = 220;

/// Angry beep length (ms)
pub const ANGRY_BEEP_DURATION_MS: u64 = 35;

// =============================================================================
// TRANSITION TONES
// =============================================================================
// One short tone per transition kind so each is audibly distinct. The Angry
// self-loop rebuke stays silent; the beep pattern is already running there.

/// Idle → Alert and Reward → Alert warning chirp
pub const WARNING_TONE_HZ: u16 = 880;
pub const WARNING_TONE_MS: u64 = 120;

/// Alert/Cooldown → Angry scold
pub const SCOLD_TONE_HZ: u16 = 440;
pub const SCOLD_TONE_MS: u64 = 180;

/// Alert → Idle acknowledgment (button press)
pub const ACK_TONE_HZ: u16 = 1175;
pub const ACK_TONE_MS: u64 = 90;

/// Alert/Cooldown timeout back to Idle
pub const RESET_TONE_HZ: u16 = 660;
pub const RESET_TONE_MS: u64 = 100;

/// Idle → Reward compliment
pub const COMPLIMENT_TONE_HZ: u16 = 1319;
pub const COMPLIMENT_TONE_MS: u64 = 150;

/// Reward → Idle cycle complete
pub const CYCLE_TONE_HZ: u16 = 1047;
pub const CYCLE_TONE_MS: u64 = 120;

/// Angry → Cooldown de-escalation
pub const CALM_TONE_HZ: u16 = 523;
pub const CALM_TONE_MS: u64 = 120;

/// Locked → Idle mercy (manual unlock)
pub const MERCY_TONE_HZ: u16 = 988;
pub const MERCY_TONE_MS: u64 = 200;

/// Continuous alarm pitch while Locked (Hz)
pub const LOCKED_TONE_HZ: u16 = 196;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
