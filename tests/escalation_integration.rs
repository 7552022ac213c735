//! End-to-end escalation arcs driven through the public API
//!
//! Time is injected, so every scenario runs on a virtual clock with no
//! sleeps: step once per virtual millisecond and assert on the transitions
//! that fall out.

use sentinel::core::SentinelEngine;
use sentinel::types::{patience_window_ms, SentinelState, TickInputs, TransitionRecord};
use sentinel::{
    ALERT_TIMEOUT_MS, ANGRY_CALM_MS, ANGRY_LOCK_DWELL_MS, COOLDOWN_MS, MAX_ANGER, MIN_STATE_MS,
    REWARD_MS, TILT_REARM_MS, UNLOCK_HOLD_MS,
};

const REST: TickInputs = TickInputs {
    tilt_level: true,
    button_level: true,
    patience_raw: 512,
};
const TILTED: TickInputs = TickInputs {
    tilt_level: false,
    button_level: true,
    patience_raw: 512,
};
const PRESSED: TickInputs = TickInputs {
    tilt_level: true,
    button_level: false,
    patience_raw: 512,
};

/// Step once per virtual ms, returning the last transition seen
fn run(
    eng: &mut SentinelEngine,
    now: &mut u64,
    ms: u64,
    inputs: TickInputs,
) -> Option<TransitionRecord> {
    let mut last = None;
    for _ in 0..ms {
        *now += 1;
        let fx = eng.step(&inputs, *now);
        if fx.transition.is_some() {
            last = fx.transition;
        }
    }
    last
}

/// Clear the floor, re-arm the detector, then one clean disturbance
fn settle_and_tilt(eng: &mut SentinelEngine, now: &mut u64) -> Option<TransitionRecord> {
    run(eng, now, MIN_STATE_MS + TILT_REARM_MS + 20, REST);
    run(eng, now, 30, TILTED)
}

/// Re-arm-and-pulse at the tightest legal cadence
fn fast_tilt(eng: &mut SentinelEngine, now: &mut u64) -> Option<TransitionRecord> {
    run(eng, now, TILT_REARM_MS + 10, REST);
    run(eng, now, 20, TILTED)
}

/// Boot → Alert → Angry → capped anger → Locked → mercy unlock.
/// The full arc of the first acceptance scenario.
#[test]
fn test_full_escalation_to_lockout_and_mercy() {
    let mut eng = SentinelEngine::new(99, 0);
    let mut now = 0;
    assert_eq!(eng.state(), SentinelState::Idle);

    // First disturbance warns without raising anger
    let rec = settle_and_tilt(&mut eng, &mut now).expect("warning");
    assert_eq!(rec.to, SentinelState::Alert);
    assert_eq!(rec.anger, 0);

    // Second disturbance escalates
    let rec = settle_and_tilt(&mut eng, &mut now).expect("escalation");
    assert_eq!(rec.to, SentinelState::Angry);
    assert_eq!(rec.anger, 1);

    // Three more bumps: anger caps at MAX without leaving Angry
    run(&mut eng, &mut now, MIN_STATE_MS + 5, REST);
    for _ in 0..3 {
        let rec = fast_tilt(&mut eng, &mut now).expect("rebuke");
        assert_eq!(rec.from, SentinelState::Angry);
        assert_eq!(rec.to, SentinelState::Angry);
    }
    assert_eq!(eng.anger(), MAX_ANGER);

    // Left alone with maxed anger, the lock guard fires
    let rec = run(&mut eng, &mut now, ANGRY_LOCK_DWELL_MS + MIN_STATE_MS, REST).expect("lockout");
    assert_eq!(rec.to, SentinelState::Locked);
    assert_eq!(rec.anger, MAX_ANGER);

    // Uninterrupted hold earns mercy and a clean slate
    run(&mut eng, &mut now, MIN_STATE_MS + 10, REST);
    let rec = run(&mut eng, &mut now, UNLOCK_HOLD_MS + 50, PRESSED).expect("mercy");
    assert_eq!(rec.to, SentinelState::Idle);
    assert_eq!(rec.anger, 0);
    assert_eq!(eng.anger(), 0);
}

/// Undisturbed Idle earns Reward after the live patience window, and the
/// reward lap completes back to Idle on its own.
#[test]
fn test_patience_reward_cycle() {
    let mut eng = SentinelEngine::new(7, 0);
    let mut now = 0;

    let patience = patience_window_ms(REST.patience_raw);
    assert!((5_000..=20_000).contains(&patience));

    let rec = run(&mut eng, &mut now, patience + 10, REST).expect("reward");
    assert_eq!(rec.to, SentinelState::Reward);
    // Reward fired no earlier than the sampled window
    assert!(rec.at_ms >= patience);

    let rec = run(&mut eng, &mut now, REWARD_MS + 10, REST).expect("cycle complete");
    assert_eq!(rec.from, SentinelState::Reward);
    assert_eq!(rec.to, SentinelState::Idle);
}

/// A disturbance during the reward lap drops straight back to Alert
#[test]
fn test_reward_is_revocable() {
    let mut eng = SentinelEngine::new(7, 0);
    let mut now = 0;
    let patience = patience_window_ms(REST.patience_raw);
    run(&mut eng, &mut now, patience + 10, REST);
    assert_eq!(eng.state(), SentinelState::Reward);

    let rec = settle_and_tilt(&mut eng, &mut now).expect("revoked");
    assert_eq!(rec.to, SentinelState::Alert);
}

/// The patience knob is read live: turning it down mid-dwell moves the goal
#[test]
fn test_patience_knob_is_live() {
    let mut eng = SentinelEngine::new(7, 0);
    let mut now = 0;

    // Sit most of the way toward a long window
    let long = TickInputs { patience_raw: 1023, ..REST };
    run(&mut eng, &mut now, 6_000, long);
    assert_eq!(eng.state(), SentinelState::Idle);

    // Crank the knob to minimum: the 5s window is already satisfied
    let short = TickInputs { patience_raw: 0, ..REST };
    let rec = run(&mut eng, &mut now, 5, short).expect("reward");
    assert_eq!(rec.to, SentinelState::Reward);
    assert_eq!(rec.patience_ms, 5_000);
}

/// Alert de-escalates on a button press, and on its own after the timeout
#[test]
fn test_alert_deescalation_paths() {
    // Path 1: acknowledged by a press
    let mut eng = SentinelEngine::new(3, 0);
    let mut now = 0;
    settle_and_tilt(&mut eng, &mut now);
    run(&mut eng, &mut now, MIN_STATE_MS + 10, REST);
    let rec = run(&mut eng, &mut now, 60, PRESSED).expect("acknowledged");
    assert_eq!(rec.from, SentinelState::Alert);
    assert_eq!(rec.to, SentinelState::Idle);

    // Path 2: forgotten about
    let mut eng = SentinelEngine::new(3, 0);
    let mut now = 0;
    settle_and_tilt(&mut eng, &mut now);
    let rec = run(&mut eng, &mut now, ALERT_TIMEOUT_MS + 10, REST).expect("timeout");
    assert_eq!(rec.from, SentinelState::Alert);
    assert_eq!(rec.to, SentinelState::Idle);
}

/// Angry calms into Cooldown (shedding one anger), Cooldown drains to Idle,
/// and a disturbance mid-cooldown re-escalates.
#[test]
fn test_cooldown_paths() {
    let mut eng = SentinelEngine::new(11, 0);
    let mut now = 0;
    settle_and_tilt(&mut eng, &mut now);
    settle_and_tilt(&mut eng, &mut now);
    assert_eq!(eng.anger(), 1);

    let rec = run(&mut eng, &mut now, ANGRY_CALM_MS + 10, REST).expect("calm");
    assert_eq!(rec.to, SentinelState::Cooldown);
    assert_eq!(rec.anger, 0);

    // Tilt mid-cooldown goes straight back to Angry
    let rec = settle_and_tilt(&mut eng, &mut now).expect("re-escalation");
    assert_eq!(rec.from, SentinelState::Cooldown);
    assert_eq!(rec.to, SentinelState::Angry);
    assert_eq!(rec.anger, 1);

    // Calm again, then let Cooldown drain all the way out
    let rec = run(&mut eng, &mut now, ANGRY_CALM_MS + 10, REST).expect("calm again");
    assert_eq!(rec.to, SentinelState::Cooldown);
    let rec = run(&mut eng, &mut now, COOLDOWN_MS + 10, REST).expect("drained");
    assert_eq!(rec.to, SentinelState::Idle);
}

/// Anger only ever moves by the table: up on disturbance in
/// Alert/Angry/Cooldown, down by one on calm, to zero on mercy.
#[test]
fn test_anger_stays_bounded_through_noise() {
    let mut eng = SentinelEngine::new(1234, 0);
    let mut now = 0;

    // A long, abusive random-ish input schedule
    let mut x: u32 = 0xACE1;
    for _ in 0..40_000 {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        now += 1;
        let inputs = TickInputs {
            tilt_level: x & 3 != 0,
            button_level: x & 12 != 0,
            patience_raw: 100,
        };
        eng.step(&inputs, now);
        assert!(eng.anger() <= MAX_ANGER, "anger out of range at t={}", now);
    }
}

/// No transition ever fires before the anti-thrash floor
#[test]
fn test_min_dwell_floor_holds_everywhere() {
    let mut eng = SentinelEngine::new(5, 0);
    let mut now = 0;
    let mut last_entry = 0;

    let mut x: u32 = 0xBEEF;
    for _ in 0..60_000 {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        now += 1;
        let inputs = TickInputs {
            tilt_level: x & 7 != 0,
            button_level: x & 24 != 0,
            patience_raw: 0,
        };
        let fx = eng.step(&inputs, now);
        if let Some(rec) = fx.transition {
            if rec.from != rec.to {
                assert!(
                    rec.at_ms - last_entry >= MIN_STATE_MS,
                    "{} -> {} after only {}ms",
                    rec.from,
                    rec.to,
                    rec.at_ms - last_entry
                );
                last_entry = rec.at_ms;
            }
        }
    }
}
