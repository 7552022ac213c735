//! Sentinel engine: the escalation state machine
//!
//! State transitions (all timers measured from state entry):
//! - IDLE → ALERT on a tilt event; IDLE → REWARD after the patience window
//! - ALERT → ANGRY on tilt, → IDLE on button press or 10 s timeout
//! - ANGRY: tilt bumps anger in place; anger = 3 held 1.2 s → LOCKED;
//!   15 s calm → COOLDOWN
//! - COOLDOWN → ANGRY on tilt, → IDLE after 10 s
//! - REWARD → ALERT on tilt, → IDLE after 8 s
//! - LOCKED → IDLE only on a continuous 2 s button hold
//!
//! One call to `step` advances the machine by at most one transition. The
//! 200 ms anti-thrash floor is applied once per tick, ahead of the table.

use log::{debug, info};

use crate::core::button::ButtonDebouncer;
use crate::core::effects::EffectsScheduler;
use crate::core::messages::{MessageKind, MessageSource};
use crate::core::telemetry;
use crate::core::tilt::TiltEdgeDetector;
use crate::types::{
    patience_window_ms, Action, SentinelState, TickEffects, TickInputs, TransitionRecord,
};
use crate::{
    ACK_TONE_HZ, ACK_TONE_MS, ALERT_TIMEOUT_MS, ANGRY_CALM_MS, ANGRY_LOCK_DWELL_MS, CALM_TONE_HZ,
    CALM_TONE_MS, COMPLIMENT_TONE_HZ, COMPLIMENT_TONE_MS, COOLDOWN_MS, CYCLE_TONE_HZ,
    CYCLE_TONE_MS, LOCKED_TONE_HZ, MAX_ANGER, MERCY_TONE_HZ, MERCY_TONE_MS, MIN_STATE_MS,
    RESET_TONE_HZ, RESET_TONE_MS, REWARD_MS, SCOLD_TONE_HZ, SCOLD_TONE_MS, UNLOCK_HOLD_MS,
    WARNING_TONE_HZ, WARNING_TONE_MS,
};

/// The sentinel state machine engine
#[derive(Debug)]
pub struct SentinelEngine {
    /// Current state
    state: SentinelState,
    /// Escalation counter, 0..=MAX_ANGER
    anger: u8,
    /// When the current state was entered (ms)
    entered_at_ms: u64,
    /// Start of the current uninterrupted button hold in Locked, if any
    hold_since_ms: Option<u64>,
    /// Tilt edge detector, reset on every state entry
    tilt: TiltEdgeDetector,
    /// Button debouncer, persists across state entries
    button: ButtonDebouncer,
    /// Angry blink/beep pattern
    effects: EffectsScheduler,
    /// Flavor text picker, seeded once at boot
    messages: MessageSource,
}

impl SentinelEngine {
    /// Create an engine at rest in Idle. `seed` comes from ambient analog
    /// noise on the device; there is no reseed operation.
    pub fn new(seed: u32, now: u64) -> Self {
        Self {
            state: SentinelState::Idle,
            anger: 0,
            entered_at_ms: now,
            hold_since_ms: None,
            // Both lines idle high at rest (tilt contact closed, pull-up button)
            tilt: TiltEdgeDetector::new(true, now),
            button: ButtonDebouncer::new(true, now),
            effects: EffectsScheduler::new(now),
            messages: MessageSource::new(seed),
        }
    }

    /// Boot effects: the Idle base indicator plus one stat line so a host
    /// attaching mid-stream can sync. No message line; the device only
    /// speaks when something happens.
    pub fn start(&mut self, patience_raw: u16) -> TickEffects {
        let mut fx = TickEffects::default();
        fx.set_indicator(self.state.base_indicator());
        fx.emit_line(telemetry::stat_line(
            self.state,
            self.anger,
            patience_window_ms(patience_raw),
        ));
        debug!("sentinel online in {}", self.state);
        fx
    }

    /// One tick: poll the input filters, advance by at most one transition,
    /// and return the platform actions to apply.
    pub fn step(&mut self, inputs: &TickInputs, now: u64) -> TickEffects {
        let mut fx = TickEffects::default();

        let tilt = self
            .tilt
            .poll(inputs.tilt_level, self.state.tilt_debounce_ms(), now);
        let press = self.button.poll_press(inputs.button_level, now);
        let patience_ms = patience_window_ms(inputs.patience_raw);

        if self.state == SentinelState::Angry {
            self.effects.tick(now, &mut fx);
        }

        // Anti-thrash floor: one check per tick, ahead of the whole table.
        // Events that land inside the floor are dropped, not queued.
        let dwell = now.saturating_sub(self.entered_at_ms);
        if dwell < MIN_STATE_MS {
            return fx;
        }

        match self.state {
            SentinelState::Idle => {
                if tilt {
                    self.enter(
                        SentinelState::Alert,
                        MessageKind::Warning,
                        WARNING_TONE_HZ,
                        WARNING_TONE_MS,
                        patience_ms,
                        inputs.tilt_level,
                        now,
                        &mut fx,
                    );
                } else if dwell >= patience_ms {
                    self.enter(
                        SentinelState::Reward,
                        MessageKind::Compliment,
                        COMPLIMENT_TONE_HZ,
                        COMPLIMENT_TONE_MS,
                        patience_ms,
                        inputs.tilt_level,
                        now,
                        &mut fx,
                    );
                }
            }

            SentinelState::Alert => {
                if tilt {
                    self.anger = (self.anger + 1).min(MAX_ANGER);
                    self.enter(
                        SentinelState::Angry,
                        MessageKind::Scold,
                        SCOLD_TONE_HZ,
                        SCOLD_TONE_MS,
                        patience_ms,
                        inputs.tilt_level,
                        now,
                        &mut fx,
                    );
                } else if press {
                    self.enter(
                        SentinelState::Idle,
                        MessageKind::Acknowledge,
                        ACK_TONE_HZ,
                        ACK_TONE_MS,
                        patience_ms,
                        inputs.tilt_level,
                        now,
                        &mut fx,
                    );
                } else if dwell >= ALERT_TIMEOUT_MS {
                    self.enter(
                        SentinelState::Idle,
                        MessageKind::Reset,
                        RESET_TONE_HZ,
                        RESET_TONE_MS,
                        patience_ms,
                        inputs.tilt_level,
                        now,
                        &mut fx,
                    );
                }
            }

            SentinelState::Angry => {
                if tilt {
                    // Stay Angry: bump the counter and grumble, but this is
                    // not an entry - no timer re-anchor, no detector reset,
                    // no tone over the beep pattern
                    self.anger = (self.anger + 1).min(MAX_ANGER);
                    self.rebuke(patience_ms, now, &mut fx);
                } else if self.anger >= MAX_ANGER && dwell >= ANGRY_LOCK_DWELL_MS {
                    self.enter(
                        SentinelState::Locked,
                        MessageKind::Lockout,
                        0,
                        0,
                        patience_ms,
                        inputs.tilt_level,
                        now,
                        &mut fx,
                    );
                } else if dwell >= ANGRY_CALM_MS {
                    self.anger = self.anger.saturating_sub(1);
                    self.enter(
                        SentinelState::Cooldown,
                        MessageKind::Calm,
                        CALM_TONE_HZ,
                        CALM_TONE_MS,
                        patience_ms,
                        inputs.tilt_level,
                        now,
                        &mut fx,
                    );
                }
            }

            SentinelState::Cooldown => {
                if tilt {
                    self.anger = (self.anger + 1).min(MAX_ANGER);
                    self.enter(
                        SentinelState::Angry,
                        MessageKind::Rebuke,
                        SCOLD_TONE_HZ,
                        SCOLD_TONE_MS,
                        patience_ms,
                        inputs.tilt_level,
                        now,
                        &mut fx,
                    );
                } else if dwell >= COOLDOWN_MS {
                    self.enter(
                        SentinelState::Idle,
                        MessageKind::Reset,
                        RESET_TONE_HZ,
                        RESET_TONE_MS,
                        patience_ms,
                        inputs.tilt_level,
                        now,
                        &mut fx,
                    );
                }
            }

            SentinelState::Reward => {
                if tilt {
                    self.enter(
                        SentinelState::Alert,
                        MessageKind::Warning,
                        WARNING_TONE_HZ,
                        WARNING_TONE_MS,
                        patience_ms,
                        inputs.tilt_level,
                        now,
                        &mut fx,
                    );
                } else if dwell >= REWARD_MS {
                    self.enter(
                        SentinelState::Idle,
                        MessageKind::CycleComplete,
                        CYCLE_TONE_HZ,
                        CYCLE_TONE_MS,
                        patience_ms,
                        inputs.tilt_level,
                        now,
                        &mut fx,
                    );
                }
            }

            SentinelState::Locked => {
                // Lockout ignores further disturbance; only the hold gesture
                // counts, measured on the raw line with no partial credit
                if self.button.is_held() {
                    let since = *self.hold_since_ms.get_or_insert(now);
                    if now.saturating_sub(since) >= UNLOCK_HOLD_MS {
                        self.anger = 0;
                        self.enter(
                            SentinelState::Idle,
                            MessageKind::Mercy,
                            MERCY_TONE_HZ,
                            MERCY_TONE_MS,
                            patience_ms,
                            inputs.tilt_level,
                            now,
                            &mut fx,
                        );
                    }
                } else {
                    self.hold_since_ms = None;
                }
            }
        }

        fx
    }

    /// Single entry action for every transition: tone handling, entry
    /// timestamp, detector reset, effect re-arm, base indicator, and the
    /// telemetry pair, in that order.
    fn enter(
        &mut self,
        next: SentinelState,
        kind: MessageKind,
        tone_hz: u16,
        tone_ms: u64,
        patience_ms: u64,
        tilt_level: bool,
        now: u64,
        fx: &mut TickEffects,
    ) {
        let from = self.state;

        // Locked keeps a continuous alarm; every other entry silences first
        if next != SentinelState::Locked {
            fx.actions.push(Action::StopTone);
        }

        self.state = next;
        self.entered_at_ms = now;
        self.hold_since_ms = None;
        self.tilt.reset(tilt_level, now);
        self.effects.arm(now);

        fx.set_indicator(next.base_indicator());

        if next == SentinelState::Locked {
            fx.actions.push(Action::StartContinuousTone { hz: LOCKED_TONE_HZ });
        } else if tone_hz > 0 {
            fx.actions.push(Action::StartTone { hz: tone_hz, duration_ms: tone_ms });
        }

        let msg = self.messages.pick(kind);
        info!("{} -> {} anger={}: {}", from, next, self.anger, msg);
        fx.emit_line(telemetry::message_line(next, msg));
        fx.emit_line(telemetry::stat_line(next, self.anger, patience_ms));
        fx.transition = Some(TransitionRecord::new(
            from,
            next,
            self.anger,
            patience_ms,
            msg,
            now,
        ));
    }

    /// The Angry self-loop: message and stat go out (anger changed), state
    /// entry does not happen.
    fn rebuke(&mut self, patience_ms: u64, now: u64, fx: &mut TickEffects) {
        let msg = self.messages.pick(MessageKind::Rebuke);
        debug!("{} self-loop anger={}: {}", self.state, self.anger, msg);
        fx.emit_line(telemetry::message_line(self.state, msg));
        fx.emit_line(telemetry::stat_line(self.state, self.anger, patience_ms));
        fx.transition = Some(TransitionRecord::new(
            self.state,
            self.state,
            self.anger,
            patience_ms,
            msg,
            now,
        ));
    }

    /// Current state
    pub fn state(&self) -> SentinelState {
        self.state
    }

    /// Current anger level
    pub fn anger(&self) -> u8 {
        self.anger
    }

    /// Elapsed time in the current state (ms)
    pub fn dwell_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.entered_at_ms)
    }
}

// =============================================================================
// TESTS
// =============================================================================
