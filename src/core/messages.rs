//! Flavor text selection
//!
//! Each transition kind owns a small fixed phrase set; the source picks one
//! uniformly with a xorshift32 generator seeded once at construction (on the
//! device, from analog noise). There is no reseed operation.

/// Which phrase set a transition draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Idle/Reward → Alert: first disturbance
    Warning,
    /// Alert/Cooldown → Angry: escalation
    Scold,
    /// Renewed disturbance while Angry or cooling down
    Rebuke,
    /// Alert → Idle on a button press
    Acknowledge,
    /// Alert/Cooldown timeout back to Idle
    Reset,
    /// Idle → Reward: the patience window paid off
    Compliment,
    /// Reward → Idle: full cycle complete
    CycleComplete,
    /// Angry → Cooldown: de-escalation
    Calm,
    /// Angry → Locked
    Lockout,
    /// Locked → Idle: manual unlock
    Mercy,
}

impl MessageKind {
    /// The fixed, non-empty phrase set for this kind
    fn phrases(&self) -> &'static [&'static str] {
        match self {
            MessageKind::Warning => &[
                "Hey. I felt that.",
                "Who moved me?",
                "Careful. I'm watching now.",
                "That was not nothing.",
            ],
            MessageKind::Scold => &[
                "Again?! You did that on purpose.",
                "Stop. Shaking. Me.",
                "I warned you once already.",
            ],
            MessageKind::Rebuke => &[
                "STILL?!",
                "Unbelievable.",
                "Keep it up, see what happens.",
            ],
            MessageKind::Acknowledge => &[
                "Fine. Apology accepted.",
                "Noted. Don't let it happen again.",
                "Alright, we're good.",
            ],
            MessageKind::Reset => &[
                "...I suppose that was an accident.",
                "Letting it go. This once.",
                "Back to watching.",
            ],
            MessageKind::Compliment => &[
                "You left me alone. I respect that.",
                "Peace and quiet. Well done.",
                "See? We can coexist.",
                "A whole stretch without drama. Impressive.",
            ],
            MessageKind::CycleComplete => &[
                "Reward lap complete. As you were.",
                "Good run. Resetting the clock.",
                "That was nice. Again sometime.",
            ],
            MessageKind::Calm => &[
                "Okay. Okay. Breathing.",
                "Counting to ten...",
                "Settling down. Slowly.",
            ],
            MessageKind::Lockout => &[
                "THAT'S IT. I'm done. LOCKED.",
                "No more chances. LOCKED OUT.",
                "You had three warnings. Locked.",
            ],
            MessageKind::Mercy => &[
                "...fine. Released. Start over.",
                "Mercy granted. Blank slate.",
                "Unlocked. Watch yourself.",
            ],
        }
    }
}

/// Deterministic phrase picker, seeded once at boot
#[derive(Debug)]
pub struct MessageSource {
    state: u32,
}

impl MessageSource {
    /// Create a source from an ambient-noise seed. Zero is a xorshift fixed
    /// point, so it maps to a fixed nonzero constant.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// xorshift32 step
    fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Pick one phrase of the given kind, uniformly
    pub fn pick(&mut self, kind: MessageKind) -> &'static str {
        let set = kind.phrases();
        set[self.next() as usize % set.len()]
    }
}

// =============================================================================
// TESTS
// =============================================================================
