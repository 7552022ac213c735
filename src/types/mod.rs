//! Core types for the sentinel

mod actions;
mod inputs;
mod record;
mod state;

pub use actions::{Action, IndicatorPattern, TickEffects};
pub use inputs::{patience_window_ms, TickInputs};
pub use record::TransitionRecord;
pub use state::SentinelState;
