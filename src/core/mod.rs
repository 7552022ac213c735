//! Core modules for the sentinel

pub mod button;
pub mod effects;
pub mod engine;
pub mod messages;
pub mod telemetry;
pub mod tilt;

pub use button::ButtonDebouncer;
pub use effects::EffectsScheduler;
pub use engine::SentinelEngine;
pub use messages::{MessageKind, MessageSource};
pub use tilt::TiltEdgeDetector;
