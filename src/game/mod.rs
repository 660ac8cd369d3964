//! Deterministic interaction state machine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-counter time only, no wall clock
//! - Seeded RNG only
//! - Fixed evaluation order within a tick
//! - No rendering, network or platform dependencies

pub mod hit;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use hit::is_hit;
pub use spawn::spawn_position;
pub use state::{
    CatchOutcome, ExplodedMarks, GameEvent, Session, SessionPhase, Slot, SlotState, Target,
};
pub use tick::tick;
pub use timer::{ExpiryTimer, PeriodicTimer};
