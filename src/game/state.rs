//! Session state and core interaction types
//!
//! One `Session` owns everything a tick can touch: the two target slots,
//! the exploded markers, the timers, the stopwatch and the RNG. There are
//! no module-level globals; every callback works through this object.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::timer::{ExpiryTimer, PeriodicTimer};
use crate::Side;
use crate::config::GameConfig;
use crate::stopwatch::Stopwatch;

/// Lifecycle state of one slot's target.
///
/// `Caught` and `Expired` are transient: the tick that produces them
/// resolves the slot back to `NeedsSpawn` before returning, so between
/// ticks a slot is only ever `NeedsSpawn` or `Live`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No target; the next tick will spawn one
    NeedsSpawn,
    /// Target on the field, hit-testable
    Live,
    /// Caught this tick
    Caught,
    /// Timed out this tick
    Expired,
}

/// An on-field object the player must catch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    /// Center position in playfield space
    pub position: Vec2,
    /// Rendered radius - hit testing uses the detection half-width instead
    pub radius: f32,
}

/// One of the two independent target lifecycles
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub side: Side,
    pub state: SlotState,
    /// Present only once spawned; an unspawned slot has no position and
    /// must not be hit-tested
    pub target: Option<Target>,
    /// Bumped on every (re)spawn; guards the expiry timer against stale fires
    pub generation: u32,
    /// Armed only for the timed (left) slot
    pub expiry: ExpiryTimer,
}

impl Slot {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            state: SlotState::NeedsSpawn,
            target: None,
            generation: 0,
            expiry: ExpiryTimer::default(),
        }
    }

    /// Position of the live target, if any
    pub fn position(&self) -> Option<Vec2> {
        self.target.map(|t| t.position)
    }

    pub fn is_live(&self) -> bool {
        self.state == SlotState::Live
    }

    /// Resolve a transient `Caught`/`Expired` state back to `NeedsSpawn`
    /// so the next tick respawns the slot
    pub fn resolve(&mut self) {
        if matches!(self.state, SlotState::Caught | SlotState::Expired) {
            self.state = SlotState::NeedsSpawn;
            self.target = None;
        }
    }

    /// Drop the target and timer, returning to the unspawned state
    pub fn reset(&mut self) {
        self.state = SlotState::NeedsSpawn;
        self.target = None;
        self.expiry.cancel();
    }
}

/// Permanent markers left where timed targets expired. At most
/// `max_expiries` accumulate; entries are immutable once recorded and
/// cleared only on session reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplodedMarks {
    positions: Vec<Vec2>,
}

impl ExplodedMarks {
    pub fn record(&mut self, position: Vec2) {
        self.positions.push(position);
    }

    pub fn count(&self) -> u8 {
        self.positions.len() as u8
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created, not started
    Idle,
    /// Started, waiting for the first valid perception frame
    AwaitingPerception,
    /// Ticking
    Running,
    /// Terminated (third expiry or peer-commanded end)
    Ended,
}

/// How a catch relates to the hand that made it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchOutcome {
    /// Matching hand on its own slot
    Correct,
    /// Opposite hand on the timed slot
    WrongHand,
    /// Opposite hand on the periodic slot
    Accidental,
}

impl CatchOutcome {
    /// Classify one of the four hand/slot combinations
    pub fn classify(hand: Side, slot: Side) -> Self {
        if hand == slot {
            CatchOutcome::Correct
        } else if slot == Side::Left {
            CatchOutcome::WrongHand
        } else {
            CatchOutcome::Accidental
        }
    }
}

/// Outcome of one tick, consumed by the session layer for peer reporting
/// and rendering decisions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A slot received a fresh target
    Spawned { slot: Side, position: Vec2 },
    /// The periodic slot moved without being caught
    Relocated { slot: Side, position: Vec2 },
    /// A hand caught a target
    Caught {
        slot: Side,
        hand: Side,
        outcome: CatchOutcome,
    },
    /// A timed target ran out; `count` is the total after recording it
    Expired {
        slot: Side,
        position: Vec2,
        count: u8,
    },
    /// Third expiry reached - the session is over
    SessionEnded,
}

/// Complete per-session state. Single instance, created on game start,
/// reset on game end or restart.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: GameConfig,
    pub phase: SessionPhase,
    /// Tick counter since the session started running
    pub time_ticks: u64,
    /// Timed slot - expires if not caught in time
    pub left: Slot,
    /// Periodic slot - relocates on a fixed interval, never expires
    pub right: Slot,
    /// Relocation schedule for the periodic slot
    pub relocation: PeriodicTimer,
    pub exploded: ExplodedMarks,
    pub expired_count: u8,
    pub stopwatch: Stopwatch,
    /// Whether a pipeline failure was already surfaced this session
    pub perception_fault_reported: bool,
    seed: u64,
    pub(crate) rng: Pcg32,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let tick_hz = config.tick_hz;
        Self {
            config,
            phase: SessionPhase::Idle,
            time_ticks: 0,
            left: Slot::new(Side::Left),
            right: Slot::new(Side::Right),
            relocation: PeriodicTimer::default(),
            exploded: ExplodedMarks::default(),
            expired_count: 0,
            stopwatch: Stopwatch::new(tick_hz),
            perception_fault_reported: false,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The slot for a side
    pub fn slot(&self, side: Side) -> &Slot {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Slot {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Begin the session: arm the relocation schedule, start the stopwatch
    /// and wait for the first valid perception frame
    pub fn begin(&mut self) {
        self.phase = SessionPhase::AwaitingPerception;
        self.relocation
            .start(self.time_ticks, self.config.relocate_interval_ticks());
        self.stopwatch.start();
    }

    /// Cancel every outstanding timer. Safe to call repeatedly and in any
    /// phase - stale callbacks must never survive into a reset session.
    pub fn cancel_all_timers(&mut self) {
        self.left.expiry.cancel();
        self.right.expiry.cancel();
        self.relocation.stop();
    }

    /// Return to the initial state, keeping config and RNG continuity
    pub fn reset(&mut self) {
        self.cancel_all_timers();
        self.phase = SessionPhase::Idle;
        self.time_ticks = 0;
        self.left.reset();
        self.right.reset();
        self.exploded.clear();
        self.expired_count = 0;
        self.stopwatch.stop();
        self.perception_fault_reported = false;
    }

    /// Terminal transition: stop everything and clear state, leaving the
    /// phase at `Ended` so the renderer can show the end screen
    pub fn finish(&mut self) {
        self.reset();
        self.phase = SessionPhase::Ended;
    }

    /// Seed this session was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_classification() {
        assert_eq!(
            CatchOutcome::classify(Side::Left, Side::Left),
            CatchOutcome::Correct
        );
        assert_eq!(
            CatchOutcome::classify(Side::Right, Side::Right),
            CatchOutcome::Correct
        );
        assert_eq!(
            CatchOutcome::classify(Side::Right, Side::Left),
            CatchOutcome::WrongHand
        );
        assert_eq!(
            CatchOutcome::classify(Side::Left, Side::Right),
            CatchOutcome::Accidental
        );
    }

    #[test]
    fn test_unspawned_slot_has_no_position() {
        let slot = Slot::new(Side::Left);
        assert_eq!(slot.state, SlotState::NeedsSpawn);
        assert!(slot.position().is_none());
        assert!(!slot.is_live());
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut session = Session::new(GameConfig::default(), 1);
        session.begin();
        session.time_ticks = 500;
        session.expired_count = 2;
        session.exploded.record(Vec2::new(10.0, 10.0));
        session.left.expiry.arm(600, 1);

        session.reset();

        assert_eq!(session.phase, SessionPhase::Idle);
        assert_eq!(session.time_ticks, 0);
        assert_eq!(session.expired_count, 0);
        assert_eq!(session.exploded.count(), 0);
        assert!(!session.left.expiry.is_armed());
        assert!(!session.relocation.is_running());
        assert!(!session.stopwatch.is_running());
    }

    #[test]
    fn test_finish_is_terminal_but_reusable() {
        let mut session = Session::new(GameConfig::default(), 1);
        session.begin();
        session.finish();
        assert_eq!(session.phase, SessionPhase::Ended);
        // A restart is still possible from the ended phase
        session.reset();
        session.begin();
        assert_eq!(session.phase, SessionPhase::AwaitingPerception);
    }
}
