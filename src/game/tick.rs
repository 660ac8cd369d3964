//! Per-tick interaction controller
//!
//! Runs once per perception result, including when perception yields no
//! pose. Within a tick the steps always execute in the same order:
//! spawn, relocate, hit-test (all four hand/slot combinations), expire.
//! That fixed order plus the tick-counter time base makes every frame
//! deterministic for a given seed and input sequence.

use super::hit::is_hit;
use super::spawn::spawn_position;
use super::state::{CatchOutcome, GameEvent, Session, SessionPhase, SlotState, Target};
use crate::Side;
use crate::perception::{PerceptionResult, TrackedHands};

/// Advance the session by one perception tick
pub fn tick(session: &mut Session, perception: &PerceptionResult) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match session.phase {
        SessionPhase::Idle | SessionPhase::Ended => return events,
        SessionPhase::AwaitingPerception => {
            // Explicit readiness gate: the loop proper starts on the first
            // frame the pipeline actually delivers a pose
            if matches!(perception, PerceptionResult::Detected(_)) {
                log::info!("first perception frame received, entering tick loop");
                session.phase = SessionPhase::Running;
            } else {
                return events;
            }
        }
        SessionPhase::Running => {}
    }

    session.time_ticks += 1;
    session.stopwatch.advance();

    if matches!(perception, PerceptionResult::Failed) && !session.perception_fault_reported {
        log::error!("perception pipeline failed; discarding result and keeping targets");
        session.perception_fault_reported = true;
    }

    // Step 1: fill any empty slot
    for side in [Side::Left, Side::Right] {
        spawn_if_needed(session, side, &mut events);
    }

    // Periodic relocation of the right slot, independent of catching
    relocate_if_due(session, &mut events);

    // Steps 2-3: one hit check per hand/slot combination. Slots are
    // disjoint state, so simultaneous catches resolve independently.
    let hands = perception.hands();
    for slot in [Side::Left, Side::Right] {
        for hand in [Side::Left, Side::Right] {
            try_catch(session, hand, slot, &hands, &mut events);
        }
    }

    // Step 4: expiry of the timed slot
    expire_if_due(session, &mut events);

    events
}

/// Spawn a fresh target into an empty slot and, for the timed slot,
/// (re)arm its expiry
fn spawn_if_needed(session: &mut Session, side: Side, events: &mut Vec<GameEvent>) {
    if session.slot(side).state != SlotState::NeedsSpawn {
        return;
    }

    let bounds = session.config.bounds();
    let radius = session.config.target_radius;
    let margin = session.config.spawn_margin;
    let position = spawn_position(&mut session.rng, bounds, radius, margin);
    let deadline = session.time_ticks + session.config.expiry_timeout_ticks();

    let slot = session.slot_mut(side);
    slot.target = Some(Target { position, radius });
    slot.state = SlotState::Live;
    slot.generation = slot.generation.wrapping_add(1);
    if side == Side::Left {
        let generation = slot.generation;
        slot.expiry.arm(deadline, generation);
    }

    log::debug!("spawned {side:?} target at ({:.0}, {:.0})", position.x, position.y);
    events.push(GameEvent::Spawned { slot: side, position });
}

/// Move the periodic slot to a new position when its interval elapses.
/// The target stays live; only its position changes.
fn relocate_if_due(session: &mut Session, events: &mut Vec<GameEvent>) {
    if !session.relocation.poll(session.time_ticks) || !session.right.is_live() {
        return;
    }

    let bounds = session.config.bounds();
    let radius = session.config.target_radius;
    let margin = session.config.spawn_margin;
    let position = spawn_position(&mut session.rng, bounds, radius, margin);
    session.right.target = Some(Target { position, radius });

    events.push(GameEvent::Relocated {
        slot: Side::Right,
        position,
    });
}

/// Test one hand against one slot and resolve the catch if it hits
fn try_catch(
    session: &mut Session,
    hand: Side,
    slot_side: Side,
    hands: &TrackedHands,
    events: &mut Vec<GameEvent>,
) {
    let half_width = session.config.detection_half_width;
    let slot = session.slot_mut(slot_side);
    if !slot.is_live() {
        return;
    }
    let Some(target) = slot.target else {
        return;
    };
    if !is_hit(hands.point(hand), target.position, half_width) {
        return;
    }

    slot.state = SlotState::Caught;
    slot.expiry.cancel();
    slot.resolve();

    let outcome = CatchOutcome::classify(hand, slot_side);
    log::debug!("{hand:?} hand caught {slot_side:?} target ({outcome:?})");
    events.push(GameEvent::Caught {
        slot: slot_side,
        hand,
        outcome,
    });
}

/// Fire the timed slot's expiry if its deadline elapsed and its generation
/// is still current. The third expiry terminates the session.
fn expire_if_due(session: &mut Session, events: &mut Vec<GameEvent>) {
    let now = session.time_ticks;
    let generation = session.left.generation;
    if !session.left.expiry.poll(now, generation) || !session.left.is_live() {
        return;
    }
    let Some(target) = session.left.target else {
        return;
    };

    session.left.state = SlotState::Expired;
    session.exploded.record(target.position);
    session.expired_count += 1;
    let count = session.expired_count;
    log::info!("target expired, strike {count} of {}", session.config.max_expiries);

    events.push(GameEvent::Expired {
        slot: Side::Left,
        position: target.position,
        count,
    });
    session.left.resolve();

    if count >= session.config.max_expiries {
        log::info!("final strike, ending session");
        session.finish();
        events.push(GameEvent::SessionEnded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::Vec2;

    fn running_session() -> Session {
        let mut session = Session::new(GameConfig::default(), 42);
        session.begin();
        session
    }

    /// One tick with both hands absent but a pose detected
    fn idle_tick(session: &mut Session) -> Vec<GameEvent> {
        tick(session, &PerceptionResult::Detected(TrackedHands::default()))
    }

    fn hand_at(side: Side, p: Vec2) -> PerceptionResult {
        let hands = match side {
            Side::Left => TrackedHands::new(Some(p), None),
            Side::Right => TrackedHands::new(None, Some(p)),
        };
        PerceptionResult::Detected(hands)
    }

    #[test]
    fn test_first_tick_spawns_both_slots() {
        let mut session = running_session();
        let events = idle_tick(&mut session);

        assert!(session.left.is_live());
        assert!(session.right.is_live());
        assert!(session.left.expiry.is_armed());
        assert!(!session.right.expiry.is_armed());
        let spawns = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Spawned { .. }))
            .count();
        assert_eq!(spawns, 2);
    }

    #[test]
    fn test_loop_waits_for_first_detection() {
        let mut session = running_session();
        for _ in 0..5 {
            assert!(tick(&mut session, &PerceptionResult::NoDetection).is_empty());
        }
        assert_eq!(session.phase, SessionPhase::AwaitingPerception);
        assert_eq!(session.time_ticks, 0);

        idle_tick(&mut session);
        assert_eq!(session.phase, SessionPhase::Running);
    }

    #[test]
    fn test_catch_transitions_and_cancels_timer() {
        let mut session = running_session();
        idle_tick(&mut session);
        let position = session.left.position().unwrap();

        let events = tick(&mut session, &hand_at(Side::Left, position));
        assert!(events.contains(&GameEvent::Caught {
            slot: Side::Left,
            hand: Side::Left,
            outcome: CatchOutcome::Correct,
        }));
        assert_eq!(session.left.state, SlotState::NeedsSpawn);
        assert!(!session.left.expiry.is_armed());

        // Next tick respawns
        let events = idle_tick(&mut session);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::Spawned { slot: Side::Left, .. })));
        assert!(session.left.is_live());
    }

    #[test]
    fn test_wrong_hand_and_accidental_outcomes() {
        let mut session = running_session();
        idle_tick(&mut session);

        let left_pos = session.left.position().unwrap();
        let events = tick(&mut session, &hand_at(Side::Right, left_pos));
        assert!(events.contains(&GameEvent::Caught {
            slot: Side::Left,
            hand: Side::Right,
            outcome: CatchOutcome::WrongHand,
        }));

        idle_tick(&mut session);
        let right_pos = session.right.position().unwrap();
        let events = tick(&mut session, &hand_at(Side::Left, right_pos));
        assert!(events.contains(&GameEvent::Caught {
            slot: Side::Right,
            hand: Side::Left,
            outcome: CatchOutcome::Accidental,
        }));
    }

    #[test]
    fn test_one_hand_can_catch_both_slots_in_one_tick() {
        let mut session = running_session();
        idle_tick(&mut session);

        // Force both targets onto the same spot
        let p = Vec2::new(200.0, 200.0);
        session.left.target = Some(Target { position: p, radius: 70.0 });
        session.right.target = Some(Target { position: p, radius: 70.0 });

        let events = tick(&mut session, &hand_at(Side::Left, p));
        let catches = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Caught { .. }))
            .count();
        assert_eq!(catches, 2);
    }

    #[test]
    fn test_expiry_records_mark_and_respawns() {
        let mut session = running_session();
        idle_tick(&mut session);
        let position = session.left.position().unwrap();
        let deadline = session.time_ticks + session.config.expiry_timeout_ticks();

        let mut expired = None;
        while session.time_ticks < deadline {
            let events = idle_tick(&mut session);
            if let Some(e) = events
                .iter()
                .find(|e| matches!(e, GameEvent::Expired { .. }))
            {
                expired = Some(*e);
            }
        }

        assert_eq!(
            expired,
            Some(GameEvent::Expired {
                slot: Side::Left,
                position,
                count: 1,
            })
        );
        assert_eq!(session.expired_count, 1);
        assert_eq!(session.exploded.positions(), &[position]);

        // Slot respawns on the following tick with a fresh timer
        idle_tick(&mut session);
        assert!(session.left.is_live());
        assert!(session.left.expiry.is_armed());
    }

    #[test]
    fn test_three_strikes_end_the_session() {
        let mut session = running_session();

        let mut ended = 0;
        for _ in 0..4 * session.config.expiry_timeout_ticks() {
            for event in idle_tick(&mut session) {
                if event == GameEvent::SessionEnded {
                    ended += 1;
                }
            }
            if session.phase == SessionPhase::Ended {
                break;
            }
        }

        assert_eq!(ended, 1);
        assert_eq!(session.phase, SessionPhase::Ended);
        assert!(!session.stopwatch.is_running());
        assert!(!session.left.expiry.is_armed());
        assert!(!session.relocation.is_running());
        // Session state is back to initial
        assert_eq!(session.expired_count, 0);
        assert_eq!(session.exploded.count(), 0);

        // Ticks after the end do nothing
        assert!(idle_tick(&mut session).is_empty());
    }

    #[test]
    fn test_no_detection_never_catches_or_stalls_timers() {
        let mut session = running_session();
        idle_tick(&mut session);
        let position = session.left.position().unwrap();

        for _ in 0..10 {
            let events = tick(&mut session, &PerceptionResult::NoDetection);
            assert!(!events.iter().any(|e| matches!(e, GameEvent::Caught { .. })));
        }

        assert!(session.left.is_live());
        assert_eq!(session.left.position(), Some(position));
        assert!(session.left.expiry.is_armed());
        // The tick counter kept moving while undetected
        assert_eq!(session.time_ticks, 11);
    }

    #[test]
    fn test_pipeline_failure_reported_once_and_ticking_continues() {
        let mut session = running_session();
        idle_tick(&mut session);

        tick(&mut session, &PerceptionResult::Failed);
        assert!(session.perception_fault_reported);
        tick(&mut session, &PerceptionResult::Failed);

        assert!(session.left.is_live());
        assert_eq!(session.time_ticks, 3);
    }

    #[test]
    fn test_periodic_slot_relocates_on_interval() {
        let mut session = running_session();
        idle_tick(&mut session);
        let before = session.right.position().unwrap();
        let interval = session.config.relocate_interval_ticks();

        let mut relocated = false;
        while session.time_ticks <= interval {
            for event in idle_tick(&mut session) {
                if matches!(event, GameEvent::Relocated { slot: Side::Right, .. }) {
                    relocated = true;
                }
            }
        }

        assert!(relocated);
        assert!(session.right.is_live());
        assert_ne!(session.right.position(), Some(before));
    }

    #[test]
    fn test_stale_expiry_after_catch_does_not_fire() {
        let mut session = running_session();
        idle_tick(&mut session);
        let timeout = session.config.expiry_timeout_ticks();

        // Catch just before the deadline, then run past it
        for _ in 0..timeout - 2 {
            idle_tick(&mut session);
        }
        let position = session.left.position().unwrap();
        tick(&mut session, &hand_at(Side::Left, position));

        // Respawn happens; the old deadline passes without an expiry
        for _ in 0..4 {
            let events = idle_tick(&mut session);
            assert!(!events.iter().any(|e| matches!(e, GameEvent::Expired { .. })));
        }
        assert_eq!(session.expired_count, 0);
        assert!(session.left.is_live());
    }
}
