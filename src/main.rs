//! Tomato Catch entry point
//!
//! Headless demo: drives a session with synthetic hand tracking that
//! drifts toward the current targets, printing peer traffic and outcomes.
//! The real application feeds `frame()` from a pose-estimation pipeline
//! and a canvas renderer instead.

use glam::Vec2;

use tomato_catch::config::GameConfig;
use tomato_catch::error::GameError;
use tomato_catch::game::state::GameEvent;
use tomato_catch::peer::{self, PeerChannel, PeerEvent};
use tomato_catch::perception::{PerceptionResult, TrackedHands};
use tomato_catch::render::NullRenderer;
use tomato_catch::session::GameSession;

/// Peer that prints each outbound message's wire form
struct ConsolePeer;

impl PeerChannel for ConsolePeer {
    fn send(&mut self, event: &PeerEvent) -> Result<(), GameError> {
        println!("peer <- {}", peer::encode(event)?);
        Ok(())
    }
}

/// Synthetic wrists that drift toward given goals at a fixed speed
struct ScriptedHands {
    left: Vec2,
    right: Vec2,
}

impl ScriptedHands {
    fn step_toward(pos: &mut Vec2, goal: Option<Vec2>, speed: f32) {
        if let Some(goal) = goal {
            let delta = goal - *pos;
            let dist = delta.length();
            if dist > speed {
                *pos += delta / dist * speed;
            } else {
                *pos = goal;
            }
        }
    }

    fn advance(&mut self, left_goal: Option<Vec2>, right_goal: Option<Vec2>) -> TrackedHands {
        Self::step_toward(&mut self.left, left_goal, 9.0);
        Self::step_toward(&mut self.right, right_goal, 6.0);
        TrackedHands::both(self.left, self.right)
    }
}

fn main() {
    env_logger::init();

    let config = GameConfig::default();
    let ticks = u64::from(config.tick_hz) * 30;
    let mut game = GameSession::new(config, 0xC47C4, ConsolePeer);
    let mut renderer = NullRenderer;
    let mut hands = ScriptedHands {
        left: Vec2::new(100.0, 500.0),
        right: Vec2::new(700.0, 500.0),
    };

    game.start();
    log::info!("running {ticks} synthetic ticks");

    for _ in 0..ticks {
        let left_goal = game.state().left.position();
        let right_goal = game.state().right.position();
        let tracked = hands.advance(left_goal, right_goal);

        for event in game.frame(PerceptionResult::Detected(tracked), &mut renderer) {
            match event {
                GameEvent::Caught { slot, hand, outcome } => {
                    println!("caught {slot:?} target with {hand:?} hand ({outcome:?})");
                }
                GameEvent::Expired { count, .. } => {
                    println!("target expired, strike {count}");
                }
                GameEvent::SessionEnded => {
                    println!("session over");
                }
                GameEvent::Spawned { .. } | GameEvent::Relocated { .. } => {}
            }
        }
    }

    let (h, m, s) = game.state().stopwatch.hms();
    println!("elapsed {h:02}:{m:02}:{s:02}");
}
