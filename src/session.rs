//! Session lifecycle wiring
//!
//! `GameSession` owns the deterministic core plus the peer channel and
//! translates tick outcomes into draw calls and peer events. Peer sends
//! are fire-and-forget: a failed send is logged and dropped, never
//! retried, and never blocks the tick loop.

use crate::Side;
use crate::config::GameConfig;
use crate::game::state::{GameEvent, Session, SessionPhase};
use crate::game::tick::tick;
use crate::peer::{PeerChannel, PeerCommand, PeerEvent, TomatoKind};
use crate::perception::PerceptionResult;
use crate::render::{ObjectKind, Renderer};

/// A running game bound to a paired remote device
pub struct GameSession<P: PeerChannel> {
    state: Session,
    peer: P,
}

impl<P: PeerChannel> GameSession<P> {
    pub fn new(config: GameConfig, seed: u64, peer: P) -> Self {
        Self {
            state: Session::new(config, seed),
            peer,
        }
    }

    /// Read access to the underlying state (rendering, tests, HUD)
    pub fn state(&self) -> &Session {
        &self.state
    }

    /// Start the session. Ticking begins once the first valid perception
    /// frame arrives.
    pub fn start(&mut self) {
        if self.state.phase != SessionPhase::Idle {
            log::warn!("start() on a non-idle session, ignoring");
            return;
        }
        log::info!("session starting (seed {})", self.state.seed());
        self.state.begin();
    }

    /// Tear down and start over. Cancels every outstanding timer before
    /// resetting so no stale callback can touch the fresh state.
    pub fn restart(&mut self) {
        log::info!("session restarting");
        self.state.reset();
        self.send(PeerEvent::Restart);
        self.state.begin();
    }

    /// Terminate the session (peer-commanded or local). Idempotent:
    /// ending an already-ended session cancels nothing twice and emits
    /// nothing.
    pub fn on_end_game(&mut self) {
        if self.state.phase == SessionPhase::Ended || self.state.phase == SessionPhase::Idle {
            return;
        }
        log::info!("session ended by request");
        self.state.finish();
    }

    /// Handle an inbound message from the paired device
    pub fn handle_peer(&mut self, command: PeerCommand) {
        match command {
            PeerCommand::AppConnected => log::info!("peer app connected"),
            PeerCommand::StartGame => self.start(),
            PeerCommand::TimeRequest => {
                let (hours, minutes, seconds) = self.state.stopwatch.hms();
                self.send(PeerEvent::TimeReport {
                    hours,
                    minutes,
                    seconds,
                });
            }
            PeerCommand::EndGame => self.on_end_game(),
        }
    }

    /// Run one perception tick: advance the state machine, report catch
    /// and end-of-game outcomes to the peer, then redraw.
    pub fn frame(&mut self, perception: PerceptionResult, renderer: &mut dyn Renderer) -> Vec<GameEvent> {
        let events = tick(&mut self.state, &perception);

        for event in &events {
            match *event {
                GameEvent::Caught { slot, .. } => {
                    // Any catch of the periodic slot delivers a good tomato,
                    // any catch of the timed slot a bad one
                    let kind = match slot {
                        Side::Right => TomatoKind::Good,
                        Side::Left => TomatoKind::Bad,
                    };
                    self.send(PeerEvent::GetTomato { kind });
                }
                GameEvent::SessionEnded => self.send(PeerEvent::EndGame),
                GameEvent::Spawned { .. }
                | GameEvent::Relocated { .. }
                | GameEvent::Expired { .. } => {}
            }
        }

        self.render(&perception, renderer);
        events
    }

    /// Draw every live target, all exploded markers and the tracked hand
    /// positions. Runs every tick regardless of catch outcome.
    fn render(&self, perception: &PerceptionResult, renderer: &mut dyn Renderer) {
        if self.state.phase == SessionPhase::Ended {
            renderer.show_end_screen();
            return;
        }

        renderer.clear();

        for (side, kind) in [
            (Side::Left, ObjectKind::TimedTarget),
            (Side::Right, ObjectKind::PeriodicTarget),
        ] {
            let slot = self.state.slot(side);
            if slot.is_live()
                && let Some(target) = slot.target
            {
                renderer.draw_object(target.position, target.radius, kind);
            }
        }

        for &position in self.state.exploded.positions() {
            renderer.draw_object(position, self.state.config.target_radius, ObjectKind::Exploded);
        }

        let hands = perception.hands();
        for side in [Side::Left, Side::Right] {
            if let Some(position) = hands.point(side) {
                renderer.draw_hand_marker(position, side);
            }
        }
    }

    /// Fire-and-forget peer send
    fn send(&mut self, event: PeerEvent) {
        if let Err(err) = self.peer.send(&event) {
            log::warn!("dropping peer event {event:?}: {err}");
        }
    }
}
