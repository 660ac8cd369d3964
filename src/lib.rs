//! Tomato Catch - a hand-tracked two-target catch game core
//!
//! Core modules:
//! - `game`: Deterministic interaction state machine (spawn, hit, expiry, tick)
//! - `session`: Session lifecycle wiring (peer channel, stopwatch, rendering)
//! - `peer`: Message contract with the paired remote device
//! - `perception`: Per-tick hand tracking input contract
//! - `render`: Draw-call contract for the canvas layer

pub mod config;
pub mod error;
pub mod game;
pub mod peer;
pub mod perception;
pub mod render;
pub mod session;
pub mod stopwatch;

pub use config::GameConfig;
pub use error::GameError;
pub use session::GameSession;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default tick rate - the perception loop is bound to display refresh
    pub const TICK_HZ: u32 = 60;

    /// Playfield defaults (camera frame size)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Rendered target radius (visual only, not used for hit testing)
    pub const TARGET_RADIUS: f32 = 70.0;
    /// Half-width of the square catch region around a target center
    pub const DETECTION_HALF_WIDTH: f32 = 25.0;
    /// Spawn margin keeping the rendered extent off the playfield edge
    pub const SPAWN_MARGIN: f32 = 10.0;

    /// Timed (left) slot lifetime before it explodes
    pub const EXPIRY_TIMEOUT_MS: u32 = 5_000;
    /// Periodic (right) slot relocation interval
    pub const RELOCATE_INTERVAL_MS: u32 = 5_000;
    /// Expiries before the session terminates
    pub const MAX_EXPIRIES: u8 = 3;
}

/// A hand-side or slot-side label. Slots and hands share the same
/// left/right naming so the four hit checks can be driven by one function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The opposite side
    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Playfield bounds in pixel space, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a point lies inside the playfield
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}
