//! Game configuration and difficulty tunables
//!
//! The source material hard-codes radii, detection ranges and strike counts
//! differently across variants; here they are all data, not behavior.

use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::consts;

/// Tunable parameters for one game session.
///
/// The visual radius and the detection half-width are deliberately
/// independent: difficulty is tuned by shrinking the catch region without
/// changing how large the object is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Playfield width in pixels (camera frame width)
    pub width: f32,
    /// Playfield height in pixels (camera frame height)
    pub height: f32,
    /// Rendered target radius
    pub target_radius: f32,
    /// Half-width of the square catch region around a target center
    pub detection_half_width: f32,
    /// Margin kept between a target's rendered extent and the playfield edge
    pub spawn_margin: f32,
    /// Timed-slot lifetime in milliseconds before it explodes
    pub expiry_timeout_ms: u32,
    /// Periodic-slot relocation interval in milliseconds
    pub relocate_interval_ms: u32,
    /// Number of expiries that ends the session
    pub max_expiries: u8,
    /// Perception tick rate (ticks per second)
    pub tick_hz: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: consts::PLAYFIELD_WIDTH,
            height: consts::PLAYFIELD_HEIGHT,
            target_radius: consts::TARGET_RADIUS,
            detection_half_width: consts::DETECTION_HALF_WIDTH,
            spawn_margin: consts::SPAWN_MARGIN,
            expiry_timeout_ms: consts::EXPIRY_TIMEOUT_MS,
            relocate_interval_ms: consts::RELOCATE_INTERVAL_MS,
            max_expiries: consts::MAX_EXPIRIES,
            tick_hz: consts::TICK_HZ,
        }
    }
}

impl GameConfig {
    /// Playfield bounds
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Expiry timeout converted to ticks
    pub fn expiry_timeout_ticks(&self) -> u64 {
        ms_to_ticks(self.expiry_timeout_ms, self.tick_hz)
    }

    /// Relocation interval converted to ticks
    pub fn relocate_interval_ticks(&self) -> u64 {
        ms_to_ticks(self.relocate_interval_ms, self.tick_hz)
    }
}

/// Convert a millisecond duration to whole ticks (rounding up so a timer
/// never fires early)
#[inline]
pub fn ms_to_ticks(ms: u32, tick_hz: u32) -> u64 {
    (u64::from(ms) * u64::from(tick_hz)).div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_to_ticks_rounds_up() {
        assert_eq!(ms_to_ticks(5_000, 60), 300);
        assert_eq!(ms_to_ticks(1, 60), 1);
        assert_eq!(ms_to_ticks(0, 60), 0);
        assert_eq!(ms_to_ticks(1_001, 60), 61);
    }

    #[test]
    fn test_default_config_matches_consolidated_variant() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.target_radius, 70.0);
        assert_eq!(cfg.detection_half_width, 25.0);
        assert_eq!(cfg.max_expiries, 3);
        assert_eq!(cfg.expiry_timeout_ticks(), 300);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let cfg = GameConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
