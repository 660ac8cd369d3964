//! Per-tick hand tracking input contract
//!
//! The perception collaborator (pose estimation over camera frames) reports
//! wrist positions in playfield pixel coordinates once per tick. A hand may
//! be absent when no pose was found or the keypoint confidence was too low;
//! an absent hand can never register a hit.

use glam::Vec2;

use crate::Side;

/// Wrist positions for one tick. Either hand may be missing independently.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackedHands {
    pub left: Option<Vec2>,
    pub right: Option<Vec2>,
}

impl TrackedHands {
    pub fn new(left: Option<Vec2>, right: Option<Vec2>) -> Self {
        Self { left, right }
    }

    /// Both wrists present
    pub fn both(left: Vec2, right: Vec2) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }

    /// The tracked point for one hand
    #[inline]
    pub fn point(&self, side: Side) -> Option<Vec2> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// What the perception pipeline produced this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerceptionResult {
    /// A pose was estimated; individual hands may still be absent
    Detected(TrackedHands),
    /// No pose in frame - not an error, hit tests are skipped
    NoDetection,
    /// The pipeline raised - the result is discarded, ticking continues
    Failed,
}

impl PerceptionResult {
    /// Hands to hit-test this tick. `NoDetection` and `Failed` both yield
    /// no testable points; they differ only in operator-facing reporting.
    pub fn hands(&self) -> TrackedHands {
        match self {
            PerceptionResult::Detected(hands) => *hands,
            PerceptionResult::NoDetection | PerceptionResult::Failed => TrackedHands::default(),
        }
    }
}
