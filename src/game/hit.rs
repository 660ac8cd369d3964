//! Catch detection
//!
//! A hand catches a target when the tracked wrist falls strictly inside an
//! axis-aligned box centered on the target. The box half-width is a
//! difficulty tunable, independent of the rendered radius. An absent wrist
//! never hits anything.

use glam::Vec2;

/// Test whether a tracked point is inside the catch region of a target.
/// The interval is open on both ends: a point exactly on the boundary is
/// not a hit.
#[inline]
pub fn is_hit(point: Option<Vec2>, target: Vec2, half_width: f32) -> bool {
    let Some(p) = point else {
        return false;
    };
    target.x - half_width < p.x
        && p.x < target.x + half_width
        && target.y - half_width < p.y
        && p.y < target.y + half_width
}
