//! Target spawn placement
//!
//! Positions are drawn uniformly inside the playfield with a margin so the
//! rendered extent of the object never touches the edge. The RNG is
//! injected so placement is reproducible under a fixed seed.

use glam::Vec2;
use rand::Rng;

use crate::Bounds;

/// Produce a spawn position for a target of the given radius.
///
/// Each axis draws `uniform(margin, extent - 2*radius - margin) + radius`,
/// which keeps the full circle inside `[margin, extent - margin]`.
pub fn spawn_position<R: Rng>(rng: &mut R, bounds: Bounds, radius: f32, margin: f32) -> Vec2 {
    let x = rng.random_range(margin..bounds.width - radius * 2.0 - margin) + radius;
    let y = rng.random_range(margin..bounds.height - radius * 2.0 - margin) + radius;
    Vec2::new(x, y)
}
