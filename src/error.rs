//! Error taxonomy for the tick loop and its collaborators
//!
//! None of these are fatal: the tick loop degrades and keeps running.
//! The only terminal path is the third expiry, which is a normal
//! transition, not a fault.

use thiserror::Error;

/// Errors surfaced by the game's external collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No pose this tick - hit tests are skipped, rendering continues
    #[error("no pose detected this tick")]
    PerceptionUnavailable,

    /// The perception pipeline raised an error - the result is discarded
    /// and the previous targets are kept
    #[error("perception pipeline failed: {0}")]
    PerceptionFailed(String),

    /// A peer channel send failed - the event is dropped, never retried
    #[error("peer channel unavailable: {0}")]
    ChannelUnavailable(String),
}
