//! Message contract with the paired remote device
//!
//! The peer connection is a persistent bidirectional channel carrying small
//! JSON messages. Sends are fire-and-forget: a failed send drops the event
//! and never blocks or retries.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Which tomato was delivered to the peer. The wire format is the raw
/// numeric kind used by the remote app: 0 = good, 1 = bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TomatoKind {
    Good,
    Bad,
}

impl From<TomatoKind> for u8 {
    fn from(kind: TomatoKind) -> u8 {
        match kind {
            TomatoKind::Good => 0,
            TomatoKind::Bad => 1,
        }
    }
}

impl TryFrom<u8> for TomatoKind {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(TomatoKind::Good),
            1 => Ok(TomatoKind::Bad),
            other => Err(format!("unknown tomato kind {other}")),
        }
    }
}

/// Outbound events to the paired device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum PeerEvent {
    /// Pairing code for the remote device
    Password { code: String },
    /// A tomato was delivered (caught) - kind 0 good, 1 bad
    GetTomato { kind: TomatoKind },
    /// The session terminated after the final expiry
    EndGame,
    /// The session was restarted
    Restart,
    /// Reply to a `timeRequest` query
    TimeReport { hours: u32, minutes: u8, seconds: u8 },
}

/// Inbound commands from the paired device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PeerCommand {
    AppConnected,
    StartGame,
    /// Must be answered with a `TimeReport`
    TimeRequest,
    EndGame,
}

/// Encode an outbound event to its wire form
pub fn encode(event: &PeerEvent) -> Result<String, GameError> {
    serde_json::to_string(event).map_err(|e| GameError::ChannelUnavailable(e.to_string()))
}

/// Decode an inbound command from its wire form
pub fn decode(raw: &str) -> Result<PeerCommand, GameError> {
    serde_json::from_str(raw).map_err(|e| GameError::ChannelUnavailable(e.to_string()))
}

/// Transport interface to the paired device
pub trait PeerChannel {
    /// Fire-and-forget send. Callers drop the error after logging it.
    fn send(&mut self, event: &PeerEvent) -> Result<(), GameError>;
}

/// Channel that discards every event. Used by tests and unpaired runs.
#[derive(Debug, Default)]
pub struct NullPeer;

impl PeerChannel for NullPeer {
    fn send(&mut self, _event: &PeerEvent) -> Result<(), GameError> {
        Ok(())
    }
}
