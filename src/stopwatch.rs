//! Session stopwatch
//!
//! Counts whole elapsed seconds while running. Started on session start,
//! stopped and cleared on session end or restart. The peer can query the
//! current reading at any time (`timeRequest`).

use serde::{Deserialize, Serialize};

/// Whole-second session timer driven by the tick loop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    running: bool,
    /// Ticks accumulated while running
    ticks: u64,
    /// Tick rate used to derive seconds
    tick_hz: u32,
}

impl Stopwatch {
    pub fn new(tick_hz: u32) -> Self {
        Self {
            running: false,
            ticks: 0,
            tick_hz: tick_hz.max(1),
        }
    }

    /// Start (or resume) counting
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop counting and clear the elapsed time
    pub fn stop(&mut self) {
        self.running = false;
        self.ticks = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by one tick. No-op while stopped.
    pub fn advance(&mut self) {
        if self.running {
            self.ticks += 1;
        }
    }

    /// Whole elapsed seconds
    pub fn elapsed_secs(&self) -> u64 {
        self.ticks / u64::from(self.tick_hz)
    }

    /// Elapsed time split into (hours, minutes, seconds) for display and
    /// for the peer's time query
    pub fn hms(&self) -> (u32, u8, u8) {
        let total = self.elapsed_secs();
        let hours = (total / 3600) as u32;
        let minutes = ((total % 3600) / 60) as u8;
        let seconds = (total % 60) as u8;
        (hours, minutes, seconds)
    }
}
