//! Cancellable tick-deadline timers
//!
//! Everything here resolves inside the tick loop, so "timers" are deadlines
//! against the session tick counter rather than scheduled callbacks. The
//! expiry timer is re-armed every time a slot goes live, which is the
//! classic stale-fire hazard: a deadline armed for a previous occupant must
//! never expire the current one. Each arm therefore records the slot
//! generation it was armed for, and a fire only counts if that generation
//! is still current.

use serde::{Deserialize, Serialize};

/// One-shot, cancellable deadline with a generation guard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryTimer {
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Armed {
    deadline: u64,
    generation: u32,
}

impl ExpiryTimer {
    /// Arm (or re-arm) for the given deadline tick and slot generation
    pub fn arm(&mut self, deadline: u64, generation: u32) {
        self.armed = Some(Armed {
            deadline,
            generation,
        });
    }

    /// Cancel the pending deadline. Cancelling an unarmed or already-fired
    /// timer is a no-op.
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Check whether the timer fires at `now` for the slot's current
    /// generation. A deadline reached with a stale generation is consumed
    /// silently - it belongs to a target that no longer exists.
    pub fn poll(&mut self, now: u64, current_generation: u32) -> bool {
        match self.armed {
            Some(armed) if now >= armed.deadline => {
                self.armed = None;
                armed.generation == current_generation
            }
            _ => false,
        }
    }
}

/// Repeating tick-interval timer, re-armed on every fire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicTimer {
    next: Option<u64>,
    every: u64,
}

impl PeriodicTimer {
    /// Start firing every `every` ticks, first fire at `now + every`
    pub fn start(&mut self, now: u64, every: u64) {
        self.every = every.max(1);
        self.next = Some(now + self.every);
    }

    /// Stop firing. Idempotent.
    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Check whether the interval elapses at `now`, re-arming if so
    pub fn poll(&mut self, now: u64) -> bool {
        match self.next {
            Some(next) if now >= next => {
                self.next = Some(now + self.every);
                true
            }
            _ => false,
        }
    }
}
