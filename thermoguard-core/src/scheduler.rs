//! Sampling gate
//!
//! A tick is due once at least `refresh_interval_ms` have elapsed since the
//! last fired tick. After firing, the reference moves to the firing time,
//! not to `last + interval`: a long stall produces a single catch-up tick
//! and the cadence restarts from there.
//!
//! The elapsed-time test is used because it cannot be skipped. Testing
//! `now % interval == 0` only works if the loop happens to poll on the exact
//! millisecond, which a loop busy with console input or a slow sensor
//! transaction will miss.

use crate::time::{elapsed_ms, Millis};

/// Gate that turns a polled clock into sampling ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    refresh_interval_ms: Millis,
    last_sample_ms: Millis,
}

impl Scheduler {
    /// Scheduler whose clock reference is 0, the value of a counter at boot
    pub const fn new(refresh_interval_ms: Millis) -> Self {
        Self {
            refresh_interval_ms,
            last_sample_ms: 0,
        }
    }

    /// Minimum time between two ticks in ms
    pub fn refresh_interval_ms(&self) -> Millis {
        self.refresh_interval_ms
    }

    /// Change the interval, the reference time is kept
    pub fn set_refresh_interval(&mut self, refresh_interval_ms: Millis) {
        self.refresh_interval_ms = refresh_interval_ms;
    }

    /// Counter value of the last fired tick
    pub fn last_sample_ms(&self) -> Millis {
        self.last_sample_ms
    }

    /// True when a tick should fire at `now`
    pub fn is_due(&self, now: Millis) -> bool {
        elapsed_ms(self.last_sample_ms, now) >= self.refresh_interval_ms
    }

    /// Record that a tick fired at `now`
    pub fn mark(&mut self, now: Millis) {
        self.last_sample_ms = now;
    }

    /// Check and record in one step, returns whether the tick fires
    pub fn poll(&mut self, now: Millis) -> bool {
        if self.is_due(now) {
            self.mark(now);
            true
        } else {
            false
        }
    }
}

/// Snapshot of the scheduling state of a thermostat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerState {
    /// Counter value of the last fired tick
    pub last_sample_time_ms: Millis,
    /// Minimum time between two ticks in ms
    pub refresh_interval_ms: Millis,
    /// Whether ticks are processed
    pub enabled: bool,
}
