//! Temperature limits with a coupled hysteresis
//!
//! The three values are tied by `high = low + delta`. Whichever one is set
//! last is kept as given and one of the others is recomputed:
//!
//! ```text
//! set_low(l)    low = l        high = low + delta
//! set_high(h)   high = h       low  = high - delta
//! set_delta(d)  delta = d      low  = high - delta   (high held)
//! ```
//!
//! Ordering is not validated. A negative delta yields `low > high`, the band
//! `InRange` becomes unreachable and the controller reports only the two
//! outer bands. That is a configuration mistake, not a runtime fault.

use crate::constants::thermostat::{DEFAULT_DELTA_C, DEFAULT_HIGH_LIMIT_C, DEFAULT_LOW_LIMIT_C};

/// Where a temperature lies relative to the limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureBand {
    /// Strictly below the lower limit
    BelowLow,
    /// Between the limits
    InRange,
    /// At or above the upper limit
    AboveHigh,
}

/// Low and high temperature limits in °C
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdConfig {
    low: f32,
    high: f32,
    delta: f32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_LIMIT_C,
            high: DEFAULT_HIGH_LIMIT_C,
            delta: DEFAULT_DELTA_C,
        }
    }
}

impl ThresholdConfig {
    /// Limits from a lower bound and a hysteresis
    pub fn new(low: f32, delta: f32) -> Self {
        Self { low, high: low + delta, delta }
    }

    /// Set the lower limit, the upper one becomes `low + delta`
    pub fn set_low(&mut self, low: f32) {
        self.low = low;
        self.high = self.low + self.delta;
    }

    /// Set the upper limit, the lower one becomes `high - delta`
    pub fn set_high(&mut self, high: f32) {
        self.high = high;
        self.low = self.high - self.delta;
    }

    /// Set the hysteresis, the upper limit is held
    pub fn set_delta(&mut self, delta: f32) {
        self.delta = delta;
        self.low = self.high - self.delta;
    }

    /// Lower limit in °C
    pub fn low(&self) -> f32 {
        self.low
    }

    /// Upper limit in °C
    pub fn high(&self) -> f32 {
        self.high
    }

    /// Hysteresis in °C
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Classify a temperature, the upper limit wins when the limits are inverted
    pub fn classify(&self, temperature_c: f32) -> TemperatureBand {
        if temperature_c >= self.high {
            TemperatureBand::AboveHigh
        } else if temperature_c < self.low {
            TemperatureBand::BelowLow
        } else {
            TemperatureBand::InRange
        }
    }
}
