//! Callback dispatch between control decisions and actuation
//!
//! The controller reports *levels*: every evaluated sample produces
//! `on_data_ready`, followed by `on_high_temp` or `on_low_temp` whenever the
//! temperature is outside the limits. Nothing is remembered between samples,
//! so a handler that switches a relay must itself ignore repeated requests
//! for the state it is already in (see [`crate::actuator::HeatingRelay`]).
//!
//! Each slot holds a boxed closure. State a handler needs (a relay, a
//! counter, a channel) is moved into the closure at registration time; the
//! controller never sees it.
//!
//! ```rust
//! use thermoguard_core::CallbackDispatcher;
//!
//! let mut callbacks = CallbackDispatcher::new();
//! let mut samples = 0u32;
//! callbacks.set_on_data_ready(move |m| {
//!     samples += 1;
//!     let _ = m.reading.temperature_c;
//! });
//! ```

use alloc::boxed::Box;
use core::fmt;

use crate::metrics::{celsius_to_fahrenheit, DerivedMetrics};
use crate::sensor::SensorReading;
use crate::threshold::{TemperatureBand, ThresholdConfig};
use crate::time::Millis;

/// Everything known about one evaluated sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Counter value of the tick that produced the sample
    pub timestamp_ms: Millis,
    /// Raw values as read from the sensor
    pub reading: SensorReading,
    /// Dew point and normal pressure for this reading
    pub derived: DerivedMetrics,
    /// Limits in force when the sample was evaluated
    pub thresholds: ThresholdConfig,
    /// Where the temperature fell relative to the limits
    pub band: TemperatureBand,
}

impl Measurement {
    /// Temperature in °F
    pub fn temperature_f(&self) -> f32 {
        celsius_to_fahrenheit(self.reading.temperature_c)
    }
}

/// Handler invoked with the evaluated sample
pub type Handler = Box<dyn FnMut(&Measurement)>;

/// Three independently replaceable handlers, all no-ops by default
pub struct CallbackDispatcher {
    on_data_ready: Handler,
    on_low_temp: Handler,
    on_high_temp: Handler,
}

/// Default for every slot: does nothing
fn no_op(_: &Measurement) {}

impl Default for CallbackDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallbackDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackDispatcher").finish_non_exhaustive()
    }
}

impl CallbackDispatcher {
    /// Dispatcher with no-op handlers in every slot
    pub fn new() -> Self {
        Self {
            on_data_ready: Box::new(no_op),
            on_low_temp: Box::new(no_op),
            on_high_temp: Box::new(no_op),
        }
    }

    /// Replace the handler called for every evaluated sample
    pub fn set_on_data_ready<F>(&mut self, handler: F)
    where
        F: FnMut(&Measurement) + 'static,
    {
        self.on_data_ready = Box::new(handler);
    }

    /// Replace the handler called while the temperature is below the lower limit
    pub fn set_on_low_temp<F>(&mut self, handler: F)
    where
        F: FnMut(&Measurement) + 'static,
    {
        self.on_low_temp = Box::new(handler);
    }

    /// Replace the handler called while the temperature is at or above the upper limit
    pub fn set_on_high_temp<F>(&mut self, handler: F)
    where
        F: FnMut(&Measurement) + 'static,
    {
        self.on_high_temp = Box::new(handler);
    }

    /// Put all three slots back to no-ops
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Run the handlers for one sample, data first, then at most one limit handler
    pub fn dispatch(&mut self, measurement: &Measurement) {
        (self.on_data_ready)(measurement);

        match measurement.band {
            TemperatureBand::AboveHigh => {
                log::debug!("High limit reached: {} >= {}", measurement.reading.temperature_c, measurement.thresholds.high());
                (self.on_high_temp)(measurement);
            }
            TemperatureBand::BelowLow => {
                log::debug!("Low limit reached: {} < {}", measurement.reading.temperature_c, measurement.thresholds.low());
                (self.on_low_temp)(measurement);
            }
            TemperatureBand::InRange => {}
        }
    }
}
