//! Construction-time settings of a thermostat
//!
//! ```rust
//! use thermoguard_core::ThermostatConfig;
//!
//! let config = ThermostatConfig::default()
//!     .with_altitude(405.0)
//!     .with_high_limit(23.0)
//!     .with_refresh_interval(2000)
//!     .enabled(true);
//!
//! assert_eq!(config.thresholds.low(), 20.0);
//! ```

use crate::constants::thermostat::{
    DEFAULT_ALTITUDE_M, DEFAULT_I2C_ADDRESS, DEFAULT_REFRESH_INTERVAL_MS,
};
use crate::threshold::ThresholdConfig;
use crate::time::Millis;

/// Everything the application decides before the first sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThermostatConfig {
    /// I²C address passed to [`crate::SensorSource::begin`]
    pub i2c_address: u8,
    /// Time between two samples in ms
    pub refresh_interval_ms: Millis,
    /// Heating limits
    pub thresholds: ThresholdConfig,
    /// Local altitude in meters above sea level
    pub altitude_m: f32,
    /// Whether ticks are processed right after construction
    pub enabled: bool,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            i2c_address: DEFAULT_I2C_ADDRESS,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            thresholds: ThresholdConfig::default(),
            altitude_m: DEFAULT_ALTITUDE_M,
            enabled: false,
        }
    }
}

impl ThermostatConfig {
    /// Set the sensor I²C address
    pub fn with_address(mut self, address: u8) -> Self {
        self.i2c_address = address;
        self
    }

    /// Set the sampling interval in ms
    pub fn with_refresh_interval(mut self, refresh_interval_ms: Millis) -> Self {
        self.refresh_interval_ms = refresh_interval_ms;
        self
    }

    /// Set the lower limit, the upper limit follows at the current delta
    pub fn with_low_limit(mut self, low: f32) -> Self {
        self.thresholds.set_low(low);
        self
    }

    /// Set the upper limit, the lower limit follows at the current delta
    pub fn with_high_limit(mut self, high: f32) -> Self {
        self.thresholds.set_high(high);
        self
    }

    /// Set the hysteresis, holding the upper limit
    pub fn with_delta(mut self, delta: f32) -> Self {
        self.thresholds.set_delta(delta);
        self
    }

    /// Set the local altitude in meters
    pub fn with_altitude(mut self, altitude_m: f32) -> Self {
        self.altitude_m = altitude_m;
        self
    }

    /// Start with control switched on or off
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
