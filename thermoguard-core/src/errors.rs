//! Error Types for the Thermostat
//!
//! ## Design Philosophy
//!
//! Errors are small, `Copy` and free of heap data so they can be returned
//! from the control loop of a microcontroller without allocation. Messages
//! are `&'static str` or plain numbers.
//!
//! ## Error Categories
//!
//! ### Startup
//! - `SensorNotFound`: one `begin` attempt failed
//! - `RetriesExhausted`: the bounded retry policy gave up
//!
//! ### Sampling
//! - `SensorReadFailed`: the driver reported a bus or conversion error
//! - `NonFiniteReading`: the driver returned NaN or infinity
//! - `InvalidHumidity`: dew point requested for humidity <= 0 %
//! - `NoReading`: an operation needs a measurement but none was taken yet
//!
//! Driver errors are logged with their `Debug` output before being mapped
//! onto one of these variants, so the core never depends on a particular
//! bus implementation.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use thermoguard_core::ThermostatError;
//!
//! fn on_tick_error(err: ThermostatError) {
//!     match err {
//!         ThermostatError::SensorReadFailed | ThermostatError::NonFiniteReading => {
//!             // Transient - the next scheduled tick samples again
//!         }
//!         ThermostatError::RetriesExhausted { .. } => {
//!             // Fatal at startup - stop and report
//!         }
//!         _ => {}
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for thermostat operations
pub type ThermostatResult<T> = Result<T, ThermostatError>;

/// Thermostat errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ThermostatError {
    /// Sensor did not answer on the given bus address
    #[error("Sensor not found on i2c address {address:#04x}")]
    SensorNotFound {
        /// I²C address that was probed
        address: u8,
    },

    /// Bounded startup retries used up without finding the sensor
    #[error("Sensor not found on i2c address {address:#04x} after {attempts} attempts")]
    RetriesExhausted {
        /// I²C address that was probed
        address: u8,
        /// Number of attempts made
        attempts: u8,
    },

    /// Sensor driver reported a failure while reading
    #[error("Sensor read failed")]
    SensorReadFailed,

    /// Sensor returned NaN or infinity
    #[error("Sensor returned a non-finite value")]
    NonFiniteReading,

    /// Dew point is undefined for non-positive relative humidity
    #[error("Relative humidity {value}% outside dew point domain")]
    InvalidHumidity {
        /// Offending relative humidity in percent
        value: f32,
    },

    /// No measurement has been taken yet
    #[error("No measurement available")]
    NoReading,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ThermostatError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::SensorNotFound { address } =>
                defmt::write!(fmt, "Sensor not found at {=u8:#x}", address),
            Self::RetriesExhausted { address, attempts } =>
                defmt::write!(fmt, "Sensor not found at {=u8:#x} after {} attempts", address, attempts),
            Self::SensorReadFailed =>
                defmt::write!(fmt, "Sensor read failed"),
            Self::NonFiniteReading =>
                defmt::write!(fmt, "Non-finite reading"),
            Self::InvalidHumidity { value } =>
                defmt::write!(fmt, "Humidity {}% outside dew point domain", value),
            Self::NoReading =>
                defmt::write!(fmt, "No measurement available"),
        }
    }
}
