//! Thermostat Defaults
//!
//! Factory settings of the controller. Every value can be changed at runtime
//! through the setters on [`crate::Thermostat`] or up front through
//! [`crate::ThermostatConfig`].

/// Default I²C address of the BME280 (SDO pulled low).
///
/// Source: Bosch BME280 datasheet, section 6.2
pub const DEFAULT_I2C_ADDRESS: u8 = 0x76;

/// Lower temperature limit (°C).
///
/// Heating switches on below this value.
pub const DEFAULT_LOW_LIMIT_C: f32 = 18.0;

/// Upper temperature limit (°C).
///
/// Heating switches off at or above this value.
pub const DEFAULT_HIGH_LIMIT_C: f32 = 21.0;

/// Hysteresis between the two limits (°C).
///
/// Always equal to `DEFAULT_HIGH_LIMIT_C - DEFAULT_LOW_LIMIT_C`.
pub const DEFAULT_DELTA_C: f32 = DEFAULT_HIGH_LIMIT_C - DEFAULT_LOW_LIMIT_C;

/// Interval between two samples (ms).
///
/// A BME280 in forced mode needs well under 100 ms per conversion, so a few
/// seconds leaves the bus mostly idle.
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 5000;

/// Local altitude assumed until the application sets one (m above sea level).
pub const DEFAULT_ALTITUDE_M: f32 = 400.0;

/// Startup attempts before the sensor is declared missing.
pub const DEFAULT_STARTUP_ATTEMPTS: u8 = 10;

/// Pause between two startup attempts (ms).
pub const DEFAULT_STARTUP_RETRY_DELAY_MS: u32 = 1000;
