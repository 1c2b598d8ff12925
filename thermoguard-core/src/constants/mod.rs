//! Constants for ThermoGuard Core
//!
//! Centralized numeric values used throughout the crate. Names carry their
//! unit as a suffix.
//!
//! ## Organization
//!
//! - **Physics**: Magnus and barometric coefficients, unit factors
//! - **Thermostat**: Factory defaults of the controller

/// Physical constants of the dew point and barometric formulas.
pub mod physics;

/// Factory defaults for limits, intervals and startup behavior.
pub mod thermostat;

// Re-export commonly used constants for convenience
pub use physics::{SEA_LEVEL_PRESSURE_HPA, BAROMETRIC_EXPONENT, BAROMETRIC_REFERENCE_HEIGHT_M};

pub use thermostat::{
    DEFAULT_I2C_ADDRESS, DEFAULT_LOW_LIMIT_C, DEFAULT_HIGH_LIMIT_C, DEFAULT_DELTA_C,
    DEFAULT_REFRESH_INTERVAL_MS, DEFAULT_ALTITUDE_M, DEFAULT_STARTUP_ATTEMPTS,
    DEFAULT_STARTUP_RETRY_DELAY_MS,
};
