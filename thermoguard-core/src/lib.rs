//! Core thermostat engine for ThermoGuard
//!
//! Samples a combined temperature/humidity/pressure sensor (BME280 class),
//! derives dew point and barometric quantities, and runs an on/off
//! threshold controller that reports to caller supplied handlers.
//!
//! Key constraints:
//! - Runs on a microcontroller main loop, single threaded
//! - No allocation after setup (handlers are boxed once at registration)
//! - Sensor, clock, delay and relay pin are traits, so the whole controller
//!   runs in host tests
//!
//! ```no_run
//! use thermoguard_core::{SensorSource, Thermostat, ThermostatConfig};
//!
//! # struct Bme280;
//! # impl SensorSource for Bme280 {
//! #     type Error = ();
//! #     fn begin(&mut self, _: u8) -> Result<(), ()> { Ok(()) }
//! #     fn read_temperature_c(&mut self) -> Result<f32, ()> { Ok(20.0) }
//! #     fn read_humidity_pct(&mut self) -> Result<f32, ()> { Ok(45.0) }
//! #     fn read_pressure_pa(&mut self) -> Result<f32, ()> { Ok(96_500.0) }
//! # }
//! # fn millis() -> u32 { 0 }
//! let config = ThermostatConfig::default().with_high_limit(23.0).enabled(true);
//! let mut thermostat = Thermostat::with_config(Bme280, config);
//!
//! thermostat.on_low_temp(|_| { /* heating on */ });
//! thermostat.on_high_temp(|_| { /* heating off */ });
//!
//! loop {
//!     if let Err(_) = thermostat.tick(millis()) {
//!         // Sensor hiccup, retried at the next interval
//!     }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod actuator;
pub mod calibration;
pub mod callbacks;
pub mod config;
pub mod console;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod metrics;
pub mod report;
pub mod scheduler;
pub mod sensor;
pub mod startup;
pub mod threshold;
pub mod time;

// Public API
pub use actuator::{install_heating, HeatingRelay};
pub use calibration::CalibrationState;
pub use callbacks::{CallbackDispatcher, Measurement};
pub use config::ThermostatConfig;
pub use controller::Thermostat;
pub use errors::{ThermostatError, ThermostatResult};
pub use metrics::{
    altitude_from_pressure, celsius_to_fahrenheit, dew_point, local_normal_pressure,
    sea_level_pressure_from_local, try_dew_point, DerivedMetrics,
};
pub use scheduler::{ControllerState, Scheduler};
pub use sensor::{SensorReading, SensorSource};
pub use startup::RetryPolicy;
pub use threshold::{TemperatureBand, ThresholdConfig};
pub use time::{FixedTime, Millis, TimeSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
