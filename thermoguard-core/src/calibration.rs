//! Altitude and sea level calibration
//!
//! Two ways to tie the pressure sensor to a location:
//!
//! - [`CalibrationState::set_local_altitude`] only records the height. The
//!   expected standard pressure for that height is then available as
//!   [`CalibrationState::local_normal_pressure_hpa`].
//! - [`CalibrationState::calibrate_for_altitude`] additionally takes the
//!   pressure measured right now and derives the sea level pressure that
//!   explains it. With that reference the sensor works as an altimeter.

use crate::constants::physics::SEA_LEVEL_PRESSURE_HPA;
use crate::constants::thermostat::DEFAULT_ALTITUDE_M;
use crate::metrics::{altitude_from_pressure, local_normal_pressure, sea_level_pressure_from_local};

/// Location of the sensor and its sea level reference
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationState {
    altitude_m: f32,
    sea_level_pressure_hpa: f32,
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self::new(DEFAULT_ALTITUDE_M)
    }
}

impl CalibrationState {
    /// Calibration at `altitude_m` with the standard sea level pressure
    pub const fn new(altitude_m: f32) -> Self {
        Self {
            altitude_m,
            sea_level_pressure_hpa: SEA_LEVEL_PRESSURE_HPA,
        }
    }

    /// Record the local altitude (survey value or GPS)
    ///
    /// Leaves the sea level reference untouched.
    pub fn set_local_altitude(&mut self, altitude_m: f32) {
        self.altitude_m = altitude_m;
    }

    /// Anchor the sensor at a known altitude using a live pressure reading
    pub fn calibrate_for_altitude(&mut self, altitude_m: f32, measured_pressure_hpa: f32) {
        self.altitude_m = altitude_m;
        self.sea_level_pressure_hpa = sea_level_pressure_from_local(measured_pressure_hpa, altitude_m);
    }

    /// Local altitude in meters above sea level
    pub fn altitude_m(&self) -> f32 {
        self.altitude_m
    }

    /// Sea level reference pressure in hPa
    pub fn sea_level_pressure_hpa(&self) -> f32 {
        self.sea_level_pressure_hpa
    }

    /// Standard atmosphere pressure at the recorded altitude
    pub fn local_normal_pressure_hpa(&self) -> f32 {
        local_normal_pressure(self.altitude_m)
    }

    /// Altitude implied by `measured_pressure_hpa` and the sea level reference
    pub fn estimated_altitude_m(&self, measured_pressure_hpa: f32) -> f32 {
        altitude_from_pressure(measured_pressure_hpa, self.sea_level_pressure_hpa)
    }
}
