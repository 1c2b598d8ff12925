//! Derived Meteorological Quantities
//!
//! ## Dew Point
//!
//! The dew point is the temperature at which the air would be saturated at
//! its current moisture content. It follows from temperature and relative
//! humidity via the Magnus approximation:
//!
//! ```text
//! k  = ln(RH/100) + a·T / (b + T)
//! Td = b·k / (a - k)
//!
//! a = 17.62, b = 243.12 °C
//! ```
//!
//! `ln` is undefined for RH <= 0 %, so [`try_dew_point`] guards the domain
//! and [`dew_point`] is left as the raw formula.
//!
//! ## Barometric Formula
//!
//! Pressure at altitude `h` in the standard atmosphere:
//!
//! ```text
//! p(h) = P0 · (1 - h/H0)^K0
//!
//! P0 = 1013.25 hPa, H0 = T0/gradT = 44330 m, K0 = 5.255
//! ```
//!
//! Solved for `P0` it turns a measured station pressure and a known altitude
//! into the equivalent sea level pressure, which is what calibrating an
//! altimeter means. Solved for `h` it turns a pressure into an altitude.

use libm::{logf, powf};

use crate::calibration::CalibrationState;
use crate::constants::physics::{
    BAROMETRIC_EXPONENT, BAROMETRIC_REFERENCE_HEIGHT_M, FAHRENHEIT_OFFSET,
    FAHRENHEIT_PER_CELSIUS, MAGNUS_A, MAGNUS_B_C, RELATIVE_HUMIDITY_MAX_PCT,
    SEA_LEVEL_PRESSURE_HPA,
};
use crate::errors::{ThermostatError, ThermostatResult};
use crate::sensor::SensorReading;

/// Quantities computed from a reading and the calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedMetrics {
    /// Dew point in °C, `None` when humidity was outside the Magnus domain
    pub dew_point_c: Option<f32>,
    /// Standard atmosphere pressure at the configured altitude in hPa
    pub local_normal_pressure_hpa: f32,
}

impl DerivedMetrics {
    /// Recompute everything that depends on `reading` and `calibration`
    pub fn compute(reading: &SensorReading, calibration: &CalibrationState) -> Self {
        let dew_point_c = match try_dew_point(reading.temperature_c, reading.rel_humidity_pct) {
            Ok(dp) => Some(dp),
            Err(err) => {
                log::warn!("Dew point skipped: {}", err);
                None
            }
        };

        Self {
            dew_point_c,
            local_normal_pressure_hpa: calibration.local_normal_pressure_hpa(),
        }
    }
}

/// Magnus dew point in °C
///
/// Non-finite for `rel_humidity_pct <= 0`; use [`try_dew_point`] on live data.
pub fn dew_point(temp_c: f32, rel_humidity_pct: f32) -> f32 {
    let k = logf(rel_humidity_pct / RELATIVE_HUMIDITY_MAX_PCT)
        + MAGNUS_A * temp_c / (MAGNUS_B_C + temp_c);
    MAGNUS_B_C * k / (MAGNUS_A - k)
}

/// Dew point with the humidity domain checked
pub fn try_dew_point(temp_c: f32, rel_humidity_pct: f32) -> ThermostatResult<f32> {
    // Written so that NaN humidity also fails
    if !(rel_humidity_pct > 0.0) {
        return Err(ThermostatError::InvalidHumidity { value: rel_humidity_pct });
    }

    let dp = dew_point(temp_c, rel_humidity_pct);
    if dp.is_finite() {
        Ok(dp)
    } else {
        Err(ThermostatError::NonFiniteReading)
    }
}

/// `(1 - h/H0)^K0`, the pressure ratio of the standard atmosphere at `altitude_m`
#[inline]
fn pressure_ratio(altitude_m: f32) -> f32 {
    powf(1.0 - altitude_m / BAROMETRIC_REFERENCE_HEIGHT_M, BAROMETRIC_EXPONENT)
}

/// Standard atmosphere pressure at `altitude_m`, referenced to 1013.25 hPa
pub fn local_normal_pressure(altitude_m: f32) -> f32 {
    SEA_LEVEL_PRESSURE_HPA * pressure_ratio(altitude_m)
}

/// Sea level equivalent of a pressure measured at `altitude_m`
pub fn sea_level_pressure_from_local(measured_pressure_hpa: f32, altitude_m: f32) -> f32 {
    measured_pressure_hpa / pressure_ratio(altitude_m)
}

/// Altitude at which the standard atmosphere anchored at `sea_level_pressure_hpa`
/// has pressure `measured_pressure_hpa`
pub fn altitude_from_pressure(measured_pressure_hpa: f32, sea_level_pressure_hpa: f32) -> f32 {
    BAROMETRIC_REFERENCE_HEIGHT_M
        * (1.0 - powf(measured_pressure_hpa / sea_level_pressure_hpa, 1.0 / BAROMETRIC_EXPONENT))
}

/// °C to °F
#[inline]
pub fn celsius_to_fahrenheit(temp_c: f32) -> f32 {
    temp_c * FAHRENHEIT_PER_CELSIUS + FAHRENHEIT_OFFSET
}
