//! Sensor port - abstraction for the combined T/RH/p sensor
//!
//! The thermostat only needs three numbers per sample. Everything about the
//! bus (I²C transactions, compensation registers, oversampling) stays behind
//! [`SensorSource`], so the controller can be driven by a BME280 driver on a
//! board and by a scripted fake in tests.

use crate::constants::physics::PA_PER_HPA;
use crate::errors::{ThermostatError, ThermostatResult};

/// One sample of the sensor, pressure already converted to hPa
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorReading {
    /// Air temperature in °C
    pub temperature_c: f32,
    /// Relative humidity in percent (0 - 100)
    pub rel_humidity_pct: f32,
    /// Local (station) air pressure in hPa
    pub pressure_hpa: f32,
}

impl SensorReading {
    /// Reading with pressure already in hPa
    pub const fn new(temperature_c: f32, rel_humidity_pct: f32, pressure_hpa: f32) -> Self {
        Self { temperature_c, rel_humidity_pct, pressure_hpa }
    }

    /// Build a reading from raw driver units (pressure in Pa)
    pub fn from_raw(temperature_c: f32, rel_humidity_pct: f32, pressure_pa: f32) -> Self {
        Self::new(temperature_c, rel_humidity_pct, pressure_pa / PA_PER_HPA)
    }

    /// Reject NaN and infinity before they reach threshold comparisons
    pub fn check_finite(self) -> ThermostatResult<Self> {
        if self.temperature_c.is_finite()
            && self.rel_humidity_pct.is_finite()
            && self.pressure_hpa.is_finite()
        {
            Ok(self)
        } else {
            Err(ThermostatError::NonFiniteReading)
        }
    }
}

/// Port for the physical sensor
///
/// # Example Implementation
///
/// ```ignore
/// struct Bme280Source<I2C> {
///     driver: bme280::i2c::BME280<I2C>,
///     delay: Delay,
/// }
///
/// impl<I2C: I2c> SensorSource for Bme280Source<I2C> {
///     type Error = bme280::Error<I2C::Error>;
///
///     fn begin(&mut self, _address: u8) -> Result<(), Self::Error> {
///         self.driver.init(&mut self.delay)
///     }
///     // ...
/// }
/// ```
pub trait SensorSource {
    /// Driver specific failure, only ever logged by the core
    type Error: core::fmt::Debug;

    /// Probe and configure the sensor on the given bus address
    fn begin(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Air temperature in °C
    fn read_temperature_c(&mut self) -> Result<f32, Self::Error>;

    /// Relative humidity in percent
    fn read_humidity_pct(&mut self) -> Result<f32, Self::Error>;

    /// Station pressure in Pa
    fn read_pressure_pa(&mut self) -> Result<f32, Self::Error>;

    /// Read all three quantities into one reading
    ///
    /// Temperature is read first because the BME280 derives its humidity and
    /// pressure compensation from the last temperature conversion.
    fn read(&mut self) -> Result<SensorReading, Self::Error> {
        let temperature_c = self.read_temperature_c()?;
        let rel_humidity_pct = self.read_humidity_pct()?;
        let pressure_pa = self.read_pressure_pa()?;
        Ok(SensorReading::from_raw(temperature_c, rel_humidity_pct, pressure_pa))
    }
}
