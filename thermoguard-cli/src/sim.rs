//! Simulated BME280 in a heated room
//!
//! The relay pin drives a radiator flag shared with the room model, so the
//! thermostat closes a real loop: heating raises the temperature, losses to
//! the outside pull it back down.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;
use std::time::Instant;

use embedded_hal::digital::{ErrorType, OutputPin};
use thermoguard_core::{local_normal_pressure, SensorSource};

/// Address the simulated sensor answers on
pub const SIMULATED_ADDRESS: u8 = 0x76;

/// Radiator warming rate (°C/s)
const HEATING_RATE_C_PER_S: f32 = 0.25;

/// Fraction of the indoor/outdoor difference lost per second
const LOSS_PER_S: f32 = 0.01;

/// Outside temperature (°C)
const OUTSIDE_C: f32 = 5.0;

/// Water vapor content held constant, expressed as the dew point (°C)
const ROOM_DEW_POINT_C: f32 = 8.0;

/// Weather offset on top of the standard atmosphere (hPa)
const WEATHER_OFFSET_HPA: f32 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    NoDevice(u8),
    NotStarted,
}

/// Room model behind the sensor interface
pub struct SimulatedRoom {
    temperature_c: f32,
    altitude_m: f32,
    radiator: Rc<Cell<bool>>,
    last_update: Instant,
    started: bool,
}

impl SimulatedRoom {
    pub fn new(temperature_c: f32, altitude_m: f32, radiator: Rc<Cell<bool>>) -> Self {
        Self {
            temperature_c,
            altitude_m,
            radiator,
            last_update: Instant::now(),
            started: false,
        }
    }

    fn advance(&mut self) {
        let dt = self.last_update.elapsed().as_secs_f32();
        self.last_update = Instant::now();

        if self.radiator.get() {
            self.temperature_c += HEATING_RATE_C_PER_S * dt;
        }
        self.temperature_c -= (self.temperature_c - OUTSIDE_C) * LOSS_PER_S * dt;
    }

    fn ensure_started(&self) -> Result<(), SimError> {
        if self.started {
            Ok(())
        } else {
            Err(SimError::NotStarted)
        }
    }
}

/// Relative humidity from a fixed dew point, Magnus inverted
fn humidity_for(temperature_c: f32, dew_point_c: f32) -> f32 {
    let saturation = |t: f32| (17.62 * t / (243.12 + t)).exp();
    (100.0 * saturation(dew_point_c) / saturation(temperature_c)).min(100.0)
}

impl SensorSource for SimulatedRoom {
    type Error = SimError;

    fn begin(&mut self, address: u8) -> Result<(), SimError> {
        if address != SIMULATED_ADDRESS {
            return Err(SimError::NoDevice(address));
        }
        self.started = true;
        self.last_update = Instant::now();
        Ok(())
    }

    fn read_temperature_c(&mut self) -> Result<f32, SimError> {
        self.ensure_started()?;
        self.advance();
        Ok(self.temperature_c)
    }

    fn read_humidity_pct(&mut self) -> Result<f32, SimError> {
        self.ensure_started()?;
        Ok(humidity_for(self.temperature_c, ROOM_DEW_POINT_C))
    }

    fn read_pressure_pa(&mut self) -> Result<f32, SimError> {
        self.ensure_started()?;
        Ok((local_normal_pressure(self.altitude_m) + WEATHER_OFFSET_HPA) * 100.0)
    }
}

/// Relay output wired to the room's radiator
pub struct RadiatorPin {
    radiator: Rc<Cell<bool>>,
}

impl RadiatorPin {
    pub fn new(radiator: Rc<Cell<bool>>) -> Self {
        Self { radiator }
    }
}

impl ErrorType for RadiatorPin {
    type Error = Infallible;
}

impl OutputPin for RadiatorPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.radiator.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.radiator.set(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humidity_matches_dew_point() {
        let rh = humidity_for(20.0, ROOM_DEW_POINT_C);
        let dp = thermoguard_core::dew_point(20.0, rh);
        assert!((dp - ROOM_DEW_POINT_C).abs() < 0.01);
    }

    #[test]
    fn only_answers_on_its_address() {
        let mut room = SimulatedRoom::new(19.0, 405.0, Rc::new(Cell::new(false)));
        assert_eq!(room.read_temperature_c(), Err(SimError::NotStarted));
        assert_eq!(room.begin(0x77), Err(SimError::NoDevice(0x77)));
        assert_eq!(room.begin(SIMULATED_ADDRESS), Ok(()));
        assert!(room.read_pressure_pa().unwrap() > 96_000.0);
    }

    #[test]
    fn pin_drives_radiator() {
        let radiator = Rc::new(Cell::new(false));
        let mut pin = RadiatorPin::new(radiator.clone());
        pin.set_high().unwrap();
        assert!(radiator.get());
        pin.set_low().unwrap();
        assert!(!radiator.get());
    }
}
