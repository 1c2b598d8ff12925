//! Common test utilities for integration tests
//!
//! This module provides:
//! - A scripted sensor that replays a temperature sequence
//! - A callback recorder that logs handler invocations in order
//! - A delay that only counts
//! - A recording relay pin

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use thermoguard_core::{SensorSource, Thermostat};

/// Humidity reported by [`ScriptedSensor`] unless overridden
pub const ROOM_HUMIDITY_PCT: f32 = 45.0;

/// Pressure reported by [`ScriptedSensor`] (Pa), ~normal at 400 m
pub const ROOM_PRESSURE_PA: f32 = 96_600.0;

/// Error of the scripted sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptError {
    NotPresent,
    Exhausted,
}

/// Sensor replaying queued temperatures
pub struct ScriptedSensor {
    temperatures: VecDeque<f32>,
    pub humidity_pct: f32,
    pub pressure_pa: f32,
    /// Failed `begin` calls still to come
    pub absent_for: u32,
    pub reads: u32,
}

impl ScriptedSensor {
    pub fn new(temperatures: &[f32]) -> Self {
        Self {
            temperatures: temperatures.iter().copied().collect(),
            humidity_pct: ROOM_HUMIDITY_PCT,
            pressure_pa: ROOM_PRESSURE_PA,
            absent_for: 0,
            reads: 0,
        }
    }

    pub fn absent_for(mut self, attempts: u32) -> Self {
        self.absent_for = attempts;
        self
    }

    pub fn queue(&mut self, temperature_c: f32) {
        self.temperatures.push_back(temperature_c);
    }
}

impl SensorSource for ScriptedSensor {
    type Error = ScriptError;

    fn begin(&mut self, _address: u8) -> Result<(), ScriptError> {
        if self.absent_for > 0 {
            self.absent_for -= 1;
            return Err(ScriptError::NotPresent);
        }
        Ok(())
    }

    fn read_temperature_c(&mut self) -> Result<f32, ScriptError> {
        self.reads += 1;
        self.temperatures.pop_front().ok_or(ScriptError::Exhausted)
    }

    fn read_humidity_pct(&mut self) -> Result<f32, ScriptError> {
        Ok(self.humidity_pct)
    }

    fn read_pressure_pa(&mut self) -> Result<f32, ScriptError> {
        Ok(self.pressure_pa)
    }
}

/// Handler invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fired {
    Data(f32),
    Low,
    High,
}

/// Register recording handlers on all three slots
pub fn record_callbacks<S: SensorSource>(thermostat: &mut Thermostat<S>) -> Rc<RefCell<Vec<Fired>>> {
    let log = Rc::new(RefCell::new(Vec::new()));

    let l = log.clone();
    thermostat.on_data_ready(move |m| l.borrow_mut().push(Fired::Data(m.reading.temperature_c)));
    let l = log.clone();
    thermostat.on_low_temp(move |_| l.borrow_mut().push(Fired::Low));
    let l = log.clone();
    thermostat.on_high_temp(move |_| l.borrow_mut().push(Fired::High));

    log
}

/// Delay that only adds up the requested time
#[derive(Debug, Default)]
pub struct CountingDelay {
    pub total_ns: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

/// Output pin remembering every level written
#[derive(Debug, Default)]
pub struct RecordingPin {
    pub levels: Vec<bool>,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.push(true);
        Ok(())
    }
}
