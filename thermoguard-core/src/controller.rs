//! Threshold controller
//!
//! [`Thermostat`] owns the sensor, the calibration, the limits, the
//! scheduler and the callbacks. The application calls [`Thermostat::tick`]
//! (or [`Thermostat::poll`]) from its main loop; when a tick is due the
//! controller takes one sample and dispatches the handlers:
//!
//! ```text
//! tick(now)
//!   ├─ disabled?             → nothing
//!   ├─ interval not elapsed? → nothing
//!   └─ sample()
//!        ├─ on_data_ready
//!        ├─ t >= high → on_high_temp
//!        ├─ t <  low  → on_low_temp
//!        └─ last sample time = now
//! ```
//!
//! All reads happen in [`Thermostat::sample`]. The accessors return what
//! the last sample produced and never touch the bus, so a handler or a
//! report sees one consistent set of values.

use crate::calibration::CalibrationState;
use crate::callbacks::{CallbackDispatcher, Measurement};
use crate::config::ThermostatConfig;
use crate::errors::{ThermostatError, ThermostatResult};
use crate::metrics::DerivedMetrics;
use crate::scheduler::{ControllerState, Scheduler};
use crate::sensor::{SensorReading, SensorSource};
use crate::threshold::{TemperatureBand, ThresholdConfig};
use crate::time::{Millis, TimeSource};

/// Sensor driven on/off thermostat
#[derive(Debug)]
pub struct Thermostat<S> {
    pub(crate) sensor: S,
    pub(crate) address: u8,
    calibration: CalibrationState,
    thresholds: ThresholdConfig,
    pub(crate) scheduler: Scheduler,
    enabled: bool,
    callbacks: CallbackDispatcher,
    last: Option<Measurement>,
}

impl<S: SensorSource> Thermostat<S> {
    /// Thermostat with factory settings
    pub fn new(sensor: S) -> Self {
        Self::with_config(sensor, ThermostatConfig::default())
    }

    /// Thermostat set up from `config`
    pub fn with_config(sensor: S, config: ThermostatConfig) -> Self {
        Self {
            sensor,
            address: config.i2c_address,
            calibration: CalibrationState::new(config.altitude_m),
            thresholds: config.thresholds,
            scheduler: Scheduler::new(config.refresh_interval_ms),
            enabled: config.enabled,
            callbacks: CallbackDispatcher::new(),
            last: None,
        }
    }

    /// The sensor driver
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// The sensor driver, mutably
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Address used by `begin`
    pub fn i2c_address(&self) -> u8 {
        self.address
    }

    // ===== CALLBACKS =====

    /// The handler slots
    pub fn callbacks_mut(&mut self) -> &mut CallbackDispatcher {
        &mut self.callbacks
    }

    /// Handler called first for every evaluated sample
    pub fn on_data_ready<F>(&mut self, handler: F)
    where
        F: FnMut(&Measurement) + 'static,
    {
        self.callbacks.set_on_data_ready(handler);
    }

    /// Handler called while the temperature is below the lower limit
    pub fn on_low_temp<F>(&mut self, handler: F)
    where
        F: FnMut(&Measurement) + 'static,
    {
        self.callbacks.set_on_low_temp(handler);
    }

    /// Handler called while the temperature is at or above the upper limit
    pub fn on_high_temp<F>(&mut self, handler: F)
    where
        F: FnMut(&Measurement) + 'static,
    {
        self.callbacks.set_on_high_temp(handler);
    }

    // ===== ENABLE / SCHEDULING =====

    /// Resume processing ticks
    pub fn enable(&mut self) {
        if !self.enabled {
            log::info!("Thermostat enabled");
        }
        self.enabled = true;
    }

    /// Stop processing ticks, no reads and no callbacks
    pub fn disable(&mut self) {
        if self.enabled {
            log::info!("Thermostat disabled");
        }
        self.enabled = false;
    }

    /// Flip the enabled flag, returns the new state
    pub fn toggle(&mut self) -> bool {
        if self.enabled {
            self.disable();
        } else {
            self.enable();
        }
        self.enabled
    }

    /// Whether ticks are processed
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Change the sampling interval in ms
    pub fn set_refresh_interval(&mut self, refresh_interval_ms: Millis) {
        self.scheduler.set_refresh_interval(refresh_interval_ms);
    }

    /// Sampling interval in ms
    pub fn refresh_interval_ms(&self) -> Millis {
        self.scheduler.refresh_interval_ms()
    }

    /// Snapshot of the scheduling state
    pub fn controller_state(&self) -> ControllerState {
        ControllerState {
            last_sample_time_ms: self.scheduler.last_sample_ms(),
            refresh_interval_ms: self.scheduler.refresh_interval_ms(),
            enabled: self.enabled,
        }
    }

    // ===== LIMITS =====

    /// Set the lower limit, the upper one follows at the current delta
    pub fn set_limit_low(&mut self, low: f32) {
        self.thresholds.set_low(low);
    }

    /// Set the upper limit, the lower one follows at the current delta
    pub fn set_limit_high(&mut self, high: f32) {
        self.thresholds.set_high(high);
    }

    /// Set the hysteresis, holding the upper limit
    pub fn set_temp_delta(&mut self, delta: f32) {
        self.thresholds.set_delta(delta);
    }

    /// Current limits
    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    // ===== CALIBRATION =====

    /// Record the local altitude and refresh the derived values of the last sample
    pub fn set_local_altitude(&mut self, altitude_m: f32) {
        self.calibration.set_local_altitude(altitude_m);
        self.refresh_derived();
    }

    /// Derive the sea level reference from the last measured pressure
    pub fn calibrate_for_altitude(&mut self, altitude_m: f32) -> ThermostatResult<()> {
        let measured = self
            .last
            .map(|m| m.reading.pressure_hpa)
            .ok_or(ThermostatError::NoReading)?;

        self.calibration.calibrate_for_altitude(altitude_m, measured);
        log::info!(
            "Calibrated for {} m: {} hPa measured, {} hPa at sea level",
            altitude_m, measured, self.calibration.sea_level_pressure_hpa()
        );
        self.refresh_derived();
        Ok(())
    }

    /// Altitude and sea level reference
    pub fn calibration(&self) -> &CalibrationState {
        &self.calibration
    }

    fn refresh_derived(&mut self) {
        if let Some(m) = self.last.as_mut() {
            m.derived = DerivedMetrics::compute(&m.reading, &self.calibration);
        }
    }

    // ===== SAMPLING =====

    /// Read the sensor once and refresh every derived value
    ///
    /// Does not fire callbacks and does not move the schedule.
    pub fn sample(&mut self, now: Millis) -> ThermostatResult<Measurement> {
        let reading = self
            .sensor
            .read()
            .map_err(|err| {
                log::warn!("Sensor read failed: {:?}", err);
                ThermostatError::SensorReadFailed
            })?
            .check_finite()
            .map_err(|err| {
                log::warn!("Reading rejected: {}", err);
                err
            })?;

        let measurement = Measurement {
            timestamp_ms: now,
            reading,
            derived: DerivedMetrics::compute(&reading, &self.calibration),
            thresholds: self.thresholds,
            band: self.thresholds.classify(reading.temperature_c),
        };
        self.last = Some(measurement);
        Ok(measurement)
    }

    /// Process one pass of the main loop
    ///
    /// Returns the evaluated sample when a tick fired. A failed read still
    /// counts as a tick so a broken sensor is retried at the refresh
    /// interval, not on every pass.
    pub fn tick(&mut self, now: Millis) -> ThermostatResult<Option<Measurement>> {
        if !self.enabled || !self.scheduler.is_due(now) {
            return Ok(None);
        }

        let measurement = match self.sample(now) {
            Ok(m) => m,
            Err(err) => {
                self.scheduler.mark(now);
                return Err(err);
            }
        };

        log::debug!(
            "Tick at {} ms: {} °C, band {:?}",
            now, measurement.reading.temperature_c, measurement.band
        );
        self.callbacks.dispatch(&measurement);
        self.scheduler.mark(now);
        Ok(Some(measurement))
    }

    /// [`Thermostat::tick`] with the time taken from a time source
    pub fn poll<T: TimeSource>(&mut self, time: &T) -> ThermostatResult<Option<Measurement>> {
        self.tick(time.now_ms())
    }

    // ===== ACCESSORS =====

    /// Last evaluated sample
    pub fn last_measurement(&self) -> Option<&Measurement> {
        self.last.as_ref()
    }

    /// Raw values of the last sample
    pub fn last_reading(&self) -> Option<&SensorReading> {
        self.last.as_ref().map(|m| &m.reading)
    }

    /// Derived values of the last sample
    pub fn derived(&self) -> Option<&DerivedMetrics> {
        self.last.as_ref().map(|m| &m.derived)
    }

    /// Band of the last sample
    pub fn last_band(&self) -> Option<TemperatureBand> {
        self.last.map(|m| m.band)
    }

    /// Last temperature in °C
    pub fn temperature_c(&self) -> Option<f32> {
        self.last.map(|m| m.reading.temperature_c)
    }

    /// Last temperature in °F
    pub fn temperature_f(&self) -> Option<f32> {
        self.last.map(|m| m.temperature_f())
    }

    /// Last relative humidity in percent
    pub fn rel_humidity_pct(&self) -> Option<f32> {
        self.last.map(|m| m.reading.rel_humidity_pct)
    }

    /// Last local air pressure in hPa
    pub fn pressure_hpa(&self) -> Option<f32> {
        self.last.map(|m| m.reading.pressure_hpa)
    }

    /// Last dew point in °C, `None` when undefined
    pub fn dew_point_c(&self) -> Option<f32> {
        self.last.and_then(|m| m.derived.dew_point_c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    /// Sensor returning queued temperatures at constant humidity and pressure
    struct Scripted {
        temps: Vec<f32>,
        reads: Rc<Cell<u32>>,
    }

    impl Scripted {
        fn new(temps: &[f32]) -> Self {
            let mut temps = temps.to_vec();
            temps.reverse();
            Self { temps, reads: Rc::new(Cell::new(0)) }
        }
    }

    impl SensorSource for Scripted {
        type Error = &'static str;

        fn begin(&mut self, _address: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn read_temperature_c(&mut self) -> Result<f32, Self::Error> {
            self.reads.set(self.reads.get() + 1);
            self.temps.pop().ok_or("script exhausted")
        }

        fn read_humidity_pct(&mut self) -> Result<f32, Self::Error> {
            Ok(45.0)
        }

        fn read_pressure_pa(&mut self) -> Result<f32, Self::Error> {
            Ok(96_500.0)
        }
    }

    fn enabled(temps: &[f32]) -> Thermostat<Scripted> {
        let config = ThermostatConfig::default().with_refresh_interval(1000).enabled(true);
        Thermostat::with_config(Scripted::new(temps), config)
    }

    #[test]
    fn tick_waits_for_interval() {
        let mut thermostat = enabled(&[20.0, 20.0]);

        assert_eq!(thermostat.tick(500).unwrap(), None);
        assert!(thermostat.tick(1000).unwrap().is_some());
        assert_eq!(thermostat.tick(1500).unwrap(), None);
        assert_eq!(thermostat.sensor().reads.get(), 1);
    }

    #[test]
    fn disabled_thermostat_never_reads() {
        let mut thermostat = enabled(&[20.0]);
        thermostat.disable();

        assert_eq!(thermostat.tick(10_000).unwrap(), None);
        assert_eq!(thermostat.sensor().reads.get(), 0);
        assert_eq!(thermostat.controller_state().last_sample_time_ms, 0);
    }

    #[test]
    fn toggle_keeps_schedule() {
        let mut thermostat = enabled(&[20.0, 20.0]);
        thermostat.tick(1000).unwrap();

        assert!(!thermostat.toggle());
        assert!(thermostat.toggle());
        assert_eq!(thermostat.controller_state().last_sample_time_ms, 1000);
        assert_eq!(thermostat.tick(1999).unwrap(), None);
    }

    #[test]
    fn sample_refreshes_without_callbacks() {
        let mut thermostat = enabled(&[17.0]);
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        thermostat.on_data_ready(move |_| f.set(true));

        let m = thermostat.sample(42).unwrap();

        assert!(!fired.get());
        assert_eq!(m.band, TemperatureBand::BelowLow);
        assert_eq!(thermostat.pressure_hpa(), Some(965.0));
        assert_eq!(thermostat.controller_state().last_sample_time_ms, 0);
    }

    #[test]
    fn failed_read_consumes_tick() {
        let mut thermostat = enabled(&[]);

        assert_eq!(thermostat.tick(1000), Err(ThermostatError::SensorReadFailed));
        assert_eq!(thermostat.tick(1500).unwrap(), None);
        assert_eq!(thermostat.last_measurement(), None);
    }

    #[test]
    fn nan_temperature_fires_nothing() {
        let mut thermostat = enabled(&[f32::NAN]);
        let calls = Rc::new(RefCell::new(0u32));
        let c = calls.clone();
        thermostat.on_data_ready(move |_| *c.borrow_mut() += 1);

        assert_eq!(thermostat.tick(1000), Err(ThermostatError::NonFiniteReading));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn altitude_change_refreshes_normal_pressure() {
        let mut thermostat = enabled(&[20.0]);
        thermostat.sample(0).unwrap();
        let before = thermostat.derived().unwrap().local_normal_pressure_hpa;

        thermostat.set_local_altitude(453.0);

        let after = thermostat.derived().unwrap().local_normal_pressure_hpa;
        assert!(after < before);
        assert!((after - 960.0).abs() < 0.5);
    }

    #[test]
    fn calibration_needs_a_reading() {
        let mut thermostat = enabled(&[20.0]);
        assert_eq!(thermostat.calibrate_for_altitude(453.0), Err(ThermostatError::NoReading));

        thermostat.sample(0).unwrap();
        thermostat.calibrate_for_altitude(453.0).unwrap();

        let cal = thermostat.calibration();
        assert_eq!(cal.altitude_m(), 453.0);
        assert!((cal.estimated_altitude_m(965.0) - 453.0).abs() < 1.0);
    }
}
