//! Sensor initialization with an explicit retry policy
//!
//! A sensor that is missing at power-up is either miswired (waiting will not
//! help) or still starting (a second or two will). Which of the two matters
//! more is an application decision, so the policy is a parameter:
//!
//! - [`RetryPolicy::Bounded`] gives up after a fixed number of attempts and
//!   returns [`ThermostatError::RetriesExhausted`]. The caller decides what
//!   "fatal" means (halt, blink an LED, exit the process).
//! - [`RetryPolicy::Unbounded`] keeps trying and only returns once the
//!   sensor answers.
//!
//! A successful start takes one sample right away so the accessors have
//! values before the first scheduled tick. No callbacks fire for it.

use embedded_hal::delay::DelayNs;

use crate::constants::thermostat::{DEFAULT_STARTUP_ATTEMPTS, DEFAULT_STARTUP_RETRY_DELAY_MS};
use crate::controller::Thermostat;
use crate::errors::{ThermostatError, ThermostatResult};
use crate::sensor::SensorSource;

/// What to do while the sensor does not answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RetryPolicy {
    /// Try at most `attempts` times, pausing `delay_ms` in between
    Bounded {
        /// Attempts before giving up, 0 counts as 1
        attempts: u8,
        /// Pause between two attempts in ms
        delay_ms: u32,
    },
    /// Try until the sensor answers, pausing `delay_ms` in between
    Unbounded {
        /// Pause between two attempts in ms
        delay_ms: u32,
    },
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::Bounded {
            attempts: DEFAULT_STARTUP_ATTEMPTS,
            delay_ms: DEFAULT_STARTUP_RETRY_DELAY_MS,
        }
    }
}

impl<S: SensorSource> Thermostat<S> {
    /// Probe the sensor once on the configured address
    pub fn try_begin(&mut self) -> ThermostatResult<()> {
        let address = self.address;
        self.sensor.begin(address).map_err(|err| {
            log::warn!("Sensor not found on i2c address {:#04x}: {:?}", address, err);
            ThermostatError::SensorNotFound { address }
        })
    }

    /// Start the sensor according to `policy`, returns the number of attempts used
    pub fn begin<D: DelayNs>(&mut self, policy: RetryPolicy, delay: &mut D) -> ThermostatResult<u32> {
        let attempts = match policy {
            RetryPolicy::Bounded { attempts, delay_ms } => {
                let limit = attempts.max(1);
                let mut attempt: u8 = 1;
                loop {
                    if self.try_begin().is_ok() {
                        break u32::from(attempt);
                    }
                    if attempt == limit {
                        return Err(ThermostatError::RetriesExhausted {
                            address: self.address,
                            attempts: limit,
                        });
                    }
                    delay.delay_ms(delay_ms);
                    attempt += 1;
                }
            }
            RetryPolicy::Unbounded { delay_ms } => {
                let mut attempt: u32 = 1;
                while self.try_begin().is_err() {
                    delay.delay_ms(delay_ms);
                    attempt = attempt.saturating_add(1);
                }
                attempt
            }
        };

        log::info!("Sensor started on i2c address {:#04x} after {} attempt(s)", self.address, attempts);

        let now = self.scheduler.last_sample_ms();
        if let Err(err) = self.sample(now) {
            log::warn!("Initial sample failed: {}", err);
        }
        Ok(attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sensor that answers after a number of failed probes
    struct SlowStarter {
        failures_left: u32,
        probes: u32,
    }

    impl SensorSource for SlowStarter {
        type Error = ();

        fn begin(&mut self, _address: u8) -> Result<(), ()> {
            self.probes += 1;
            if self.failures_left == 0 {
                Ok(())
            } else {
                self.failures_left -= 1;
                Err(())
            }
        }

        fn read_temperature_c(&mut self) -> Result<f32, ()> {
            Ok(19.5)
        }

        fn read_humidity_pct(&mut self) -> Result<f32, ()> {
            Ok(50.0)
        }

        fn read_pressure_pa(&mut self) -> Result<f32, ()> {
            Ok(97_000.0)
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ms: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += u64::from(ns) / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += u64::from(ms);
        }
    }

    fn thermostat(failures: u32) -> Thermostat<SlowStarter> {
        Thermostat::new(SlowStarter { failures_left: failures, probes: 0 })
    }

    #[test]
    fn bounded_succeeds_within_budget() {
        let mut t = thermostat(2);
        let mut delay = CountingDelay::default();

        let used = t.begin(RetryPolicy::Bounded { attempts: 5, delay_ms: 100 }, &mut delay).unwrap();

        assert_eq!(used, 3);
        assert_eq!(delay.total_ms, 200);
        assert_eq!(t.temperature_c(), Some(19.5));
    }

    #[test]
    fn bounded_gives_up() {
        let mut t = thermostat(u32::MAX);
        let mut delay = CountingDelay::default();

        let result = t.begin(RetryPolicy::Bounded { attempts: 4, delay_ms: 250 }, &mut delay);

        assert_eq!(result, Err(ThermostatError::RetriesExhausted { address: 0x76, attempts: 4 }));
        assert_eq!(t.sensor().probes, 4);
        // No pause after the last attempt
        assert_eq!(delay.total_ms, 750);
        assert_eq!(t.last_measurement(), None);
    }

    #[test]
    fn zero_attempts_still_probes_once() {
        let mut t = thermostat(0);
        let mut delay = CountingDelay::default();
        assert_eq!(t.begin(RetryPolicy::Bounded { attempts: 0, delay_ms: 10 }, &mut delay), Ok(1));
    }

    #[test]
    fn unbounded_waits_for_sensor() {
        let mut t = thermostat(25);
        let mut delay = CountingDelay::default();

        let used = t.begin(RetryPolicy::Unbounded { delay_ms: 1000 }, &mut delay).unwrap();

        assert_eq!(used, 26);
        assert_eq!(delay.total_ms, 25_000);
    }

    #[test]
    fn single_probe_reports_address() {
        let mut t = thermostat(1);
        assert_eq!(t.try_begin(), Err(ThermostatError::SensorNotFound { address: 0x76 }));
        assert_eq!(t.try_begin(), Ok(()));
    }
}
