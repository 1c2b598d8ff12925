//! ThermoGuard console
//!
//! Runs the thermostat against a simulated room and takes the serial style
//! menu commands from stdin, one command per line (`l 19.5`, `t`, `v`).
//! Control keeps running after stdin closes; `q` or Ctrl-C ends it.

mod session;
mod sim;

use std::cell::{Cell, RefCell};
use std::io::{self, BufRead};
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use clap::Parser;
use embedded_hal::delay::DelayNs;
use log::{error, info, warn};

use thermoguard_core::constants::{
    DEFAULT_ALTITUDE_M, DEFAULT_DELTA_C, DEFAULT_LOW_LIMIT_C, DEFAULT_REFRESH_INTERVAL_MS,
    DEFAULT_STARTUP_ATTEMPTS, DEFAULT_STARTUP_RETRY_DELAY_MS,
};
use thermoguard_core::time::MonotonicClock;
use thermoguard_core::{
    install_heating, HeatingRelay, RetryPolicy, Thermostat, ThermostatConfig, TimeSource,
};

use session::{Flow, Session};
use sim::{RadiatorPin, SimulatedRoom};

/// Main loop idle time between polls
const POLL_PERIOD: Duration = Duration::from_millis(10);

#[derive(Parser, Debug)]
#[clap(author, version, about = "Thermostat console on a simulated BME280")]
struct Args {
    /// Sensor I2C address (decimal or 0x prefixed hex)
    #[clap(long, default_value = "0x76", parse(try_from_str = parse_address))]
    address: u8,

    /// Lower limit (°C)
    #[clap(long, default_value_t = DEFAULT_LOW_LIMIT_C, allow_hyphen_values = true)]
    low: f32,

    /// Upper limit (°C), overrides the band width
    #[clap(long, allow_hyphen_values = true)]
    high: Option<f32>,

    /// Band width (°C)
    #[clap(long, default_value_t = DEFAULT_DELTA_C, allow_hyphen_values = true)]
    delta: f32,

    /// Local altitude (m above sea level)
    #[clap(long, default_value_t = DEFAULT_ALTITUDE_M, allow_hyphen_values = true)]
    altitude: f32,

    /// Sampling interval (ms)
    #[clap(long, default_value_t = DEFAULT_REFRESH_INTERVAL_MS)]
    interval_ms: u32,

    /// Start with heating control switched on
    #[clap(long)]
    enabled: bool,

    /// Sensor detection attempts before giving up
    #[clap(long, default_value_t = DEFAULT_STARTUP_ATTEMPTS)]
    retries: u8,

    /// Keep looking for the sensor forever
    #[clap(long, conflicts_with = "retries")]
    retry_forever: bool,

    /// Pause between detection attempts (ms)
    #[clap(long, default_value_t = DEFAULT_STARTUP_RETRY_DELAY_MS)]
    retry_delay_ms: u32,

    /// Starting room temperature of the simulation (°C)
    #[clap(long, default_value_t = 17.0, allow_hyphen_values = true)]
    room: f32,
}

fn parse_address(text: &str) -> Result<u8, std::num::ParseIntError> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse(),
    }
}

impl Args {
    fn config(&self) -> ThermostatConfig {
        let delta = self.high.map_or(self.delta, |high| high - self.low);

        // Delta first, the low limit then pulls the upper one along
        ThermostatConfig::default()
            .with_address(self.address)
            .with_refresh_interval(self.interval_ms)
            .with_altitude(self.altitude)
            .with_delta(delta)
            .with_low_limit(self.low)
            .enabled(self.enabled)
    }

    fn retry_policy(&self) -> RetryPolicy {
        if self.retry_forever {
            RetryPolicy::Unbounded { delay_ms: self.retry_delay_ms }
        } else {
            RetryPolicy::Bounded { attempts: self.retries, delay_ms: self.retry_delay_ms }
        }
    }
}

/// Blocking delay on the host
struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

/// Forward stdin lines to the main loop
fn spawn_console_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    warn!("Console read failed: {}", err);
                    break;
                }
            }
        }
    });
    rx
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args = Args::parse();

    let radiator = Rc::new(Cell::new(false));
    let room = SimulatedRoom::new(args.room, args.altitude, radiator.clone());
    let mut thermostat = Thermostat::with_config(room, args.config());

    let relay = match HeatingRelay::new(RadiatorPin::new(radiator.clone())) {
        Ok(relay) => Rc::new(RefCell::new(relay)),
        Err(never) => match never {},
    };
    install_heating(&mut thermostat, relay.clone());

    if let Err(err) = thermostat.begin(args.retry_policy(), &mut StdDelay) {
        error!("{}", err);
        return ExitCode::FAILURE;
    }

    let mut session = Session::new(thermostat, relay, spawn_console_reader());
    let clock = MonotonicClock::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = session.greet(&mut out) {
        error!("Console output failed: {}", err);
        return ExitCode::FAILURE;
    }

    loop {
        match session.step(clock.now_ms(), &mut out) {
            Ok(Flow::Continue) => thread::sleep(POLL_PERIOD),
            Ok(Flow::Quit) => {
                info!("Quit requested");
                return ExitCode::SUCCESS;
            }
            Err(err) => {
                error!("Console output failed: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_accepts_hex_and_decimal() {
        assert_eq!(parse_address("0x77"), Ok(0x77));
        assert_eq!(parse_address("118"), Ok(0x76));
        assert!(parse_address("0x1ff").is_err());
    }

    #[test]
    fn high_limit_overrides_delta() {
        let args = Args::parse_from(["thermoguard", "--low", "19", "--high", "22.5"]);
        let config = args.config();
        assert_eq!(config.thresholds.low(), 19.0);
        assert_eq!(config.thresholds.high(), 22.5);
        assert_eq!(args.retry_policy(), RetryPolicy::Bounded { attempts: 10, delay_ms: 1000 });
    }

    #[test]
    fn retry_forever_selects_unbounded_policy() {
        let args = Args::parse_from(["thermoguard", "--retry-forever", "--retry-delay-ms", "250"]);
        assert_eq!(args.retry_policy(), RetryPolicy::Unbounded { delay_ms: 250 });
    }
}
