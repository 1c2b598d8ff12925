//! One pass of the console main loop
//!
//! The console is optional input: once stdin is closed the session keeps
//! sampling and controlling, only the command handling stops. The session
//! ends on `q` or when the process is signalled.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, TryRecvError};

use embedded_hal::digital::OutputPin;
use log::{info, warn};

use thermoguard_core::console::{parse_line, CommandOutcome, Menu};
use thermoguard_core::report::StatusLine;
use thermoguard_core::{HeatingRelay, Millis, SensorSource, Thermostat};

/// Console key that ends the session
pub const QUIT_KEY: &str = "q";

/// Whether the main loop goes on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<S: SensorSource, P: OutputPin> {
    thermostat: Thermostat<S>,
    relay: Rc<RefCell<HeatingRelay<P>>>,
    console: Option<Receiver<String>>,
}

impl<S: SensorSource, P: OutputPin> Session<S, P> {
    pub fn new(thermostat: Thermostat<S>, relay: Rc<RefCell<HeatingRelay<P>>>, console: Receiver<String>) -> Self {
        Self { thermostat, relay, console: Some(console) }
    }

    #[cfg(test)]
    pub fn thermostat(&self) -> &Thermostat<S> {
        &self.thermostat
    }

    #[cfg(test)]
    pub fn console_open(&self) -> bool {
        self.console.is_some()
    }

    /// Menu and, when a sample exists, the values dump
    pub fn greet<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", Menu)?;
        if let Some(report) = self.thermostat.sensor_report() {
            write!(out, "{}", report)?;
        }
        Ok(())
    }

    /// Handle pending console lines, then poll the thermostat at `now`
    pub fn step<W: Write>(&mut self, now: Millis, out: &mut W) -> io::Result<Flow> {
        while let Some(line) = self.next_line() {
            if self.handle_line(&line, out)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }

        match self.thermostat.tick(now) {
            Ok(Some(measurement)) => {
                writeln!(out, "{}", StatusLine::new(&measurement, self.relay.borrow().is_on()))?;
            }
            Ok(None) => {}
            Err(err) => warn!("Sample skipped: {}", err),
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    fn next_line(&mut self) -> Option<String> {
        let console = self.console.as_ref()?;
        match console.try_recv() {
            Ok(line) => Some(line),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                info!("Console closed, control continues");
                self.console = None;
                None
            }
        }
    }

    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        if line.trim() == QUIT_KEY {
            return Ok(Flow::Quit);
        }
        let Some((command, argument)) = parse_line(line) else {
            return Ok(Flow::Continue);
        };

        match command.apply(&mut self.thermostat, argument) {
            CommandOutcome::Updated => write!(out, "{}", self.thermostat.threshold_report())?,
            CommandOutcome::Toggled(on) => {
                if !on {
                    if let Err(err) = self.relay.borrow_mut().turn_off() {
                        warn!("Heating relay failed to switch off: {:?}", err);
                    }
                }
                writeln!(out, "Heating control is {}", if on { "ON" } else { "OFF" })?;
            }
            CommandOutcome::ShowValues => {
                if let Some(report) = self.thermostat.sensor_report() {
                    write!(out, "{}", report)?;
                }
                write!(out, "{}", self.thermostat.threshold_report())?;
            }
            CommandOutcome::ShowMenu => write!(out, "{}", Menu)?,
        }
        Ok(Flow::Continue)
    }
}
