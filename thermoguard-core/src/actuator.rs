//! Heating relay driven by the limit callbacks
//!
//! The relay remembers whether it is on. Because the controller repeats
//! `on_low_temp` for every cold sample, [`HeatingRelay::turn_on`] only drives
//! the pin on an actual change; the same holds for `turn_off`.
//!
//! ```rust,ignore
//! let relay = Rc::new(RefCell::new(HeatingRelay::new(led_pin)?));
//! install_heating(&mut thermostat, relay.clone());
//! // relay.borrow().is_on() for status output
//! ```

use alloc::rc::Rc;
use core::cell::RefCell;

use embedded_hal::digital::OutputPin;

use crate::controller::Thermostat;
use crate::sensor::SensorSource;

/// On/off heating output on a digital pin, active high
#[derive(Debug)]
pub struct HeatingRelay<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> HeatingRelay<P> {
    /// Take the pin and switch the heating off
    pub fn new(mut pin: P) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self { pin, on: false })
    }

    /// Switch on, returns whether the state changed
    pub fn turn_on(&mut self) -> Result<bool, P::Error> {
        if self.on {
            return Ok(false);
        }
        self.pin.set_high()?;
        self.on = true;
        log::info!("Heating turned on");
        Ok(true)
    }

    /// Switch off, returns whether the state changed
    pub fn turn_off(&mut self) -> Result<bool, P::Error> {
        if !self.on {
            return Ok(false);
        }
        self.pin.set_low()?;
        self.on = false;
        log::info!("Heating turned off");
        Ok(true)
    }

    /// Whether the relay is currently switched on
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

/// Wire `relay` to the limit handlers: cold turns it on, warm turns it off
///
/// The data ready handler is left alone.
pub fn install_heating<S, P>(thermostat: &mut Thermostat<S>, relay: Rc<RefCell<HeatingRelay<P>>>)
where
    S: SensorSource,
    P: OutputPin + 'static,
{
    let cold = relay.clone();
    thermostat.on_low_temp(move |_| {
        if let Err(err) = cold.borrow_mut().turn_on() {
            log::warn!("Heating relay failed to switch on: {:?}", err);
        }
    });

    let warm = relay;
    thermostat.on_high_temp(move |_| {
        if let Err(err) = warm.borrow_mut().turn_off() {
            log::warn!("Heating relay failed to switch off: {:?}", err);
        }
    });
}
