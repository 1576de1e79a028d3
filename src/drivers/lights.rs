//! Lamp driver for the four signal heads.
//!
//! Generic over `embedded-hal` 1.0 [`OutputPin`]s so the same driver runs
//! on ESP-IDF `PinDriver`s and on in-memory pins in host tests.  All four
//! lines are active HIGH.
//!
//! The driver is the exclusive owner of the output pins.  A failed write
//! is logged and counted; the remaining writes still run.

use embedded_hal::digital::{OutputPin, PinState};
use log::error;

use crate::app::ports::LightPort;
use crate::error::GpioFault;
use crate::fsm::context::{Lamp, Lamps};

pub struct LightDriver<NG, NY, EG, EY> {
    ns_green: NG,
    ns_yellow: NY,
    ew_green: EG,
    ew_yellow: EY,
    /// Last level successfully commanded on each line.
    current: Lamps,
    faults: u32,
}

impl<NG, NY, EG, EY> LightDriver<NG, NY, EG, EY>
where
    NG: OutputPin,
    NY: OutputPin,
    EG: OutputPin,
    EY: OutputPin,
{
    /// Take ownership of the four lamp pins.  Lamps are not touched until
    /// the first [`LightPort::apply`].
    pub const fn new(ns_green: NG, ns_yellow: NY, ew_green: EG, ew_yellow: EY) -> Self {
        Self {
            ns_green,
            ns_yellow,
            ew_green,
            ew_yellow,
            current: Lamps::DARK,
            faults: 0,
        }
    }

    /// What the driver believes is lit.
    pub const fn current(&self) -> Lamps {
        self.current
    }

    /// Write failures since construction.
    pub const fn faults(&self) -> u32 {
        self.faults
    }

    /// Give the pins back, e.g. to reconfigure them.
    pub fn release(self) -> (NG, NY, EG, EY) {
        (self.ns_green, self.ns_yellow, self.ew_green, self.ew_yellow)
    }

    fn drive(&mut self, lamp: Lamp, on: bool) -> Result<(), GpioFault> {
        let level = PinState::from(on);
        match lamp {
            Lamp::NsGreen => self.ns_green.set_state(level).map_err(|e| GpioFault::new(lamp.name(), &e)),
            Lamp::NsYellow => self.ns_yellow.set_state(level).map_err(|e| GpioFault::new(lamp.name(), &e)),
            Lamp::EwGreen => self.ew_green.set_state(level).map_err(|e| GpioFault::new(lamp.name(), &e)),
            Lamp::EwYellow => self.ew_yellow.set_state(level).map_err(|e| GpioFault::new(lamp.name(), &e)),
        }
    }
}

impl<NG, NY, EG, EY> LightPort for LightDriver<NG, NY, EG, EY>
where
    NG: OutputPin,
    NY: OutputPin,
    EG: OutputPin,
    EY: OutputPin,
{
    fn write(&mut self, lamp: Lamp, on: bool) {
        match self.drive(lamp, on) {
            Ok(()) => self.current.set(lamp, on),
            Err(fault) => {
                self.faults = self.faults.wrapping_add(1);
                error!("Lamp write failed: {fault}");
            }
        }
    }
}
