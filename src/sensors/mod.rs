//! Input sampler: the six input lines folded into one [`Inputs`] snapshot.
//!
//! | Signal      | Pins              | Polarity    | Logical value        |
//! |-------------|-------------------|-------------|----------------------|
//! | reset       | 1                 | active LOW  | asserted             |
//! | emergency   | 1                 | active LOW  | asserted             |
//! | ns_demand   | 2 presence sensors| active HIGH | either sensor HIGH   |
//! | ew_demand   | 2 presence sensors| active HIGH | either sensor HIGH   |
//!
//! No debouncing: the sampler returns the instantaneous level.  A failed
//! pin read is logged and the previous good level for that pin is reused.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::InputPort;
use crate::error::GpioFault;
use crate::fsm::context::Inputs;

/// Raw pin levels from the previous sample (`true` = HIGH).
#[derive(Debug, Clone, Copy)]
struct Levels {
    reset: bool,
    emergency: bool,
    ns: [bool; 2],
    ew: [bool; 2],
}

impl Levels {
    /// Idle bus: pull-ups high, sensors low.
    const IDLE: Self = Self {
        reset: true,
        emergency: true,
        ns: [false; 2],
        ew: [false; 2],
    };

    const fn inputs(&self) -> Inputs {
        Inputs {
            reset: !self.reset,
            emergency: !self.emergency,
            ns_demand: self.ns[0] || self.ns[1],
            ew_demand: self.ew[0] || self.ew[1],
        }
    }
}

/// The six input lines of one intersection.
pub struct InputPins<R, E, N1, N2, W1, W2> {
    pub reset: R,
    pub emergency: E,
    pub ns_sensor_1: N1,
    pub ns_sensor_2: N2,
    pub ew_sensor_1: W1,
    pub ew_sensor_2: W2,
}

pub struct InputSampler<R, E, N1, N2, W1, W2> {
    pins: InputPins<R, E, N1, N2, W1, W2>,
    last: Levels,
    faults: u32,
}

impl<R, E, N1, N2, W1, W2> InputSampler<R, E, N1, N2, W1, W2>
where
    R: InputPin,
    E: InputPin,
    N1: InputPin,
    N2: InputPin,
    W1: InputPin,
    W2: InputPin,
{
    pub const fn new(pins: InputPins<R, E, N1, N2, W1, W2>) -> Self {
        Self {
            pins,
            last: Levels::IDLE,
            faults: 0,
        }
    }

    /// Read failures since construction.
    pub const fn faults(&self) -> u32 {
        self.faults
    }

    fn read<P: InputPin>(pin: &mut P, signal: &'static str, last: bool, faults: &mut u32) -> bool {
        match pin.is_high() {
            Ok(level) => level,
            Err(e) => {
                *faults = faults.wrapping_add(1);
                warn!("Input read failed: {}, keeping last level", GpioFault::new(signal, &e));
                last
            }
        }
    }
}

impl<R, E, N1, N2, W1, W2> InputPort for InputSampler<R, E, N1, N2, W1, W2>
where
    R: InputPin,
    E: InputPin,
    N1: InputPin,
    N2: InputPin,
    W1: InputPin,
    W2: InputPin,
{
    fn sample(&mut self) -> Inputs {
        let last = self.last;
        let faults = &mut self.faults;
        let pins = &mut self.pins;

        self.last = Levels {
            reset: Self::read(&mut pins.reset, "reset", last.reset, faults),
            emergency: Self::read(&mut pins.emergency, "emergency", last.emergency, faults),
            ns: [
                Self::read(&mut pins.ns_sensor_1, "ns_sensor_1", last.ns[0], faults),
                Self::read(&mut pins.ns_sensor_2, "ns_sensor_2", last.ns[1], faults),
            ],
            ew: [
                Self::read(&mut pins.ew_sensor_1, "ew_sensor_1", last.ew[0], faults),
                Self::read(&mut pins.ew_sensor_2, "ew_sensor_2", last.ew[1], faults),
            ],
        };
        self.last.inputs()
    }
}
