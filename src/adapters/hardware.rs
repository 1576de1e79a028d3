//! Hardware adapter: bridges the intersection's GPIO to the port traits.
//!
//! Owns the [`InputSampler`] and the [`LightDriver`], exposing them
//! through [`InputPort`] and [`LightPort`] as a single value so the
//! controller can borrow both sides at once.  Generic over the
//! `embedded-hal` pin types: ESP-IDF `PinDriver`s on the board, in-memory
//! pins in the integration tests.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{InputPort, LightPort};
use crate::drivers::lights::LightDriver;
use crate::fsm::context::{Inputs, Lamp};
use crate::sensors::InputSampler;

/// Concrete adapter that combines the intersection I/O behind port traits.
pub struct HardwareAdapter<R, E, N1, N2, W1, W2, NG, NY, EG, EY> {
    inputs: InputSampler<R, E, N1, N2, W1, W2>,
    lights: LightDriver<NG, NY, EG, EY>,
}

impl<R, E, N1, N2, W1, W2, NG, NY, EG, EY> HardwareAdapter<R, E, N1, N2, W1, W2, NG, NY, EG, EY> {
    pub const fn new(
        inputs: InputSampler<R, E, N1, N2, W1, W2>,
        lights: LightDriver<NG, NY, EG, EY>,
    ) -> Self {
        Self { inputs, lights }
    }

    pub const fn inputs(&self) -> &InputSampler<R, E, N1, N2, W1, W2> {
        &self.inputs
    }

    pub const fn lights(&self) -> &LightDriver<NG, NY, EG, EY> {
        &self.lights
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<R, E, N1, N2, W1, W2, NG, NY, EG, EY> InputPort for HardwareAdapter<R, E, N1, N2, W1, W2, NG, NY, EG, EY>
where
    R: InputPin,
    E: InputPin,
    N1: InputPin,
    N2: InputPin,
    W1: InputPin,
    W2: InputPin,
{
    fn sample(&mut self) -> Inputs {
        self.inputs.sample()
    }
}

// ── LightPort implementation ──────────────────────────────────

impl<R, E, N1, N2, W1, W2, NG, NY, EG, EY> LightPort for HardwareAdapter<R, E, N1, N2, W1, W2, NG, NY, EG, EY>
where
    NG: OutputPin,
    NY: OutputPin,
    EG: OutputPin,
    EY: OutputPin,
{
    fn write(&mut self, lamp: Lamp, on: bool) {
        self.lights.write(lamp, on);
    }
}
