//! Fuzz target: `Controller::tick` under arbitrary input histories
//!
//! Each pair of fuzz bytes is one tick: the low nibble of the first byte
//! is the input word (reset, emergency, ns_demand, ew_demand), the second
//! byte scales the gap to the next tick.  Verifies:
//! - No panics under any byte sequence
//! - No lamp write ever leaves a conflicting combination lit
//! - The lamps always match the committed state after a tick
//! - An asserted reset always lands in `INIT`
//!
//! cargo fuzz run fuzz_controller

#![no_main]

use intersection::app::controller::{Controller, TickOutcome};
use intersection::app::ports::{ClockPort, InputPort, LightPort, NullSink};
use intersection::config::ControllerConfig;
use intersection::fsm::StateId;
use intersection::fsm::context::{Inputs, Lamp, Lamps};
use libfuzzer_sys::fuzz_target;

struct Clock(u32);

impl ClockPort for Clock {
    fn now_ms(&self) -> u32 {
        self.0
    }

    fn hold_ms(&mut self, ms: u32) {
        self.0 = self.0.wrapping_add(ms);
    }
}

#[derive(Default)]
struct Io {
    inputs: Inputs,
    lamps: Lamps,
}

impl InputPort for Io {
    fn sample(&mut self) -> Inputs {
        self.inputs
    }
}

impl LightPort for Io {
    fn write(&mut self, lamp: Lamp, on: bool) {
        self.lamps.set(lamp, on);
        assert!(self.lamps.is_safe(), "conflict after {lamp:?}={on}");
    }
}

fuzz_target!(|data: &[u8]| {
    let mut clock = Clock(0);
    let mut io = Io::default();
    let mut ctl = Controller::new(ControllerConfig::default(), &clock);
    ctl.start(&mut io, &mut NullSink);

    for pair in data.chunks_exact(2) {
        let word = pair[0];
        io.inputs = Inputs {
            reset: word & 0b0001 != 0,
            emergency: word & 0b0010 != 0,
            ns_demand: word & 0b0100 != 0,
            ew_demand: word & 0b1000 != 0,
        };

        let outcome = ctl.tick(&mut io, &mut clock, &mut NullSink);
        assert_eq!(io.lamps, ctl.state().lamps());
        if io.inputs.reset {
            assert_eq!(outcome, TickOutcome::Reset);
            assert_eq!(ctl.state(), StateId::Init);
        }

        clock.0 = clock.0.wrapping_add(u32::from(pair[1]) * 50);
    }
});
