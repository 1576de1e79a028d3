//! The controller driven through the real GPIO adapters over in-memory
//! `embedded-hal` pins: polarity, lamp mapping and log sink wiring.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::mock_hw::{FakeClock, LogSink, TICK_MS};
use intersection::adapters::hardware::HardwareAdapter;
use intersection::adapters::log_sink::LogEventSink;
use intersection::app::controller::Controller;
use intersection::app::ports::EventSink;
use intersection::config::ControllerConfig;
use intersection::drivers::lights::LightDriver;
use intersection::fsm::StateId;
use intersection::sensors::{InputPins, InputSampler};

/// A wire shared between the test and the adapter.
#[derive(Clone)]
struct Wire(Rc<Cell<bool>>);

impl Wire {
    fn new(high: bool) -> Self {
        Self(Rc::new(Cell::new(high)))
    }

    fn high(&self) -> bool {
        self.0.get()
    }

    fn drive(&self, high: bool) {
        self.0.set(high);
    }
}

impl ErrorType for Wire {
    type Error = Infallible;
}

impl InputPin for Wire {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

impl OutputPin for Wire {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }
}

type Board = HardwareAdapter<Wire, Wire, Wire, Wire, Wire, Wire, Wire, Wire, Wire, Wire>;

/// Test-side handles on every line.
struct Harness {
    reset: Wire,
    emergency: Wire,
    ns_sensors: [Wire; 2],
    ew_sensors: [Wire; 2],
    ns_green: Wire,
    ns_yellow: Wire,
    ew_green: Wire,
    ew_yellow: Wire,
}

impl Harness {
    /// Idle bus: pulled-up controls released, sensors clear.
    fn new() -> Self {
        Self {
            reset: Wire::new(true),
            emergency: Wire::new(true),
            ns_sensors: [Wire::new(false), Wire::new(false)],
            ew_sensors: [Wire::new(false), Wire::new(false)],
            ns_green: Wire::new(false),
            ns_yellow: Wire::new(false),
            ew_green: Wire::new(false),
            ew_yellow: Wire::new(false),
        }
    }

    fn board(&self) -> Board {
        let sampler = InputSampler::new(InputPins {
            reset: self.reset.clone(),
            emergency: self.emergency.clone(),
            ns_sensor_1: self.ns_sensors[0].clone(),
            ns_sensor_2: self.ns_sensors[1].clone(),
            ew_sensor_1: self.ew_sensors[0].clone(),
            ew_sensor_2: self.ew_sensors[1].clone(),
        });
        let lights = LightDriver::new(
            self.ns_green.clone(),
            self.ns_yellow.clone(),
            self.ew_green.clone(),
            self.ew_yellow.clone(),
        );
        HardwareAdapter::new(sampler, lights)
    }

    /// `[NS_G, NS_Y, EW_G, EW_Y]` as currently driven.
    fn lamps(&self) -> [bool; 4] {
        [
            self.ns_green.high(),
            self.ns_yellow.high(),
            self.ew_green.high(),
            self.ew_yellow.high(),
        ]
    }
}

fn run(ctl: &mut Controller, board: &mut Board, clock: &mut FakeClock, sink: &mut impl EventSink, until: u32) {
    while clock.now < until {
        ctl.tick(board, clock, sink);
        clock.advance(TICK_MS);
    }
}

#[test]
fn single_sensor_per_direction_is_enough_demand() {
    let h = Harness::new();
    let mut board = h.board();
    let mut clock = FakeClock::at(0);
    let mut sink = LogSink::new();
    let mut ctl = Controller::new(ControllerConfig::default(), &clock);
    ctl.start(&mut board, &mut sink);
    assert_eq!(h.lamps(), [false; 4]);

    run(&mut ctl, &mut board, &mut clock, &mut sink, 200);
    assert_eq!(h.lamps(), [true, false, false, false]);

    // Only the second EW sensor sees a car.
    h.ew_sensors[1].drive(true);
    run(&mut ctl, &mut board, &mut clock, &mut sink, 10_200);
    assert_eq!(ctl.state(), StateId::NsYellow);
    assert_eq!(h.lamps(), [false, true, false, false]);

    run(&mut ctl, &mut board, &mut clock, &mut sink, 12_200);
    assert_eq!(ctl.state(), StateId::EwGreen);
    assert_eq!(h.lamps(), [false, false, true, false]);
}

#[test]
fn pulling_control_lines_low_asserts_them() {
    let h = Harness::new();
    let mut board = h.board();
    let mut clock = FakeClock::at(0);
    let mut sink = LogSink::new();
    let mut ctl = Controller::new(ControllerConfig::default(), &clock);
    ctl.start(&mut board, &mut sink);

    h.emergency.drive(false);
    run(&mut ctl, &mut board, &mut clock, &mut sink, 50);
    assert_eq!(ctl.state(), StateId::EmergencyGreen);
    assert_eq!(h.lamps(), [true, false, false, false]);

    h.reset.drive(false);
    run(&mut ctl, &mut board, &mut clock, &mut sink, 100);
    assert_eq!(ctl.state(), StateId::Init);
    assert_eq!(h.lamps(), [false; 4]);
    assert_eq!(clock.holds.first(), Some(&500));

    h.reset.drive(true);
    h.emergency.drive(true);
    let until = clock.now + 200;
    run(&mut ctl, &mut board, &mut clock, &mut sink, until);
    assert_eq!(ctl.state(), StateId::NsGreen);
    assert_eq!(board.lights().faults(), 0);
    assert_eq!(board.inputs().faults(), 0);
}

#[test]
fn log_sink_drives_a_preemption_then_reset() {
    let h = Harness::new();
    let mut board = h.board();
    let mut clock = FakeClock::at(0);
    let mut sink = LogEventSink::new();
    let mut ctl = Controller::new(ControllerConfig::default(), &clock);
    ctl.start(&mut board, &mut sink);

    h.ns_sensors[0].drive(true);
    h.ew_sensors[0].drive(true);
    run(&mut ctl, &mut board, &mut clock, &mut sink, 15_000);
    h.emergency.drive(false);
    run(&mut ctl, &mut board, &mut clock, &mut sink, 18_000);
    h.emergency.drive(true);
    h.reset.drive(false);
    run(&mut ctl, &mut board, &mut clock, &mut sink, 18_100);

    assert_eq!(ctl.state(), StateId::Init);
}
