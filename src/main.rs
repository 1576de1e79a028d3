//! Intersection controller firmware: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                    │
//! │                                                            │
//! │  HardwareAdapter           LogEventSink    MonotonicClock  │
//! │  (InputPort + LightPort)   (EventSink)     (ClockPort)     │
//! │                                                            │
//! │  ─────────────── Port Trait Boundary ──────────────────    │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │            Controller (pure logic)                   │  │
//! │  │  reset override · state table · Fsm                  │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use embedded_hal::delay::DelayNs;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyIOPin, PinDriver, Pull};
use log::{info, warn};

use intersection::adapters::hardware::HardwareAdapter;
use intersection::adapters::log_sink::LogEventSink;
use intersection::adapters::time::MonotonicClock;
use intersection::app::controller::Controller;
use intersection::config::ControllerConfig;
use intersection::drivers::lights::LightDriver;
use intersection::pins;
use intersection::sensors::{InputPins, InputSampler};

/// Claim a GPIO by number.
///
/// SAFETY: each number in `pins` is claimed exactly once, here, and no
/// other code in the firmware touches GPIO.
fn gpio(num: i32) -> AnyIOPin {
    unsafe { AnyIOPin::new(num) }
}

/// Compile-time override document, if the build provided one.
fn load_config() -> ControllerConfig {
    match option_env!("INTERSECTION_CONFIG") {
        Some(json) => match ControllerConfig::from_json(json) {
            Ok(cfg) => {
                info!("Config loaded from INTERSECTION_CONFIG");
                cfg
            }
            Err(e) => {
                warn!("INTERSECTION_CONFIG rejected ({}), using defaults", e);
                ControllerConfig::default()
            }
        },
        None => ControllerConfig::default(),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Intersection controller v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();
    info!(
        "Timing: init={}ms ns_green={}ms ew_green={}ms yellow={}ms emergency_wait={}ms",
        config.timing.init_ms,
        config.timing.ns_green_ms,
        config.timing.ew_green_ms,
        config.timing.yellow_ms,
        config.timing.emergency_wait_ms,
    );

    // ── 3. GPIO ───────────────────────────────────────────────
    let mut reset = PinDriver::input(gpio(pins::RESET_GPIO))?;
    reset.set_pull(Pull::Up)?;
    let mut emergency = PinDriver::input(gpio(pins::EMERGENCY_GPIO))?;
    emergency.set_pull(Pull::Up)?;

    let sampler = InputSampler::new(InputPins {
        reset,
        emergency,
        ns_sensor_1: PinDriver::input(gpio(pins::NS_SENSOR_1_GPIO))?,
        ns_sensor_2: PinDriver::input(gpio(pins::NS_SENSOR_2_GPIO))?,
        ew_sensor_1: PinDriver::input(gpio(pins::EW_SENSOR_1_GPIO))?,
        ew_sensor_2: PinDriver::input(gpio(pins::EW_SENSOR_2_GPIO))?,
    });
    let lights = LightDriver::new(
        PinDriver::output(gpio(pins::NS_GREEN_GPIO))?,
        PinDriver::output(gpio(pins::NS_YELLOW_GPIO))?,
        PinDriver::output(gpio(pins::EW_GREEN_GPIO))?,
        PinDriver::output(gpio(pins::EW_YELLOW_GPIO))?,
    );
    let mut io = HardwareAdapter::new(sampler, lights);

    // ── 4. Controller ─────────────────────────────────────────
    let mut clock = MonotonicClock::new(FreeRtos);
    let mut sink = LogEventSink::new();
    let tick_interval_ms = config.tick_interval_ms;

    let mut controller = Controller::new(config, &clock);
    controller.start(&mut io, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        controller.tick(&mut io, &mut clock, &mut sink);
        clock.delay().delay_ms(tick_interval_ms);
    }
}
