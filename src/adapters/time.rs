//! Monotonic clock adapter.
//!
//! Implements [`ClockPort`] for the intersection controller.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` for
//!   host-side runs and simulation.
//!
//! The reading is truncated to `u32` milliseconds, so it wraps after
//! roughly 49.7 days.  Every consumer compares with `wrapping_sub`.
//!
//! The reset hold is delegated to any `embedded-hal` [`DelayNs`]; on the
//! board that is `FreeRtos`, which yields to the scheduler.

use embedded_hal::delay::DelayNs;

use crate::app::ports::ClockPort;

pub struct MonotonicClock<D> {
    delay: D,
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl<D: DelayNs> MonotonicClock<D> {
    pub fn new(delay: D) -> Self {
        Self {
            delay,
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since construction (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    /// The delay provider, for the loop's inter-tick pause.
    pub fn delay(&mut self) -> &mut D {
        &mut self.delay
    }
}

impl<D: DelayNs> ClockPort for MonotonicClock<D> {
    fn now_ms(&self) -> u32 {
        (self.uptime_us() / 1_000) as u32
    }

    fn hold_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
