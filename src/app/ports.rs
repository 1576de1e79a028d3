//! Port traits: the boundary between the control core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (GPIO sampler, lamp driver, clock, diagnostic sink)
//! implement these traits.  The [`Controller`](super::controller::Controller)
//! consumes them via generics, so the core never touches hardware directly
//! and runs unchanged against the in-memory fakes in the test suite.

use crate::fsm::context::{Inputs, Lamp};
use crate::fsm::StateId;

use super::events::ControllerEvent;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond time source.
pub trait ClockPort {
    /// Milliseconds since boot.  Non-decreasing, wraps at `u32::MAX`.
    fn now_ms(&self) -> u32;

    /// Block for `ms`.  The only suspension the tick loop performs.
    fn hold_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: pins → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one consistent sample of every input per tick.
pub trait InputPort {
    /// Instantaneous logical levels; no debouncing.
    fn sample(&mut self) -> Inputs;
}

// ───────────────────────────────────────────────────────────────
// Light port (driven adapter: domain → lamps)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the four lamp outputs.
pub trait LightPort {
    /// Drive a single lamp.
    fn write(&mut self, lamp: Lamp, on: bool);

    /// Show `state`.  Every lamp is switched off before any is switched
    /// on, so no intermediate output combination lights a conflict.
    fn apply(&mut self, state: StateId) {
        for lamp in Lamp::ALL {
            self.write(lamp, false);
        }
        for lamp in state.lamps().lit() {
            self.write(lamp, true);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → diagnostics)
// ───────────────────────────────────────────────────────────────

/// Receives one [`ControllerEvent`] per committed transition plus the
/// reset / emergency-clear records.  Not required for correctness.
pub trait EventSink {
    fn emit(&mut self, event: &ControllerEvent);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &ControllerEvent) {}
}
