//! The tick loop, the single owner of controller state.
//!
//! [`Controller`] owns the FSM engine and configuration.  Every call to
//! [`Controller::tick`] samples the inputs once, applies the reset
//! override, consults the pure transition table, and on a change commits
//! the new state, restamps it, and drives the lamps.
//!
//! ```text
//!  ClockPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  InputPort ──▶ │        Controller         │
//!                │  reset · fsm::next · Fsm  │ ──▶ LightPort
//!                └──────────────────────────┘
//! ```

use log::{debug, error, info, warn};

use crate::config::ControllerConfig;
use crate::fsm::{self, Fsm, Step, StateId};

use super::events::{ControllerEvent, Status};
use super::ports::{ClockPort, EventSink, InputPort, LightPort};

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No transition; lamps untouched.
    Stayed(StateId),
    /// Committed a transition and redrove the lamps.
    Transitioned { from: StateId, to: StateId },
    /// Reset was asserted: forced to `Init` and held.
    Reset,
    /// The state index was invalid; forced to `Init`.
    Recovered,
}

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

pub struct Controller {
    fsm: Fsm,
    config: ControllerConfig,
    tick_count: u64,
}

impl Controller {
    /// Build a controller in `Init`, stamped at the clock's current reading.
    ///
    /// Does **not** touch the lamps; call [`start`](Self::start) next.
    pub fn new(config: ControllerConfig, clock: &impl ClockPort) -> Self {
        Self {
            fsm: Fsm::new(StateId::Init, clock.now_ms()),
            config,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the initial lamp image (all dark) and announce the start.
    pub fn start(&mut self, lights: &mut impl LightPort, sink: &mut impl EventSink) {
        let state = self.state();
        lights.apply(state);
        sink.emit(&ControllerEvent::Started(state));
        info!("Controller started in {state}");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one iteration: sample → reset override → next state → commit →
    /// lamps.
    ///
    /// `io` satisfies both [`InputPort`] and [`LightPort`] so the sampler
    /// and driver can live in one hardware adapter without a double
    /// mutable borrow.
    pub fn tick(
        &mut self,
        io: &mut (impl InputPort + LightPort),
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.tick_count = self.tick_count.wrapping_add(1);

        // 1. One sample for the whole tick.
        let inputs = io.sample();
        let now = clock.now_ms();

        // 2. Reset is a hard override; the table is not consulted.
        if inputs.reset {
            let from = self.state();
            self.fsm.force(StateId::Init, now);
            io.apply(StateId::Init);
            warn!(
                "Reset asserted in {from}, holding {}ms",
                self.config.reset_hold_ms
            );
            sink.emit(&ControllerEvent::ResetAsserted { from });
            clock.hold_ms(self.config.reset_hold_ms);
            return TickOutcome::Reset;
        }

        // 3–5. Evaluate and commit.
        match self.fsm.step(&self.config.timing, now, &inputs) {
            Step::Stayed(state) => TickOutcome::Stayed(state),
            Step::Moved { from, to } => {
                io.apply(to);
                debug!("{from} -> {to} at {now}ms");
                if from.is_emergency() && !inputs.emergency {
                    sink.emit(&ControllerEvent::EmergencyCleared { from, to });
                }
                sink.emit(&ControllerEvent::StateChanged { from, to });
                TickOutcome::Transitioned { from, to }
            }
            Step::Invalid(index) => {
                error!("Invalid state index {index}, forcing INIT");
                self.fsm.force(StateId::Init, now);
                io.apply(StateId::Init);
                sink.emit(&ControllerEvent::Recovered { index });
                TickOutcome::Recovered
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current state.  A corrupted index reads as `Init`, which is where
    /// the next tick will put it.
    pub fn state(&self) -> StateId {
        self.fsm.current_state().unwrap_or(StateId::Init)
    }

    /// Clock reading at which the current state was entered.
    pub const fn state_start_ms(&self) -> u32 {
        self.fsm.state_start_ms()
    }

    /// Total ticks executed since construction.
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub const fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Snapshot for telemetry or a debug console.
    pub fn status(&self, now_ms: u32) -> Status {
        let state = self.state();
        let elapsed_ms = self.fsm.elapsed_ms(now_ms);
        Status {
            state,
            lamps: state.lamps(),
            elapsed_ms,
            dwell_remaining_ms: fsm::dwell_ms(&self.config.timing, state)
                .map(|dwell| dwell.saturating_sub(elapsed_ms)),
            tick_count: self.tick_count,
        }
    }

    #[cfg(test)]
    pub(crate) fn fsm_mut(&mut self) -> &mut Fsm {
        &mut self.fsm
    }
}
