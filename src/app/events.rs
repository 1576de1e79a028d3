//! Outbound controller events.
//!
//! The [`Controller`](super::controller::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  `Display` renders the
//! line-oriented diagnostic record for each event.

use core::fmt;

use crate::fsm::StateId;
use crate::fsm::context::Lamps;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The controller has started (carries initial state).
    Started(StateId),

    /// A transition was committed.
    StateChanged { from: StateId, to: StateId },

    /// Reset was sampled asserted; the controller is held in `Init`.
    ResetAsserted { from: StateId },

    /// Emergency released while preempted; normal flow resumes.
    EmergencyCleared { from: StateId, to: StateId },

    /// The state index was invalid and the controller fell back to `Init`.
    Recovered { index: usize },
}

impl fmt::Display for ControllerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started(state) => write!(f, "START {state}"),
            Self::StateChanged { from, to } => write!(f, "{from} -> {to}"),
            Self::ResetAsserted { .. } => f.write_str("RESET"),
            Self::EmergencyCleared { from, to } => write!(f, "EMERGENCY CLEARED: {from} -> {to}"),
            Self::Recovered { index } => write!(f, "RECOVERED: invalid state {index} -> INIT"),
        }
    }
}

/// Point-in-time view of the controller for logging or inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub state: StateId,
    pub lamps: Lamps,
    /// Milliseconds in the current state.
    pub elapsed_ms: u32,
    /// Time left before the state's timed exit becomes eligible, if it
    /// has one.  Zero once the dwell is met.
    pub dwell_remaining_ms: Option<u32>,
    pub tick_count: u64,
}
