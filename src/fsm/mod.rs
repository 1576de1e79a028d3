//! Table-driven finite state machine for the intersection.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                    │
//! │  ┌─────────────────┬────────┬─────────────┬────────────────┐   │
//! │  │ StateId         │ lamps  │ on_normal   │ on_emergency   │   │
//! │  ├─────────────────┼────────┼─────────────┼────────────────┤   │
//! │  │ Init            │ -      │ fn(ctx)->?  │ fn(ctx)->?     │   │
//! │  │ NsGreen         │ NS_G   │ fn(ctx)->?  │ fn(ctx)->?     │   │
//! │  │ NsYellow        │ NS_Y   │ fn(ctx)->?  │ fn(ctx)->?     │   │
//! │  │ EwGreen         │ EW_G   │ fn(ctx)->?  │ fn(ctx)->?     │   │
//! │  │ EwYellow        │ EW_Y   │ fn(ctx)->?  │ fn(ctx)->?     │   │
//! │  │ EmergencyTrans  │ EW_Y   │ fn(ctx)->?  │ fn(ctx)->?     │   │
//! │  │ EmergencyGreen  │ NS_G   │ fn(ctx)->?  │ fn(ctx)->?     │   │
//! │  └─────────────────┴────────┴─────────────┴────────────────┘   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`next`] is the pure combinational half: given the current state, the
//! time spent in it and one input sample it picks the successor.  [`Fsm`]
//! is the clocked half and the only place the current state and its entry
//! stamp change.  Reset never reaches [`next`]; the controller forces
//! `Init` before consulting the table.

pub mod context;
pub mod states;

use core::fmt;

use crate::config::TimingConfig;
use context::{Inputs, Lamps, TickContext};
use states::STATE_TABLE;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Every state the controller can be in.
/// Must stay in sync with [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Init = 0,
    NsGreen = 1,
    NsYellow = 2,
    EwGreen = 3,
    EwYellow = 4,
    EmergencyTrans = 5,
    EmergencyGreen = 6,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 7;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Init,
        Self::NsGreen,
        Self::NsYellow,
        Self::EwGreen,
        Self::EwYellow,
        Self::EmergencyTrans,
        Self::EmergencyGreen,
    ];

    /// Convert a table index back to a `StateId`.
    pub const fn from_index(idx: usize) -> Option<Self> {
        if idx < Self::COUNT {
            Some(Self::ALL[idx])
        } else {
            None
        }
    }

    fn descriptor(self) -> &'static StateDescriptor {
        &STATE_TABLE[self as usize]
    }

    /// Upper-case name used in diagnostic records.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Lamps lit while in this state.
    pub fn lamps(self) -> Lamps {
        self.descriptor().lamps
    }

    /// `true` for the two states only reachable through preemption.
    pub const fn is_emergency(self) -> bool {
        matches!(self, Self::EmergencyTrans | Self::EmergencyGreen)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Transition handler.  Returns `Some(next)` to move, `None` to stay.
pub type TransitionFn = fn(&TickContext<'_>) -> Option<StateId>;

/// Static descriptor for a single state.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub lamps: Lamps,
    pub on_normal: TransitionFn,
    pub on_emergency: TransitionFn,
}

pub type StateTable = [StateDescriptor; StateId::COUNT];

// ---------------------------------------------------------------------------
// Pure next-state function
// ---------------------------------------------------------------------------

/// Compute the successor of `current`.  No side effects.
///
/// `inputs.reset` is ignored here: reset is a hard override applied by the
/// caller before this function is consulted.
pub fn next(timing: &TimingConfig, current: StateId, elapsed_ms: u32, inputs: &Inputs) -> StateId {
    let ctx = TickContext {
        elapsed_ms,
        inputs,
        timing,
    };
    let row = current.descriptor();
    let handler = if inputs.emergency {
        row.on_emergency
    } else {
        row.on_normal
    };
    handler(&ctx).unwrap_or(current)
}

/// Minimum time `state` is held before its elapsed-time exit can fire.
/// `None` for `EmergencyGreen`, which only leaves on an input change.
pub const fn dwell_ms(timing: &TimingConfig, state: StateId) -> Option<u32> {
    match state {
        StateId::Init => Some(timing.init_ms),
        StateId::NsGreen => Some(timing.ns_green_ms),
        StateId::EwGreen => Some(timing.ew_green_ms),
        StateId::NsYellow | StateId::EwYellow => Some(timing.yellow_ms),
        StateId::EmergencyTrans => Some(timing.emergency_wait_ms),
        StateId::EmergencyGreen => None,
    }
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// Result of one [`Fsm::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No transition; the state stays as it is.
    Stayed(StateId),
    /// A transition was committed and the entry stamp moved to `now`.
    Moved { from: StateId, to: StateId },
    /// The current index does not name a state.
    Invalid(usize),
}

/// Current state plus the timestamp at which it was entered.
pub struct Fsm {
    /// Index into [`STATE_TABLE`].
    current: usize,
    /// Clock reading when `current` was entered.
    state_start_ms: u32,
}

impl Fsm {
    pub const fn new(initial: StateId, now_ms: u32) -> Self {
        Self {
            current: initial as usize,
            state_start_ms: now_ms,
        }
    }

    /// The current state, or `None` if the index has been corrupted.
    pub const fn current_state(&self) -> Option<StateId> {
        StateId::from_index(self.current)
    }

    pub const fn state_start_ms(&self) -> u32 {
        self.state_start_ms
    }

    /// Time in the current state.  Wrapping, so a clock rollover between
    /// entry and now still yields the true interval.
    pub const fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.state_start_ms)
    }

    /// Evaluate the table once and commit the result.
    pub fn step(&mut self, timing: &TimingConfig, now_ms: u32, inputs: &Inputs) -> Step {
        let Some(current) = self.current_state() else {
            return Step::Invalid(self.current);
        };
        let target = next(timing, current, self.elapsed_ms(now_ms), inputs);
        if target == current {
            return Step::Stayed(current);
        }
        self.current = target as usize;
        self.state_start_ms = now_ms;
        Step::Moved {
            from: current,
            to: target,
        }
    }

    /// Enter `state` unconditionally and restamp.  Used for reset and for
    /// recovering from a corrupted index.
    pub fn force(&mut self, state: StateId, now_ms: u32) {
        self.current = state as usize;
        self.state_start_ms = now_ms;
    }

    #[cfg(test)]
    pub(crate) fn corrupt(&mut self, idx: usize) {
        self.current = idx;
    }
}
