//! Concrete transition handlers and the state table.
//!
//! Each state carries two plain `fn` pointers: one consulted while the
//! emergency input is asserted, one for normal flow.  A handler returns
//! `Some(next)` to move and `None` to stay.
//!
//! ```text
//!  Normal flow (demand-gated greens):
//!
//!  INIT ──[INIT_MS]──▶ NS_GREEN ──[NS_GREEN_MS ∧ ew_demand]──▶ NS_YELLOW
//!                         ▲                                        │
//!                   [YELLOW_MS]                               [YELLOW_MS]
//!                         │                                        ▼
//!                     EW_YELLOW ◀──[EW_GREEN_MS ∧ ns_demand]── EW_GREEN
//!
//!  Emergency (NS is the preempted direction):
//!
//!  INIT / NS_GREEN / NS_YELLOW ──────────────────────────▶ EMERGENCY_GREEN
//!  EW_GREEN ──▶ EW_YELLOW ──[YELLOW_MS]──▶ EMERGENCY_TRANS ──[WAIT]──┘
//!
//!  Emergency released: EMERGENCY_TRANS / EMERGENCY_GREEN ──▶ NS_GREEN
//! ```

use super::context::{Lamp, Lamps, TickContext};
use super::{StateDescriptor, StateId, StateTable};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// The state table, indexed by `StateId as usize`.
pub static STATE_TABLE: StateTable = build_state_table();

/// Build the state table.  Row order must match the `StateId` discriminants.
pub const fn build_state_table() -> StateTable {
    [
        // Index 0: Init
        StateDescriptor {
            id: StateId::Init,
            name: "INIT",
            lamps: Lamps::DARK,
            on_normal: init_normal,
            on_emergency: preempt_to_green,
        },
        // Index 1: NsGreen
        StateDescriptor {
            id: StateId::NsGreen,
            name: "NS_GREEN",
            lamps: Lamps::only(Lamp::NsGreen),
            on_normal: ns_green_normal,
            on_emergency: preempt_to_green,
        },
        // Index 2: NsYellow
        StateDescriptor {
            id: StateId::NsYellow,
            name: "NS_YELLOW",
            lamps: Lamps::only(Lamp::NsYellow),
            on_normal: ns_yellow_normal,
            on_emergency: preempt_to_green,
        },
        // Index 3: EwGreen
        StateDescriptor {
            id: StateId::EwGreen,
            name: "EW_GREEN",
            lamps: Lamps::only(Lamp::EwGreen),
            on_normal: ew_green_normal,
            on_emergency: ew_green_emergency,
        },
        // Index 4: EwYellow
        StateDescriptor {
            id: StateId::EwYellow,
            name: "EW_YELLOW",
            lamps: Lamps::only(Lamp::EwYellow),
            on_normal: ew_yellow_normal,
            on_emergency: ew_yellow_emergency,
        },
        // Index 5: EmergencyTrans (shows EW yellow while clearing)
        StateDescriptor {
            id: StateId::EmergencyTrans,
            name: "EMERGENCY_TRANS",
            lamps: Lamps::only(Lamp::EwYellow),
            on_normal: emergency_released,
            on_emergency: emergency_trans_emergency,
        },
        // Index 6: EmergencyGreen
        StateDescriptor {
            id: StateId::EmergencyGreen,
            name: "EMERGENCY_GREEN",
            lamps: Lamps::only(Lamp::NsGreen),
            on_normal: emergency_released,
            on_emergency: hold,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared handlers
// ═══════════════════════════════════════════════════════════════════════════

fn hold(_ctx: &TickContext<'_>) -> Option<StateId> {
    None
}

/// NS already owns the right of way (or nothing is lit): no clearance needed.
fn preempt_to_green(_ctx: &TickContext<'_>) -> Option<StateId> {
    Some(StateId::EmergencyGreen)
}

/// Emergency dropped while preempted.  Any remaining clearance time in
/// `EMERGENCY_TRANS` is discarded, and there is no minimum hold after an
/// `EMERGENCY_GREEN`.
fn emergency_released(_ctx: &TickContext<'_>) -> Option<StateId> {
    Some(StateId::NsGreen)
}

// ═══════════════════════════════════════════════════════════════════════════
//  INIT
// ═══════════════════════════════════════════════════════════════════════════

fn init_normal(ctx: &TickContext<'_>) -> Option<StateId> {
    ctx.dwelled(ctx.timing.init_ms).then_some(StateId::NsGreen)
}

// ═══════════════════════════════════════════════════════════════════════════
//  NS phase
// ═══════════════════════════════════════════════════════════════════════════

fn ns_green_normal(ctx: &TickContext<'_>) -> Option<StateId> {
    // No maximum green: without EW demand NS holds indefinitely.
    (ctx.dwelled(ctx.timing.ns_green_ms) && ctx.inputs.ew_demand).then_some(StateId::NsYellow)
}

fn ns_yellow_normal(ctx: &TickContext<'_>) -> Option<StateId> {
    ctx.dwelled(ctx.timing.yellow_ms).then_some(StateId::EwGreen)
}

// ═══════════════════════════════════════════════════════════════════════════
//  EW phase
// ═══════════════════════════════════════════════════════════════════════════

fn ew_green_normal(ctx: &TickContext<'_>) -> Option<StateId> {
    (ctx.dwelled(ctx.timing.ew_green_ms) && ctx.inputs.ns_demand).then_some(StateId::EwYellow)
}

/// EW must show yellow before NS may be given green.
fn ew_green_emergency(_ctx: &TickContext<'_>) -> Option<StateId> {
    Some(StateId::EwYellow)
}

fn ew_yellow_normal(ctx: &TickContext<'_>) -> Option<StateId> {
    ctx.dwelled(ctx.timing.yellow_ms).then_some(StateId::NsGreen)
}

fn ew_yellow_emergency(ctx: &TickContext<'_>) -> Option<StateId> {
    ctx.dwelled(ctx.timing.yellow_ms).then_some(StateId::EmergencyTrans)
}

// ═══════════════════════════════════════════════════════════════════════════
//  EMERGENCY_TRANS
// ═══════════════════════════════════════════════════════════════════════════

fn emergency_trans_emergency(ctx: &TickContext<'_>) -> Option<StateId> {
    ctx.dwelled(ctx.timing.emergency_wait_ms).then_some(StateId::EmergencyGreen)
}
