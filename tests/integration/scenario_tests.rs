//! End-to-end timelines for the intersection controller.
//!
//! The rig ticks every 10 ms on a fake clock, so every default dwell lands
//! exactly on a tick and the commit times below are exact.

use crate::mock_hw::Rig;
use intersection::app::controller::TickOutcome;
use intersection::fsm::StateId;
use intersection::fsm::context::{Inputs, Lamp, Lamps};

// ── Cold start ────────────────────────────────────────────────

#[test]
fn cold_start_goes_green_and_rests_without_cross_demand() {
    let mut rig = Rig::new();
    assert_eq!(rig.state(), StateId::Init);
    assert_eq!(rig.io.lamps, Lamps::DARK);

    rig.run_until(100);
    assert_eq!(rig.state(), StateId::Init, "INIT holds for its full dwell");

    rig.tick();
    assert_eq!(rig.state(), StateId::NsGreen);
    assert_eq!(rig.ctl.state_start_ms(), 100);
    assert_eq!(rig.io.lamps, Lamps::only(Lamp::NsGreen));

    // No EW demand: NS keeps the right of way indefinitely.
    rig.run_until(120_000);
    assert_eq!(rig.state(), StateId::NsGreen);
    assert_eq!(rig.sink.records(), vec!["START INIT", "INIT -> NS_GREEN"]);
}

// ── Full normal cycle ─────────────────────────────────────────

#[test]
fn sustained_demand_cycles_with_exact_dwells() {
    let mut rig = Rig::new();
    rig.io.inputs = Inputs::both_demanding();

    rig.run_until(30_200);

    let got: Vec<(u32, StateId)> = rig.timeline.iter().map(|(t, _, to)| (*t, *to)).collect();
    assert_eq!(
        got,
        vec![
            (100, StateId::NsGreen),
            (10_100, StateId::NsYellow),
            (12_100, StateId::EwGreen),
            (18_100, StateId::EwYellow),
            (20_100, StateId::NsGreen),
            (30_100, StateId::NsYellow),
        ]
    );
}

#[test]
fn yellow_always_separates_the_greens() {
    let mut rig = Rig::new();
    rig.io.inputs = Inputs::both_demanding();
    rig.run_until(100_000);

    for (_, from, to) in &rig.timeline {
        assert!(
            !(*from == StateId::NsGreen && *to == StateId::EwGreen)
                && !(*from == StateId::EwGreen && *to == StateId::NsGreen),
            "direct green swap {from} -> {to}"
        );
    }
}

// ── Emergency during EW_GREEN ─────────────────────────────────

#[test]
fn emergency_during_ew_green_clears_through_yellow() {
    let mut rig = Rig::new();
    rig.io.inputs = Inputs::both_demanding();
    rig.run_until(15_000);
    assert_eq!(rig.state(), StateId::EwGreen);

    rig.io.inputs.emergency = true;
    rig.tick();
    assert_eq!(rig.state(), StateId::EwYellow);
    assert_eq!(rig.ctl.state_start_ms(), 15_000);
    assert_eq!(rig.io.lamps, Lamps::only(Lamp::EwYellow));

    rig.run_until(17_000);
    assert_eq!(rig.state(), StateId::EwYellow);
    rig.tick();
    assert_eq!(rig.state(), StateId::EmergencyTrans);
    assert_eq!(rig.io.lamps, Lamps::only(Lamp::EwYellow));

    rig.run_until(17_500);
    assert_eq!(rig.state(), StateId::EmergencyTrans);
    rig.tick();
    assert_eq!(rig.state(), StateId::EmergencyGreen);
    assert_eq!(rig.io.lamps, Lamps::only(Lamp::NsGreen));

    rig.run_until(25_000);
    assert_eq!(rig.state(), StateId::EmergencyGreen, "held while asserted");

    rig.io.inputs.emergency = false;
    rig.tick();
    assert_eq!(rig.state(), StateId::NsGreen);
    assert_eq!(rig.ctl.state_start_ms(), 25_000);

    let records = rig.sink.records();
    let tail = &records[records.len() - 2..];
    assert_eq!(
        tail,
        ["EMERGENCY CLEARED: EMERGENCY_GREEN -> NS_GREEN", "EMERGENCY_GREEN -> NS_GREEN"]
    );
}

// ── Emergency during NS_GREEN ─────────────────────────────────

#[test]
fn emergency_during_ns_green_is_immediate_and_restarts_timer() {
    let mut rig = Rig::new();
    rig.run_until(5_000);
    assert_eq!(rig.state(), StateId::NsGreen);

    rig.io.inputs.emergency = true;
    rig.tick();
    assert_eq!(rig.state(), StateId::EmergencyGreen);
    assert_eq!(rig.io.lamps, Lamps::only(Lamp::NsGreen));

    rig.run_until(9_000);
    rig.io.inputs = Inputs {
        ew_demand: true,
        ..Inputs::default()
    };
    rig.tick();
    assert_eq!(rig.state(), StateId::NsGreen);
    assert_eq!(rig.ctl.state_start_ms(), 9_000);

    // The NS green dwell counts from the release, not from t=100.
    rig.run_until(20_000);
    assert_eq!(rig.entered(StateId::NsYellow, 9_000), Some(19_000));
}

#[test]
fn release_during_emergency_trans_skips_remaining_wait() {
    let mut rig = Rig::new();
    rig.io.inputs = Inputs::both_demanding();
    rig.run_until(15_000);
    rig.io.inputs.emergency = true;
    rig.run_until(17_010);
    assert_eq!(rig.state(), StateId::EmergencyTrans);

    rig.io.inputs.emergency = false;
    let outcome = rig.tick();
    assert_eq!(
        outcome,
        TickOutcome::Transitioned {
            from: StateId::EmergencyTrans,
            to: StateId::NsGreen
        }
    );
    assert!(
        rig.sink
            .records()
            .contains(&"EMERGENCY CLEARED: EMERGENCY_TRANS -> NS_GREEN".to_string())
    );
}

// ── Reset ─────────────────────────────────────────────────────

#[test]
fn reset_during_ns_yellow_holds_then_resumes_init_dwell() {
    let mut rig = Rig::new();
    rig.io.inputs = Inputs::both_demanding();
    rig.run_until(11_000);
    assert_eq!(rig.state(), StateId::NsYellow);

    rig.io.inputs.reset = true;
    assert_eq!(rig.tick(), TickOutcome::Reset);
    assert_eq!(rig.state(), StateId::Init);
    assert_eq!(rig.io.lamps, Lamps::DARK);
    assert_eq!(rig.ctl.state_start_ms(), 11_000);
    assert_eq!(rig.clock.holds, vec![500]);

    // The hold already covered the INIT dwell.
    rig.io.inputs.reset = false;
    rig.tick();
    assert_eq!(rig.state(), StateId::NsGreen);
    assert_eq!(rig.entered(StateId::NsGreen, 11_000), Some(11_510));
    assert!(rig.sink.records().contains(&"RESET".to_string()));
}

#[test]
fn held_reset_pins_init_even_under_emergency() {
    let mut rig = Rig::new();
    rig.io.inputs = Inputs {
        reset: true,
        emergency: true,
        ns_demand: true,
        ew_demand: true,
    };
    for _ in 0..5 {
        assert_eq!(rig.tick(), TickOutcome::Reset);
        assert_eq!(rig.state(), StateId::Init);
        assert_eq!(rig.io.lamps, Lamps::DARK);
    }
    assert_eq!(rig.clock.holds.len(), 5);
    assert!(rig.timeline.is_empty());
}

// ── Emergency ends mid-clearance ──────────────────────────────

#[test]
fn emergency_released_in_ew_yellow_finishes_the_yellow() {
    let mut rig = Rig::new();
    rig.io.inputs = Inputs::both_demanding();
    rig.run_until(15_000);
    rig.io.inputs.emergency = true;
    rig.tick();
    assert_eq!(rig.state(), StateId::EwYellow);

    rig.run_until(16_500);
    rig.io.inputs.emergency = false;
    rig.run_until(17_000);
    assert_eq!(rig.state(), StateId::EwYellow, "yellow dwell is not cut short");

    rig.tick();
    assert_eq!(rig.state(), StateId::NsGreen);
    assert_eq!(rig.entered(StateId::NsGreen, 15_000), Some(17_000));
    assert!(
        !rig.sink.records().iter().any(|r| r.starts_with("EMERGENCY CLEARED")),
        "EW_YELLOW is not a preempted state"
    );
}
