//! Values threaded through the state handlers.
//!
//! [`Inputs`] is the per-tick sample, [`Lamps`] the output image of a
//! state, and [`TickContext`] bundles what a handler may look at.  Handlers
//! only read; the controller owns every mutation.

use crate::config::TimingConfig;

// ---------------------------------------------------------------------------
// Input snapshot (written by the sampler once per tick)
// ---------------------------------------------------------------------------

/// Logical input levels, already corrected for pin polarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inputs {
    /// Reset asserted.
    pub reset: bool,
    /// Emergency vehicle preemption asserted.
    pub emergency: bool,
    /// A vehicle is waiting on the NS approach (either sensor).
    pub ns_demand: bool,
    /// A vehicle is waiting on the EW approach (either sensor).
    pub ew_demand: bool,
}

impl Inputs {
    /// Both approaches demanding, nothing else asserted.
    pub const fn both_demanding() -> Self {
        Self {
            reset: false,
            emergency: false,
            ns_demand: true,
            ew_demand: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Lamp image
// ---------------------------------------------------------------------------

/// One of the four driven lamps.  Red is implied per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lamp {
    NsGreen,
    NsYellow,
    EwGreen,
    EwYellow,
}

impl Lamp {
    pub const ALL: [Self; 4] = [Self::NsGreen, Self::NsYellow, Self::EwGreen, Self::EwYellow];

    pub const fn name(self) -> &'static str {
        match self {
            Self::NsGreen => "NS_G",
            Self::NsYellow => "NS_Y",
            Self::EwGreen => "EW_G",
            Self::EwYellow => "EW_Y",
        }
    }
}

/// Desired on/off level of every lamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lamps {
    pub ns_green: bool,
    pub ns_yellow: bool,
    pub ew_green: bool,
    pub ew_yellow: bool,
}

impl Lamps {
    pub const DARK: Self = Self {
        ns_green: false,
        ns_yellow: false,
        ew_green: false,
        ew_yellow: false,
    };

    /// Exactly `lamp` lit.
    pub const fn only(lamp: Lamp) -> Self {
        let mut lamps = Self::DARK;
        match lamp {
            Lamp::NsGreen => lamps.ns_green = true,
            Lamp::NsYellow => lamps.ns_yellow = true,
            Lamp::EwGreen => lamps.ew_green = true,
            Lamp::EwYellow => lamps.ew_yellow = true,
        }
        lamps
    }

    pub const fn get(&self, lamp: Lamp) -> bool {
        match lamp {
            Lamp::NsGreen => self.ns_green,
            Lamp::NsYellow => self.ns_yellow,
            Lamp::EwGreen => self.ew_green,
            Lamp::EwYellow => self.ew_yellow,
        }
    }

    pub fn set(&mut self, lamp: Lamp, on: bool) {
        match lamp {
            Lamp::NsGreen => self.ns_green = on,
            Lamp::NsYellow => self.ns_yellow = on,
            Lamp::EwGreen => self.ew_green = on,
            Lamp::EwYellow => self.ew_yellow = on,
        }
    }

    /// Lit lamps, in [`Lamp::ALL`] order.
    pub fn lit(&self) -> impl Iterator<Item = Lamp> + '_ {
        Lamp::ALL.into_iter().filter(move |l| self.get(*l))
    }

    /// No conflicting greens, and no direction showing green and yellow
    /// together.
    pub const fn is_safe(&self) -> bool {
        !(self.ns_green && self.ew_green)
            && !(self.ns_green && self.ns_yellow)
            && !(self.ew_green && self.ew_yellow)
    }
}

// ---------------------------------------------------------------------------
// TickContext
// ---------------------------------------------------------------------------

/// Read-only view passed to every transition handler.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Milliseconds since the current state was entered (wrapping).
    pub elapsed_ms: u32,
    /// This tick's sample.
    pub inputs: &'a Inputs,
    /// Dwell table.
    pub timing: &'a TimingConfig,
}

impl TickContext<'_> {
    /// Has the current state been held for at least `dwell_ms`?
    pub const fn dwelled(&self, dwell_ms: u32) -> bool {
        self.elapsed_ms >= dwell_ms
    }
}
