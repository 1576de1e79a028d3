//! Controller configuration.
//!
//! The dwell table is fixed at build time: the `*_MS` constants below are
//! the values every intersection ships with.  [`ControllerConfig`] carries
//! them at runtime together with the loop timing, so tests and deployments
//! can override a value without touching the state handlers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Dwell table (milliseconds)
// ---------------------------------------------------------------------------

/// Time spent dark in `INIT` before the first green.
pub const INIT_MS: u32 = 100;
/// Minimum NS green before cross demand may end it.
pub const NS_GREEN_MS: u32 = 10_000;
/// Minimum EW green before cross demand may end it.
pub const EW_GREEN_MS: u32 = 6_000;
/// Yellow interval, both directions.
pub const YELLOW_MS: u32 = 2_000;
/// Clearance between EW yellow and the emergency green.
pub const EMERGENCY_WAIT_MS: u32 = 500;

/// Loop hold after a reset sample.
pub const RESET_HOLD_MS: u32 = 500;
/// Pacing of the control loop in the firmware binary.
pub const TICK_INTERVAL_MS: u32 = 10;

/// Per-state dwell times consulted by the FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub init_ms: u32,
    pub ns_green_ms: u32,
    pub ew_green_ms: u32,
    pub yellow_ms: u32,
    pub emergency_wait_ms: u32,
}

impl TimingConfig {
    /// The compile-time dwell table.
    pub const DEFAULT: Self = Self {
        init_ms: INIT_MS,
        ns_green_ms: NS_GREEN_MS,
        ew_green_ms: EW_GREEN_MS,
        yellow_ms: YELLOW_MS,
        emergency_wait_ms: EMERGENCY_WAIT_MS,
    };

    /// Reject tables that would let a timed state be skipped.
    pub fn validate(&self) -> Result<()> {
        if self.init_ms == 0 {
            return Err(Error::Config("init_ms must be non-zero"));
        }
        if self.yellow_ms == 0 {
            return Err(Error::Config("yellow_ms must be non-zero"));
        }
        if self.ns_green_ms == 0 || self.ew_green_ms == 0 {
            return Err(Error::Config("green dwell must be non-zero"));
        }
        if self.emergency_wait_ms == 0 {
            return Err(Error::Config("emergency_wait_ms must be non-zero"));
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything the controller and its loop need to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Dwell table.
    pub timing: TimingConfig,
    /// How long the loop blocks after sampling an asserted reset.
    pub reset_hold_ms: u32,
    /// Delay between ticks in the firmware main loop.
    pub tick_interval_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::DEFAULT,
            reset_hold_ms: RESET_HOLD_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<()> {
        self.timing.validate()?;
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be non-zero"));
        }
        // The tick interval may not exceed `emergency_wait_ms`, the
        // shortest timed dwell after INIT.
        if self.tick_interval_ms > self.timing.emergency_wait_ms {
            return Err(Error::Config("tick_interval_ms exceeds emergency_wait_ms"));
        }
        Ok(())
    }

    /// Parse an override document.  Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed config document"))?;
        config.validate()?;
        Ok(config)
    }
}
