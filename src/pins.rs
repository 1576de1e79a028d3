//! GPIO assignments for the intersection controller board.
//!
//! Single source of truth for the firmware binary; the core and the
//! generic adapters never see pin numbers.

// ---------------------------------------------------------------------------
// Control inputs (pull-up, active LOW)
// ---------------------------------------------------------------------------

/// Asynchronous reset push-button.
pub const RESET_GPIO: i32 = 2;
/// Emergency-vehicle preemption contact.
pub const EMERGENCY_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Vehicle presence sensors (active HIGH)
// ---------------------------------------------------------------------------

pub const NS_SENSOR_1_GPIO: i32 = 4;
pub const NS_SENSOR_2_GPIO: i32 = 5;
pub const EW_SENSOR_1_GPIO: i32 = 6;
pub const EW_SENSOR_2_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Lamp outputs (active HIGH)
// ---------------------------------------------------------------------------

pub const NS_GREEN_GPIO: i32 = 8;
pub const NS_YELLOW_GPIO: i32 = 9;
pub const EW_GREEN_GPIO: i32 = 10;
pub const EW_YELLOW_GPIO: i32 = 11;
