//! Application core: the tick loop and its port boundary, zero I/O.
//!
//! The [`controller`] composes the pure FSM with the outside world, which
//! it only reaches through the **port traits** in [`ports`].  That keeps
//! the whole loop testable with a fake clock and in-memory pins.

pub mod controller;
pub mod events;
pub mod ports;
