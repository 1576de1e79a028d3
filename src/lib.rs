//! Intersection controller library.
//!
//! Exposes the pure-logic modules and the generic `embedded-hal` adapters
//! for integration testing.  The ESP-IDF binary in `main.rs` is the only
//! code that names concrete peripherals.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod sensors;
