//! Output drivers.

pub mod lights;
