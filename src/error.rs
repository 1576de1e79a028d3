//! Error types for the intersection firmware.
//!
//! The control core has no error channel: the FSM is total and the tick
//! loop self-heals.  These types exist for the edges, where GPIO adapters
//! and configuration loading can fail.  All variants are `Copy` so an
//! adapter can log and drop them without allocating.

use core::fmt;

use embedded_hal::digital::ErrorKind;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A GPIO read or write failed.
    Gpio(GpioFault),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// GPIO faults
// ---------------------------------------------------------------------------

/// Which signal a GPIO fault happened on, and what the HAL reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioFault {
    pub signal: &'static str,
    pub kind: ErrorKind,
}

impl GpioFault {
    pub fn new(signal: &'static str, err: &impl embedded_hal::digital::Error) -> Self {
        Self {
            signal,
            kind: err.kind(),
        }
    }
}

impl fmt::Display for GpioFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.signal, self.kind)
    }
}

impl From<GpioFault> for Error {
    fn from(e: GpioFault) -> Self {
        Self::Gpio(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
