//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one record line per controller
//! event to the `log` facade (the ESP-IDF logger on the board, which goes
//! to UART / USB-CDC).  [`DiagnosticLog`](crate::diagnostics::DiagnosticLog)
//! implements the same trait for in-memory capture.

use log::{error, info, warn};

use crate::app::events::ControllerEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ControllerEvent`] to the serial console.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub const fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControllerEvent) {
        match event {
            ControllerEvent::Started(_) | ControllerEvent::StateChanged { .. } => {
                info!("STATE | {event}");
            }
            ControllerEvent::ResetAsserted { from } => {
                warn!("STATE | {event} (was {from})");
            }
            ControllerEvent::EmergencyCleared { .. } => {
                info!("EMERG | {event}");
            }
            ControllerEvent::Recovered { .. } => {
                error!("FAULT | {event}");
            }
        }
    }
}
