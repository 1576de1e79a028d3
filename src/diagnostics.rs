//! In-memory diagnostic record ring.
//!
//! [`DiagnosticLog`] is an [`EventSink`] that keeps the most recent `N`
//! records as fixed-capacity strings, so a debug console can dump the
//! last few transitions without a heap or a serial link.  When full, the
//! oldest record is dropped and counted.

use core::fmt::Write as _;

use heapless::{Deque, String};

use crate::app::events::ControllerEvent;
use crate::app::ports::EventSink;

/// Longest rendered record ("EMERGENCY CLEARED: EMERGENCY_TRANS -> NS_GREEN").
pub const RECORD_CAP: usize = 64;

pub type Record = String<RECORD_CAP>;

/// Render `event` as its diagnostic line.
pub fn format_record(event: &ControllerEvent) -> Record {
    let mut line = Record::new();
    // Every record fits RECORD_CAP; a failed write leaves a truncated line.
    let _ = write!(line, "{event}");
    line
}

pub struct DiagnosticLog<const N: usize> {
    records: Deque<Record, N>,
    transitions: u32,
    resets: u32,
    emergency_clears: u32,
    dropped: u32,
}

impl<const N: usize> Default for DiagnosticLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DiagnosticLog<N> {
    pub const fn new() -> Self {
        Self {
            records: Deque::new(),
            transitions: 0,
            resets: 0,
            emergency_clears: 0,
            dropped: 0,
        }
    }

    /// Records oldest-first.
    pub fn records(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.records.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Committed transitions seen since construction.
    pub const fn transitions(&self) -> u32 {
        self.transitions
    }

    pub const fn resets(&self) -> u32 {
        self.resets
    }

    pub const fn emergency_clears(&self) -> u32 {
        self.emergency_clears
    }

    /// Records evicted because the ring was full.
    pub const fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Drop the stored records.  Counters keep running.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<const N: usize> EventSink for DiagnosticLog<N> {
    fn emit(&mut self, event: &ControllerEvent) {
        match event {
            ControllerEvent::StateChanged { .. } => {
                self.transitions = self.transitions.wrapping_add(1);
            }
            ControllerEvent::ResetAsserted { .. } => self.resets = self.resets.wrapping_add(1),
            ControllerEvent::EmergencyCleared { .. } => {
                self.emergency_clears = self.emergency_clears.wrapping_add(1);
            }
            ControllerEvent::Started(_) | ControllerEvent::Recovered { .. } => {}
        }

        let record = format_record(event);
        if let Err(record) = self.records.push_back(record) {
            self.records.pop_front();
            self.dropped = self.dropped.wrapping_add(1);
            // Room was just made; a zero-capacity ring keeps nothing.
            let _ = self.records.push_back(record);
        }
    }
}
