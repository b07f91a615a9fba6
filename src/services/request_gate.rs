use std::cell::Cell;
use std::time::Instant;

use tracing::{debug, info};

/// Allows a single backend request at a time.
///
/// While an [`InFlight`] guard is alive further requests are refused; dropping
/// the guard re-opens the gate whether the request succeeded or not.
#[derive(Debug, Default)]
pub struct RequestGate {
    busy: Cell<bool>,
}

#[derive(Debug)]
pub struct InFlight<'a> {
    gate: &'a RequestGate,
    label: String,
    started: Instant,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Returns `None` if another request is still running.
    pub fn begin(&self, label: &str) -> Option<InFlight<'_>> {
        if self.busy.replace(true) {
            return None;
        }
        info!("{label}...");
        Some(InFlight {
            gate: self,
            label: label.to_string(),
            started: Instant::now(),
        })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.gate.busy.set(false);
        debug!(
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "{} finished", self.label
        );
    }
}
