//! Nullable event sink — records governance notifications instead of
//! delivering them anywhere.

use curia_governance::{EventSink, GovernanceEvent};
use std::sync::Mutex;

/// A test sink that records every emitted event, in order.
pub struct NullSink {
    events: Mutex<Vec<GovernanceEvent>>,
}

impl NullSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// All events emitted so far (for assertions).
    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Drop all recorded events.
    pub fn reset(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for NullSink {
    fn emit(&self, event: GovernanceEvent) {
        self.events.lock().unwrap().push(event);
    }
}
