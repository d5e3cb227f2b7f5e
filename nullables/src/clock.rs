//! Nullable clock — deterministic heights for testing.

use curia_governance::Clock;
use curia_types::Height;
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic logical clock for testing.
///
/// The height only advances when you tell it to. Atomic rather than `Cell`
/// so it can be shared as `Arc<dyn Clock + Send + Sync>`.
pub struct NullClock {
    current: AtomicU64,
}

impl NullClock {
    pub fn new(initial_height: u64) -> Self {
        Self {
            current: AtomicU64::new(initial_height),
        }
    }

    /// Advance the height by `ticks`.
    pub fn advance(&self, ticks: u64) {
        self.current.fetch_add(ticks, Ordering::SeqCst);
    }

    /// Jump to a specific height.
    pub fn set(&self, height: u64) {
        self.current.store(height, Ordering::SeqCst);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clock for NullClock {
    fn current_height(&self) -> Height {
        Height::new(self.current.load(Ordering::SeqCst))
    }
}
