//! Logical-clock height used for all deadline arithmetic.
//!
//! Heights are supplied by the host and advance monotonically outside the
//! engine's control. Deadlines are plain height comparisons evaluated at call
//! time; there are no timers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical-clock value (block height or equivalent monotonic counter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Height(u64);

impl Height {
    /// The clock's starting value.
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Height `ticks` past this one, or `None` on overflow.
    pub fn checked_add(self, ticks: u64) -> Option<Self> {
        self.0.checked_add(ticks).map(Self)
    }

    /// Heights elapsed since `earlier` (saturating).
    pub fn since(&self, earlier: Height) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
