//! Host capabilities injected into the engine.
//!
//! The engine never reads time or verifies identity itself. Both arrive
//! through these seams, so tests drive them deterministically and a real
//! deployment binds them to its chain or service runtime.

use curia_types::{Height, PrincipalId};

/// The host's logical clock.
///
/// Heights advance monotonically outside the engine's control. The engine
/// samples the clock once per operation and compares against stored
/// deadlines.
pub trait Clock {
    fn current_height(&self) -> Height;
}

/// The host's authorization oracle, the equivalent of a signature check.
pub trait Witness {
    /// Whether the current call carries valid authorization for `principal`.
    fn is_authorized(&self, principal: &PrincipalId) -> bool;
}
