//! Principal identity type used for voters and registry owners.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 20-byte account identifier.
///
/// Principals name voters, registry owners, and the governor identity bound
/// into registry calls. Authorization for a principal is checked through the
/// host's witness capability, never derived from the bytes themselves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId([u8; 20]);

impl PrincipalId {
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrincipalId({})", crate::hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::hex::encode(&self.0))
    }
}
