//! Nullable witness — an explicit authorization set for testing.

use curia_governance::Witness;
use curia_types::PrincipalId;
use std::collections::HashSet;
use std::sync::Mutex;

/// A test witness that authorizes exactly the principals it was told to.
pub struct NullWitness {
    authorized: Mutex<HashSet<PrincipalId>>,
}

impl NullWitness {
    pub fn new() -> Self {
        Self {
            authorized: Mutex::new(HashSet::new()),
        }
    }

    /// Create with an initial authorized set.
    pub fn authorizing(principals: &[PrincipalId]) -> Self {
        Self {
            authorized: Mutex::new(principals.iter().copied().collect()),
        }
    }

    pub fn authorize(&self, principal: PrincipalId) {
        self.authorized.lock().unwrap().insert(principal);
    }

    pub fn revoke(&self, principal: &PrincipalId) {
        self.authorized.lock().unwrap().remove(principal);
    }
}

impl Default for NullWitness {
    fn default() -> Self {
        Self::new()
    }
}

impl Witness for NullWitness {
    fn is_authorized(&self, principal: &PrincipalId) -> bool {
        self.authorized.lock().unwrap().contains(principal)
    }
}
