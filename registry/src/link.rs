//! Binding between the governance engine and an [`ItemRegistry`].

use std::sync::Arc;

use curia_governance::{Registry, RegistryError};
use curia_types::{ContentHash, Item, ItemId, PrincipalId};

use crate::item_registry::ItemRegistry;

/// The governance engine's handle to an [`ItemRegistry`].
///
/// Every call through the link carries one fixed caller identity. Bind the
/// same identity as the registry's owner and governance becomes the only
/// path that mutates items.
pub struct RegistryLink {
    registry: Arc<ItemRegistry>,
    caller: PrincipalId,
}

impl RegistryLink {
    pub fn new(registry: Arc<ItemRegistry>, caller: PrincipalId) -> Self {
        Self { registry, caller }
    }

    /// The identity this link's calls carry.
    pub fn caller(&self) -> &PrincipalId {
        &self.caller
    }
}

impl Registry for RegistryLink {
    fn initialize(&self, owner: &PrincipalId) -> Result<bool, RegistryError> {
        self.registry.initialize(owner)
    }

    fn get(&self, id: &ItemId) -> Result<Item, RegistryError> {
        self.registry.get_item(id)
    }

    fn create(
        &self,
        id: &ItemId,
        description: &str,
        url: &str,
        content_hash: &ContentHash,
    ) -> Result<bool, RegistryError> {
        self.registry
            .create_item(&self.caller, id, description, url, content_hash)
    }

    fn remove(&self, id: &ItemId) -> Result<bool, RegistryError> {
        self.registry.remove_item(&self.caller, id)
    }
}
