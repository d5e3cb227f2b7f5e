//! The registry collaborator interface.
//!
//! The engine mutates items only through this trait. A mutation returning
//! `Ok(false)` means the registry ran and declined the call; `Err` means the
//! call itself failed. The engine treats both as "not yet resolved" and
//! leaves the proposal in place so execution can be retried.

use curia_store::StoreError;
use curia_types::{ContentHash, Item, ItemId, PrincipalId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no item found for id {0}")]
    NotFound(ItemId),

    #[error("registry has no governor bound yet")]
    Uninitialized,

    #[error("registry governor is already bound")]
    AlreadyInitialized,

    #[error("no valid authorization for the registry deployer")]
    Unauthorized,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// The registry of items whose mutation this engine gates.
pub trait Registry {
    /// Bind the governor identity allowed to mutate the registry. One-shot.
    fn initialize(&self, governor: &PrincipalId) -> Result<bool, RegistryError>;

    /// Look up an item. Absent ids are [`RegistryError::NotFound`].
    fn get(&self, id: &ItemId) -> Result<Item, RegistryError>;

    /// Create an item. `Ok(false)` when the registry declines.
    fn create(
        &self,
        id: &ItemId,
        description: &str,
        url: &str,
        content_hash: &ContentHash,
    ) -> Result<bool, RegistryError>;

    /// Remove an item. Succeeds with `Ok(true)` even when the item is absent.
    fn remove(&self, id: &ItemId) -> Result<bool, RegistryError>;
}
