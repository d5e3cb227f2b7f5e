//! Owner-gated storage of item records.

use std::sync::Arc;

use curia_governance::{RegistryError, Witness};
use curia_store::{KvStore, StoreError};
use curia_types::{ContentHash, Item, ItemId, PrincipalId};
use tracing::info;

/// Namespace tags for registry storage. Governance state uses tags from 12
/// up, so the two can share a store without colliding.
mod tag {
    pub const OWNER: u8 = 1;
    /// Item presence marker; the value is the id itself, which makes the
    /// namespace scannable for listings.
    pub const PRESENCE: u8 = 2;
    pub const DESCRIPTION: u8 = 3;
    pub const URL: u8 = 4;
    pub const CONTENT_HASH: u8 = 5;
}

/// The single cell holding the bound governor identity.
const OWNER_KEY: [u8; 1] = [tag::OWNER];

/// Items returned per [`ItemRegistry::list_items`] page.
pub const MAX_LIST_ITEMS: usize = 8;

fn field_key(tag: u8, id: &ItemId) -> Vec<u8> {
    let id_bytes = id.as_bytes();
    let mut key = Vec::with_capacity(1 + id_bytes.len());
    key.push(tag);
    key.extend_from_slice(id_bytes);
    key
}

/// Registry of named item records, mutable only by its bound owner.
pub struct ItemRegistry {
    kv: Arc<dyn KvStore + Send + Sync>,
    witness: Arc<dyn Witness + Send + Sync>,
    /// Deploy-time principal whose authorization is needed to bind the owner.
    deployer: PrincipalId,
}

impl ItemRegistry {
    pub fn new(
        kv: Arc<dyn KvStore + Send + Sync>,
        witness: Arc<dyn Witness + Send + Sync>,
        deployer: PrincipalId,
    ) -> Self {
        Self {
            kv,
            witness,
            deployer,
        }
    }

    /// The bound owner, or `None` before [`Self::initialize`] has run.
    pub fn owner(&self) -> Result<Option<PrincipalId>, RegistryError> {
        match self.kv.get(&OWNER_KEY)? {
            Some(bytes) => {
                let cell: [u8; 20] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| StoreError::Corruption("owner cell of wrong width".into()))?;
                Ok(Some(PrincipalId::new(cell)))
            }
            None => Ok(None),
        }
    }

    /// Bind the owner identity allowed to mutate this registry.
    ///
    /// One-shot: fails once an owner is stored. Requires authorization for
    /// the deployer, so only the deploying principal decides who governs.
    pub fn initialize(&self, owner: &PrincipalId) -> Result<bool, RegistryError> {
        if self.owner()?.is_some() {
            return Err(RegistryError::AlreadyInitialized);
        }
        if !self.witness.is_authorized(&self.deployer) {
            return Err(RegistryError::Unauthorized);
        }
        self.kv.put(&OWNER_KEY, owner.as_bytes())?;
        info!(owner = %owner, "registry owner bound");
        Ok(true)
    }

    /// Create an item on behalf of `caller`.
    ///
    /// Declines (`Ok(false)`) rather than failing when the id is empty, the
    /// caller is not the owner, or an item with this id already exists.
    pub fn create_item(
        &self,
        caller: &PrincipalId,
        id: &ItemId,
        description: &str,
        url: &str,
        content_hash: &ContentHash,
    ) -> Result<bool, RegistryError> {
        if id.as_bytes().is_empty() {
            return Ok(false);
        }
        if !self.caller_is_owner(caller)? {
            return Ok(false);
        }
        if self.kv.get(&field_key(tag::PRESENCE, id))?.is_some() {
            return Ok(false);
        }
        self.kv.put(&field_key(tag::PRESENCE, id), id.as_bytes())?;
        self.kv
            .put(&field_key(tag::DESCRIPTION, id), description.as_bytes())?;
        self.kv.put(&field_key(tag::URL, id), url.as_bytes())?;
        self.kv
            .put(&field_key(tag::CONTENT_HASH, id), content_hash.as_bytes())?;
        info!(item = %id, "item created");
        Ok(true)
    }

    /// Remove an item on behalf of `caller`.
    ///
    /// Declines for non-owners; otherwise reports `Ok(true)` even when no
    /// item with this id existed.
    pub fn remove_item(&self, caller: &PrincipalId, id: &ItemId) -> Result<bool, RegistryError> {
        if !self.caller_is_owner(caller)? {
            return Ok(false);
        }
        self.kv.delete(&field_key(tag::PRESENCE, id))?;
        self.kv.delete(&field_key(tag::DESCRIPTION, id))?;
        self.kv.delete(&field_key(tag::URL, id))?;
        self.kv.delete(&field_key(tag::CONTENT_HASH, id))?;
        info!(item = %id, "item removed");
        Ok(true)
    }

    /// Look up an item by id.
    pub fn get_item(&self, id: &ItemId) -> Result<Item, RegistryError> {
        if self.kv.get(&field_key(tag::PRESENCE, id))?.is_none() {
            return Err(RegistryError::NotFound(id.clone()));
        }
        self.load_item(id)
    }

    /// Items in store key order, skipping the first `start_index` and
    /// returning at most [`MAX_LIST_ITEMS`].
    pub fn list_items(&self, start_index: usize) -> Result<Vec<Item>, RegistryError> {
        let entries = self.kv.scan_prefix(&[tag::PRESENCE])?;
        let mut items = Vec::new();
        for (suffix, _) in entries.into_iter().skip(start_index).take(MAX_LIST_ITEMS) {
            let raw = String::from_utf8(suffix).map_err(|_| {
                StoreError::Corruption("non-utf8 item id in registry namespace".into())
            })?;
            items.push(self.load_item(&ItemId::new(raw))?);
        }
        Ok(items)
    }

    fn load_item(&self, id: &ItemId) -> Result<Item, RegistryError> {
        Ok(Item::new(
            id.clone(),
            self.read_string_cell(tag::DESCRIPTION, id)?,
            self.read_string_cell(tag::URL, id)?,
            ContentHash::new(self.read_cell(tag::CONTENT_HASH, id)?),
        ))
    }

    fn caller_is_owner(&self, caller: &PrincipalId) -> Result<bool, RegistryError> {
        Ok(self.owner()?.as_ref() == Some(caller))
    }

    fn read_cell(&self, tag: u8, id: &ItemId) -> Result<Vec<u8>, RegistryError> {
        self.kv.get(&field_key(tag, id))?.ok_or_else(|| {
            StoreError::Corruption(format!("missing cell {tag} for item {id}")).into()
        })
    }

    fn read_string_cell(&self, tag: u8, id: &ItemId) -> Result<String, RegistryError> {
        String::from_utf8(self.read_cell(tag, id)?)
            .map_err(|_| StoreError::Corruption(format!("non-utf8 cell {tag} for item {id}")).into())
    }
}
