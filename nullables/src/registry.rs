//! Nullable registry — a scriptable registry double that records mutations.

use curia_governance::{Registry, RegistryError};
use curia_store::StoreError;
use curia_types::{ContentHash, Item, ItemId, PrincipalId};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A mutation the registry was asked to perform (for assertions).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryCall {
    Create(ItemId),
    Remove(ItemId),
}

/// An in-memory registry double.
///
/// Accepts every well-formed mutation by default. Can be scripted to decline
/// mutations (`Ok(false)`) or fail them outright (`Err`) to exercise the
/// engine's retry paths.
pub struct NullRegistry {
    items: Mutex<BTreeMap<ItemId, Item>>,
    governor: Mutex<Option<PrincipalId>>,
    decline_mutations: AtomicBool,
    fail_mutations: AtomicBool,
    calls: Mutex<Vec<RegistryCall>>,
}

impl NullRegistry {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(BTreeMap::new()),
            governor: Mutex::new(None),
            decline_mutations: AtomicBool::new(false),
            fail_mutations: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Put an item directly, bypassing governance.
    pub fn seed(&self, item: Item) {
        self.items.lock().unwrap().insert(item.id.clone(), item);
    }

    /// All mutation calls received so far, in order.
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Make subsequent mutations run but decline (`Ok(false)`).
    pub fn set_decline_mutations(&self, decline: bool) {
        self.decline_mutations.store(decline, Ordering::SeqCst);
    }

    /// Make subsequent mutations fail outright (`Err`).
    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.lock().unwrap().contains_key(id)
    }

    /// The governor bound by `initialize`, if any.
    pub fn governor(&self) -> Option<PrincipalId> {
        *self.governor.lock().unwrap()
    }

    fn mutation_allowed(&self) -> Result<bool, RegistryError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected registry failure".into()).into());
        }
        Ok(!self.decline_mutations.load(Ordering::SeqCst))
    }
}

impl Default for NullRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for NullRegistry {
    fn initialize(&self, governor: &PrincipalId) -> Result<bool, RegistryError> {
        let mut bound = self.governor.lock().unwrap();
        if bound.is_some() {
            return Err(RegistryError::AlreadyInitialized);
        }
        *bound = Some(*governor);
        Ok(true)
    }

    fn get(&self, id: &ItemId) -> Result<Item, RegistryError> {
        self.items
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    fn create(
        &self,
        id: &ItemId,
        description: &str,
        url: &str,
        content_hash: &ContentHash,
    ) -> Result<bool, RegistryError> {
        self.calls
            .lock()
            .unwrap()
            .push(RegistryCall::Create(id.clone()));
        if !self.mutation_allowed()? {
            return Ok(false);
        }
        let mut items = self.items.lock().unwrap();
        if items.contains_key(id) {
            return Ok(false);
        }
        items.insert(
            id.clone(),
            Item::new(id.clone(), description, url, content_hash.clone()),
        );
        Ok(true)
    }

    fn remove(&self, id: &ItemId) -> Result<bool, RegistryError> {
        self.calls
            .lock()
            .unwrap()
            .push(RegistryCall::Remove(id.clone()));
        if !self.mutation_allowed()? {
            return Ok(false);
        }
        self.items.lock().unwrap().remove(id);
        Ok(true)
    }
}
