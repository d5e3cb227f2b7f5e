//! Namespaced key-value storage trait.

use crate::StoreError;

/// Trait for the persistent byte-key/byte-value store backing the engine.
///
/// The store provides no transactions of its own: the host runs each public
/// engine operation as one atomic unit and serializes all operations into a
/// total order. Implementations only need the four primitives below.
///
/// Namespacing is a convention of the callers (a one-byte tag prefixed to
/// every key); the store itself sees flat byte keys.
pub trait KvStore {
    /// Retrieve the value stored under `key`, if any.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`, overwriting any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Delete the entry under `key`. Deleting an absent key is a no-op.
    fn delete(&self, key: &[u8]) -> Result<(), StoreError>;

    /// Enumerate all entries whose key starts with `prefix`, in ascending
    /// full-key order, returned with the prefix stripped from each key.
    ///
    /// The ordering matters only for enumeration (pagination); callers that
    /// delete by prefix must visit every returned key regardless of order.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;
}
