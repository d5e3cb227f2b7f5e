//! Item identifiers and the registry item record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identifier of a registry item, unique across the system.
///
/// Ids double as storage-key components, so they must be non-empty and at
/// most [`ItemId::MAX_BYTES`] bytes (the per-proposal vote sub-namespace
/// encodes the id length in a single byte).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Upper bound on the UTF-8 byte length of an id.
    pub const MAX_BYTES: usize = 255;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether this id may be used as a storage-key component.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.len() <= Self::MAX_BYTES
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An opaque content digest attached to an item (e.g. an image hash).
///
/// The engine never interprets these bytes; they travel from proposal payload
/// to registry record unchanged.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(Vec<u8>);

impl ContentHash {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = &self.0[..self.0.len().min(4)];
        write!(f, "ContentHash({})", crate::hex::encode(head))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::hex::encode(&self.0))
    }
}

impl From<&[u8]> for ContentHash {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// A named record owned by the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub description: String,
    pub url: String,
    pub content_hash: ContentHash,
}

impl Item {
    pub fn new(
        id: ItemId,
        description: impl Into<String>,
        url: impl Into<String>,
        content_hash: ContentHash,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            url: url.into(),
            content_hash,
        }
    }
}
