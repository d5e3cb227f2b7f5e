//! Fundamental types for the Curia governance system.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! item identifiers, principals, logical-clock heights, and the registry item record.

pub mod height;
pub mod item;
pub mod principal;

pub use height::Height;
pub use item::{ContentHash, Item, ItemId};
pub use principal::PrincipalId;

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
pub(crate) mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
