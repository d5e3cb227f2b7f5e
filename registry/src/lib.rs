//! The Curia item registry.
//!
//! Stores the named records whose mutation the governance engine gates. The
//! registry obeys exactly one owner, the governor bound at initialization;
//! mutations from anyone else are declined rather than failed, so callers
//! can distinguish "the registry said no" from "the call broke".
//!
//! [`RegistryLink`] adapts an [`ItemRegistry`] into the governance engine's
//! registry seam, stamping every call with a fixed caller identity.

pub mod item_registry;
pub mod link;

pub use item_registry::{ItemRegistry, MAX_LIST_ITEMS};
pub use link::RegistryLink;
