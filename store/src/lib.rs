//! Abstract storage trait for the Curia governance system.
//!
//! Every storage backend (persistent or in-memory for testing) implements
//! this trait. The rest of the codebase depends only on the trait.

pub mod error;
pub mod kv;

pub use error::StoreError;
pub use kv::KvStore;
