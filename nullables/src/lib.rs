//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the governance engine (clock, witness,
//! storage, registry, event delivery) sits behind a trait. This crate
//! provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod events;
pub mod registry;
pub mod store;
pub mod witness;

pub use clock::NullClock;
pub use events::NullSink;
pub use registry::{NullRegistry, RegistryCall};
pub use store::NullStore;
pub use witness::NullWitness;
