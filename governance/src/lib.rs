//! Proposal-and-vote governance for the Curia item registry.
//!
//! Anyone may propose creating or removing a registry item. Authorized
//! principals then vote, one vote each, inside a fixed voting window. Once
//! the window closes, any caller may execute the proposal: accepted ones are
//! applied to the registry through the engine's registry handle, rejected
//! ones are cleared.
//!
//! Key principle: one principal = one vote, at most one proposal per item id,
//! and no vote record survives into the next proposal for its id.

pub mod engine;
pub mod error;
pub mod events;
pub mod host;
pub mod layout;
pub mod params;
pub mod proposal;
pub mod proposal_store;
pub mod registry;

pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use events::{EventSink, GovernanceEvent};
pub use host::{Clock, Witness};
pub use params::GovernanceParams;
pub use proposal::{CreatePayload, Proposal, ProposalKind, ProposalView};
pub use proposal_store::ProposalStore;
pub use registry::{Registry, RegistryError};
