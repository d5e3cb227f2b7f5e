//! Governance notifications.
//!
//! Events are fire-and-forget signals for external indexers; the engine
//! never reads them back. An event is emitted only after every check and
//! write of the surrounding operation has succeeded, so sinks never observe
//! an operation that later failed.

use curia_types::{ContentHash, Height, ItemId, PrincipalId};
use serde::{Deserialize, Serialize};

use crate::proposal::CreatePayload;

/// Notifications emitted by the governance engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    /// A proposal was opened. Carries the creation payload when there is one.
    ProposalOpened {
        id: ItemId,
        payload: Option<CreatePayload>,
        deadline: Height,
    },
    /// A vote was recorded.
    VoteCast {
        id: ItemId,
        voter: PrincipalId,
        in_favor: bool,
    },
    /// An accepted creation proposal was applied to the registry.
    ItemCreated {
        id: ItemId,
        description: String,
        url: String,
        content_hash: ContentHash,
    },
    /// An accepted removal proposal was applied to the registry.
    ItemRemoved { id: ItemId },
    /// A rejected or superseded proposal was cleared without registry effect.
    ProposalCleared { id: ItemId },
}

/// Sink for governance notifications.
pub trait EventSink {
    fn emit(&self, event: GovernanceEvent);
}
