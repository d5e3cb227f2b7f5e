use curia_store::StoreError;
use curia_types::{ItemId, PrincipalId};
use thiserror::Error;

use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("no valid authorization for principal {0}")]
    Unauthorized(PrincipalId),

    #[error("no proposal found for item {0}")]
    ProposalNotFound(ItemId),

    #[error("no item {0} exists in the registry")]
    ItemNotFound(ItemId),

    #[error("item {0} already exists in the registry")]
    ItemExists(ItemId),

    #[error("a proposal for item {0} is still ongoing")]
    ProposalStillLive(ItemId),

    #[error("the accepted proposal for item {0} must be executed before a new one can be opened")]
    PendingExecution(ItemId),

    #[error("principal {voter} has already voted on item {item}")]
    AlreadyVoted { item: ItemId, voter: PrincipalId },

    #[error("voting on item {0} is no longer open")]
    VotingClosed(ItemId),

    #[error("the voting window for item {0} is still open")]
    StillOpen(ItemId),

    #[error("invalid item id: {0}")]
    InvalidItemId(String),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}
