//! Proposal records and the lifecycle predicates.

use curia_types::{ContentHash, Height, Item};
use serde::{Deserialize, Serialize};

/// What a proposal asks the registry to do once accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalKind {
    Remove,
    Create,
}

impl ProposalKind {
    /// Storage encoding of the kind cell.
    pub fn as_byte(self) -> u8 {
        match self {
            ProposalKind::Remove => 0,
            ProposalKind::Create => 1,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(ProposalKind::Remove),
            1 => Some(ProposalKind::Create),
            _ => None,
        }
    }
}

/// The item data a creation proposal carries until it is executed.
///
/// Removal proposals carry no payload; the item itself still lives in the
/// registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePayload {
    pub description: String,
    pub url: String,
    pub content_hash: ContentHash,
}

/// A stored proposal for one item id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub kind: ProposalKind,
    /// Present exactly when `kind` is [`ProposalKind::Create`].
    pub payload: Option<CreatePayload>,
    /// Last height at which voting is open.
    pub deadline: Height,
    pub votes_for: u64,
    pub votes_against: u64,
    pub votes_total: u64,
}

impl Proposal {
    /// Whether the committee accepted this proposal: strictly more votes in
    /// favor than against, and at least `min_votes_in_favor` in favor.
    pub fn accepted(&self, min_votes_in_favor: u64) -> bool {
        self.votes_for > self.votes_against && self.votes_for >= min_votes_in_favor
    }

    /// Whether voting is still open at `now`. The deadline height itself is
    /// open; voting closes one height after it.
    pub fn is_open(&self, now: Height) -> bool {
        now <= self.deadline
    }
}

/// A proposal hydrated with the item it concerns, as returned by queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalView {
    pub item: Item,
    pub kind: ProposalKind,
    pub open_for_voting: bool,
    pub deadline: Height,
    pub votes_for: u64,
    pub votes_against: u64,
}
