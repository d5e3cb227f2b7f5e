//! Core governance engine — proposing, voting, execution, and queries.

use std::sync::Arc;

use curia_store::{KvStore, StoreError};
use curia_types::{ContentHash, Height, Item, ItemId, PrincipalId};
use tracing::{debug, info};

use crate::error::GovernanceError;
use crate::events::{EventSink, GovernanceEvent};
use crate::host::{Clock, Witness};
use crate::params::GovernanceParams;
use crate::proposal::{CreatePayload, Proposal, ProposalKind, ProposalView};
use crate::proposal_store::ProposalStore;
use crate::registry::{Registry, RegistryError};

/// Gates mutation of an item registry behind committee votes.
///
/// Anyone may open a proposal; authorized principals vote once each; after
/// the voting window closes, any caller may execute. All collaborators are
/// injected, and the engine keeps no state outside the key-value store. The
/// host serializes operations; the engine does no locking of its own.
pub struct GovernanceEngine {
    proposals: ProposalStore,
    registry: Arc<dyn Registry + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
    witness: Arc<dyn Witness + Send + Sync>,
    events: Arc<dyn EventSink + Send + Sync>,
    params: GovernanceParams,
}

impl GovernanceEngine {
    pub fn new(
        store: Arc<dyn KvStore + Send + Sync>,
        registry: Arc<dyn Registry + Send + Sync>,
        clock: Arc<dyn Clock + Send + Sync>,
        witness: Arc<dyn Witness + Send + Sync>,
        events: Arc<dyn EventSink + Send + Sync>,
        params: GovernanceParams,
    ) -> Self {
        Self {
            proposals: ProposalStore::new(store, events.clone()),
            registry,
            clock,
            witness,
            events,
            params,
        }
    }

    /// Heights a proposal stays open for voting after it is opened.
    pub fn voting_period(&self) -> u64 {
        self.params.voting_period
    }

    /// Minimum number of for-votes required for acceptance.
    pub fn min_votes_in_favor(&self) -> u64 {
        self.params.min_votes_in_favor
    }

    /// Open a proposal to create `id` with the given item data.
    ///
    /// Fails if an item with this id already exists. Any caller may propose;
    /// the payload is held in proposal state until an accepted proposal is
    /// executed.
    pub fn propose_create(
        &self,
        id: &ItemId,
        description: &str,
        url: &str,
        content_hash: &ContentHash,
    ) -> Result<(), GovernanceError> {
        self.check_id(id)?;
        if self.item_exists(id)? {
            return Err(GovernanceError::ItemExists(id.clone()));
        }
        let payload = CreatePayload {
            description: description.to_string(),
            url: url.to_string(),
            content_hash: content_hash.clone(),
        };
        let deadline = self.open_proposal(id, ProposalKind::Create, Some(&payload))?;
        info!(item = %id, %deadline, "creation proposal opened");
        self.events.emit(GovernanceEvent::ProposalOpened {
            id: id.clone(),
            payload: Some(payload),
            deadline,
        });
        Ok(())
    }

    /// Open a proposal to remove the existing item `id`.
    pub fn propose_remove(&self, id: &ItemId) -> Result<(), GovernanceError> {
        self.check_id(id)?;
        if !self.item_exists(id)? {
            return Err(GovernanceError::ItemNotFound(id.clone()));
        }
        let deadline = self.open_proposal(id, ProposalKind::Remove, None)?;
        info!(item = %id, %deadline, "removal proposal opened");
        self.events.emit(GovernanceEvent::ProposalOpened {
            id: id.clone(),
            payload: None,
            deadline,
        });
        Ok(())
    }

    /// Cast `voter`'s single vote on the open proposal for `id`.
    pub fn cast_vote(
        &self,
        id: &ItemId,
        voter: &PrincipalId,
        in_favor: bool,
    ) -> Result<(), GovernanceError> {
        if !self.witness.is_authorized(voter) {
            return Err(GovernanceError::Unauthorized(*voter));
        }
        let proposal = self
            .proposals
            .get(id)?
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.clone()))?;
        if !proposal.is_open(self.clock.current_height()) {
            return Err(GovernanceError::VotingClosed(id.clone()));
        }
        if self.proposals.has_vote(id, voter)? {
            return Err(GovernanceError::AlreadyVoted {
                item: id.clone(),
                voter: *voter,
            });
        }
        self.proposals.record_vote(id, voter, in_favor)?;
        debug!(item = %id, voter = %voter, in_favor, "vote recorded");
        self.events.emit(GovernanceEvent::VoteCast {
            id: id.clone(),
            voter: *voter,
            in_favor,
        });
        Ok(())
    }

    /// Resolve the proposal for `id` once its voting window has passed.
    ///
    /// Any caller may execute. Returns `Ok(true)` when the proposal reached a
    /// terminal state: the registry applied the mutation, or a rejected
    /// proposal was cleared. Returns `Ok(false)` when the registry declined
    /// the mutation; the proposal stays in place so execution can be retried.
    pub fn execute(&self, id: &ItemId) -> Result<bool, GovernanceError> {
        let proposal = self
            .proposals
            .get(id)?
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.clone()))?;
        if proposal.is_open(self.clock.current_height()) {
            return Err(GovernanceError::StillOpen(id.clone()));
        }

        if !proposal.accepted(self.params.min_votes_in_favor) {
            info!(
                item = %id,
                votes_for = proposal.votes_for,
                votes_against = proposal.votes_against,
                "proposal rejected, clearing"
            );
            self.events
                .emit(GovernanceEvent::ProposalCleared { id: id.clone() });
            self.proposals.clear(id)?;
            return Ok(true);
        }

        match proposal.kind {
            ProposalKind::Create => {
                let payload = self.payload_of(id, &proposal)?;
                if !self
                    .registry
                    .create(id, &payload.description, &payload.url, &payload.content_hash)?
                {
                    debug!(item = %id, "registry declined creation, kept for retry");
                    return Ok(false);
                }
                info!(item = %id, "accepted creation executed");
                self.events.emit(GovernanceEvent::ItemCreated {
                    id: id.clone(),
                    description: payload.description.clone(),
                    url: payload.url.clone(),
                    content_hash: payload.content_hash.clone(),
                });
            }
            ProposalKind::Remove => {
                if !self.registry.remove(id)? {
                    debug!(item = %id, "registry declined removal, kept for retry");
                    return Ok(false);
                }
                info!(item = %id, "accepted removal executed");
                self.events
                    .emit(GovernanceEvent::ItemRemoved { id: id.clone() });
            }
        }
        self.proposals.clear(id)?;
        Ok(true)
    }

    /// The hydrated view of the proposal for `id`.
    pub fn get_proposal(&self, id: &ItemId) -> Result<ProposalView, GovernanceError> {
        let proposal = self
            .proposals
            .get(id)?
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.clone()))?;
        self.hydrate(id, &proposal)
    }

    /// Hydrated views of stored proposals in store key order, skipping the
    /// first `start_index` and returning at most one page.
    ///
    /// `start_index` is an ordinal into the current key ordering, so results
    /// are stable across calls only while the proposal set does not change.
    pub fn list_proposals(&self, start_index: usize) -> Result<Vec<ProposalView>, GovernanceError> {
        let mut views = Vec::new();
        for id in self
            .proposals
            .ids()?
            .into_iter()
            .skip(start_index)
            .take(self.params.max_page_size)
        {
            let Some(proposal) = self.proposals.get(&id)? else {
                continue;
            };
            views.push(self.hydrate(&id, &proposal)?);
        }
        Ok(views)
    }

    fn check_id(&self, id: &ItemId) -> Result<(), GovernanceError> {
        if id.is_valid() {
            Ok(())
        } else {
            Err(GovernanceError::InvalidItemId(format!(
                "id must be 1..={} bytes, got {}",
                ItemId::MAX_BYTES,
                id.as_bytes().len()
            )))
        }
    }

    fn item_exists(&self, id: &ItemId) -> Result<bool, GovernanceError> {
        match self.registry.get(id) {
            Ok(_) => Ok(true),
            Err(RegistryError::NotFound(_)) => Ok(false),
            Err(other) => Err(other.into()),
        }
    }

    fn open_proposal(
        &self,
        id: &ItemId,
        kind: ProposalKind,
        payload: Option<&CreatePayload>,
    ) -> Result<Height, GovernanceError> {
        let now = self.clock.current_height();
        let deadline = now
            .checked_add(self.params.voting_period)
            .ok_or(GovernanceError::Overflow)?;
        self.proposals
            .open(id, kind, payload, deadline, now, self.params.min_votes_in_favor)?;
        Ok(deadline)
    }

    fn payload_of<'a>(
        &self,
        id: &ItemId,
        proposal: &'a Proposal,
    ) -> Result<&'a CreatePayload, GovernanceError> {
        proposal.payload.as_ref().ok_or_else(|| {
            StoreError::Corruption(format!("creation proposal without payload for item {id}"))
                .into()
        })
    }

    fn hydrate(&self, id: &ItemId, proposal: &Proposal) -> Result<ProposalView, GovernanceError> {
        let item = match proposal.kind {
            ProposalKind::Create => {
                let payload = self.payload_of(id, proposal)?;
                Item::new(
                    id.clone(),
                    payload.description.clone(),
                    payload.url.clone(),
                    payload.content_hash.clone(),
                )
            }
            ProposalKind::Remove => self.registry.get(id)?,
        };
        Ok(ProposalView {
            item,
            kind: proposal.kind,
            open_for_voting: proposal.is_open(self.clock.current_height()),
            deadline: proposal.deadline,
            votes_for: proposal.votes_for,
            votes_against: proposal.votes_against,
        })
    }
}
