//! Persistence of proposals and their vote records.
//!
//! All proposal state lives in single-byte-tagged namespaces keyed by the
//! item id (see [`crate::layout`]). This store enforces the one-proposal-per-
//! id rule at open time and owns the clearing path that keeps vote records
//! from leaking into the next proposal generation for the same id.

use std::sync::Arc;

use curia_store::{KvStore, StoreError};
use curia_types::{ContentHash, Height, ItemId, PrincipalId};
use tracing::info;

use crate::error::GovernanceError;
use crate::events::{EventSink, GovernanceEvent};
use crate::layout::{self, tag};
use crate::proposal::{CreatePayload, Proposal, ProposalKind};

pub struct ProposalStore {
    kv: Arc<dyn KvStore + Send + Sync>,
    events: Arc<dyn EventSink + Send + Sync>,
}

impl ProposalStore {
    pub fn new(
        kv: Arc<dyn KvStore + Send + Sync>,
        events: Arc<dyn EventSink + Send + Sync>,
    ) -> Self {
        Self { kv, events }
    }

    /// Open a new proposal generation for `id`.
    ///
    /// An existing proposal still open at `now` fails with
    /// [`GovernanceError::ProposalStillLive`]; one past its deadline and
    /// accepted fails with [`GovernanceError::PendingExecution`] until it is
    /// executed. One past its deadline and not accepted is superseded: a
    /// [`GovernanceEvent::ProposalCleared`] notification goes out and every
    /// trace of it, vote records included, is deleted before the new fields
    /// are written.
    pub fn open(
        &self,
        id: &ItemId,
        kind: ProposalKind,
        payload: Option<&CreatePayload>,
        deadline: Height,
        now: Height,
        min_votes_in_favor: u64,
    ) -> Result<(), GovernanceError> {
        if let Some(existing) = self.get(id)? {
            if existing.is_open(now) {
                return Err(GovernanceError::ProposalStillLive(id.clone()));
            }
            if existing.accepted(min_votes_in_favor) {
                return Err(GovernanceError::PendingExecution(id.clone()));
            }
            info!(item = %id, "expired proposal superseded");
            self.events
                .emit(GovernanceEvent::ProposalCleared { id: id.clone() });
            self.clear(id)?;
        }

        self.kv
            .put(&layout::field_key(tag::KIND, id), &[kind.as_byte()])?;
        if let Some(payload) = payload {
            self.kv.put(
                &layout::field_key(tag::DESCRIPTION, id),
                payload.description.as_bytes(),
            )?;
            self.kv
                .put(&layout::field_key(tag::URL, id), payload.url.as_bytes())?;
            self.kv.put(
                &layout::field_key(tag::CONTENT_HASH, id),
                payload.content_hash.as_bytes(),
            )?;
        }
        self.kv.put(
            &layout::field_key(tag::DEADLINE, id),
            &layout::encode_u64(deadline.value()),
        )?;
        self.kv.put(
            &layout::field_key(tag::VOTES_TOTAL, id),
            &layout::encode_u64(0),
        )?;
        self.kv.put(
            &layout::field_key(tag::VOTES_FOR, id),
            &layout::encode_u64(0),
        )?;
        self.kv.put(
            &layout::field_key(tag::VOTES_AGAINST, id),
            &layout::encode_u64(0),
        )?;
        Ok(())
    }

    /// Load the proposal for `id`, if one exists.
    ///
    /// The kind cell is the presence marker; any missing or malformed cell
    /// alongside an existing kind cell is corruption.
    pub fn get(&self, id: &ItemId) -> Result<Option<Proposal>, GovernanceError> {
        let kind_cell = match self.kv.get(&layout::field_key(tag::KIND, id))? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };
        let kind = match kind_cell.as_slice() {
            [byte] => ProposalKind::from_byte(*byte),
            _ => None,
        }
        .ok_or_else(|| StoreError::Corruption(format!("proposal kind cell for item {id}")))?;

        let payload = match kind {
            ProposalKind::Create => Some(CreatePayload {
                description: self.read_string_cell(tag::DESCRIPTION, id)?,
                url: self.read_string_cell(tag::URL, id)?,
                content_hash: ContentHash::new(self.read_cell(tag::CONTENT_HASH, id)?),
            }),
            ProposalKind::Remove => None,
        };

        Ok(Some(Proposal {
            kind,
            payload,
            deadline: Height::new(self.read_u64_cell(tag::DEADLINE, id)?),
            votes_for: self.read_u64_cell(tag::VOTES_FOR, id)?,
            votes_against: self.read_u64_cell(tag::VOTES_AGAINST, id)?,
            votes_total: self.read_u64_cell(tag::VOTES_TOTAL, id)?,
        }))
    }

    /// Delete every trace of the proposal for `id`, vote records included.
    /// Clearing an id without a proposal is a no-op.
    pub fn clear(&self, id: &ItemId) -> Result<(), GovernanceError> {
        self.kv.delete(&layout::field_key(tag::KIND, id))?;
        self.kv.delete(&layout::field_key(tag::DEADLINE, id))?;

        let prefix = layout::vote_prefix(id);
        for (suffix, _) in self.kv.scan_prefix(&prefix)? {
            let mut key = prefix.clone();
            key.extend_from_slice(&suffix);
            self.kv.delete(&key)?;
        }

        self.kv.delete(&layout::field_key(tag::VOTES_TOTAL, id))?;
        self.kv.delete(&layout::field_key(tag::VOTES_FOR, id))?;
        self.kv.delete(&layout::field_key(tag::VOTES_AGAINST, id))?;
        self.kv.delete(&layout::field_key(tag::DESCRIPTION, id))?;
        self.kv.delete(&layout::field_key(tag::URL, id))?;
        self.kv.delete(&layout::field_key(tag::CONTENT_HASH, id))?;
        Ok(())
    }

    /// Whether `voter` already holds a vote record in the current generation.
    pub fn has_vote(&self, id: &ItemId, voter: &PrincipalId) -> Result<bool, GovernanceError> {
        Ok(self.kv.get(&layout::vote_key(id, voter))?.is_some())
    }

    /// Write the vote record for `voter` and bump the tallies.
    ///
    /// Callers check [`Self::has_vote`] first; this only records.
    pub fn record_vote(
        &self,
        id: &ItemId,
        voter: &PrincipalId,
        in_favor: bool,
    ) -> Result<(), GovernanceError> {
        self.kv.put(&layout::vote_key(id, voter), &[1])?;
        self.bump_tally(tag::VOTES_TOTAL, id)?;
        if in_favor {
            self.bump_tally(tag::VOTES_FOR, id)?;
        } else {
            self.bump_tally(tag::VOTES_AGAINST, id)?;
        }
        Ok(())
    }

    /// Ids with a stored proposal, in store key order.
    pub fn ids(&self) -> Result<Vec<ItemId>, GovernanceError> {
        let entries = self.kv.scan_prefix(&[tag::KIND])?;
        let mut ids = Vec::with_capacity(entries.len());
        for (suffix, _) in entries {
            let id = String::from_utf8(suffix).map_err(|_| {
                StoreError::Corruption("non-utf8 item id in proposal namespace".into())
            })?;
            ids.push(ItemId::new(id));
        }
        Ok(ids)
    }

    fn bump_tally(&self, tag: u8, id: &ItemId) -> Result<(), GovernanceError> {
        let current = self.read_u64_cell(tag, id)?;
        let next = current.checked_add(1).ok_or(GovernanceError::Overflow)?;
        self.kv
            .put(&layout::field_key(tag, id), &layout::encode_u64(next))?;
        Ok(())
    }

    fn read_cell(&self, tag: u8, id: &ItemId) -> Result<Vec<u8>, GovernanceError> {
        self.kv.get(&layout::field_key(tag, id))?.ok_or_else(|| {
            StoreError::Corruption(format!("missing cell {tag} for item {id}")).into()
        })
    }

    fn read_u64_cell(&self, tag: u8, id: &ItemId) -> Result<u64, GovernanceError> {
        Ok(layout::decode_u64(&self.read_cell(tag, id)?)?)
    }

    fn read_string_cell(&self, tag: u8, id: &ItemId) -> Result<String, GovernanceError> {
        String::from_utf8(self.read_cell(tag, id)?)
            .map_err(|_| StoreError::Corruption(format!("non-utf8 cell {tag} for item {id}")).into())
    }
}
