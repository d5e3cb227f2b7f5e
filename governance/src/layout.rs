//! Storage layout for proposal state.
//!
//! Every logical map lives in its own namespace, distinguished by a
//! single-byte tag prefix and keyed by the item id. Vote records for one
//! proposal share a sub-namespace whose prefix includes the id length, so
//! the sub-namespaces of distinct ids never shadow each other. Id length is
//! validated at the propose boundary ([`ItemId::MAX_BYTES`]).

use curia_store::StoreError;
use curia_types::{ItemId, PrincipalId};

/// Namespace tags. The registry uses tags below 12; these stay clear of it.
pub mod tag {
    /// Proposal kind cell. Its presence marks that a proposal exists.
    pub const KIND: u8 = 12;
    /// Per-proposal vote record sub-namespace.
    pub const VOTES: u8 = 16;
    pub const VOTES_TOTAL: u8 = 17;
    pub const VOTES_FOR: u8 = 18;
    pub const VOTES_AGAINST: u8 = 19;
    pub const DESCRIPTION: u8 = 24;
    pub const URL: u8 = 25;
    pub const CONTENT_HASH: u8 = 26;
    /// Last height at which voting is open.
    pub const DEADLINE: u8 = 32;
}

/// Key of a per-item field cell: `tag ++ id`.
pub fn field_key(tag: u8, id: &ItemId) -> Vec<u8> {
    let id_bytes = id.as_bytes();
    let mut key = Vec::with_capacity(1 + id_bytes.len());
    key.push(tag);
    key.extend_from_slice(id_bytes);
    key
}

/// Prefix of the vote sub-namespace for one proposal: `tag ++ len(id) ++ id`.
pub fn vote_prefix(id: &ItemId) -> Vec<u8> {
    let id_bytes = id.as_bytes();
    debug_assert!(id_bytes.len() <= ItemId::MAX_BYTES);
    let mut prefix = Vec::with_capacity(2 + id_bytes.len());
    prefix.push(tag::VOTES);
    prefix.push(id_bytes.len() as u8);
    prefix.extend_from_slice(id_bytes);
    prefix
}

/// Key of a single vote record: the vote sub-namespace prefix plus the voter.
pub fn vote_key(id: &ItemId, voter: &PrincipalId) -> Vec<u8> {
    let mut key = vote_prefix(id);
    key.extend_from_slice(voter.as_bytes());
    key
}

/// Encode an integer cell (tallies, deadlines) as fixed-width big-endian.
pub fn encode_u64(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Decode an integer cell, rejecting cells of the wrong width.
pub fn decode_u64(bytes: &[u8]) -> Result<u64, StoreError> {
    let cell: [u8; 8] = bytes
        .try_into()
        .map_err(|_| StoreError::Corruption(format!("integer cell of width {}", bytes.len())))?;
    Ok(u64::from_be_bytes(cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ItemId {
        ItemId::from(id)
    }

    #[test]
    fn field_key_prepends_tag() {
        let key = field_key(tag::DESCRIPTION, &item("abc"));
        assert_eq!(key, vec![tag::DESCRIPTION, b'a', b'b', b'c']);
    }

    #[test]
    fn vote_prefix_includes_id_length() {
        let prefix = vote_prefix(&item("ab"));
        assert_eq!(prefix, vec![tag::VOTES, 2, b'a', b'b']);
    }

    #[test]
    fn vote_prefixes_of_distinct_ids_never_shadow() {
        // Without the length byte, "ab"'s sub-namespace would be a prefix of
        // "abc"'s and clearing one proposal would eat the other's votes.
        let short = vote_prefix(&item("ab"));
        let long = vote_prefix(&item("abc"));
        assert!(!long.starts_with(&short));
        assert!(!short.starts_with(&long));
    }

    #[test]
    fn vote_key_is_prefix_plus_voter() {
        let id = item("abc");
        let voter = PrincipalId::new([7; 20]);
        let key = vote_key(&id, &voter);
        assert!(key.starts_with(&vote_prefix(&id)));
        assert!(key.ends_with(voter.as_bytes()));
        assert_eq!(key.len(), vote_prefix(&id).len() + 20);
    }

    #[test]
    fn u64_cells_round_trip() {
        for value in [0, 1, 42, u64::MAX] {
            assert_eq!(decode_u64(&encode_u64(value)).unwrap(), value);
        }
    }

    #[test]
    fn short_integer_cell_is_corruption() {
        assert!(matches!(
            decode_u64(&[1, 2, 3]),
            Err(StoreError::Corruption(_))
        ));
    }

    #[test]
    fn tags_are_distinct_and_clear_of_registry_range() {
        let tags = [
            tag::KIND,
            tag::VOTES,
            tag::VOTES_TOTAL,
            tag::VOTES_FOR,
            tag::VOTES_AGAINST,
            tag::DESCRIPTION,
            tag::URL,
            tag::CONTENT_HASH,
            tag::DEADLINE,
        ];
        let unique: std::collections::HashSet<u8> = tags.iter().copied().collect();
        assert_eq!(unique.len(), tags.len());
        assert!(tags.iter().all(|&t| t >= 12));
    }
}
