//! Governance parameters and their deployment defaults.

use serde::{Deserialize, Serialize};

/// Tunable parameters of the governance engine, fixed at construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Heights a proposal stays open for voting after it is opened.
    pub voting_period: u64,
    /// Minimum number of for-votes required for acceptance.
    pub min_votes_in_favor: u64,
    /// Maximum number of proposal views returned per listing page.
    pub max_page_size: usize,
}

impl GovernanceParams {
    pub const DEFAULT_VOTING_PERIOD: u64 = 10;
    pub const DEFAULT_MIN_VOTES_IN_FAVOR: u64 = 3;
    pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            voting_period: Self::DEFAULT_VOTING_PERIOD,
            min_votes_in_favor: Self::DEFAULT_MIN_VOTES_IN_FAVOR,
            max_page_size: Self::DEFAULT_MAX_PAGE_SIZE,
        }
    }
}
