//! # Staking
//!
//! The staking panel's domain: the two NFT collections, token ids, the
//! checked-token selection, and the approve / fetch / stake service.

pub mod selection;
pub mod service;

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

pub use selection::{can_stake, StakeSelection, TokenSelection};
pub use service::{OwnedTokens, StakingService};

/// One of the two NFT collections that are staked in pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Cranium,
    Stallion,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Cranium, Collection::Stallion];

    /// Singular display name.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Cranium => "Cranium",
            Collection::Stallion => "Stallion",
        }
    }

    /// Plural display name used for panel headings.
    pub fn plural(&self) -> &'static str {
        match self {
            Collection::Cranium => "Craniums",
            Collection::Stallion => "Stallions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ERC-721 token id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub U256);

impl TokenId {
    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

impl From<U256> for TokenId {
    fn from(value: U256) -> Self {
        TokenId(value)
    }
}

impl From<u64> for TokenId {
    fn from(value: u64) -> Self {
        TokenId(U256::from(value))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_displays_decimal() {
        assert_eq!(TokenId::from(4021u64).to_string(), "4021");
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Cranium.plural(), "Craniums");
        assert_eq!(Collection::Stallion.to_string(), "Stallion");
    }
}
