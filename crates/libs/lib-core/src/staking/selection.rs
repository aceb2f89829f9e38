//! # Token Selection
//!
//! Owned token ids per collection and the subset the user ticked. The staking
//! contract takes the two id arrays side by side, so a stake is only possible
//! when both subsets are non-empty and equally long.

use super::{Collection, TokenId};
use crate::error::StakingError;

/// True when `cranium_count` and `stallion_count` form a stakeable pairing.
pub fn can_stake(cranium_count: usize, stallion_count: usize) -> bool {
    cranium_count > 0 && cranium_count == stallion_count
}

/// Owned ids of one collection and the ids currently checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSelection {
    owned: Vec<TokenId>,
    checked: Vec<TokenId>,
}

impl TokenSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owned(&self) -> &[TokenId] {
        &self.owned
    }

    /// Checked ids, most recently checked first.
    pub fn checked(&self) -> &[TokenId] {
        &self.checked
    }

    pub fn checked_count(&self) -> usize {
        self.checked.len()
    }

    pub fn is_checked(&self, id: TokenId) -> bool {
        self.checked.contains(&id)
    }

    /// Check (`true`) or uncheck (`false`) a token id.
    ///
    /// Checking inserts at the front; checking an already-checked id and
    /// unchecking an unchecked id are no-ops.
    pub fn toggle(&mut self, id: TokenId, checked: bool) {
        if checked {
            if !self.is_checked(id) {
                self.checked.insert(0, id);
            }
        } else {
            self.checked.retain(|existing| *existing != id);
        }
    }

    /// Replace the owned ids after a successful fetch. Checked ids the account
    /// no longer owns are dropped.
    pub fn set_owned(&mut self, owned: Vec<TokenId>) {
        self.checked.retain(|id| owned.contains(id));
        self.owned = owned;
    }
}

/// Selection state for both collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StakeSelection {
    pub craniums: TokenSelection,
    pub stallions: TokenSelection,
}

impl StakeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, collection: Collection) -> &TokenSelection {
        match collection {
            Collection::Cranium => &self.craniums,
            Collection::Stallion => &self.stallions,
        }
    }

    pub fn get_mut(&mut self, collection: Collection) -> &mut TokenSelection {
        match collection {
            Collection::Cranium => &mut self.craniums,
            Collection::Stallion => &mut self.stallions,
        }
    }

    pub fn can_stake(&self) -> bool {
        can_stake(self.craniums.checked_count(), self.stallions.checked_count())
    }

    /// Same rule as [`can_stake`], with a reason attached.
    pub fn validate(&self) -> Result<(), StakingError> {
        let craniums = self.craniums.checked_count();
        let stallions = self.stallions.checked_count();
        if craniums == 0 || stallions == 0 {
            return Err(StakingError::InvalidSelection(
                "select at least one Cranium and one Stallion".to_string(),
            ));
        }
        if craniums != stallions {
            return Err(StakingError::InvalidSelection(format!(
                "{} Craniums and {} Stallions selected, counts must match",
                craniums, stallions
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[u64]) -> Vec<TokenId> {
        values.iter().copied().map(TokenId::from).collect()
    }

    #[test]
    fn test_can_stake_only_for_equal_non_empty_counts() {
        for craniums in 0..6 {
            for stallions in 0..6 {
                let expected = craniums == stallions && craniums > 0;
                assert_eq!(can_stake(craniums, stallions), expected, "({}, {})", craniums, stallions);
            }
        }
        assert!(!can_stake(0, 0));
    }

    #[test]
    fn test_selection_can_stake_follows_checked_counts() {
        let mut selection = StakeSelection::new();
        selection.craniums.set_owned(ids(&[1, 2, 3]));
        selection.stallions.set_owned(ids(&[10, 11]));
        assert!(!selection.can_stake());

        selection.craniums.toggle(TokenId::from(1u64), true);
        assert!(!selection.can_stake());
        assert!(selection.validate().is_err());

        selection.stallions.toggle(TokenId::from(10u64), true);
        assert!(selection.can_stake());
        assert!(selection.validate().is_ok());

        selection.craniums.toggle(TokenId::from(2u64), true);
        assert!(!selection.can_stake());
        assert!(matches!(selection.validate(), Err(StakingError::InvalidSelection(_))));
    }

    #[test]
    fn test_toggle_on_then_off_restores_state() {
        let mut selection = TokenSelection::new();
        selection.set_owned(ids(&[1, 2, 3]));
        selection.toggle(TokenId::from(2u64), true);
        let before = selection.clone();

        selection.toggle(TokenId::from(3u64), true);
        selection.toggle(TokenId::from(3u64), false);
        assert_eq!(selection, before);
    }

    #[test]
    fn test_toggle_orders_most_recent_first() {
        let mut selection = TokenSelection::new();
        selection.set_owned(ids(&[1, 2, 3]));
        selection.toggle(TokenId::from(1u64), true);
        selection.toggle(TokenId::from(3u64), true);
        selection.toggle(TokenId::from(3u64), true);
        assert_eq!(selection.checked(), ids(&[3, 1]).as_slice());
    }

    #[test]
    fn test_set_owned_drops_stale_checks() {
        let mut selection = TokenSelection::new();
        selection.set_owned(ids(&[1, 2]));
        selection.toggle(TokenId::from(1u64), true);
        selection.toggle(TokenId::from(2u64), true);

        selection.set_owned(ids(&[2, 5]));
        assert_eq!(selection.checked(), ids(&[2]).as_slice());
        assert_eq!(selection.owned(), ids(&[2, 5]).as_slice());
    }
}
