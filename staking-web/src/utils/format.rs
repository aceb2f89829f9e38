//! # Formatting Utilities for Staking Web
//!
//! Button and list labels specific to the staking frontend. Chain-state
//! labels live in [`lib_core::display`]; address formatting in
//! [`shared::utils`].

use lib_core::selector::ButtonState;
use lib_core::staking::{StakeSelection, TokenSelection};
use lib_core::{Collection, TokenId};

/// Badge next to a connector name: spinner while activating, check mark when connected.
pub fn button_badge(state: ButtonState) -> &'static str {
    if state.activating {
        "⏳"
    } else if state.connected {
        "✅"
    } else {
        ""
    }
}

pub fn approve_label(collection: Collection, approved: Option<bool>) -> String {
    match approved {
        Some(true) => format!("{} approved", collection.plural()),
        _ => format!("Approve {}", collection.plural()),
    }
}

pub fn token_label(id: TokenId) -> String {
    format!("#{}", id)
}

/// "2 of 5 selected"
pub fn selected_label(selection: &TokenSelection) -> String {
    format!("{} of {} selected", selection.checked_count(), selection.owned().len())
}

pub fn stake_label(selection: &StakeSelection) -> String {
    match selection.craniums.checked_count() {
        n if selection.can_stake() && n == 1 => "Stake 1 pair".to_string(),
        n if selection.can_stake() => format!("Stake {} pairs", n),
        _ => "Stake".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_badge() {
        let idle = ButtonState {
            disabled: false,
            activating: false,
            connected: false,
        };
        assert_eq!(button_badge(idle), "");
        assert_eq!(button_badge(ButtonState { activating: true, ..idle }), "⏳");
        assert_eq!(button_badge(ButtonState { connected: true, ..idle }), "✅");
    }

    #[test]
    fn test_approve_label() {
        assert_eq!(approve_label(Collection::Cranium, None), "Approve Craniums");
        assert_eq!(approve_label(Collection::Stallion, Some(false)), "Approve Stallions");
        assert_eq!(approve_label(Collection::Stallion, Some(true)), "Stallions approved");
    }

    #[test]
    fn test_selection_labels() {
        let mut selection = StakeSelection::new();
        selection.craniums.set_owned(vec![TokenId::from(1u64), TokenId::from(2u64)]);
        selection.stallions.set_owned(vec![TokenId::from(7u64)]);
        assert_eq!(stake_label(&selection), "Stake");

        selection.craniums.toggle(TokenId::from(2u64), true);
        selection.stallions.toggle(TokenId::from(7u64), true);
        assert_eq!(stake_label(&selection), "Stake 1 pair");
        assert_eq!(selected_label(&selection.craniums), "1 of 2 selected");
        assert_eq!(token_label(TokenId::from(2u64)), "#2");
    }
}
