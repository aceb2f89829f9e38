//! # Chain-State Display
//!
//! Labels for the header widgets (chain id, block number, account, balance,
//! status) and the loaders that feed them. Loaders run in effects that may be
//! torn down before the request returns; a [`StaleGuard`] makes sure such
//! late results are dropped instead of written into state that moved on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use shared::chain::chain_name;
use shared::utils::{format_ether, truncate_address};
use tracing::debug;

use crate::client::EthClient;

/// Fractional ether digits shown in the balance widget.
pub const BALANCE_PRECISION: usize = 4;

/// Flag shared between an effect and the requests it spawned.
#[derive(Debug, Clone, Default)]
pub struct StaleGuard(Arc<AtomicBool>);

impl StaleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on teardown; every clone observes it.
    pub fn mark_stale(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stale(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A value loaded from the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fetched<T> {
    #[default]
    Pending,
    Ready(T),
    Failed,
}

impl<T> Fetched<T> {
    fn label(&self, render: impl FnOnce(&T) -> String) -> String {
        match self {
            Fetched::Pending => String::new(),
            Fetched::Ready(value) => render(value),
            Fetched::Failed => "Error".to_string(),
        }
    }
}

pub fn chain_label(chain_id: Option<u64>) -> String {
    chain_id.map(|id| id.to_string()).unwrap_or_default()
}

/// Network name next to the raw chain id, e.g. "Rinkeby".
pub fn network_label(chain_id: Option<u64>) -> String {
    chain_id.map(chain_name).unwrap_or_default()
}

pub fn block_label(block: &Fetched<u64>) -> String {
    block.label(u64::to_string)
}

/// Truncated account; `-` when connected without one (read-only connector).
pub fn account_label(active: bool, account: Option<Address>) -> String {
    match account {
        Some(account) => truncate_address(&account.to_string()),
        None if active => "-".to_string(),
        None => String::new(),
    }
}

pub fn balance_label(balance: &Fetched<U256>) -> String {
    balance.label(|wei| format!("Ξ{}", format_ether(*wei, BALANCE_PRECISION)))
}

pub fn status_indicator(active: bool, has_error: bool) -> &'static str {
    if active {
        "🟢"
    } else if has_error {
        "🔴"
    } else {
        "🟠"
    }
}

/// Latest block number, or `None` when the guard went stale meanwhile.
pub async fn load_block_number(client: &EthClient, guard: &StaleGuard) -> Option<Fetched<u64>> {
    let result = client.block_number().await;
    if guard.is_stale() {
        debug!("dropping stale block number");
        return None;
    }
    Some(match result {
        Ok(block) => Fetched::Ready(block),
        Err(e) => {
            debug!(error = %e, "block number unavailable");
            Fetched::Failed
        }
    })
}

/// Native balance of `account`, or `None` when the guard went stale meanwhile.
pub async fn load_balance(client: &EthClient, account: Address, guard: &StaleGuard) -> Option<Fetched<U256>> {
    let result = client.balance(account).await;
    if guard.is_stale() {
        debug!("dropping stale balance");
        return None;
    }
    Some(match result {
        Ok(wei) => Fetched::Ready(wei),
        Err(e) => {
            debug!(error = %e, "balance unavailable");
            Fetched::Failed
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProvider;
    use std::rc::Rc;

    #[test]
    fn test_labels() {
        assert_eq!(chain_label(Some(4)), "4");
        assert_eq!(chain_label(None), "");
        assert_eq!(network_label(Some(4)), "Rinkeby");
        assert_eq!(network_label(Some(1337)), "Chain 1337");
        assert_eq!(network_label(None), "");
        assert_eq!(block_label(&Fetched::Ready(12_965_000)), "12965000");
        assert_eq!(block_label(&Fetched::Failed), "Error");
        assert_eq!(block_label(&Fetched::Pending), "");
        assert_eq!(
            balance_label(&Fetched::Ready(U256::from(1_234_567_000_000_000_000u64))),
            "Ξ1.2345"
        );
        assert_eq!(balance_label(&Fetched::Failed), "Error");
    }

    #[test]
    fn test_account_label() {
        let account: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
        assert_eq!(account_label(true, Some(account)), "0x5aAe...eAed");
        assert_eq!(account_label(true, None), "-");
        assert_eq!(account_label(false, None), "");
    }

    #[test]
    fn test_status_indicator() {
        assert_eq!(status_indicator(true, false), "🟢");
        assert_eq!(status_indicator(false, true), "🔴");
        assert_eq!(status_indicator(false, false), "🟠");
    }

    #[tokio::test]
    async fn test_stale_results_are_dropped() {
        let client = EthClient::new(Rc::new(MockProvider::new().with_block_number(100)));
        let guard = StaleGuard::new();
        assert_eq!(load_block_number(&client, &guard).await, Some(Fetched::Ready(100)));

        guard.clone().mark_stale();
        assert_eq!(load_block_number(&client, &guard).await, None);
    }

    #[tokio::test]
    async fn test_failed_balance_shows_error() {
        let client = EthClient::new(Rc::new(MockProvider::new().reject("eth_getBalance", -32000, "header not found")));
        let loaded = load_balance(&client, Address::repeat_byte(1), &StaleGuard::new()).await;
        assert_eq!(loaded, Some(Fetched::Failed));
    }
}
