//! # EIP-1193 Provider Boundary
//!
//! Every wallet connector ultimately hands back an object with a single
//! `request({ method, params })` entry point. [`Eip1193`] is that entry point
//! on the Rust side; the browser implementation forwards to JavaScript, test
//! implementations answer from memory.

use std::any::Any;

use alloy_primitives::Address;
use async_trait::async_trait;
use lib_utils::quantity::parse_quantity;
use serde_json::Value;

use crate::error::RpcError;

/// A provider handle able to answer JSON-RPC requests.
///
/// Single-threaded: browser providers hold `JsValue`s, so neither the trait
/// nor its futures are `Send`.
#[async_trait(?Send)]
pub trait Eip1193 {
    /// Issue `method` with positional `params` (a JSON array, or `null`).
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError>;

    /// Attach `on_event` to the events this provider emits. Providers that
    /// never emit any (plain HTTP endpoints) return `None`.
    fn subscribe(&self, _on_event: Box<dyn FnMut(ProviderEvent)>) -> Option<EventSubscription> {
        None
    }
}

/// Listener registration returned by [`Eip1193::subscribe`]. Dropping it
/// detaches the listeners.
pub struct EventSubscription {
    _guard: Box<dyn Any>,
}

impl EventSubscription {
    pub fn new<T: 'static>(guard: T) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

/// Events a provider emits on its own initiative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    Connect { chain_id: Option<u64> },
    ChainChanged(u64),
    AccountsChanged(Vec<Address>),
    /// Legacy MetaMask event carrying the network id.
    NetworkChanged(u64),
    Disconnect,
}

impl ProviderEvent {
    /// Names the browser bridge subscribes to.
    pub const NAMES: [&'static str; 5] = [
        "connect",
        "chainChanged",
        "accountsChanged",
        "networkChanged",
        "disconnect",
    ];

    /// Build an event from its name and JSON payload. Unknown names and
    /// malformed payloads yield `None`.
    pub fn parse(name: &str, payload: &Value) -> Option<Self> {
        match name {
            "connect" => Some(ProviderEvent::Connect {
                chain_id: payload
                    .get("chainId")
                    .and_then(quantity_from_value),
            }),
            "chainChanged" => quantity_from_value(payload).map(ProviderEvent::ChainChanged),
            "networkChanged" => quantity_from_value(payload).map(ProviderEvent::NetworkChanged),
            "accountsChanged" => serde_json::from_value::<Vec<Address>>(payload.clone())
                .ok()
                .map(ProviderEvent::AccountsChanged),
            "disconnect" => Some(ProviderEvent::Disconnect),
            _ => None,
        }
    }
}

/// Chain ids arrive as hex strings, decimal strings or plain numbers depending on the wallet.
pub(crate) fn quantity_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => parse_quantity(s).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_chain_changed_forms() {
        assert_eq!(ProviderEvent::parse("chainChanged", &json!("0x4")), Some(ProviderEvent::ChainChanged(4)));
        assert_eq!(ProviderEvent::parse("chainChanged", &json!(42)), Some(ProviderEvent::ChainChanged(42)));
        assert_eq!(ProviderEvent::parse("networkChanged", &json!("3")), Some(ProviderEvent::NetworkChanged(3)));
    }

    #[test]
    fn test_parse_accounts_changed() {
        let event = ProviderEvent::parse(
            "accountsChanged",
            &json!(["0x742d35cc6634c0532925a3b844bc9e7595f2bd18"]),
        );
        match event {
            Some(ProviderEvent::AccountsChanged(accounts)) => assert_eq!(accounts.len(), 1),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(
            ProviderEvent::parse("accountsChanged", &json!([])),
            Some(ProviderEvent::AccountsChanged(vec![]))
        );
    }

    #[test]
    fn test_parse_connect_and_unknown() {
        assert_eq!(
            ProviderEvent::parse("connect", &json!({ "chainId": "0x1" })),
            Some(ProviderEvent::Connect { chain_id: Some(1) })
        );
        assert_eq!(ProviderEvent::parse("message", &json!({})), None);
    }
}
