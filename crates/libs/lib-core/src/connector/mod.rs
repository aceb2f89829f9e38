//! # Wallet Connectors
//!
//! A connector adapts one wallet integration (browser extension, hosted
//! wallet, hardware wallet, plain RPC endpoint) to a common activation
//! contract. Connector-specific follow-up actions are capabilities a
//! connector may expose:
//!
//! - [`SupportsNetworkSwitch`] - move the session to another chain
//! - [`SupportsExplicitClose`] - end the session on the wallet's side
//!
//! Callers ask for a capability with [`Connector::as_network_switch`] /
//! [`Connector::as_explicit_close`] instead of probing for methods.

pub mod registry;

use std::fmt;
use std::rc::Rc;

use alloy_primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ConnectionError;
use crate::provider::Eip1193;

pub use registry::{ConnectorRegistry, RegistryError};

/// Every wallet integration the selector knows about, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    Injected,
    Network,
    WalletConnect,
    WalletLink,
    Ledger,
    Trezor,
    Lattice,
    Frame,
    Authereum,
    Fortmatic,
    Magic,
    Portis,
    Torus,
}

impl ConnectorKind {
    pub const ALL: [ConnectorKind; 13] = [
        ConnectorKind::Injected,
        ConnectorKind::Network,
        ConnectorKind::WalletConnect,
        ConnectorKind::WalletLink,
        ConnectorKind::Ledger,
        ConnectorKind::Trezor,
        ConnectorKind::Lattice,
        ConnectorKind::Frame,
        ConnectorKind::Authereum,
        ConnectorKind::Fortmatic,
        ConnectorKind::Magic,
        ConnectorKind::Portis,
        ConnectorKind::Torus,
    ];

    /// Human readable name shown on the selector button.
    pub fn name(&self) -> &'static str {
        match self {
            ConnectorKind::Injected => "Injected",
            ConnectorKind::Network => "Network",
            ConnectorKind::WalletConnect => "WalletConnect",
            ConnectorKind::WalletLink => "WalletLink",
            ConnectorKind::Ledger => "Ledger",
            ConnectorKind::Trezor => "Trezor",
            ConnectorKind::Lattice => "Lattice",
            ConnectorKind::Frame => "Frame",
            ConnectorKind::Authereum => "Authereum",
            ConnectorKind::Fortmatic => "Fortmatic",
            ConnectorKind::Magic => "Magic",
            ConnectorKind::Portis => "Portis",
            ConnectorKind::Torus => "Torus",
        }
    }

    /// Identifier used in configuration and by the JavaScript bridge.
    pub fn slug(&self) -> &'static str {
        match self {
            ConnectorKind::Injected => "injected",
            ConnectorKind::Network => "network",
            ConnectorKind::WalletConnect => "walletconnect",
            ConnectorKind::WalletLink => "walletlink",
            ConnectorKind::Ledger => "ledger",
            ConnectorKind::Trezor => "trezor",
            ConnectorKind::Lattice => "lattice",
            ConnectorKind::Frame => "frame",
            ConnectorKind::Authereum => "authereum",
            ConnectorKind::Fortmatic => "fortmatic",
            ConnectorKind::Magic => "magic",
            ConnectorKind::Portis => "portis",
            ConnectorKind::Torus => "torus",
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a successful activation hands back.
#[derive(Clone)]
pub struct Activation {
    /// Provider handle ("library") for every later request.
    pub provider: Rc<dyn Eip1193>,
    /// `None` for read-only connectors.
    pub account: Option<Address>,
    pub chain_id: u64,
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activation")
            .field("account", &self.account)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

/// A wallet integration able to establish an authorized session.
#[async_trait(?Send)]
pub trait Connector {
    fn kind(&self) -> ConnectorKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Establish a session, prompting the user if the wallet needs to.
    async fn activate(&self) -> Result<Activation, ConnectionError>;

    /// Whether a session can be resumed without prompting.
    async fn is_authorized(&self) -> bool {
        false
    }

    /// Release local resources for the session. Does not end the wallet-side
    /// session; that is [`SupportsExplicitClose::close`].
    async fn deactivate(&self) {}

    fn as_network_switch(&self) -> Option<&dyn SupportsNetworkSwitch> {
        None
    }

    fn as_explicit_close(&self) -> Option<&dyn SupportsExplicitClose> {
        None
    }
}

/// Connectors whose session can move to another chain.
#[async_trait(?Send)]
pub trait SupportsNetworkSwitch {
    /// Chain the "Switch Networks" action moves to from `current`.
    fn switch_target(&self, current: u64) -> u64;

    /// Move to `chain_id`, returning the refreshed activation.
    async fn switch_network(&self, chain_id: u64) -> Result<Activation, ConnectionError>;
}

/// Connectors with a session that can be terminated on the wallet's side.
#[async_trait(?Send)]
pub trait SupportsExplicitClose {
    /// Button label, e.g. "Kill WalletConnect Session".
    fn close_label(&self) -> String;

    async fn close(&self) -> Result<(), ConnectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_matches_serde_name() {
        for kind in ConnectorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.slug()));
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = ConnectorKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ConnectorKind::ALL.len());
    }
}
