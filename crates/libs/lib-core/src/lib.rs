//! # Core Library
//!
//! Everything the staking dApp does that is not rendering: configuration,
//! errors, the EIP-1193 client and contract proxies, wallet connectors and
//! connection state, the selector and session rules, and the staking service.
//!
//! The crate is single-threaded by design of its host (the browser), so
//! provider and connector traits are `?Send` and shared through `Rc`.

pub mod bootstrap;
pub mod client;
pub mod config;
pub mod connection;
pub mod connector;
pub mod contracts;
pub mod display;
pub mod error;
pub mod notify;
pub mod provider;
pub mod selector;
pub mod session;
pub mod staking;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use client::EthClient;
pub use config::{core_config, init_config, Config};
pub use connection::ConnectionState;
pub use connector::{Activation, Connector, ConnectorKind, ConnectorRegistry};
pub use error::{AppError, ConnectionError, Result, RpcError, StakingError};
pub use notify::{Notice, Notifier};
pub use provider::{Eip1193, EventSubscription, ProviderEvent};
pub use staking::{Collection, StakingService, TokenId};
