//! # Centralized Error Handling
//!
//! Error types shared by every layer of the dApp. They follow the `thiserror`
//! pattern used throughout the workspace.
//!
//! ## Error Categories
//!
//! 1. **Provider errors** - [`RpcError`]: a JSON-RPC / EIP-1193 request was
//!    rejected. Carries the numeric code and the raw message.
//! 2. **Connection errors** - [`ConnectionError`]: activating a wallet
//!    connector failed. Each kind maps to one fixed user-facing message
//!    ([`ConnectionError::user_message`]).
//! 3. **Staking errors** - [`StakingError`]: approve / fetch / stake failed.
//!    Surfaced to the user with the raw provider message when there is one.
//! 4. **Configuration errors** - [`ConfigError`]: static configuration could
//!    not be parsed or failed validation.
//!
//! [`AppError`] wraps all of them for code that does not care which layer
//! failed.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{ConnectionError, RpcError};
//!
//! let rejected = RpcError::new(4001, "User rejected the request.");
//! let err = ConnectionError::from_rpc(rejected);
//! assert_eq!(
//!     err.user_message(),
//!     "Please authorize this website to access your Ethereum account."
//! );
//! ```

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::staking::Collection;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// EIP-1193 code for "the user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// EIP-1193 code for "the requested method is not supported" by this provider.
pub const UNSUPPORTED_METHOD_CODE: i64 = 4200;

/// Error returned by a provider `request` call.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("RPC error {code}: {message}")]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Error raised on our side of the boundary (bad response shape, transport failure).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(-32603, message)
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == USER_REJECTED_CODE
    }
}

/// Failure to establish or keep a connector session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// No injected provider (`window.ethereum`) or the connector's library is missing.
    #[error("No Ethereum provider found")]
    NoEthereumProvider,

    /// The wallet reports a chain id outside the configured supported set.
    #[error("Unsupported chain id: {0}")]
    UnsupportedChainId(u64),

    /// The user dismissed the connection prompt.
    #[error("User rejected the request")]
    UserRejectedRequest,

    /// Anything else, with the raw message kept for the console.
    #[error("Connection error: {0}")]
    Unknown(String),
}

impl ConnectionError {
    /// Fixed message shown inline under the connector buttons.
    pub fn user_message(&self) -> &'static str {
        match self {
            ConnectionError::NoEthereumProvider => {
                "No Ethereum browser extension detected, install MetaMask on desktop or visit from a dApp browser on mobile."
            }
            ConnectionError::UnsupportedChainId(_) => "You're connected to an unsupported network.",
            ConnectionError::UserRejectedRequest => {
                "Please authorize this website to access your Ethereum account."
            }
            ConnectionError::Unknown(_) => {
                "An unknown error occurred. Check the console for more details."
            }
        }
    }

    /// Classify a provider error. Only the EIP-1193 code is inspected, so every
    /// connector's rejection maps to the same variant.
    pub fn from_rpc(err: RpcError) -> Self {
        if err.is_user_rejection() {
            ConnectionError::UserRejectedRequest
        } else {
            ConnectionError::Unknown(err.message)
        }
    }
}

impl From<RpcError> for ConnectionError {
    fn from(err: RpcError) -> Self {
        ConnectionError::from_rpc(err)
    }
}

/// Failure of one of the staking panel operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakingError {
    /// The panel was used without a connected account.
    #[error("No wallet connected")]
    NotConnected,

    /// The checked token sets cannot be staked together.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// The provider or the contract rejected the call.
    #[error("{0}")]
    Rpc(RpcError),

    /// `balanceOf` reported more tokens than the panel will enumerate one by one.
    #[error("{collection} balance of {balance} exceeds the {limit} tokens that can be listed")]
    TooManyTokens {
        collection: Collection,
        balance: U256,
        limit: u64,
    },

    /// The contract answered with data that does not match its ABI.
    #[error("Failed to decode contract response: {0}")]
    Decode(String),
}

impl StakingError {
    /// Raw message appended to the failure notice, if there is one worth showing.
    pub fn raw_message(&self) -> Option<String> {
        match self {
            StakingError::Rpc(err) if err.message.trim().is_empty() => None,
            StakingError::Rpc(err) => Some(err.message.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<RpcError> for StakingError {
    fn from(err: RpcError) -> Self {
        StakingError::Rpc(err)
    }
}

impl From<alloy_sol_types::Error> for StakingError {
    fn from(err: alloy_sol_types::Error) -> Self {
        StakingError::Decode(err.to_string())
    }
}

/// Static configuration problems, reported once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration has already been initialized")]
    AlreadyInitialized,
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Connection(ConnectionError),

    #[error(transparent)]
    Staking(StakingError),

    #[error(transparent)]
    Rpc(RpcError),
}

impl AppError {
    /// User-facing text for any error in the application.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Connection(err) => err.user_message().to_string(),
            AppError::Staking(err) => err.raw_message().unwrap_or_else(|| err.to_string()),
            AppError::Rpc(err) => err.message.clone(),
            AppError::Config(err) => err.to_string(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<ConnectionError> for AppError {
    fn from(err: ConnectionError) -> Self {
        AppError::Connection(err)
    }
}

impl From<StakingError> for AppError {
    fn from(err: StakingError) -> Self {
        AppError::Staking(err)
    }
}

impl From<RpcError> for AppError {
    fn from(err: RpcError) -> Self {
        AppError::Rpc(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_rejection_message_is_connector_independent() {
        // Injected wallets, WalletConnect and Frame all report 4001 with their own wording.
        let raw = [
            RpcError::new(4001, "MetaMask Tx Signature: User denied transaction signature."),
            RpcError::new(4001, "User rejected the request."),
            RpcError::new(4001, ""),
        ];
        for err in raw {
            let conn = ConnectionError::from(err);
            assert_eq!(conn, ConnectionError::UserRejectedRequest);
            assert_eq!(
                conn.user_message(),
                "Please authorize this website to access your Ethereum account."
            );
        }
    }

    #[test]
    fn test_fixed_messages() {
        assert!(ConnectionError::NoEthereumProvider.user_message().starts_with("No Ethereum browser extension"));
        assert_eq!(
            ConnectionError::UnsupportedChainId(56).user_message(),
            "You're connected to an unsupported network."
        );
        assert_eq!(
            ConnectionError::Unknown("boom".into()).user_message(),
            "An unknown error occurred. Check the console for more details."
        );
    }

    #[test]
    fn test_other_codes_are_unknown() {
        let err = ConnectionError::from_rpc(RpcError::new(-32002, "Request already pending"));
        assert_eq!(err, ConnectionError::Unknown("Request already pending".into()));
    }

    #[test]
    fn test_staking_raw_message() {
        let err = StakingError::from(RpcError::new(-32000, "execution reverted: not owner"));
        assert_eq!(err.raw_message().as_deref(), Some("execution reverted: not owner"));

        let silent = StakingError::from(RpcError::new(-32000, "  "));
        assert_eq!(silent.raw_message(), None);
    }

    #[test]
    fn test_app_error_user_message() {
        let err: AppError = ConnectionError::UserRejectedRequest.into();
        assert_eq!(
            err.user_message(),
            "Please authorize this website to access your Ethereum account."
        );
    }
}
