//! # Session Controls
//!
//! Follow-up actions on a session once a connector is selected. Which ones
//! are offered depends on the connection state and on the capabilities the
//! active connector exposes.

use alloy_primitives::Address;
use tracing::{info, instrument, warn};

use crate::client::EthClient;
use crate::config::Config;
use crate::connection::{self, ConnectionState};
use crate::connector::{Activation, Connector};
use crate::error::{ConnectionError, StakingError};

/// Message signed by the "Sign Message" control.
pub const SIGN_MESSAGE: &str = "👋";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Deactivate,
    SignMessage,
    SwitchNetwork { target: u64 },
    Close { label: String },
}

impl SessionAction {
    pub fn label(&self) -> String {
        match self {
            SessionAction::Deactivate => "Deactivate".to_string(),
            SessionAction::SignMessage => "Sign Message".to_string(),
            SessionAction::SwitchNetwork { .. } => "Switch Networks".to_string(),
            SessionAction::Close { label } => label.clone(),
        }
    }
}

/// Controls to render for `connector` (the state's connector, if any).
pub fn available_actions(
    connector: Option<&dyn Connector>,
    state: &ConnectionState,
    has_provider: bool,
) -> Vec<SessionAction> {
    let mut actions = Vec::new();

    if state.active || state.has_error() {
        actions.push(SessionAction::Deactivate);
    }
    if has_provider && state.active && state.account.is_some() {
        actions.push(SessionAction::SignMessage);
    }

    let Some(connector) = connector else {
        return actions;
    };
    if let (Some(switch), Some(current)) = (connector.as_network_switch(), state.chain_id) {
        actions.push(SessionAction::SwitchNetwork {
            target: switch.switch_target(current),
        });
    }
    if let Some(close) = connector.as_explicit_close() {
        actions.push(SessionAction::Close {
            label: close.close_label(),
        });
    }
    actions
}

/// Move the session of `connector` to its switch target.
#[instrument(skip_all, fields(connector = %connector.kind()))]
pub async fn switch_network(
    connector: &dyn Connector,
    state: &ConnectionState,
    config: &Config,
) -> Result<Activation, ConnectionError> {
    let switch = connector.as_network_switch().ok_or_else(|| {
        ConnectionError::Unknown(format!("{} cannot switch networks", connector.name()))
    })?;
    let current = state.chain_id.unwrap_or(config.default_chain_id);
    let target = switch.switch_target(current);
    info!(from = current, to = target, "switching network");

    let activation = switch.switch_network(target).await?;
    connection::ensure_supported(activation, config)
}

/// End the wallet-side session of `connector`.
pub async fn close_session(connector: &dyn Connector) -> Result<(), ConnectionError> {
    let close = connector.as_explicit_close().ok_or_else(|| {
        ConnectionError::Unknown(format!("{} has no session to close", connector.name()))
    })?;
    close
        .close()
        .await
        .inspect_err(|e| warn!(connector = %connector.kind(), error = %e, "closing session failed"))?;
    connector.deactivate().await;
    Ok(())
}

/// Sign [`SIGN_MESSAGE`] with the connected account.
pub async fn sign_message(client: &EthClient, account: Option<Address>) -> Result<String, StakingError> {
    let account = account.ok_or(StakingError::NotConnected)?;
    let signature = client.personal_sign(account, SIGN_MESSAGE).await?;
    info!(%account, "message signed");
    Ok(signature)
}
