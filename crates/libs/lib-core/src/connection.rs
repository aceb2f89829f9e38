//! # Connection State
//!
//! The state every component reads: which connector is in charge, the account
//! and chain it reported, whether the session is live and the last error.
//! It is plain data so the UI can keep it in a reactive signal; the provider
//! handle that goes with it lives next to it in the web context.
//!
//! State changes only through:
//!
//! - an activation outcome ([`ConnectionState::activated`] / [`ConnectionState::failed`])
//! - deactivation ([`ConnectionState::reset`])
//! - provider events while connected ([`ConnectionState::apply_event`])

use alloy_primitives::Address;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::connector::{Activation, Connector, ConnectorKind};
use crate::error::ConnectionError;
use crate::provider::ProviderEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub connector: Option<ConnectorKind>,
    pub chain_id: Option<u64>,
    pub account: Option<Address>,
    pub active: bool,
    pub error: Option<ConnectionError>,
}

/// What a provider event did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventEffect {
    Ignored,
    Updated,
    /// The wallet dropped the session; the connector should be deactivated.
    Deactivated,
}

impl ConnectionState {
    /// State after `kind` activated successfully.
    pub fn activated(kind: ConnectorKind, activation: &Activation) -> Self {
        Self {
            connector: Some(kind),
            chain_id: Some(activation.chain_id),
            account: activation.account,
            active: true,
            error: None,
        }
    }

    /// State after a manual activation of `kind` failed.
    pub fn failed(kind: ConnectorKind, error: ConnectionError) -> Self {
        Self {
            connector: Some(kind),
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_connector(&self, kind: ConnectorKind) -> bool {
        self.connector == Some(kind)
    }

    /// The connector that loses its session when `kind` takes over, if any.
    pub fn replaced_by(&self, kind: ConnectorKind) -> Option<ConnectorKind> {
        self.connector.filter(|current| *current != kind)
    }

    /// Whether the session provider's events should reach [`Self::apply_event`].
    ///
    /// A session parked on an unsupported chain still listens, so moving the
    /// wallet back to a supported chain revives it.
    pub fn wants_session_events(&self) -> bool {
        self.connector.is_some()
            && (self.active || matches!(self.error, Some(ConnectionError::UnsupportedChainId(_))))
    }

    /// Fold a provider event into the state of a live session. Events for an
    /// idle session are ignored; the bootstrapper handles those.
    pub fn apply_event(&mut self, event: &ProviderEvent, config: &Config) -> EventEffect {
        if !self.wants_session_events() {
            return EventEffect::Ignored;
        }
        match event {
            ProviderEvent::AccountsChanged(accounts) => match accounts.first() {
                Some(account) => {
                    debug!(%account, "account changed");
                    self.account = Some(*account);
                    EventEffect::Updated
                }
                None => {
                    info!("wallet reported no accounts, deactivating");
                    self.reset();
                    EventEffect::Deactivated
                }
            },
            ProviderEvent::ChainChanged(chain_id) | ProviderEvent::NetworkChanged(chain_id) => {
                self.apply_chain(*chain_id, config);
                EventEffect::Updated
            }
            ProviderEvent::Connect { chain_id: Some(chain_id) } => {
                self.apply_chain(*chain_id, config);
                EventEffect::Updated
            }
            ProviderEvent::Connect { chain_id: None } => EventEffect::Ignored,
            ProviderEvent::Disconnect => {
                info!("provider disconnected");
                self.reset();
                EventEffect::Deactivated
            }
        }
    }

    fn apply_chain(&mut self, chain_id: u64, config: &Config) {
        if config.is_supported_chain(chain_id) {
            self.chain_id = Some(chain_id);
            self.active = true;
            self.error = None;
        } else {
            warn!(chain_id, "switched to unsupported chain");
            self.chain_id = None;
            self.active = false;
            self.error = Some(ConnectionError::UnsupportedChainId(chain_id));
        }
    }
}

/// Counts activation attempts so a result that lands after the user moved
/// on (deactivated, or picked another connector) can be dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionEpoch(u64);

impl SessionEpoch {
    /// Start a new attempt and return its ticket. Outstanding tickets go stale.
    pub fn advance(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// Activate `connector` and check the chain it lands on.
#[instrument(skip_all, fields(connector = %connector.kind()))]
pub async fn activate(connector: &dyn Connector, config: &Config) -> Result<Activation, ConnectionError> {
    let activation = connector
        .activate()
        .await
        .inspect_err(|e| warn!(error = %e, "activation failed"))?;
    ensure_supported(activation, config)
}

/// Reject activations reporting a chain outside the configured set.
pub fn ensure_supported(activation: Activation, config: &Config) -> Result<Activation, ConnectionError> {
    if !config.is_supported_chain(activation.chain_id) {
        warn!(chain_id = activation.chain_id, "unsupported chain");
        return Err(ConnectionError::UnsupportedChainId(activation.chain_id));
    }
    info!(chain_id = activation.chain_id, account = ?activation.account, "activated");
    Ok(activation)
}
