//! # Eager Connect
//!
//! On page load the app tries, exactly once, to resume a session with an
//! injected wallet that already authorized the site. Until that attempt is
//! over the selector stays disabled and no provider listeners are attached.
//!
//! After the attempt, while nothing is connected, the injected provider is
//! watched passively: if the user unlocks or connects from the wallet side,
//! the app activates the injected connector on their behalf.

use tracing::{debug, info};

use crate::config::Config;
use crate::connection::{self, ConnectionState};
use crate::connector::{Activation, Connector};
use crate::provider::ProviderEvent;

/// Whether the eager reconnect has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EagerConnect {
    tried: bool,
}

impl EagerConnect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tried(&self) -> bool {
        self.tried
    }

    pub fn complete(&mut self) {
        self.tried = true;
    }

    /// A session established any other way also ends the attempt.
    pub fn observe(&mut self, state: &ConnectionState) {
        if !self.tried && state.active {
            self.tried = true;
        }
    }
}

/// Resume the injected session if the wallet already authorized us.
///
/// Failures are swallowed: a silent reconnect never surfaces an error.
pub async fn try_eager_connect(injected: &dyn Connector, config: &Config) -> Option<Activation> {
    if !injected.is_authorized().await {
        debug!("injected provider not authorized, skipping eager connect");
        return None;
    }
    match connection::activate(injected, config).await {
        Ok(activation) => {
            info!("resumed injected session");
            Some(activation)
        }
        Err(e) => {
            debug!(error = %e, "eager connect failed");
            None
        }
    }
}

/// Whether the passive injected-provider listeners should be attached.
pub fn should_listen_inactive(
    eager: EagerConnect,
    activating: bool,
    state: &ConnectionState,
    has_injected_provider: bool,
) -> bool {
    eager.tried() && !activating && !state.active && state.error.is_none() && has_injected_provider
}

/// Whether an event seen by the passive listener should activate the
/// injected connector.
pub fn inactive_event_triggers_activation(event: &ProviderEvent) -> bool {
    match event {
        ProviderEvent::Connect { .. } | ProviderEvent::ChainChanged(_) | ProviderEvent::NetworkChanged(_) => true,
        ProviderEvent::AccountsChanged(accounts) => !accounts.is_empty(),
        ProviderEvent::Disconnect => false,
    }
}
