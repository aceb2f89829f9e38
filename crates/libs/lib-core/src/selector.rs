//! Connector selector rules: which buttons are enabled and what they show.

use tracing::debug;

use crate::bootstrap::EagerConnect;
use crate::connection::ConnectionState;
use crate::connector::ConnectorKind;

/// The connector whose manual activation is in flight, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivatingMarker(Option<ConnectorKind>);

impl ActivatingMarker {
    pub fn begin(&mut self, kind: ConnectorKind) {
        debug!(connector = %kind, "activating");
        self.0 = Some(kind);
    }

    pub fn current(&self) -> Option<ConnectorKind> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Clear once the connection state names the connector being activated,
    /// which happens on success and on failure alike.
    pub fn sync(&mut self, state: &ConnectionState) {
        if self.0.is_some() && self.0 == state.connector {
            self.0 = None;
        }
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// How one selector button renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub disabled: bool,
    /// Show the spinner.
    pub activating: bool,
    /// Show the check mark.
    pub connected: bool,
}

pub fn button_state(
    kind: ConnectorKind,
    eager: EagerConnect,
    marker: ActivatingMarker,
    state: &ConnectionState,
) -> ButtonState {
    let current = state.is_connector(kind);
    ButtonState {
        disabled: !eager.tried() || marker.is_set() || current || state.has_error(),
        activating: marker.current() == Some(kind),
        connected: current && state.active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectionError;

    fn tried() -> EagerConnect {
        let mut eager = EagerConnect::new();
        eager.complete();
        eager
    }

    #[test]
    fn test_all_disabled_until_eager_connect_completes() {
        let state = ConnectionState::default();
        for kind in ConnectorKind::ALL {
            let button = button_state(kind, EagerConnect::new(), ActivatingMarker::default(), &state);
            assert!(button.disabled, "{} enabled before eager connect", kind);
        }
        for kind in ConnectorKind::ALL {
            assert!(!button_state(kind, tried(), ActivatingMarker::default(), &state).disabled);
        }
    }

    #[test]
    fn test_activation_in_flight_disables_everything() {
        let state = ConnectionState::default();
        let mut marker = ActivatingMarker::default();
        marker.begin(ConnectorKind::Portis);

        let portis = button_state(ConnectorKind::Portis, tried(), marker, &state);
        assert!(portis.disabled && portis.activating);
        let torus = button_state(ConnectorKind::Torus, tried(), marker, &state);
        assert!(torus.disabled && !torus.activating);
    }

    #[test]
    fn test_current_connector_and_error_disable() {
        let mut state = ConnectionState {
            connector: Some(ConnectorKind::Injected),
            chain_id: Some(1),
            active: true,
            ..ConnectionState::default()
        };
        let injected = button_state(ConnectorKind::Injected, tried(), ActivatingMarker::default(), &state);
        assert!(injected.disabled && injected.connected);
        assert!(!button_state(ConnectorKind::Network, tried(), ActivatingMarker::default(), &state).disabled);

        state = ConnectionState::failed(ConnectorKind::Injected, ConnectionError::NoEthereumProvider);
        assert!(button_state(ConnectorKind::Network, tried(), ActivatingMarker::default(), &state).disabled);
    }

    #[test]
    fn test_marker_clears_when_state_catches_up() {
        let mut marker = ActivatingMarker::default();
        marker.begin(ConnectorKind::WalletLink);

        marker.sync(&ConnectionState::default());
        assert_eq!(marker.current(), Some(ConnectorKind::WalletLink));

        marker.sync(&ConnectionState::failed(ConnectorKind::WalletLink, ConnectionError::UserRejectedRequest));
        assert_eq!(marker.current(), None);
    }
}
