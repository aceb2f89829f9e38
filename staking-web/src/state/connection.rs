//! Connection context
//!
//! One [`Web3Context`] is provided at the root of the app. It owns the
//! reactive connection state plus the non-`Send` handles (provider, connector
//! registry) that go with it, and is the only place that state changes.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_core::bootstrap::{self, EagerConnect};
use lib_core::connection::{self, EventEffect, SessionEpoch};
use lib_core::selector::ActivatingMarker;
use lib_core::{
    core_config, Activation, ConnectionError, ConnectionState, Connector, ConnectorKind,
    ConnectorRegistry, Eip1193, EthClient, EventSubscription, ProviderEvent,
};

use crate::services::ethereum::{injected_provider, subscribe, Subscription};

/// Global web3 context
#[derive(Clone, Copy)]
pub struct Web3Context {
    pub state: RwSignal<ConnectionState>,
    pub eager: RwSignal<EagerConnect>,
    pub activating: RwSignal<ActivatingMarker>,
    epoch: StoredValue<SessionEpoch>,
    provider: StoredValue<Option<Rc<dyn Eip1193>>, LocalStorage>,
    registry: StoredValue<ConnectorRegistry, LocalStorage>,
}

impl Web3Context {
    pub fn new(registry: ConnectorRegistry) -> Self {
        Self {
            state: RwSignal::new(ConnectionState::default()),
            eager: RwSignal::new(EagerConnect::new()),
            activating: RwSignal::new(ActivatingMarker::default()),
            epoch: StoredValue::new(SessionEpoch::default()),
            provider: StoredValue::new_local(None),
            registry: StoredValue::new_local(registry),
        }
    }

    /// `(kind, name)` of every registered connector, in display order.
    pub fn connectors(&self) -> Vec<(ConnectorKind, &'static str)> {
        self.registry.with_value(ConnectorRegistry::list)
    }

    pub fn connector(&self, kind: ConnectorKind) -> Option<Rc<dyn Connector>> {
        self.registry.with_value(|registry| registry.get(kind))
    }

    /// The connector named by the connection state (tracked).
    pub fn current_connector(&self) -> Option<Rc<dyn Connector>> {
        let kind = self.state.with(|state| state.connector)?;
        self.connector(kind)
    }

    pub fn current_connector_untracked(&self) -> Option<Rc<dyn Connector>> {
        let kind = self.state.with_untracked(|state| state.connector)?;
        self.connector(kind)
    }

    pub fn provider(&self) -> Option<Rc<dyn Eip1193>> {
        self.provider.get_value()
    }

    pub fn client(&self) -> Option<EthClient> {
        self.provider().map(EthClient::new)
    }

    /// Manual activation from the selector.
    pub fn connect(&self, kind: ConnectorKind) {
        self.activating.update(|marker| marker.begin(kind));
        self.spawn_activation(kind);
    }

    /// Invalidate every activation still in flight and return the new ticket.
    fn next_ticket(&self) -> u64 {
        let mut ticket = 0;
        self.epoch.update_value(|epoch| ticket = epoch.advance());
        ticket
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.epoch.with_value(|epoch| epoch.is_current(ticket))
    }

    fn spawn_activation(&self, kind: ConnectorKind) {
        let Some(connector) = self.connector(kind) else {
            log::warn!("Connector {} is not registered", kind);
            self.activating.update(ActivatingMarker::clear);
            return;
        };
        let ticket = self.next_ticket();
        let ctx = *self;
        spawn_local(async move {
            let outcome = connection::activate(connector.as_ref(), core_config()).await;
            if !ctx.is_current(ticket) {
                log::debug!("Dropping stale {} activation", kind);
                return;
            }
            match outcome {
                Ok(activation) => ctx.apply_activation(kind, activation),
                Err(e) => ctx.apply_failure(kind, e),
            }
        });
    }

    pub fn apply_activation(&self, kind: ConnectorKind, activation: Activation) {
        log::info!("{} connected on chain {}", kind, activation.chain_id);
        self.release_previous(kind);
        let state = ConnectionState::activated(kind, &activation);
        self.provider.set_value(Some(activation.provider));
        self.set_state(state);
    }

    pub fn apply_failure(&self, kind: ConnectorKind, error: ConnectionError) {
        log::error!("{} activation failed: {}", kind, error);
        self.release_previous(kind);
        self.provider.set_value(None);
        self.set_state(ConnectionState::failed(kind, error));
    }

    /// Let go of the session held by another connector before `kind` takes over.
    fn release_previous(&self, kind: ConnectorKind) {
        let previous = self.state.with_untracked(|state| state.replaced_by(kind));
        if previous.is_some() {
            self.spawn_connector_deactivate(previous);
        }
    }

    fn set_state(&self, state: ConnectionState) {
        self.activating.update(|marker| marker.sync(&state));
        if state.active && !self.eager.get_untracked().tried() {
            self.eager.update(|eager| eager.observe(&state));
        }
        self.state.set(state);
    }

    /// Drop the session locally; the wallet-side session is left alone.
    pub fn deactivate(&self) {
        self.next_ticket();
        let kind = self.state.with_untracked(|state| state.connector);
        self.provider.set_value(None);
        self.activating.update(ActivatingMarker::clear);
        self.state.set(ConnectionState::default());
        self.spawn_connector_deactivate(kind);
    }

    fn spawn_connector_deactivate(&self, kind: Option<ConnectorKind>) {
        if let Some(connector) = kind.and_then(|kind| self.connector(kind)) {
            spawn_local(async move { connector.deactivate().await });
        }
    }

    pub fn handle_event(&self, event: ProviderEvent) {
        let kind = self.state.with_untracked(|state| state.connector);
        let mut effect = EventEffect::Ignored;
        self.state.update(|state| effect = state.apply_event(&event, core_config()));
        if effect == EventEffect::Deactivated {
            self.provider.set_value(None);
            self.spawn_connector_deactivate(kind);
        }
    }

    /// Try to resume an authorized injected session, once.
    pub fn start_eager_connect(&self) {
        let Some(injected) = self.connector(ConnectorKind::Injected) else {
            self.eager.update(EagerConnect::complete);
            return;
        };
        let ticket = self.next_ticket();
        let ctx = *self;
        spawn_local(async move {
            if let Some(activation) = bootstrap::try_eager_connect(injected.as_ref(), core_config()).await {
                if ctx.is_current(ticket) {
                    ctx.apply_activation(ConnectorKind::Injected, activation);
                }
            }
            ctx.eager.update(EagerConnect::complete);
        });
    }

    /// Keep provider listeners attached while they are wanted: the passive
    /// injected ones while idle, the session provider's while a session lives.
    pub fn watch_provider_events(&self) {
        let ctx = *self;
        let passive: StoredValue<Option<Subscription>, LocalStorage> = StoredValue::new_local(None);
        let live: StoredValue<Option<(Rc<dyn Eip1193>, EventSubscription)>, LocalStorage> =
            StoredValue::new_local(None);

        Effect::new(move |_| {
            let eager = ctx.eager.get();
            let activating = ctx.activating.with(ActivatingMarker::is_set);
            let has_injected = injected_provider().is_some();
            let (listen_live, listen_passive) = ctx.state.with(|state| {
                (
                    state.wants_session_events(),
                    bootstrap::should_listen_inactive(eager, activating, state, has_injected),
                )
            });

            if !listen_passive {
                passive.set_value(None);
            } else if passive.with_value(Option::is_none) {
                if let Some(provider) = injected_provider() {
                    log::debug!("Watching injected provider while disconnected");
                    passive.set_value(Some(subscribe(&provider, move |event| {
                        if bootstrap::inactive_event_triggers_activation(&event) {
                            log::info!("Injected provider event {:?}, activating", event);
                            ctx.spawn_activation(ConnectorKind::Injected);
                        }
                    })));
                }
            }

            match ctx.provider() {
                Some(provider) if listen_live => {
                    let attached = live.with_value(|live| {
                        live.as_ref()
                            .is_some_and(|(current, _)| Rc::ptr_eq(current, &provider))
                    });
                    if !attached {
                        let subscription = provider.subscribe(Box::new(move |event| ctx.handle_event(event)));
                        live.set_value(subscription.map(|subscription| (provider, subscription)));
                    }
                }
                _ => live.set_value(None),
            }
        });
    }
}

pub fn provide_web3_context(registry: ConnectorRegistry) -> Web3Context {
    let context = Web3Context::new(registry);
    provide_context(context);
    context
}

pub fn use_web3_context() -> Web3Context {
    expect_context::<Web3Context>()
}
