//! Concrete wallet connectors for the browser.
//!
//! - [`InjectedConnector`]: the extension-injected `window.ethereum`
//! - [`NetworkConnector`]: read-only HTTP JSON-RPC against configured endpoints
//! - [`ExternalConnector`]: every hosted or hardware wallet reached through its JS library

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::Request;
use lib_core::connector::{SupportsExplicitClose, SupportsNetworkSwitch};
use lib_core::error::RpcError;
use lib_core::{Activation, Config, ConnectionError, Connector, ConnectorKind, ConnectorRegistry, Eip1193, EthClient};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::services::ethereum::{injected_provider, is_missing_provider, WalletSession};

/// Read accounts and chain from a freshly opened provider.
async fn activation_from(provider: Rc<dyn Eip1193>) -> Result<Activation, ConnectionError> {
    let client = EthClient::new(provider.clone());
    let accounts = client.request_accounts().await?;
    let chain_id = client.chain_id().await?;
    Ok(Activation {
        provider,
        account: accounts.first().copied(),
        chain_id,
    })
}

// ============================================================================
// INJECTED
// ============================================================================

pub struct InjectedConnector;

#[async_trait(?Send)]
impl Connector for InjectedConnector {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Injected
    }

    async fn activate(&self) -> Result<Activation, ConnectionError> {
        let provider = injected_provider().ok_or(ConnectionError::NoEthereumProvider)?;
        activation_from(Rc::new(provider)).await
    }

    async fn is_authorized(&self) -> bool {
        let Some(provider) = injected_provider() else {
            return false;
        };
        EthClient::new(Rc::new(provider))
            .accounts()
            .await
            .map(|accounts| !accounts.is_empty())
            .unwrap_or(false)
    }
}

// ============================================================================
// NETWORK (HTTP JSON-RPC)
// ============================================================================

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// EIP-1193 over plain HTTP JSON-RPC.
pub struct HttpProvider {
    url: String,
    next_id: Cell<u64>,
}

impl HttpProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            next_id: Cell::new(1),
        }
    }
}

#[async_trait(?Send)]
impl Eip1193 for HttpProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        let response = Request::post(&self.url)
            .json(&body)
            .map_err(|e| RpcError::internal(e.to_string()))?
            .send()
            .await
            .map_err(|e| RpcError::internal(e.to_string()))?;
        if !response.ok() {
            return Err(RpcError::internal(format!("{} returned HTTP {}", method, response.status())));
        }

        let payload: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::internal(e.to_string()))?;
        match payload.error {
            Some(err) => Err(err),
            None => Ok(payload.result.unwrap_or(Value::Null)),
        }
    }
}

/// Read-only connector with no account, switchable between mainnet and Rinkeby.
pub struct NetworkConnector {
    rpc_urls: BTreeMap<u64, String>,
    chain_id: Cell<u64>,
}

impl NetworkConnector {
    pub fn new(config: &Config) -> Self {
        Self {
            rpc_urls: config.rpc_urls.clone(),
            chain_id: Cell::new(config.default_chain_id),
        }
    }

    async fn connect(&self, chain_id: u64) -> Result<Activation, ConnectionError> {
        let url = self
            .rpc_urls
            .get(&chain_id)
            .ok_or_else(|| ConnectionError::Unknown(format!("no RPC URL configured for chain {}", chain_id)))?;
        let provider: Rc<dyn Eip1193> = Rc::new(HttpProvider::new(url.clone()));
        let reported = EthClient::new(provider.clone()).chain_id().await?;
        self.chain_id.set(chain_id);
        Ok(Activation {
            provider,
            account: None,
            chain_id: reported,
        })
    }
}

#[async_trait(?Send)]
impl Connector for NetworkConnector {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Network
    }

    async fn activate(&self) -> Result<Activation, ConnectionError> {
        self.connect(self.chain_id.get()).await
    }

    fn as_network_switch(&self) -> Option<&dyn SupportsNetworkSwitch> {
        Some(self)
    }
}

#[async_trait(?Send)]
impl SupportsNetworkSwitch for NetworkConnector {
    fn switch_target(&self, current: u64) -> u64 {
        if current == 1 {
            4
        } else {
            1
        }
    }

    async fn switch_network(&self, chain_id: u64) -> Result<Activation, ConnectionError> {
        self.connect(chain_id).await
    }
}

// ============================================================================
// HOSTED AND HARDWARE WALLETS
// ============================================================================

/// A wallet whose provider comes from a JavaScript library session.
pub struct ExternalConnector {
    kind: ConnectorKind,
    options: Value,
    rpc_urls: Value,
    chain_id: u64,
    session: RefCell<Option<WalletSession>>,
}

impl ExternalConnector {
    pub fn new(kind: ConnectorKind, config: &Config) -> Self {
        Self {
            kind,
            options: config.connector_options(kind),
            rpc_urls: serde_json::to_value(&config.rpc_urls).unwrap_or(Value::Null),
            chain_id: config.default_chain_id,
            session: RefCell::new(None),
        }
    }

    fn current_session(&self) -> Result<WalletSession, ConnectionError> {
        self.session
            .borrow()
            .clone()
            .ok_or_else(|| ConnectionError::Unknown(format!("{} is not connected", self.kind)))
    }

    fn closable(&self) -> bool {
        matches!(
            self.kind,
            ConnectorKind::WalletConnect
                | ConnectorKind::WalletLink
                | ConnectorKind::Authereum
                | ConnectorKind::Fortmatic
                | ConnectorKind::Magic
                | ConnectorKind::Portis
                | ConnectorKind::Torus
        )
    }
}

fn session_error(err: RpcError) -> ConnectionError {
    if is_missing_provider(&err) {
        log::warn!("{}", err.message);
        ConnectionError::NoEthereumProvider
    } else {
        ConnectionError::from(err)
    }
}

#[async_trait(?Send)]
impl Connector for ExternalConnector {
    fn kind(&self) -> ConnectorKind {
        self.kind
    }

    async fn activate(&self) -> Result<Activation, ConnectionError> {
        let session = WalletSession::open(self.kind.slug(), &self.options, &self.rpc_urls, self.chain_id)
            .await
            .map_err(session_error)?;
        let provider = session.provider().map_err(session_error)?;
        let activation = activation_from(Rc::new(provider)).await?;
        *self.session.borrow_mut() = Some(session);
        Ok(activation)
    }

    async fn deactivate(&self) {
        self.session.borrow_mut().take();
    }

    fn as_network_switch(&self) -> Option<&dyn SupportsNetworkSwitch> {
        (self.kind == ConnectorKind::Portis).then_some(self as &dyn SupportsNetworkSwitch)
    }

    fn as_explicit_close(&self) -> Option<&dyn SupportsExplicitClose> {
        self.closable().then_some(self as &dyn SupportsExplicitClose)
    }
}

#[async_trait(?Send)]
impl SupportsNetworkSwitch for ExternalConnector {
    /// Portis moves between mainnet and xDai.
    fn switch_target(&self, current: u64) -> u64 {
        if current == 100 {
            1
        } else {
            100
        }
    }

    async fn switch_network(&self, chain_id: u64) -> Result<Activation, ConnectionError> {
        let session = self.current_session()?;
        session.change_network(chain_id).await?;
        let provider = session.provider().map_err(session_error)?;
        activation_from(Rc::new(provider)).await
    }
}

#[async_trait(?Send)]
impl SupportsExplicitClose for ExternalConnector {
    fn close_label(&self) -> String {
        format!("Kill {} Session", self.kind.name())
    }

    async fn close(&self) -> Result<(), ConnectionError> {
        let session = self.current_session()?;
        session.close().await?;
        Ok(())
    }
}

/// Instantiate every enabled connector, in configured order.
pub fn build_registry(config: &Config) -> ConnectorRegistry {
    let mut registry = ConnectorRegistry::new();
    for kind in &config.enabled_connectors {
        let connector: Rc<dyn Connector> = match kind {
            ConnectorKind::Injected => Rc::new(InjectedConnector),
            ConnectorKind::Network => Rc::new(NetworkConnector::new(config)),
            other => Rc::new(ExternalConnector::new(*other, config)),
        };
        if let Err(e) = registry.register(connector) {
            log::warn!("Skipping connector: {}", e);
        }
    }
    log::info!("Registered {} wallet connectors", registry.len());
    registry
}
